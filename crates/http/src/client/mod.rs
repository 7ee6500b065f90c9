//! The client engine: one request/response round trip per [`Client::request`]
//! call over a connection the client owns and reuses across calls while the
//! server keeps it alive.

mod config;
mod message;

pub use config::ClientConfig;
pub use message::{Request, Response};

use crate::codec::{RequestEncoder, RequestHeadOut, ResponseDecoder};
use crate::codec::{wants_close, wants_keep_alive};
use crate::protocol::{BodyFraming, HttpError, Message, PayloadItem, ResponseHead};
use crate::transport::{self, with_deadline};
use bytes::{Bytes, BytesMut};
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use tokio::net::TcpStream;
use tokio_util::codec::{FramedRead, FramedWrite};

/// Performs request/response round trips against one remote address,
/// reconnecting lazily after the peer closes the connection.
pub struct Client {
    addr: SocketAddr,
    config: ClientConfig,
    connection: Option<TcpStream>,
}

impl Client {
    pub fn new(addr: SocketAddr, config: ClientConfig) -> Self {
        Self { addr, config, connection: None }
    }

    /// Sends `req` and returns the fully-buffered response.
    pub async fn request(&mut self, req: Request) -> Result<Response, HttpError> {
        let connect_timeout = self.config.connect_timeout.or(self.config.timeout);
        let stream = match self.connection.take() {
            Some(stream) => stream,
            None => {
                let connect_addr = self.config.proxy_addr.unwrap_or(self.addr);
                transport::connect(connect_addr, connect_timeout).await?
            }
        };

        let (read_half, write_half) = stream.into_split();
        let mut framed_write = FramedWrite::new(write_half, RequestEncoder::new());
        let mut framed_read = FramedRead::with_capacity(read_half, ResponseDecoder::new(), 8 * 1024);

        let target = build_target(self.config.proxy_addr, self.addr, req.target);

        let mut headers = req.headers;
        if !headers.contains_key(http::header::HOST) {
            let value = http::HeaderValue::from_str(&self.addr.to_string()).map_err(crate::protocol::ParseError::invalid_header)?;
            headers.insert(http::header::HOST, value);
        }

        let framing = if req.body.is_empty() { BodyFraming::Empty } else { BodyFraming::Length(req.body.len() as u64) };
        let head: RequestHeadOut = (req.method, target, headers, framing);

        with_deadline(self.config.timeout, "write request", send_request(&mut framed_write, head, req.body)).await?;

        let (resp_head, body, should_close) = with_deadline(self.config.timeout, "read response", read_response(&mut framed_read)).await?;

        let write_half = framed_write.into_inner();
        let read_half = framed_read.into_inner();
        let stream = read_half.unsplit(write_half);

        if !should_close {
            self.connection = Some(stream);
        }

        Ok(Response::new(resp_head, body))
    }
}

/// Rewrites the request-target to absolute-form (`http://host:port/path`)
/// when a proxy is configured; otherwise passes it through unchanged.
fn build_target(proxy_addr: Option<SocketAddr>, addr: SocketAddr, target: String) -> String {
    match proxy_addr {
        Some(_) => format!("http://{addr}{target}"),
        None => target,
    }
}

async fn send_request<W>(framed_write: &mut FramedWrite<W, RequestEncoder>, head: RequestHeadOut, body: Bytes) -> Result<(), HttpError>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    framed_write.send(Message::Header(head)).await?;
    if !body.is_empty() {
        framed_write.send(Message::Payload(PayloadItem::Chunk(body))).await?;
    }
    framed_write.send(Message::Payload(PayloadItem::Eof)).await?;
    framed_write.flush().await.map_err(crate::protocol::SendError::io)?;
    Ok(())
}

async fn read_response<R>(framed_read: &mut FramedRead<R, ResponseDecoder>) -> Result<(ResponseHead, Bytes, bool), HttpError>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let Some(Message::Header((head, _framing))) = framed_read.next().await.transpose()? else {
        return Err(crate::protocol::TransportError::Io(std::io::Error::from(std::io::ErrorKind::UnexpectedEof)).into());
    };

    let mut body = BytesMut::new();
    loop {
        match framed_read.next().await.transpose()? {
            Some(Message::Payload(PayloadItem::Chunk(chunk))) => body.extend_from_slice(&chunk),
            Some(Message::Payload(PayloadItem::Eof)) => break,
            Some(Message::Header(_)) => return Err(crate::protocol::ParseError::invalid_body("unexpected head while reading body").into()),
            None => break,
        }
    }

    let should_close = wants_close(head.headers()) || (!crate::protocol::version::at_least(head.version(), "1.1") && !wants_keep_alive(head.headers()));

    Ok((head, body.freeze(), should_close))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{HandlerTable, make_handler};
    use crate::server::ServerConfig;
    use http::{Method, StatusCode};
    use std::future::ready;

    #[test]
    fn proxy_configured_rewrites_target_to_absolute_form() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let proxy: SocketAddr = "127.0.0.1:3128".parse().unwrap();
        assert_eq!(build_target(Some(proxy), addr, "/a".to_string()), "http://127.0.0.1:8080/a");
    }

    #[test]
    fn no_proxy_leaves_target_untouched() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        assert_eq!(build_target(None, addr, "/a".to_string()), "/a");
    }

    #[tokio::test]
    async fn round_trips_a_request_over_a_real_socket() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        listener.set_nonblocking(true).unwrap();
        let listener = tokio::net::TcpListener::from_std(listener).unwrap();

        let mut handlers = HandlerTable::new();
        handlers.register(
            Method::POST,
            make_handler(|req: crate::server::Request, mut resp: crate::server::Response| {
                resp.set_status(StatusCode::OK).write_body(req.body().clone());
                ready(Ok::<_, std::convert::Infallible>(resp))
            }),
        );

        let server_config = ServerConfig::new(addr);
        tokio::spawn(async move {
            let (stream, remote_addr) = listener.accept().await.unwrap();
            let handlers = std::sync::Arc::new(handlers);
            let config = std::sync::Arc::new(server_config);
            let _ = crate::server::connection_serve_for_tests(stream, remote_addr, handlers, config).await;
        });

        let mut client = Client::new(addr, ClientConfig::default());
        let req = Request::new(Method::POST, "/echo").with_body(Bytes::from_static(b"hello"));
        let resp = client.request(req).await.unwrap();
        assert_eq!(resp.status_code_number(), Some(200));
        assert_eq!(&resp.into_body()[..], b"hello");
    }
}
