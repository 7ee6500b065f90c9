//! The per-connection request pipeline: read a request, dispatch it to the
//! handler table, write the response, then decide whether to read another
//! request off the same socket or close it.

use crate::codec::{RequestDecoder, ResponseEncoder, wants_close, wants_keep_alive};
use crate::handler::HandlerTable;
use crate::protocol::{BodyFraming, HttpError, Message, PayloadItem, RequestHead, version};
use crate::server::config::ServerConfig;
use crate::server::message::{Request, Response};
use crate::transport::with_deadline;
use bytes::BytesMut;
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, warn};

/// Drives one accepted connection through as many keep-alive request/response
/// cycles as the client and response framing allow.
pub async fn serve(stream: TcpStream, remote_addr: SocketAddr, handlers: Arc<HandlerTable>, config: Arc<ServerConfig>) -> Result<(), HttpError> {
    let (read_half, write_half) = stream.into_split();
    let mut framed_read = FramedRead::with_capacity(read_half, RequestDecoder::new(), 8 * 1024);
    let mut framed_write = FramedWrite::new(write_half, ResponseEncoder::new());

    loop {
        let head = match with_deadline(config.request_timeout, "read request head", async { framed_read.next().await.transpose() }).await? {
            Some(Message::Header((head, framing))) => (head, framing),
            Some(Message::Payload(_)) => {
                warn!("received payload before a request head, closing connection");
                return Ok(());
            }
            None => {
                debug!("connection closed by peer");
                return Ok(());
            }
        };

        let (head, _framing): (RequestHead, BodyFraming) = head;
        let body = with_deadline(config.content_timeout, "read request body", read_body(&mut framed_read)).await?;

        let keep_alive = decide_keep_alive(&head);

        let request = Request::new(head.method().clone(), head.target().to_string(), head.version().to_string(), head.headers().clone(), body, remote_addr);

        let Some(handler) = handlers.resolve(request.method()) else {
            info!(method = %request.method(), target = request.target(), "no handler registered, dropping connection");
            return Ok(());
        };

        let response = handler.call(request, Response::new()).await?;
        let close_after_response = response.will_close_connection();
        with_deadline(config.content_timeout, "write response", write_response(&mut framed_write, response)).await?;

        if close_after_response || !keep_alive {
            return Ok(());
        }
    }
}

async fn read_body<R>(framed_read: &mut FramedRead<R, RequestDecoder>) -> Result<bytes::Bytes, HttpError>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut body = BytesMut::new();
    loop {
        match framed_read.next().await.transpose()? {
            Some(Message::Payload(PayloadItem::Chunk(chunk))) => body.extend_from_slice(&chunk),
            Some(Message::Payload(PayloadItem::Eof)) => return Ok(body.freeze()),
            Some(Message::Header(_)) => return Err(crate::protocol::ParseError::invalid_body("unexpected head while reading body").into()),
            None => return Err(crate::protocol::TransportError::Io(std::io::Error::from(std::io::ErrorKind::UnexpectedEof)).into()),
        }
    }
}

async fn write_response<W>(framed_write: &mut FramedWrite<W, ResponseEncoder>, response: Response) -> Result<(), HttpError>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    let (status, headers, body, close_after) = response.into_parts();
    let framing = if close_after { BodyFraming::Close } else { BodyFraming::Length(body.len() as u64) };

    framed_write.send(Message::Header((status, headers, framing))).await?;
    if !body.is_empty() {
        framed_write.send(Message::Payload(PayloadItem::Chunk(body))).await?;
    }
    framed_write.send(Message::Payload(PayloadItem::Eof)).await?;
    framed_write.flush().await.map_err(crate::protocol::SendError::io)?;
    Ok(())
}

fn decide_keep_alive(head: &RequestHead) -> bool {
    if wants_close(head.headers()) {
        return false;
    }
    if wants_keep_alive(head.headers()) {
        return true;
    }
    version::at_least(head.version(), "1.1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;

    fn head(version: &str, headers: HeaderMap) -> RequestHead {
        RequestHead::new(http::Method::GET, "/".to_string(), version.to_string(), headers)
    }

    #[test]
    fn http_1_1_defaults_to_keep_alive() {
        assert!(decide_keep_alive(&head("1.1", HeaderMap::new())));
    }

    #[test]
    fn http_1_0_defaults_to_close() {
        assert!(!decide_keep_alive(&head("1.0", HeaderMap::new())));
    }

    #[test]
    fn connection_close_header_overrides_version() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("close"));
        assert!(!decide_keep_alive(&head("1.1", headers)));
    }

    #[test]
    fn connection_keep_alive_header_overrides_1_0_default() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));
        assert!(decide_keep_alive(&head("1.0", headers)));
    }
}
