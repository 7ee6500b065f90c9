//! Encodes outgoing HTTP requests: request line and headers, then payload.
//!
//! Requests are always written as HTTP/1.1. The request-target is taken
//! as-is, so a caller that wants proxy absolute-form simply builds that
//! string itself before handing it to the encoder.

use crate::codec::body::PayloadEncoder;
use crate::protocol::{BodyFraming, Message, SendError};
use bytes::{Buf, BufMut, BytesMut};
use http::{HeaderMap, Method, header};
use std::io;
use std::io::ErrorKind;
use tokio_util::codec::Encoder;
use tracing::error;

const INIT_HEADER_SIZE: usize = 1024;

/// The head of an outgoing request: method, request-target, headers, and the
/// framing strategy chosen for its body.
pub type RequestHeadOut = (Method, String, HeaderMap, BodyFraming);

#[derive(Debug, Default)]
pub struct RequestEncoder {
    payload_encoder: Option<PayloadEncoder>,
}

impl RequestEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: Buf> Encoder<Message<RequestHeadOut, D>> for RequestEncoder {
    type Error = SendError;

    fn encode(&mut self, item: Message<RequestHeadOut, D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            Message::Header((method, target, mut headers, framing)) => {
                if self.payload_encoder.is_some() {
                    error!("expected payload item but received request head");
                    return Err(io::Error::from(ErrorKind::InvalidInput).into());
                }

                dst.reserve(INIT_HEADER_SIZE);
                dst.put_slice(method.as_str().as_bytes());
                dst.put_slice(b" ");
                dst.put_slice(target.as_bytes());
                dst.put_slice(b" HTTP/1.1\r\n");

                match framing {
                    BodyFraming::Length(n) => {
                        headers.insert(header::CONTENT_LENGTH, n.into());
                    }
                    BodyFraming::Chunked => {
                        headers.insert(header::TRANSFER_ENCODING, http::HeaderValue::from_static("chunked"));
                    }
                    BodyFraming::Close | BodyFraming::Empty => {}
                }

                for (name, value) in &headers {
                    dst.put_slice(name.as_ref());
                    dst.put_slice(b": ");
                    dst.put_slice(value.as_ref());
                    dst.put_slice(b"\r\n");
                }
                dst.put_slice(b"\r\n");

                self.payload_encoder = Some(match framing {
                    BodyFraming::Length(size) => PayloadEncoder::fix_length(size),
                    BodyFraming::Chunked => PayloadEncoder::chunked(),
                    BodyFraming::Close => PayloadEncoder::close(),
                    BodyFraming::Empty => PayloadEncoder::empty(),
                });
                Ok(())
            }

            Message::Payload(payload_item) => {
                let Some(payload_encoder) = &mut self.payload_encoder else {
                    error!("expected request head but received payload item");
                    return Err(io::Error::from(ErrorKind::InvalidInput).into());
                };

                let result = payload_encoder.encode(payload_item, dst);
                if payload_encoder.is_finish() {
                    self.payload_encoder.take();
                }
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PayloadItem;
    use bytes::Bytes;

    #[test]
    fn encodes_request_line_and_body() {
        let mut encoder = RequestEncoder::new();
        let mut buf = BytesMut::new();

        encoder.encode(Message::Header((Method::POST, "/echo".to_string(), HeaderMap::new(), BodyFraming::Length(5))), &mut buf).unwrap();
        encoder.encode(Message::Payload(PayloadItem::Chunk(Bytes::from_static(b"hello"))), &mut buf).unwrap();
        encoder.encode(Message::Payload(PayloadItem::Eof), &mut buf).unwrap();

        let text = String::from_utf8(buf.to_vec()).unwrap();
        assert!(text.starts_with("POST /echo HTTP/1.1\r\n"));
        assert!(text.contains("content-length: 5\r\n"));
        assert!(text.ends_with("hello"));
    }
}
