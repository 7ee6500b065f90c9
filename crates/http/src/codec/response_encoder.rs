//! Encodes outgoing HTTP responses: status line and headers, then payload.

use crate::codec::body::PayloadEncoder;
use crate::codec::header_encoder::HeaderEncoder;
use crate::protocol::{BodyFraming, Message, SendError};
use bytes::{Buf, BytesMut};
use http::{HeaderMap, StatusCode};
use std::io;
use std::io::ErrorKind;
use tokio_util::codec::Encoder;
use tracing::error;

/// The head of an outgoing response: status code, headers, and the framing
/// strategy chosen for its body.
pub type ResponseHeadOut = (StatusCode, HeaderMap, BodyFraming);

#[derive(Debug, Default)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
    payload_encoder: Option<PayloadEncoder>,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: Buf> Encoder<Message<ResponseHeadOut, D>> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: Message<ResponseHeadOut, D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            Message::Header((status, headers, framing)) => {
                if self.payload_encoder.is_some() {
                    error!("expected payload item but received response head");
                    return Err(io::Error::from(ErrorKind::InvalidInput).into());
                }

                self.payload_encoder = Some(parse_payload_encoder(framing));
                self.header_encoder.encode(status, headers, framing, dst)
            }

            Message::Payload(payload_item) => {
                let Some(payload_encoder) = &mut self.payload_encoder else {
                    error!("expected response header but received payload item");
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

fn parse_payload_encoder(framing: BodyFraming) -> PayloadEncoder {
    match framing {
        BodyFraming::Length(size) => PayloadEncoder::fix_length(size),
        BodyFraming::Chunked => PayloadEncoder::chunked(),
        BodyFraming::Close => PayloadEncoder::close(),
        BodyFraming::Empty => PayloadEncoder::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PayloadItem;
    use bytes::Bytes;

    #[test]
    fn encodes_head_then_body_then_eof() {
        let mut encoder = ResponseEncoder::new();
        let mut buf = BytesMut::new();

        encoder.encode(Message::Header((StatusCode::OK, HeaderMap::new(), BodyFraming::Length(5))), &mut buf).unwrap();
        encoder.encode(Message::Payload(PayloadItem::Chunk(Bytes::from_static(b"hello"))), &mut buf).unwrap();
        encoder.encode(Message::Payload(PayloadItem::Eof), &mut buf).unwrap();

        let text = String::from_utf8(buf.to_vec()).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.ends_with("hello"));
    }

    #[test]
    fn rejects_payload_before_head() {
        let mut encoder = ResponseEncoder::new();
        let mut buf = BytesMut::new();
        let result: Result<(), SendError> = encoder.encode(Message::Payload(PayloadItem::Eof), &mut buf);
        assert!(result.is_err());
    }
}
