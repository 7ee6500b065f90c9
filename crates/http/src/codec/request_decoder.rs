//! Decodes incoming HTTP requests: request line, headers, then payload.
//!
//! The decoder operates in two phases tracked by `payload_decoder`: `None`
//! while parsing the head, `Some(_)` while streaming the body that phase's
//! framing selected.

use crate::codec::body::PayloadDecoder;
use crate::codec::framing::request_framing;
use crate::codec::start_line::{parse_headers, parse_request_line, split_head};
use crate::protocol::{BodyFraming, Message, ParseError, PayloadItem, RequestHead};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

#[derive(Debug, Default)]
pub struct RequestDecoder {
    payload_decoder: Option<PayloadDecoder>,
}

impl RequestDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for RequestDecoder {
    type Item = Message<(RequestHead, BodyFraming)>;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(payload_decoder) = &mut self.payload_decoder {
            let message = match payload_decoder.decode(src)? {
                Some(item @ PayloadItem::Chunk(_)) => Some(Message::Payload(item)),
                Some(item @ PayloadItem::Eof) => {
                    self.payload_decoder.take();
                    Some(Message::Payload(item))
                }
                None => None,
            };
            return Ok(message);
        }

        let Some((start_line, header_lines)) = split_head(src)? else {
            return Ok(None);
        };

        let request_line = parse_request_line(&start_line)?;
        let headers = parse_headers(&header_lines)?;
        let framing = request_framing(&headers)?;

        let head = RequestHead::new(request_line.method, request_line.target, request_line.version, headers);
        self.payload_decoder = Some(match framing {
            BodyFraming::Length(len) => PayloadDecoder::fix_length(len),
            BodyFraming::Chunked => PayloadDecoder::chunked(),
            BodyFraming::Close => PayloadDecoder::close(),
            BodyFraming::Empty => PayloadDecoder::empty(),
        });

        Ok(Some(Message::Header((head, framing))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_head_then_empty_body_eof() {
        let mut decoder = RequestDecoder::new();
        let mut buf = BytesMut::from(&b"GET /ping HTTP/1.1\r\nHost: a\r\n\r\n"[..]);

        let Message::Header((head, framing)) = decoder.decode(&mut buf).unwrap().unwrap() else { panic!("expected header") };
        assert_eq!(head.target(), "/ping");
        assert_eq!(framing, BodyFraming::Empty);

        let Message::Payload(item) = decoder.decode(&mut buf).unwrap().unwrap() else { panic!("expected payload") };
        assert!(item.is_eof());
    }

    #[test]
    fn decodes_head_then_length_framed_body() {
        let mut decoder = RequestDecoder::new();
        let mut buf = BytesMut::from(&b"POST /echo HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello"[..]);

        let Message::Header((_, framing)) = decoder.decode(&mut buf).unwrap().unwrap() else { panic!("expected header") };
        assert_eq!(framing, BodyFraming::Length(5));

        let Message::Payload(item) = decoder.decode(&mut buf).unwrap().unwrap() else { panic!("expected chunk") };
        assert_eq!(item.into_bytes().unwrap(), "hello");
    }

    #[test]
    fn rejects_ambiguous_framing() {
        let mut decoder = RequestDecoder::new();
        let mut buf = BytesMut::from(&b"POST / HTTP/1.1\r\nContent-Length: 5\r\nTransfer-Encoding: chunked\r\n\r\n"[..]);
        assert!(matches!(decoder.decode(&mut buf), Err(ParseError::AmbiguousFraming)));
    }

    #[test]
    fn rejects_malformed_request_line() {
        let mut decoder = RequestDecoder::new();
        let mut buf = BytesMut::from(&b"GET / HTCP/1.1\r\n\r\n"[..]);
        assert!(decoder.decode(&mut buf).is_err());
    }

    #[test]
    fn returns_none_until_header_block_complete() {
        let mut decoder = RequestDecoder::new();
        let mut buf = BytesMut::from(&b"GET / HTTP/1.1\r\nHost: a\r\n"[..]);
        assert!(decoder.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn request_line_version_carries_no_trailing_cr() {
        let mut decoder = RequestDecoder::new();
        let mut buf = BytesMut::from(&b"GET / HTTP/1.1\r\nHost: a\r\n\r\n"[..]);
        let Message::Header((head, _)) = decoder.decode(&mut buf).unwrap().unwrap() else { panic!("expected header") };
        assert_eq!(head.version(), "1.1");
    }
}
