//! Decodes incoming HTTP responses on the client side: status line, headers,
//! then payload.
//!
//! Body framing falls back to connection-close only below HTTP/1.1 or when
//! `Connection: close` is present; see [`response_framing`].

use crate::codec::body::PayloadDecoder;
use crate::codec::framing::response_framing;
use crate::codec::start_line::{parse_headers, parse_status_line, split_head};
use crate::protocol::{BodyFraming, Message, ParseError, PayloadItem, ResponseHead};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

#[derive(Debug, Default)]
pub struct ResponseDecoder {
    payload_decoder: Option<PayloadDecoder>,
}

impl ResponseDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for ResponseDecoder {
    type Item = Message<(ResponseHead, BodyFraming)>;
    type Error = ParseError;

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(payload_decoder) = &mut self.payload_decoder {
            let message = match payload_decoder.decode_eof(src)? {
                Some(item @ PayloadItem::Chunk(_)) => Some(Message::Payload(item)),
                Some(item @ PayloadItem::Eof) => {
                    self.payload_decoder.take();
                    Some(Message::Payload(item))
                }
                None => None,
            };
            return Ok(message);
        }

        self.decode(src)
    }

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

        let status_line = parse_status_line(&start_line)?;
        let headers = parse_headers(&header_lines)?;
        let framing = response_framing(&headers, &status_line.version)?;

        let head = ResponseHead::new(status_line.version, status_line.status_code, headers);
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
    fn decodes_length_framed_response() {
        let mut decoder = ResponseDecoder::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nhi"[..]);

        let Message::Header((head, framing)) = decoder.decode(&mut buf).unwrap().unwrap() else { panic!("expected header") };
        assert_eq!(head.status_code(), "200 OK");
        assert_eq!(framing, BodyFraming::Length(2));

        let Message::Payload(item) = decoder.decode(&mut buf).unwrap().unwrap() else { panic!("expected chunk") };
        assert_eq!(item.into_bytes().unwrap(), "hi");
    }

    #[test]
    fn no_framing_header_and_1_1_without_close_is_empty() {
        let mut decoder = ResponseDecoder::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\n\r\n"[..]);
        let Message::Header((_, framing)) = decoder.decode(&mut buf).unwrap().unwrap() else { panic!("expected header") };
        assert_eq!(framing, BodyFraming::Empty);
    }

    #[test]
    fn no_content_length_falls_back_to_close_framing_below_1_1() {
        let mut decoder = ResponseDecoder::new();
        let mut buf = BytesMut::from(&b"HTTP/1.0 200 OK\r\n\r\nthe rest of the body"[..]);
        let Message::Header((_, framing)) = decoder.decode(&mut buf).unwrap().unwrap() else { panic!("expected header") };
        assert_eq!(framing, BodyFraming::Close);

        let Message::Payload(item) = decoder.decode(&mut buf).unwrap().unwrap() else { panic!("expected chunk") };
        assert_eq!(item.into_bytes().unwrap(), "the rest of the body");

        let Message::Payload(item) = decoder.decode_eof(&mut buf).unwrap().unwrap() else { panic!("expected eof") };
        assert!(item.is_eof());
    }

    #[test]
    fn connection_close_forces_close_framing_at_1_1() {
        let mut decoder = ResponseDecoder::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\nConnection: close\r\n\r\nremainder"[..]);
        let Message::Header((_, framing)) = decoder.decode(&mut buf).unwrap().unwrap() else { panic!("expected header") };
        assert_eq!(framing, BodyFraming::Close);

        let Message::Payload(item) = decoder.decode(&mut buf).unwrap().unwrap() else { panic!("expected chunk") };
        assert_eq!(item.into_bytes().unwrap(), "remainder");
    }

    #[test]
    fn status_without_reason_phrase_parses() {
        let mut decoder = ResponseDecoder::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 204\r\n\r\n"[..]);
        let Message::Header((_, framing)) = decoder.decode(&mut buf).unwrap().unwrap() else { panic!("expected header") };
        assert_eq!(framing, BodyFraming::Empty);
    }
}
