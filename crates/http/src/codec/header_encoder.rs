//! Encodes a status line and header block for an outgoing response.
//!
//! Responses are always written as HTTP/1.1 regardless of the request's
//! version token; only the framing strategy (Content-Length /
//! Transfer-Encoding / neither, for connection-close framing) varies.

use crate::protocol::{BodyFraming, SendError};
use bytes::{BufMut, BytesMut};
use http::{HeaderMap, StatusCode, header};
use std::io::Write;

const INIT_HEADER_SIZE: usize = 4 * 1024;

#[derive(Debug, Default)]
pub struct HeaderEncoder;

impl HeaderEncoder {
    pub fn encode(&mut self, status: StatusCode, mut headers: HeaderMap, framing: BodyFraming, dst: &mut BytesMut) -> Result<(), SendError> {
        dst.reserve(INIT_HEADER_SIZE);

        let reason = status.canonical_reason().unwrap_or("");
        write!(FastWrite(dst), "HTTP/1.1 {} {}\r\n", status.as_str(), reason).map_err(SendError::io)?;

        match framing {
            BodyFraming::Length(n) => {
                headers.insert(header::CONTENT_LENGTH, n.into());
            }
            BodyFraming::Chunked => {
                headers.insert(header::TRANSFER_ENCODING, http::HeaderValue::from_static("chunked"));
            }
            BodyFraming::Close => {
                headers.remove(header::CONTENT_LENGTH);
                headers.remove(header::TRANSFER_ENCODING);
            }
            BodyFraming::Empty => {
                headers.insert(header::CONTENT_LENGTH, 0.into());
            }
        }

        for (name, value) in &headers {
            dst.put_slice(name.as_ref());
            dst.put_slice(b": ");
            dst.put_slice(value.as_ref());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_status_line_and_content_length() {
        let mut encoder = HeaderEncoder;
        let mut buf = BytesMut::new();
        encoder.encode(StatusCode::OK, HeaderMap::new(), BodyFraming::Length(5), &mut buf).unwrap();
        let text = String::from_utf8(buf.to_vec()).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("content-length: 5\r\n"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn close_framing_omits_length_and_transfer_encoding() {
        let mut encoder = HeaderEncoder;
        let mut buf = BytesMut::new();
        encoder.encode(StatusCode::OK, HeaderMap::new(), BodyFraming::Close, &mut buf).unwrap();
        let text = String::from_utf8(buf.to_vec()).unwrap();
        assert!(!text.contains("content-length"));
        assert!(!text.contains("transfer-encoding"));
    }
}
