//! Resolves [`BodyFraming`] from a parsed header block.
//!
//! Precedence, applied in order: Content-Length, then chunked
//! Transfer-Encoding, then (request side) no body / (response side)
//! connection-close framing. Both headers present at once is rejected rather
//! than silently preferring one.

use crate::protocol::{BodyFraming, ParseError, version};
use http::HeaderMap;
use http::header::{CONNECTION, CONTENT_LENGTH, TRANSFER_ENCODING};

/// Exact, case-sensitive comparison against `"chunked"` — no token splitting,
/// no case folding. A value like `"gzip, chunked"` or `"Chunked"` does not
/// count.
fn is_chunked(headers: &HeaderMap) -> bool {
    headers.get(TRANSFER_ENCODING).is_some_and(|value| value.as_bytes() == b"chunked")
}

fn content_length(headers: &HeaderMap) -> Result<Option<u64>, ParseError> {
    match headers.get(CONTENT_LENGTH) {
        None => Ok(None),
        Some(value) => {
            let text = value.to_str().map_err(ParseError::invalid_content_length)?;
            let length = text.trim().parse::<u64>().map_err(ParseError::invalid_content_length)?;
            Ok(Some(length))
        }
    }
}

/// Does a `Connection` header contain the `close` token?
pub fn wants_close(headers: &HeaderMap) -> bool {
    connection_has_token(headers, "close")
}

/// Does a `Connection` header contain the `keep-alive` token?
pub fn wants_keep_alive(headers: &HeaderMap) -> bool {
    connection_has_token(headers, "keep-alive")
}

fn connection_has_token(headers: &HeaderMap, token: &str) -> bool {
    headers.get(CONNECTION).and_then(|value| value.to_str().ok()).is_some_and(|value| value.split(',').any(|part| part.trim().eq_ignore_ascii_case(token)))
}

/// Resolves body framing for an incoming request. Requests never fall back
/// to connection-close framing: without Content-Length or chunked encoding
/// there is no body.
pub fn request_framing(headers: &HeaderMap) -> Result<BodyFraming, ParseError> {
    let chunked = is_chunked(headers);
    let length = content_length(headers)?;

    match (length, chunked) {
        (Some(_), true) => Err(ParseError::AmbiguousFraming),
        (Some(len), false) => Ok(BodyFraming::Length(len)),
        (None, true) => Ok(BodyFraming::Chunked),
        (None, false) => Ok(BodyFraming::Empty),
    }
}

/// Resolves body framing for an incoming response. Falls back to
/// connection-close framing, when neither Content-Length nor chunked
/// encoding is present, only if `version < "1.1"` or the headers carry
/// `Connection: close`; otherwise the body is empty.
pub fn response_framing(headers: &HeaderMap, version: &str) -> Result<BodyFraming, ParseError> {
    let chunked = is_chunked(headers);
    let length = content_length(headers)?;
    let close_fallback = !version::at_least(version, "1.1") || wants_close(headers);

    match (length, chunked) {
        (Some(_), true) => Err(ParseError::AmbiguousFraming),
        (Some(len), false) => Ok(BodyFraming::Length(len)),
        (None, true) => Ok(BodyFraming::Chunked),
        (None, false) if close_fallback => Ok(BodyFraming::Close),
        (None, false) => Ok(BodyFraming::Empty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn prefers_length_and_rejects_both_present() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("5"));
        headers.insert(TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        assert!(matches!(request_framing(&headers), Err(ParseError::AmbiguousFraming)));
    }

    #[test]
    fn requires_exact_case_sensitive_chunked_token() {
        let mut headers = HeaderMap::new();
        headers.insert(TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        assert_eq!(request_framing(&headers).unwrap(), BodyFraming::Chunked);

        let mut headers = HeaderMap::new();
        headers.insert(TRANSFER_ENCODING, HeaderValue::from_static("gzip, chunked"));
        assert_eq!(request_framing(&headers).unwrap(), BodyFraming::Empty);

        let mut headers = HeaderMap::new();
        headers.insert(TRANSFER_ENCODING, HeaderValue::from_static("Chunked"));
        assert_eq!(request_framing(&headers).unwrap(), BodyFraming::Empty);
    }

    #[test]
    fn response_keeps_body_empty_on_1_1_without_close_header() {
        let headers = HeaderMap::new();
        assert_eq!(response_framing(&headers, "1.1").unwrap(), BodyFraming::Empty);
    }

    #[test]
    fn response_falls_back_to_close_below_1_1() {
        let headers = HeaderMap::new();
        assert_eq!(response_framing(&headers, "1.0").unwrap(), BodyFraming::Close);
    }

    #[test]
    fn response_falls_back_to_close_on_connection_close_even_at_1_1() {
        let mut headers = HeaderMap::new();
        headers.insert(CONNECTION, HeaderValue::from_static("close"));
        assert_eq!(response_framing(&headers, "1.1").unwrap(), BodyFraming::Close);
    }

    #[test]
    fn detects_close_token_among_connection_values() {
        let mut headers = HeaderMap::new();
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive, close"));
        assert!(wants_close(&headers));
    }
}
