//! Hand-rolled request-line, status-line and header-block parsing.
//!
//! This is deliberately not built on `httparse`: the wire-format quirks this
//! crate preserves (a literal `"HTTP"` token before the `/`, at-most-one
//! leading space stripped from a header value, a status line whose numeric
//! code and reason phrase are kept as one combined field) come from the
//! source implementation this crate's framing rules were distilled from, and
//! a strict RFC parser would reject or normalize away exactly those quirks.

use crate::protocol::ParseError;
use bytes::BytesMut;
use http::{HeaderMap, HeaderName, HeaderValue, Method};

/// Maximum number of headers accepted in one header block.
pub const MAX_HEADER_NUM: usize = 64;
/// Maximum byte size of the header block (start line + headers + terminator).
pub const MAX_HEADER_BYTES: usize = 8 * 1024;

/// Looks for the blank-line terminator `"\r\n\r\n"` in `src`.
///
/// Returns the byte length of the head (start line + headers + terminator)
/// if found.
pub fn find_head_end(src: &[u8]) -> Option<usize> {
    src.windows(4).position(|w| w == b"\r\n\r\n").map(|pos| pos + 4)
}

fn find_byte(haystack: &[u8], needle: u8) -> Option<usize> {
    haystack.iter().position(|&b| b == needle)
}

/// Splits a header block into lines, stripping an optional trailing `\r`
/// from each line the way a line-oriented reader would.
fn split_lines(block: &[u8]) -> impl Iterator<Item = &[u8]> {
    block.split(|&b| b == b'\n').map(|line| match line.last() {
        Some(b'\r') => &line[..line.len() - 1],
        _ => line,
    })
}

/// The request line plus parsed headers.
pub struct RequestLine {
    pub method: Method,
    pub target: String,
    pub version: String,
}

/// Parses `METHOD SP TARGET SP "HTTP/" VERSION`.
///
/// An empty target is normalized to `"/"`. A missing `"HTTP"` literal before
/// the `/` is a protocol error, matching the wire format's request-line
/// requirement.
pub fn parse_request_line(line: &[u8]) -> Result<RequestLine, ParseError> {
    let sp1 = find_byte(line, b' ').ok_or_else(|| ParseError::invalid_start_line("missing method separator"))?;
    let rest = &line[sp1 + 1..];
    let sp2 = find_byte(rest, b' ').ok_or_else(|| ParseError::invalid_start_line("missing target separator"))?;

    let method_bytes = &line[..sp1];
    let target_bytes = &rest[..sp2];
    let version_part = &rest[sp2 + 1..];

    const PREFIX: &[u8] = b"HTTP/";
    if !version_part.starts_with(PREFIX) {
        return Err(ParseError::invalid_start_line("missing HTTP/ literal"));
    }
    let version_bytes = &version_part[PREFIX.len()..];

    let method = Method::from_bytes(method_bytes).map_err(|_| ParseError::InvalidMethod)?;
    let target = String::from_utf8_lossy(target_bytes).into_owned();
    let target = if target.is_empty() { "/".to_string() } else { target };
    let version = String::from_utf8_lossy(version_bytes).into_owned();

    Ok(RequestLine { method, target, version })
}

/// The status line: version plus the combined code-and-reason field.
pub struct StatusLine {
    pub version: String,
    pub status_code: String,
}

/// Parses `"HTTP/" VERSION SP STATUS-CODE-AND-REASON`.
///
/// `status_code` intentionally keeps the numeric code and reason phrase as
/// one field, e.g. `"200 OK"`; see [`crate::protocol::ResponseHead`].
pub fn parse_status_line(line: &[u8]) -> Result<StatusLine, ParseError> {
    const PREFIX: &[u8] = b"HTTP/";
    if !line.starts_with(PREFIX) {
        return Err(ParseError::invalid_start_line("missing HTTP/ literal"));
    }
    let rest = &line[PREFIX.len()..];
    match find_byte(rest, b' ') {
        Some(sp) => {
            let version = String::from_utf8_lossy(&rest[..sp]).into_owned();
            let status_code = String::from_utf8_lossy(&rest[sp + 1..]).into_owned();
            Ok(StatusLine { version, status_code })
        }
        None => {
            // No space found: treat the whole remainder as the version and
            // leave the combined code/reason field empty, rather than
            // erroring on a short line.
            let version = String::from_utf8_lossy(rest).into_owned();
            Ok(StatusLine { version, status_code: String::new() })
        }
    }
}

/// Parses the header lines following the start line into a [`HeaderMap`].
///
/// Each line is split at its first colon; at most one leading space is
/// stripped from the value. A line without a colon ends the block (in
/// practice this is always the terminating blank line).
pub fn parse_headers(lines: &[u8]) -> Result<HeaderMap, ParseError> {
    let mut headers = HeaderMap::new();
    let mut count = 0usize;

    for line in split_lines(lines) {
        if line.is_empty() {
            break;
        }

        let colon = match find_byte(line, b':') {
            Some(idx) => idx,
            None => break,
        };

        let name_bytes = &line[..colon];
        let mut value_bytes = &line[colon + 1..];
        if value_bytes.first() == Some(&b' ') {
            value_bytes = &value_bytes[1..];
        }

        let name = HeaderName::from_bytes(name_bytes).map_err(|e| ParseError::invalid_header(e.to_string()))?;
        let value = HeaderValue::from_bytes(value_bytes).map_err(|e| ParseError::invalid_header(e.to_string()))?;
        headers.append(name, value);

        count += 1;
        if count > MAX_HEADER_NUM {
            return Err(ParseError::too_many_headers(MAX_HEADER_NUM));
        }
    }

    Ok(headers)
}

/// Splits off and parses the header block (start line bytes + header lines)
/// from `src` once the blank-line terminator has arrived.
///
/// Returns `Ok(None)` if the terminator hasn't arrived yet, enforcing
/// [`MAX_HEADER_BYTES`] against however much has accumulated so far.
pub fn split_head(src: &mut BytesMut) -> Result<Option<(bytes::Bytes, bytes::Bytes)>, ParseError> {
    match find_head_end(src) {
        Some(head_len) => {
            if head_len > MAX_HEADER_BYTES {
                return Err(ParseError::too_large_header(head_len, MAX_HEADER_BYTES));
            }
            let head = src.split_to(head_len).freeze();
            // strip the trailing "\r\n\r\n" terminator before splitting the
            // start line off from the header lines
            let body_of_head = head.slice(0..head.len() - 2);
            let first_nl = body_of_head.iter().position(|&b| b == b'\n').unwrap_or(body_of_head.len());
            let start_line_raw = body_of_head.slice(0..first_nl);
            let start_line = match start_line_raw.last() {
                Some(b'\r') => start_line_raw.slice(0..start_line_raw.len() - 1),
                _ => start_line_raw,
            };
            let header_lines = if first_nl < body_of_head.len() { body_of_head.slice(first_nl + 1..) } else { body_of_head.slice(0..0) };
            Ok(Some((start_line, header_lines)))
        }
        None => {
            if src.len() > MAX_HEADER_BYTES {
                return Err(ParseError::too_large_header(src.len(), MAX_HEADER_BYTES));
            }
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_request_line() {
        let line = parse_request_line(b"GET /index.html HTTP/1.1").unwrap();
        assert_eq!(line.method, Method::GET);
        assert_eq!(line.target, "/index.html");
        assert_eq!(line.version, "1.1");
    }

    #[test]
    fn normalizes_empty_target_to_slash() {
        let line = parse_request_line(b"GET  HTTP/1.1").unwrap();
        assert_eq!(line.target, "/");
    }

    #[test]
    fn rejects_missing_http_literal() {
        assert!(parse_request_line(b"GET / FOO/1.1").is_err());
    }

    #[test]
    fn parses_status_line_with_combined_code_and_reason() {
        let line = parse_status_line(b"HTTP/1.1 200 OK").unwrap();
        assert_eq!(line.version, "1.1");
        assert_eq!(line.status_code, "200 OK");
    }

    #[test]
    fn parses_headers_stripping_one_leading_space() {
        let headers = parse_headers(b"Host: example.com\r\nX-Empty:\r\n").unwrap();
        assert_eq!(headers.get("host").unwrap(), "example.com");
        assert_eq!(headers.get("x-empty").unwrap(), "");
    }

    #[test]
    fn finds_head_terminator() {
        let src = b"GET / HTTP/1.1\r\nHost: a\r\n\r\nbody";
        assert_eq!(find_head_end(src), Some(src.len() - 4));
    }
}
