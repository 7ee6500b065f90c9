//! HTTP response head: status line plus header block (client-side read path).
//!
//! The status line's `status_code` field intentionally holds the numeric code
//! and the reason phrase concatenated with a single space, exactly as parsed
//! off the wire — this mirrors the original implementation's combined field.
//! [`ResponseHead::status_code_number`] is provided as a convenience split for
//! callers that want just the numeric code.

use http::HeaderMap;

/// The parsed status line and header block of an HTTP response.
#[derive(Debug)]
pub struct ResponseHead {
    version: String,
    status_code: String,
    headers: HeaderMap,
}

impl ResponseHead {
    pub fn new(version: String, status_code: String, headers: HeaderMap) -> Self {
        Self { version, status_code, headers }
    }

    /// The raw HTTP version token, e.g. `"1.1"`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The combined numeric code and reason phrase, e.g. `"200 OK"`.
    pub fn status_code(&self) -> &str {
        &self.status_code
    }

    /// Parses the leading digits of [`Self::status_code`] into a numeric code.
    pub fn status_code_number(&self) -> Option<u16> {
        self.status_code.split_whitespace().next()?.parse().ok()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_numeric_code_from_combined_field() {
        let head = ResponseHead::new("1.1".to_string(), "200 OK".to_string(), HeaderMap::new());
        assert_eq!(head.status_code(), "200 OK");
        assert_eq!(head.status_code_number(), Some(200));
    }

    #[test]
    fn tolerates_missing_reason_phrase() {
        let head = ResponseHead::new("1.1".to_string(), "204".to_string(), HeaderMap::new());
        assert_eq!(head.status_code_number(), Some(204));
    }
}
