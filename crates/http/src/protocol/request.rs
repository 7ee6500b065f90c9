//! HTTP request head: request line plus header block.
//!
//! Unlike a `http::Request<()>` wrapper, the version is kept as the raw wire
//! token (see [`super::version`]) rather than converted to `http::Version`,
//! and the request-target is kept as the raw string the client sent — both
//! observable quirks the wire format and the proxy absolute-form rewriting
//! depend on.

use http::{HeaderMap, Method};

/// The parsed request line and header block of an HTTP request.
#[derive(Debug)]
pub struct RequestHead {
    method: Method,
    target: String,
    version: String,
    headers: HeaderMap,
}

impl RequestHead {
    pub fn new(method: Method, target: String, version: String, headers: HeaderMap) -> Self {
        Self { method, target, version, headers }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// The raw HTTP version token, e.g. `"1.1"`.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Whether this method's semantics normally carry a request body.
    ///
    /// Returns false for methods that typically don't have bodies: GET, HEAD,
    /// DELETE, OPTIONS, CONNECT.
    pub fn need_body(&self) -> bool {
        !matches!(self.method, Method::GET | Method::HEAD | Method::DELETE | Method::OPTIONS | Method::CONNECT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn need_body_excludes_bodyless_methods() {
        let head = RequestHead::new(Method::GET, "/".to_string(), "1.1".to_string(), HeaderMap::new());
        assert!(!head.need_body());

        let head = RequestHead::new(Method::POST, "/".to_string(), "1.1".to_string(), HeaderMap::new());
        assert!(head.need_body());
    }

    #[test]
    fn exposes_raw_version_token() {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("example.com"));
        let head = RequestHead::new(Method::GET, "/a".to_string(), "1.0".to_string(), headers);
        assert_eq!(head.version(), "1.0");
        assert_eq!(head.headers().get("host").unwrap(), "example.com");
    }
}
