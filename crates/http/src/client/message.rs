//! Client-side response: a [`crate::protocol::ResponseHead`] plus its
//! accumulated body, fully materialized before being returned to the caller.

use crate::protocol::ResponseHead;
use bytes::Bytes;

/// An HTTP response as received by the client, body included.
#[derive(Debug)]
pub struct Response {
    head: ResponseHead,
    body: Bytes,
}

impl Response {
    pub fn new(head: ResponseHead, body: Bytes) -> Self {
        Self { head, body }
    }

    pub fn version(&self) -> &str {
        self.head.version()
    }

    pub fn status_code(&self) -> &str {
        self.head.status_code()
    }

    pub fn status_code_number(&self) -> Option<u16> {
        self.head.status_code_number()
    }

    pub fn headers(&self) -> &http::HeaderMap {
        self.head.headers()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }
}

/// An HTTP request to send: method, request-target, headers and body.
///
/// `target` is the path and query a caller would send directly to the
/// origin; when the client is configured with a proxy, it rewrites this into
/// absolute-form before writing the request line.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: http::Method,
    pub target: String,
    pub headers: http::HeaderMap,
    pub body: Bytes,
}

impl Request {
    pub fn new(method: http::Method, target: impl Into<String>) -> Self {
        Self { method, target: target.into(), headers: http::HeaderMap::new(), body: Bytes::new() }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_header(mut self, name: http::header::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}
