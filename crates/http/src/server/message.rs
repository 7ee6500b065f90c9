//! Server-side request and response types handed to handlers.

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use std::net::SocketAddr;

/// A fully-buffered incoming request, built from a [`crate::protocol::RequestHead`]
/// plus its accumulated body once the connection has finished reading it.
#[derive(Debug)]
pub struct Request {
    method: Method,
    target: String,
    version: String,
    headers: HeaderMap,
    body: Bytes,
    remote_addr: SocketAddr,
}

impl Request {
    pub fn new(method: Method, target: String, version: String, headers: HeaderMap, body: Bytes, remote_addr: SocketAddr) -> Self {
        Self { method, target, version, headers, body, remote_addr }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }
}

/// The write side of a response, appended to by a handler and flushed by the
/// connection pipeline via an explicit [`Response::into_parts`] rather than
/// on drop.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: BytesMut,
    close_connection_after_response: bool,
}

impl Default for Response {
    fn default() -> Self {
        Self { status: StatusCode::OK, headers: HeaderMap::new(), body: BytesMut::new(), close_connection_after_response: false }
    }
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: StatusCode) -> &mut Self {
        self.status = status;
        self
    }

    pub fn set_header(&mut self, name: header::HeaderName, value: HeaderValue) -> &mut Self {
        self.headers.insert(name, value);
        self
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn write_body(&mut self, chunk: impl AsRef<[u8]>) -> &mut Self {
        self.body.extend_from_slice(chunk.as_ref());
        self
    }

    /// When set, the connection closes after this response regardless of the
    /// request's keep-alive preference. Used for responses whose body has no
    /// declared length and is framed by connection close.
    pub fn close_connection_after_response(&mut self, close: bool) -> &mut Self {
        self.close_connection_after_response = close;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn will_close_connection(&self) -> bool {
        self.close_connection_after_response
    }

    /// Consumes the response, returning its parts for the connection
    /// pipeline to frame and write.
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Bytes, bool) {
        (self.status, self.headers, self.body.freeze(), self.close_connection_after_response)
    }
}
