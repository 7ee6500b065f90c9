//! Error types for HTTP protocol handling.
//!
//! The error types form the three-tier taxonomy used throughout the crate:
//! transport failures (connect/read/write/accept), timeouts (deadline expiry,
//! which is reported as a transport error since it is implemented as a forced
//! cancellation of the racing I/O future), and protocol failures (malformed
//! wire data). A [`HandlerError`] tier wraps whatever a user handler returns.
use std::io;
use thiserror::Error;

/// The top-level error type for HTTP operations.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Errors that occur while parsing a request or response off the wire.
    #[error("parse error: {source}")]
    Parse {
        #[from]
        source: ParseError,
    },

    /// Errors that occur while encoding and writing a request or response.
    #[error("send error: {source}")]
    Send {
        #[from]
        source: SendError,
    },

    /// Transport-level failures: connect, resolve, read, write, accept.
    #[error("transport error: {source}")]
    Transport {
        #[from]
        source: TransportError,
    },

    /// A deadline elapsed before the operation completed.
    #[error("timeout waiting for {operation}")]
    Timeout { operation: &'static str },

    /// A handler returned an error while processing a request.
    #[error("handler error: {source}")]
    Handler {
        #[from]
        source: HandlerError,
    },
}

impl HttpError {
    pub fn timeout(operation: &'static str) -> Self {
        Self::Timeout { operation }
    }
}

/// Errors that occur during HTTP message parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Header block exceeds the maximum allowed size.
    #[error("header size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    /// Number of headers exceeds the maximum allowed.
    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    /// The request line or status line could not be parsed.
    #[error("invalid start line: {reason}")]
    InvalidStartLine { reason: String },

    /// Invalid header format or content.
    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    /// Unsupported or malformed HTTP version token.
    #[error("invalid http version: {0:?}")]
    InvalidVersion(String),

    /// Invalid or unsupported HTTP method.
    #[error("invalid http method")]
    InvalidMethod,

    /// Invalid URI/request-target.
    #[error("invalid http uri")]
    InvalidUri,

    /// Invalid Content-Length header.
    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    /// Both Content-Length and Transfer-Encoding were present.
    #[error("ambiguous framing: both content-length and transfer-encoding present")]
    AmbiguousFraming,

    /// Invalid chunked transfer-encoding body.
    #[error("invalid body: {reason}")]
    InvalidBody { reason: String },

    /// I/O error while reading.
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn invalid_start_line<S: ToString>(str: S) -> Self {
        Self::InvalidStartLine { reason: str.to_string() }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn invalid_body<S: ToString>(str: S) -> Self {
        Self::InvalidBody { reason: str.to_string() }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

/// Errors that occur during HTTP message encoding and sending.
#[derive(Error, Debug)]
pub enum SendError {
    /// Invalid response body.
    #[error("invalid body: {reason}")]
    InvalidBody { reason: String },

    /// I/O error while writing.
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn invalid_body<S: ToString>(str: S) -> Self {
        Self::InvalidBody { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

/// Transport-level failures: connect, resolve, accept, read, write,
/// including deadline-triggered cancellation of an in-flight operation.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("connect failed: {0}")]
    Connect(#[source] io::Error),

    #[error("dns resolution failed for {host}: {source}")]
    Resolve { host: String, source: io::Error },

    #[error("accept failed: {0}")]
    Accept(#[source] io::Error),

    #[error("operation cancelled by deadline")]
    Cancelled,

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Wraps whatever error type a user handler produced.
#[derive(Error, Debug)]
#[error("handler failed: {source}")]
pub struct HandlerError {
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl HandlerError {
    pub fn new(source: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self { source }
    }
}
