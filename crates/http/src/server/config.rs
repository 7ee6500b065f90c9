//! Server configuration.

use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for a [`super::Server`].
///
/// Timeouts are applied per I/O phase via the transport's deadline timer, not
/// as one timeout for the whole connection: `request_timeout` bounds reading
/// a request's head (and covers an idle keep-alive connection waiting for its
/// next request), `content_timeout` bounds reading a declared-length body and
/// flushing the response.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub request_timeout: Option<Duration>,
    pub content_timeout: Option<Duration>,
    /// Whether the listening socket is bound with `SO_REUSEADDR`.
    pub reuse_address: bool,
}

impl ServerConfig {
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr, request_timeout: Some(Duration::from_secs(5)), content_timeout: Some(Duration::from_secs(300)), reuse_address: true }
    }
}
