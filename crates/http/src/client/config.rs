//! Client configuration.

use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for a [`super::Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deadline for the whole request/response round trip. `None` means no
    /// timeout.
    pub timeout: Option<Duration>,
    /// Deadline for the connect phase specifically. `None` falls back to
    /// [`Self::timeout`].
    pub connect_timeout: Option<Duration>,
    /// When set, requests are sent in proxy absolute-form (the full target
    /// URI rather than just its path) and routed to this address instead of
    /// resolving the request's own host. Plain TCP only — no CONNECT tunnel.
    pub proxy_addr: Option<SocketAddr>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { timeout: None, connect_timeout: None, proxy_addr: None }
    }
}
