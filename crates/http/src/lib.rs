//! A minimal async HTTP/1.1 client and server core.
//!
//! This crate implements the request/response exchange for HTTP/1.1 on top of
//! Tokio: a framer shared by both sides, a [`client::Client`] that performs one
//! request/response round trip per call over a connection it owns, and a
//! [`server::Server`] that accepts connections and dispatches requests to
//! handlers keyed by HTTP method.
//!
//! Routing, TLS, compression and body streaming are collaborators outside this
//! crate's scope; see the `demos` binaries in the workspace for a wiring
//! example.

pub mod client;
pub mod codec;
pub mod handler;
pub mod protocol;
pub mod server;
pub mod transport;
