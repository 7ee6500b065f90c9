//! The transport socket: a thin layer over [`tokio::net::TcpStream`] for
//! connect/accept, plus the deadline timer used to bound every I/O phase of
//! a request/response exchange.

mod deadline;

pub use deadline::with_deadline;

use crate::protocol::TransportError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpSocket, TcpStream, ToSocketAddrs};
use tokio::time::timeout;

/// Connects to `addr`, failing with [`TransportError::Connect`] on refusal
/// and [`TransportError::Resolve`] if `addr` doesn't resolve to at least one
/// address, bounded by `connect_timeout` when given.
pub async fn connect<A: ToSocketAddrs + std::fmt::Display>(addr: A, connect_timeout: Option<Duration>) -> Result<TcpStream, TransportError> {
    let host = addr.to_string();
    let connect = TcpStream::connect(addr);

    let stream = match connect_timeout {
        None => connect.await.map_err(TransportError::Connect)?,
        Some(duration) => match timeout(duration, connect).await {
            Ok(result) => result.map_err(TransportError::Connect)?,
            Err(_) => return Err(TransportError::Resolve { host, source: std::io::Error::from(std::io::ErrorKind::TimedOut) }),
        },
    };

    stream.set_nodelay(true).map_err(TransportError::Connect)?;
    Ok(stream)
}

/// Binds a listening socket, honoring `reuse_address` for `SO_REUSEADDR` and
/// leaving `TCP_NODELAY` to be set on each accepted stream.
pub async fn bind(addr: SocketAddr, reuse_address: bool) -> Result<TcpListener, TransportError> {
    let socket = if addr.is_ipv4() { TcpSocket::new_v4() } else { TcpSocket::new_v6() }.map_err(TransportError::Accept)?;
    socket.set_reuseaddr(reuse_address).map_err(TransportError::Accept)?;
    socket.bind(addr).map_err(TransportError::Accept)?;
    socket.listen(1024).map_err(TransportError::Accept)
}

/// Accepts one connection, setting `TCP_NODELAY` before returning it.
pub async fn accept(listener: &TcpListener) -> Result<(TcpStream, SocketAddr), TransportError> {
    let (stream, addr) = listener.accept().await.map_err(TransportError::Accept)?;
    stream.set_nodelay(true).map_err(TransportError::Accept)?;
    Ok((stream, addr))
}
