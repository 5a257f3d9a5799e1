//! TCP Transport
//!
//! Establishing connections: resolve and connect on the client side,
//! bind/listen/accept on the server side. Every failure here comes back as
//! `WireError::Connection`.

use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};

use crate::error::{Result, WireError};
use super::Connection;

/// Parse a textual port
fn parse_port(port: &str) -> Result<u16> {
    port.trim()
        .parse::<u16>()
        .map_err(|e| WireError::Connection(format!("Invalid port '{}': {}", port, e)))
}

/// Resolve `host:port` to every candidate socket address
pub fn resolve(host: &str, port: &str) -> Result<Vec<SocketAddr>> {
    let port = parse_port(port)?;
    let addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|e| WireError::Connection(format!("Cannot resolve '{}:{}': {}", host, port, e)))?
        .collect();

    if addrs.is_empty() {
        return Err(WireError::Connection(format!(
            "'{}:{}' resolved to no addresses",
            host, port
        )));
    }
    Ok(addrs)
}

/// Connect to a server
///
/// Tries each resolved address in turn and returns the first that accepts.
pub fn connect(host: &str, port: &str) -> Result<Connection> {
    let mut last_err = None;

    for addr in resolve(host, port)? {
        match TcpStream::connect(addr) {
            Ok(stream) => {
                tracing::debug!("Connected to {}", addr);
                return Connection::new(stream);
            }
            Err(e) => {
                tracing::debug!("Connect to {} failed: {}", addr, e);
                last_err = Some(e);
            }
        }
    }

    Err(WireError::Connection(match last_err {
        Some(e) => format!("Cannot connect to {}:{}: {}", host, port, e),
        None => format!("Cannot connect to {}:{}", host, port),
    }))
}

/// A bound, listening socket
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Bind and listen on `host:port`
    ///
    /// On Unix the standard library enables `SO_REUSEADDR` before binding,
    /// so a restarted server can reclaim the port straight away. The
    /// pending-connection backlog is the platform default.
    pub fn bind(host: &str, port: &str) -> Result<Self> {
        let addrs = resolve(host, port)?;
        let inner = TcpListener::bind(&addrs[..])
            .map_err(|e| WireError::Connection(format!("Cannot bind {}:{}: {}", host, port, e)))?;

        tracing::trace!("Listening on {:?}", inner.local_addr().ok());
        Ok(Self { inner })
    }

    /// The address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.inner
            .local_addr()
            .map_err(|e| WireError::Connection(format!("Cannot read local address: {}", e)))
    }

    /// Block until one peer connects
    pub fn accept(&self) -> Result<Connection> {
        let (stream, addr) = self
            .inner
            .accept()
            .map_err(|e| WireError::Connection(format!("Accept failed: {}", e)))?;

        tracing::info!("Client connected from {}", addr);
        Connection::new(stream)
    }
}
