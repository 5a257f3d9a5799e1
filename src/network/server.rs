//! TCP Server
//!
//! Listens on the configured port and serves a single client.

use std::net::SocketAddr;

use crate::config::ServerConfig;
use crate::error::{Result, WireError};
use crate::sink::Sink;
use super::{Connection, Listener, Session};

/// Single-client server
pub struct Server {
    listener: Listener,
}

impl Server {
    /// Bind the listening socket described by `config`
    pub fn bind(config: &ServerConfig) -> Result<Self> {
        let listener = Listener::bind(&config.bind_host, &config.port)?;
        tracing::trace!("Ready to listen for my client");
        Ok(Self { listener })
    }

    /// The address actually bound
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Block until the client connects
    pub fn accept(&self) -> Result<Connection> {
        self.listener.accept()
    }

    /// Accept one client and dispatch its frames into `sink`
    ///
    /// Returns the error that ended the session once the client goes away.
    pub fn serve<S: Sink>(&self, sink: S) -> Result<WireError> {
        let mut conn = self.accept()?;
        let peer = conn.peer_addr().to_string();

        let mut session = Session::new(conn.reader_mut(), sink);
        let reason = session.run();
        tracing::debug!("Session with {} ended after {} frames", peer, session.frames());
        drop(session);

        if let Err(e) = conn.close() {
            tracing::debug!("Closing connection to {}: {}", peer, e);
        }
        Ok(reason)
    }
}
