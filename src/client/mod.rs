//! Client Module
//!
//! Sending side of the protocol: connect, send a message, send a packet of
//! records read from the console.

mod console;

pub use console::{read_records, PROMPT};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::network::{self, Connection};
use crate::protocol::RecordSet;

/// A connected client
pub struct Client {
    conn: Connection,
}

impl Client {
    /// Connect to the server named in `config`
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let conn = network::connect(&config.ip, &config.port)?;
        tracing::info!("Connected to {}", conn.peer_addr());
        Ok(Self { conn })
    }

    /// Wrap an existing connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Send text as a SIMPLE_MESSAGE, NUL-terminated
    pub fn send_message(&mut self, text: &str) -> Result<()> {
        let mut body = Vec::with_capacity(text.len() + 1);
        body.extend_from_slice(text.as_bytes());
        body.push(0);
        self.conn.send_message(&body)
    }

    /// Send a RECORD_SET
    pub fn send_records(&mut self, records: &RecordSet) -> Result<()> {
        self.conn.send_records(records)?;
        tracing::debug!("Sent {} records ({} bytes)", records.count(), records.len());
        Ok(())
    }

    /// Release the connection
    pub fn close(self) -> Result<()> {
        self.conn.close()
    }
}
