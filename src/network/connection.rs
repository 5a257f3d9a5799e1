//! Connection Handle
//!
//! One established stream to exactly one peer.

use std::io::{BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpStream};

use bytes::Bytes;

use crate::error::Result;
use crate::protocol::{self, OpCode, RecordSet};

/// An established connection
///
/// Owned by whichever side created it. Dropping it closes the socket;
/// `close` does the same but flushes first and reports errors.
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Wrap a connected stream
    pub fn new(stream: TcpStream) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Small frames should leave immediately
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    // -------------------------------------------------------------------------
    // Sending
    // -------------------------------------------------------------------------

    /// Send one frame
    pub fn send_frame(&mut self, op: OpCode, payload: &[u8]) -> Result<()> {
        tracing::trace!("Sending {:?} ({} bytes) to {}", op, payload.len(), self.peer_addr);
        protocol::write_frame(&mut self.writer, op, payload)
    }

    /// Send a SIMPLE_MESSAGE
    pub fn send_message(&mut self, body: &[u8]) -> Result<()> {
        self.send_frame(OpCode::SimpleMessage, body)
    }

    /// Send a RECORD_SET built with `RecordSet`
    pub fn send_records(&mut self, records: &RecordSet) -> Result<()> {
        self.send_frame(OpCode::RecordSet, records.as_bytes())
    }

    // -------------------------------------------------------------------------
    // Receiving
    // -------------------------------------------------------------------------

    /// Read exactly `n` bytes
    pub fn read_exact(&mut self, n: usize) -> Result<Bytes> {
        protocol::read_exact(&mut self.reader, n)
    }

    /// Read the next frame tag
    pub fn read_tag(&mut self) -> Result<u32> {
        protocol::read_tag(&mut self.reader)
    }

    /// Read a length-prefixed payload
    pub fn read_payload(&mut self) -> Result<Bytes> {
        protocol::read_payload(&mut self.reader)
    }

    /// Borrow the buffered reader, e.g. to drive a `Session`
    pub fn reader_mut(&mut self) -> &mut BufReader<TcpStream> {
        &mut self.reader
    }

    /// Flush pending output and shut the socket down
    pub fn close(mut self) -> Result<()> {
        self.writer.flush()?;
        match self.writer.get_ref().shutdown(Shutdown::Both) {
            Ok(()) => {}
            // The peer may already have torn the connection down
            Err(e) if e.kind() == std::io::ErrorKind::NotConnected => {}
            Err(e) => return Err(e.into()),
        }
        tracing::debug!("Connection to {} closed", self.peer_addr);
        Ok(())
    }
}
