//! Dispatch Session
//!
//! The server-side read-and-route loop for one connection.
//!
//! ```text
//!            ┌──────────────┐
//!     ┌─────►│   WAIT_TAG   │──── disconnect ───► CLOSED
//!     │      └──────┬───────┘
//!     │   0 ────────┼──────── 1 ──────── other
//!     │   ▼         │         ▼            ▼
//!     │ MESSAGE     │     RECORD_SET    UNKNOWN (skip payload)
//!     └─────────────┴─────────┴────────────┘
//! ```

use std::io::Read;

use crate::error::{Result, WireError};
use crate::protocol::{decode_records, read_payload, read_tag, skip_payload, OpCode};
use crate::sink::Sink;

/// What one pass through the loop handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A SIMPLE_MESSAGE of this many bytes
    Message(usize),

    /// A RECORD_SET holding this many records
    RecordSet(usize),

    /// A frame with an unrecognised tag, payload skipped
    Unknown { tag: u32, skipped: usize },
}

/// Dispatch state for a single connection
///
/// Holds nothing between frames except the stream and the sink.
pub struct Session<R, S> {
    reader: R,
    sink: S,
    frames: u64,
}

impl<R: Read, S: Sink> Session<R, S> {
    pub fn new(reader: R, sink: S) -> Self {
        Self {
            reader,
            sink,
            frames: 0,
        }
    }

    /// Frames handled so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Borrow the sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Take the session apart
    pub fn into_parts(self) -> (R, S) {
        (self.reader, self.sink)
    }

    /// Read and route exactly one frame
    pub fn step(&mut self) -> Result<Step> {
        let tag = read_tag(&mut self.reader)?;

        let step = match OpCode::from_wire(tag) {
            Some(OpCode::SimpleMessage) => {
                let payload = read_payload(&mut self.reader)?;
                self.sink.message(&payload);
                Step::Message(payload.len())
            }
            Some(OpCode::RecordSet) => {
                let payload = read_payload(&mut self.reader)?;
                let records = decode_records(payload)?;
                self.sink.record_set(records.len());
                for (index, record) in records.iter().enumerate() {
                    self.sink.record(index, record);
                }
                Step::RecordSet(records.len())
            }
            None => {
                let skipped = skip_payload(&mut self.reader)?;
                self.sink.unknown(tag, skipped);
                Step::Unknown { tag, skipped }
            }
        };

        self.frames += 1;
        tracing::trace!("Frame {} handled: {:?}", self.frames, step);
        Ok(step)
    }

    /// Run until the stream ends or a frame is malformed
    ///
    /// Never returns success; the error says why the loop stopped.
    /// `WireError::Disconnected` is the normal way out.
    pub fn run(&mut self) -> WireError {
        loop {
            if let Err(e) = self.step() {
                match &e {
                    WireError::Disconnected => {
                        tracing::error!("Client disconnected. Shutting down server");
                    }
                    WireError::MalformedFrame(reason) => {
                        tracing::error!("Protocol error, dropping client: {}", reason);
                    }
                    other => {
                        tracing::error!("Session failed: {}", other);
                    }
                }
                return e;
            }
        }
    }
}
