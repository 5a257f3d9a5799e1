//! Frame definitions
//!
//! The outer wire unit: a tag and the payload that follows it.

use bytes::Bytes;

use super::OpCode;

/// A decoded frame
///
/// The tag is kept raw so frames with unrecognised tags can still be
/// represented and skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Raw tag as read from the wire
    pub tag: u32,

    /// Payload bytes (exactly as many as the length field declared)
    pub payload: Bytes,
}

impl Frame {
    /// Create a frame for a known op-code
    pub fn new(op: OpCode, payload: impl Into<Bytes>) -> Self {
        Self {
            tag: op.as_u32(),
            payload: payload.into(),
        }
    }

    /// Create a SIMPLE_MESSAGE frame
    pub fn message(payload: impl Into<Bytes>) -> Self {
        Self::new(OpCode::SimpleMessage, payload)
    }

    /// Create a RECORD_SET frame
    pub fn record_set(payload: impl Into<Bytes>) -> Self {
        Self::new(OpCode::RecordSet, payload)
    }

    /// The op-code, if the tag is one we know
    pub fn op_code(&self) -> Option<OpCode> {
        OpCode::from_wire(self.tag)
    }

    /// Total size on the wire (header + payload)
    pub fn wire_size(&self) -> usize {
        super::HEADER_SIZE + self.payload.len()
    }
}
