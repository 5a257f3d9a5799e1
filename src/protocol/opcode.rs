//! Operation codes
//!
//! The tag carried at the start of every frame.

/// Known frame tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum OpCode {
    /// A single opaque message
    SimpleMessage = 0,

    /// A payload made of length-prefixed records
    RecordSet = 1,
}

impl OpCode {
    /// Wire value of this op-code
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Map a raw wire tag to a known op-code, `None` for anything else
    pub fn from_wire(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(OpCode::SimpleMessage),
            1 => Some(OpCode::RecordSet),
            _ => None,
        }
    }
}

impl From<OpCode> for u32 {
    fn from(op: OpCode) -> Self {
        op.as_u32()
    }
}
