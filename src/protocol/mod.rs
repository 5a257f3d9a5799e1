//! Protocol Module
//!
//! Defines the wire protocol between client and server.
//!
//! ## Frame Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Tag (4)  │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Tags
//! - 0: SIMPLE_MESSAGE - Payload: one opaque message
//! - 1: RECORD_SET     - Payload: record_len (4) + record, repeated
//!
//! Any other tag is still followed by a length and payload, which the
//! server skips.
//!
//! All integers are big-endian.

mod opcode;
mod frame;
mod codec;
mod records;

pub use opcode::OpCode;
pub use frame::Frame;
pub use codec::{
    decode_frame, encode_frame, encode_frame_into, read_exact, read_frame, read_payload,
    read_tag, skip_payload, write_frame, HEADER_SIZE, LEN_SIZE, MAX_PAYLOAD_SIZE, TAG_SIZE,
};
pub use records::{decode_records, RecordSet, RECORD_LEN_SIZE};

/// Render a payload as text for logging
///
/// Strips one trailing NUL terminator and replaces invalid UTF-8.
pub fn display_text(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    let trimmed = bytes.strip_suffix(b"\0").unwrap_or(bytes);
    String::from_utf8_lossy(trimmed)
}
