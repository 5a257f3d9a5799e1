//! Record sets
//!
//! A RECORD_SET payload is a run of length-prefixed records:
//!
//! ```text
//! ┌──────────┬───────────┬──────────┬───────────┬─────
//! │ Len (4)  │  Record   │ Len (4)  │  Record   │ ...
//! └──────────┴───────────┴──────────┴───────────┴─────
//! ```
//!
//! `RecordSet` builds such a payload on the sending side and
//! `decode_records` splits it back apart on the receiving side.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, WireError};
use super::{encode_frame, OpCode, MAX_PAYLOAD_SIZE};

/// Size of each record's length prefix
pub const RECORD_LEN_SIZE: usize = 4;

/// Accumulates records into a RECORD_SET payload
///
/// Records decode in the order they were appended. Empty records are allowed.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    /// Encoded payload so far
    buf: BytesMut,

    /// Number of records appended
    count: usize,
}

impl RecordSet {
    /// Create an empty record set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record at the end of the payload
    ///
    /// Grows the payload by `4 + record.len()` bytes.
    pub fn append(&mut self, record: &[u8]) {
        debug_assert!(record.len() <= MAX_PAYLOAD_SIZE as usize, "record exceeds MAX_PAYLOAD_SIZE");
        self.buf.reserve(RECORD_LEN_SIZE + record.len());
        self.buf.put_u32(record.len() as u32);
        self.buf.put_slice(record);
        self.count += 1;
    }

    /// Builder-style append
    pub fn with(mut self, record: &[u8]) -> Self {
        self.append(record);
        self
    }

    /// Size of the payload in bytes
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if no records have been appended
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of records appended
    pub fn count(&self) -> usize {
        self.count
    }

    /// Borrow the payload built so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the builder and return the payload
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }

    /// Encode the whole set as a RECORD_SET frame
    pub fn to_frame(&self) -> Bytes {
        encode_frame(OpCode::RecordSet, &self.buf)
    }
}

impl<T: AsRef<[u8]>> FromIterator<T> for RecordSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = RecordSet::new();
        for record in iter {
            set.append(record.as_ref());
        }
        set
    }
}

/// Split a RECORD_SET payload back into its records
///
/// Every length prefix is checked against the bytes that remain, so a
/// corrupt or truncated payload fails with `MalformedFrame` instead of
/// reading past the end.
pub fn decode_records(payload: Bytes) -> Result<Vec<Bytes>> {
    let total = payload.len();
    let mut rest = payload;
    let mut records = Vec::new();

    while rest.has_remaining() {
        let offset = total - rest.remaining();

        if rest.remaining() < RECORD_LEN_SIZE {
            return Err(WireError::MalformedFrame(format!(
                "Record {} at offset {}: missing length prefix ({} bytes left)",
                records.len(),
                offset,
                rest.remaining()
            )));
        }

        let record_len = rest.get_u32() as usize;
        if record_len > rest.remaining() {
            return Err(WireError::MalformedFrame(format!(
                "Record {} at offset {}: declares {} bytes but only {} remain",
                records.len(),
                offset,
                record_len,
                rest.remaining()
            )));
        }

        records.push(rest.split_to(record_len));
    }

    Ok(records)
}
