//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Tag (4)  │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! Both header fields are big-endian `u32`. Every frame carries a length,
//! whatever its tag, so a reader can always find the next frame boundary.

use std::io::{self, ErrorKind, Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, WireError};
use super::{Frame, OpCode};

/// Size of the tag field
pub const TAG_SIZE: usize = 4;

/// Size of the length field
pub const LEN_SIZE: usize = 4;

/// Header size: 4 bytes tag + 4 bytes length
pub const HEADER_SIZE: usize = TAG_SIZE + LEN_SIZE;

/// Maximum payload size (the largest value a signed 32-bit length can hold)
pub const MAX_PAYLOAD_SIZE: u32 = i32::MAX as u32;

// =============================================================================
// Frame Encoding/Decoding
// =============================================================================

/// Encode a frame to bytes
///
/// Format: tag (4) + payload_len (4) + payload
pub fn encode_frame(op: OpCode, payload: &[u8]) -> Bytes {
    let mut message = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    encode_frame_into(op.as_u32(), payload, &mut message);
    message.freeze()
}

/// Append an encoded frame with a raw tag to `dst`
pub fn encode_frame_into(tag: u32, payload: &[u8], dst: &mut BytesMut) {
    debug_assert!(payload.len() <= MAX_PAYLOAD_SIZE as usize, "payload exceeds MAX_PAYLOAD_SIZE");
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_u32(tag);
    dst.put_u32(payload.len() as u32);
    dst.put_slice(payload);
}

/// Decode one complete frame from bytes
///
/// The slice must hold exactly one frame, no more and no less.
pub fn decode_frame(bytes: &[u8]) -> Result<Frame> {
    if bytes.len() < HEADER_SIZE {
        return Err(WireError::MalformedFrame(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    // Parse header
    let tag = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let payload_len =
        check_payload_len(u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]))?;

    let total_len = HEADER_SIZE + payload_len;
    if bytes.len() < total_len {
        return Err(WireError::MalformedFrame(format!(
            "Incomplete payload: expected {} bytes, got {}",
            total_len,
            bytes.len()
        )));
    }
    if bytes.len() > total_len {
        return Err(WireError::MalformedFrame(format!(
            "Trailing data: {} bytes after frame",
            bytes.len() - total_len
        )));
    }

    Ok(Frame {
        tag,
        payload: Bytes::copy_from_slice(&bytes[HEADER_SIZE..total_len]),
    })
}

fn check_payload_len(len: u32) -> Result<usize> {
    if len > MAX_PAYLOAD_SIZE {
        return Err(WireError::MalformedFrame(format!(
            "Payload too large: {} bytes (max {})",
            len, MAX_PAYLOAD_SIZE
        )));
    }
    Ok(len as usize)
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read exactly `n` bytes from a stream
///
/// Blocks until all bytes arrive. If the peer closes first, the short read
/// is reported as `Disconnected`, never returned as data. The buffer grows
/// with the bytes actually received, so a huge `n` costs nothing up front.
pub fn read_exact<R: Read>(reader: &mut R, n: usize) -> Result<Bytes> {
    let mut buf = Vec::with_capacity(n.min(64 * 1024));
    let read = reader
        .by_ref()
        .take(n as u64)
        .read_to_end(&mut buf)
        .map_err(map_read_error)?;

    if read < n {
        tracing::trace!("Short read: wanted {} bytes, stream ended after {}", n, read);
        return Err(WireError::Disconnected);
    }
    Ok(Bytes::from(buf))
}

/// Read a fixed-size big-endian `u32`
fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut raw = [0u8; 4];
    reader.read_exact(&mut raw).map_err(map_read_error)?;
    Ok(u32::from_be_bytes(raw))
}

/// Read the tag of the next frame
///
/// A stream that ends here surfaces as `Disconnected`.
pub fn read_tag<R: Read>(reader: &mut R) -> Result<u32> {
    read_u32(reader)
}

/// Read a length field followed by that many payload bytes
pub fn read_payload<R: Read>(reader: &mut R) -> Result<Bytes> {
    let payload_len = check_payload_len(read_u32(reader)?)?;
    if payload_len == 0 {
        return Ok(Bytes::new());
    }
    read_exact(reader, payload_len)
}

/// Read a length field and discard that many payload bytes
///
/// The payload is streamed into a sink, never buffered. Returns the number
/// of bytes skipped.
pub fn skip_payload<R: Read>(reader: &mut R) -> Result<usize> {
    let payload_len = check_payload_len(read_u32(reader)?)?;
    let skipped = io::copy(&mut reader.by_ref().take(payload_len as u64), &mut io::sink())
        .map_err(map_read_error)? as usize;

    if skipped < payload_len {
        tracing::trace!("Short skip: wanted {} bytes, stream ended after {}", payload_len, skipped);
        return Err(WireError::Disconnected);
    }
    Ok(skipped)
}

/// Read a complete frame (tag, length, payload) from a stream
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Frame> {
    let tag = read_tag(reader)?;
    let payload = read_payload(reader)?;
    Ok(Frame { tag, payload })
}

/// Write a frame to a stream and flush it
pub fn write_frame<W: Write>(writer: &mut W, op: OpCode, payload: &[u8]) -> Result<()> {
    let bytes = encode_frame(op, payload);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Translate read failures that mean "the peer is gone"
fn map_read_error(e: std::io::Error) -> WireError {
    match e.kind() {
        ErrorKind::UnexpectedEof | ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted => {
            WireError::Disconnected
        }
        _ => WireError::Io(e),
    }
}
