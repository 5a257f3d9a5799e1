//! Tests for the dispatch session
//!
//! These tests drive `Session` over in-memory streams and verify:
//! - Routing by tag
//! - Skipping frames with unknown tags
//! - Termination on disconnect and on malformed record sets

use std::io::{Cursor, Read};

use bytes::{Bytes, BytesMut};
use framewire::network::{Session, Step};
use framewire::protocol::{encode_frame, encode_frame_into, OpCode, RecordSet};
use framewire::sink::{Delivery, MemorySink, Sink};
use framewire::WireError;

// =============================================================================
// Helper Functions
// =============================================================================

fn stream(frames: &[(u32, &[u8])]) -> Cursor<Vec<u8>> {
    let mut buf = BytesMut::new();
    for (tag, payload) in frames {
        encode_frame_into(*tag, payload, &mut buf);
    }
    Cursor::new(buf.to_vec())
}

fn run_to_end(input: Cursor<Vec<u8>>) -> (WireError, Vec<Delivery>) {
    let mut session = Session::new(input, MemorySink::new());
    let reason = session.run();
    let (_, sink) = session.into_parts();
    (reason, sink.into_deliveries())
}

// =============================================================================
// Routing Tests
// =============================================================================

#[test]
fn test_message_is_delivered() {
    let mut session = Session::new(stream(&[(0, b"hello\0")]), MemorySink::new());

    assert_eq!(session.step().unwrap(), Step::Message(6));
    assert_eq!(
        session.sink().deliveries(),
        &[Delivery::Message(Bytes::from_static(b"hello\0"))]
    );
}

#[test]
fn test_record_set_is_delivered_in_order() {
    let set = RecordSet::new().with(b"Hola\0").with(b"Mundo\0");
    let mut session = Session::new(stream(&[(1, set.as_bytes())]), MemorySink::new());

    assert_eq!(session.step().unwrap(), Step::RecordSet(2));
    assert_eq!(
        session.sink().deliveries(),
        &[Delivery::RecordSet(vec![
            Bytes::from_static(b"Hola\0"),
            Bytes::from_static(b"Mundo\0"),
        ])]
    );
}

#[test]
fn test_empty_record_set() {
    let mut session = Session::new(stream(&[(1, b"")]), MemorySink::new());

    assert_eq!(session.step().unwrap(), Step::RecordSet(0));
    assert_eq!(session.sink().deliveries(), &[Delivery::RecordSet(vec![])]);
}

#[test]
fn test_frames_processed_in_arrival_order() {
    let set = RecordSet::new().with(b"r");
    let input = stream(&[(0, b"first"), (1, set.as_bytes()), (0, b"last")]);

    let (reason, deliveries) = run_to_end(input);
    assert!(reason.is_disconnect());
    assert_eq!(
        deliveries,
        vec![
            Delivery::Message(Bytes::from_static(b"first")),
            Delivery::RecordSet(vec![Bytes::from_static(b"r")]),
            Delivery::Message(Bytes::from_static(b"last")),
        ]
    );
}

// =============================================================================
// Unknown Tag Tests
// =============================================================================

#[test]
fn test_unknown_tag_is_skipped() {
    let input = stream(&[(42, b"ignored"), (0, b"after")]);
    let mut session = Session::new(input, MemorySink::new());

    assert_eq!(session.step().unwrap(), Step::Unknown { tag: 42, skipped: 7 });
    assert_eq!(session.step().unwrap(), Step::Message(5));
    assert_eq!(session.frames(), 2);
}

#[test]
fn test_unknown_tag_does_not_stop_loop() {
    let input = stream(&[(7, b""), (u32::MAX, b"xyz"), (0, b"ok")]);

    let (reason, deliveries) = run_to_end(input);
    assert!(reason.is_disconnect());
    assert_eq!(
        deliveries,
        vec![
            Delivery::Unknown { tag: 7, skipped: 0 },
            Delivery::Unknown { tag: u32::MAX, skipped: 3 },
            Delivery::Message(Bytes::from_static(b"ok")),
        ]
    );
}

/// Stream of one unknown-tag frame whose payload is generated, not stored
struct GeneratedFrame {
    header: Cursor<Vec<u8>>,
    remaining: u64,
}

impl GeneratedFrame {
    fn new(tag: u32, declared: u32, actual: u64) -> Self {
        let mut header = tag.to_be_bytes().to_vec();
        header.extend_from_slice(&declared.to_be_bytes());
        Self {
            header: Cursor::new(header),
            remaining: actual,
        }
    }
}

impl Read for GeneratedFrame {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.header.read(buf)?;
        if n > 0 {
            return Ok(n);
        }
        let n = buf.len().min(self.remaining as usize);
        buf[..n].fill(0xAA);
        self.remaining -= n as u64;
        Ok(n)
    }
}

#[test]
fn test_large_unknown_payload_is_skipped() {
    let len: u32 = 256 * 1024 * 1024;
    let mut session = Session::new(GeneratedFrame::new(99, len, len as u64), MemorySink::new());

    assert_eq!(
        session.step().unwrap(),
        Step::Unknown { tag: 99, skipped: len as usize }
    );
    assert!(session.step().unwrap_err().is_disconnect());
}

#[test]
fn test_truncated_unknown_frame_is_disconnect() {
    let mut session = Session::new(GeneratedFrame::new(5, 1000, 10), MemorySink::new());

    assert!(matches!(session.step(), Err(WireError::Disconnected)));
    assert!(session.sink().deliveries().is_empty());
}

// =============================================================================
// Termination Tests
// =============================================================================

#[test]
fn test_empty_stream_is_disconnect() {
    let (reason, deliveries) = run_to_end(Cursor::new(Vec::new()));
    assert!(matches!(reason, WireError::Disconnected));
    assert!(deliveries.is_empty());
}

#[test]
fn test_disconnect_mid_payload() {
    let mut bytes = encode_frame(OpCode::SimpleMessage, b"complete").to_vec();
    let partial = encode_frame(OpCode::SimpleMessage, b"cut short");
    bytes.extend_from_slice(&partial[..partial.len() - 3]);

    let (reason, deliveries) = run_to_end(Cursor::new(bytes));
    assert!(reason.is_disconnect());
    assert_eq!(deliveries, vec![Delivery::Message(Bytes::from_static(b"complete"))]);
}

#[test]
fn test_disconnect_mid_header() {
    let mut bytes = encode_frame(OpCode::RecordSet, &[]).to_vec();
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00]);

    let (reason, deliveries) = run_to_end(Cursor::new(bytes));
    assert!(reason.is_disconnect());
    assert_eq!(deliveries.len(), 1);
}

#[test]
fn test_malformed_record_set_is_fatal() {
    // Record claims 100 bytes inside a 6-byte payload
    let bad = [0x00, 0x00, 0x00, 0x64, b'h', b'i'];
    let input = stream(&[(1, &bad), (0, b"never")]);

    let (reason, deliveries) = run_to_end(input);
    assert!(matches!(reason, WireError::MalformedFrame(_)));
    assert!(deliveries.is_empty());
}

// =============================================================================
// Sink Tests
// =============================================================================

#[derive(Default)]
struct Counting {
    messages: usize,
    records: Vec<usize>,
}

impl Sink for Counting {
    fn message(&mut self, _body: &[u8]) {
        self.messages += 1;
    }

    fn record(&mut self, index: usize, _body: &[u8]) {
        self.records.push(index);
    }
}

#[test]
fn test_borrowed_sink() {
    let set = RecordSet::new().with(b"a").with(b"b").with(b"c");
    let input = stream(&[(0, b"m"), (1, set.as_bytes()), (9, b"skip")]);

    let mut counting = Counting::default();
    let reason = Session::new(input, &mut counting).run();

    assert!(reason.is_disconnect());
    assert_eq!(counting.messages, 1);
    assert_eq!(counting.records, vec![0, 1, 2]);
}
