//! Delivery Sinks
//!
//! Where the server hands decoded frames. The session never logs payloads
//! itself; it calls into a `Sink` it was given at construction.

use bytes::Bytes;

use crate::protocol::display_text;

/// Receives everything the dispatch loop decodes
pub trait Sink {
    /// A SIMPLE_MESSAGE arrived
    fn message(&mut self, body: &[u8]);

    /// A RECORD_SET arrived; its records follow through `record`, in order
    fn record_set(&mut self, _count: usize) {}

    /// One record of the current RECORD_SET
    fn record(&mut self, index: usize, body: &[u8]);

    /// A frame with an unrecognised tag was skipped
    fn unknown(&mut self, _tag: u32, _skipped: usize) {}
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn message(&mut self, body: &[u8]) {
        (**self).message(body)
    }

    fn record_set(&mut self, count: usize) {
        (**self).record_set(count)
    }

    fn record(&mut self, index: usize, body: &[u8]) {
        (**self).record(index, body)
    }

    fn unknown(&mut self, tag: u32, skipped: usize) {
        (**self).unknown(tag, skipped)
    }
}

// =============================================================================
// Tracing Sink
// =============================================================================

/// Logs every delivery through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn message(&mut self, body: &[u8]) {
        tracing::info!("Received message: {}", display_text(body));
    }

    fn record_set(&mut self, count: usize) {
        tracing::info!("Received {} values:", count);
    }

    fn record(&mut self, _index: usize, body: &[u8]) {
        tracing::info!("{}", display_text(body));
    }

    fn unknown(&mut self, tag: u32, skipped: usize) {
        tracing::warn!("Unknown operation {} ({} payload bytes skipped)", tag, skipped);
    }
}

// =============================================================================
// Memory Sink
// =============================================================================

/// One delivery recorded by `MemorySink`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Message(Bytes),
    RecordSet(Vec<Bytes>),
    Unknown { tag: u32, skipped: usize },
}

/// Keeps deliveries in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    deliveries: Vec<Delivery>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn into_deliveries(self) -> Vec<Delivery> {
        self.deliveries
    }
}

impl Sink for MemorySink {
    fn message(&mut self, body: &[u8]) {
        self.deliveries.push(Delivery::Message(Bytes::copy_from_slice(body)));
    }

    fn record_set(&mut self, count: usize) {
        self.deliveries.push(Delivery::RecordSet(Vec::with_capacity(count)));
    }

    fn record(&mut self, _index: usize, body: &[u8]) {
        let record = Bytes::copy_from_slice(body);
        match self.deliveries.last_mut() {
            Some(Delivery::RecordSet(records)) => records.push(record),
            _ => self.deliveries.push(Delivery::RecordSet(vec![record])),
        }
    }

    fn unknown(&mut self, tag: u32, skipped: usize) {
        self.deliveries.push(Delivery::Unknown { tag, skipped });
    }
}
