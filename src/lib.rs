//! # framewire
//!
//! A minimal framing protocol over one TCP connection, with:
//! - Two frame shapes: a single message, and a set of length-prefixed records
//! - Big-endian, fixed-width headers on every frame
//! - Full-read semantics (short reads surface as disconnects)
//! - A single-client, single-threaded dispatch loop on the server
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────┐                 ┌──────────────────────┐
//! │        Client        │                 │        Server        │
//! │  console → RecordSet │                 │  Listener → accept   │
//! └──────────┬───────────┘                 └──────────┬───────────┘
//!            │                                        │
//!            ▼                                        ▼
//! ┌──────────────────────┐    TCP stream   ┌──────────────────────┐
//! │     Frame Codec      │ ──────────────► │   Dispatch Session   │
//! │ tag | len | payload  │                 │ WAIT_TAG → route     │
//! └──────────────────────┘                 └──────────┬───────────┘
//!                                                     │
//!                                                     ▼
//!                                              ┌─────────────┐
//!                                              │    Sink     │
//!                                              │  (logging)  │
//!                                              └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod logging;

pub mod protocol;
pub mod sink;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, WireError};
pub use config::{ClientConfig, ServerConfig};
pub use client::Client;
pub use network::{Server, Session};
pub use protocol::{Frame, OpCode, RecordSet};
pub use sink::{MemorySink, Sink, TracingSink};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of framewire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
