//! Network Module
//!
//! TCP transport and the server-side dispatch loop.
//!
//! ## Architecture
//! - Blocking I/O on a single thread
//! - One connection per process lifetime
//! - Frames handled strictly in arrival order

mod transport;
mod connection;
mod session;
mod server;

pub use transport::{connect, resolve, Listener};
pub use connection::Connection;
pub use session::{Session, Step};
pub use server::Server;
