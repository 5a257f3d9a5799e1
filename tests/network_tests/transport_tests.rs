//! Transport Tests
//!
//! Connect/listen/accept over loopback and the failures each can report.

use std::thread;

use framewire::network::{connect, resolve, Listener};
use framewire::protocol::{OpCode, RecordSet};
use framewire::WireError;

// =============================================================================
// Helper Functions
// =============================================================================

fn loopback_listener() -> (Listener, String) {
    let listener = Listener::bind("127.0.0.1", "0").unwrap();
    let port = listener.local_addr().unwrap().port().to_string();
    (listener, port)
}

// =============================================================================
// Resolution Tests
// =============================================================================

#[test]
fn test_resolve_loopback() {
    let addrs = resolve("127.0.0.1", "4444").unwrap();
    assert!(addrs.iter().any(|a| a.port() == 4444));
}

#[test]
fn test_invalid_port_is_connection_error() {
    assert!(matches!(resolve("127.0.0.1", "not-a-port"), Err(WireError::Connection(_))));
    assert!(matches!(resolve("127.0.0.1", "70000"), Err(WireError::Connection(_))));
    assert!(matches!(connect("127.0.0.1", ""), Err(WireError::Connection(_))));
}

#[test]
fn test_connect_refused_is_connection_error() {
    let (listener, port) = loopback_listener();
    drop(listener);

    let result = connect("127.0.0.1", &port);
    assert!(matches!(result, Err(WireError::Connection(_))));
}

#[test]
fn test_bind_in_use_is_connection_error() {
    let (_listener, port) = loopback_listener();
    let result = Listener::bind("127.0.0.1", &port);
    assert!(matches!(result, Err(WireError::Connection(_))));
}

// =============================================================================
// Connection Tests
// =============================================================================

#[test]
fn test_accept_and_exchange_frames() {
    let (listener, port) = loopback_listener();

    let client = thread::spawn(move || {
        let mut conn = connect("127.0.0.1", &port).unwrap();
        conn.send_message(b"ping\0").unwrap();
        conn.send_records(&RecordSet::new().with(b"x").with(b"yz")).unwrap();
        conn.close().unwrap();
    });

    let mut conn = listener.accept().unwrap();

    assert_eq!(conn.read_tag().unwrap(), OpCode::SimpleMessage.as_u32());
    assert_eq!(&conn.read_payload().unwrap()[..], b"ping\0");

    assert_eq!(conn.read_tag().unwrap(), OpCode::RecordSet.as_u32());
    assert_eq!(conn.read_payload().unwrap().len(), 4 + 1 + 4 + 2);

    client.join().unwrap();

    // Client is gone: the next read reports a disconnect
    assert!(conn.read_tag().unwrap_err().is_disconnect());
    conn.close().unwrap();
}

#[test]
fn test_read_exact_over_socket() {
    let (listener, port) = loopback_listener();

    let client = thread::spawn(move || {
        let mut conn = connect("127.0.0.1", &port).unwrap();
        conn.send_frame(OpCode::SimpleMessage, &[1, 2, 3]).unwrap();
    });

    let mut conn = listener.accept().unwrap();
    let raw = conn.read_exact(11).unwrap();
    assert_eq!(&raw[..], &[0, 0, 0, 0, 0, 0, 0, 3, 1, 2, 3]);

    client.join().unwrap();
    assert!(conn.read_exact(1).unwrap_err().is_disconnect());
}
