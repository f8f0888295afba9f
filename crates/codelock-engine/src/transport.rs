//! Byte-level transport abstraction.
//!
//! The engine talks to the outside world through a [`Transport`]: an
//! ordered, reliable byte stream with blocking read/write primitives. On
//! hardware this is a UART; in the reference harness it is a channel pair
//! bridged to a TCP socket; in tests it is a canned byte script.

use std::collections::VecDeque;
use thiserror::Error;

/// Errors surfaced by a [`Transport`].
///
/// Every transport error is terminal for the engine: a broken link cannot
/// deliver a response, so the engine propagates the error out of its run
/// loop instead of retrying. The harness decides what "halt" means.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The link was closed and no further bytes will arrive.
    #[error("transport closed")]
    Closed,

    /// The link itself failed.
    #[error("transport fault: {0}")]
    Fault(String),
}

/// A blocking, ordered byte-stream link.
pub trait Transport {
    /// Block until one byte arrives or the link faults.
    fn receive_byte(&mut self) -> Result<u8, TransportError>;

    /// Block until all of `bytes` are sent or the link faults.
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), TransportError>;
}

/// Minimal scripted transport used in tests.
///
/// Yields the scripted bytes one at a time, then fails with
/// [`TransportError::Closed`]. Everything the engine transmits is captured
/// for inspection.
#[derive(Debug, Default)]
pub struct ScriptTransport {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl ScriptTransport {
    /// Create a transport that will yield `script` byte by byte.
    pub fn new(script: &[u8]) -> Self {
        ScriptTransport {
            rx: script.iter().copied().collect(),
            tx: Vec::new(),
        }
    }

    /// Append more bytes to the receive script.
    pub fn push(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    /// All bytes transmitted so far.
    pub fn transmitted(&self) -> &[u8] {
        &self.tx
    }
}

impl Transport for ScriptTransport {
    fn receive_byte(&mut self) -> Result<u8, TransportError> {
        self.rx.pop_front().ok_or(TransportError::Closed)
    }

    fn transmit(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.tx.extend_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_transport_yields_then_closes() {
        let mut transport = ScriptTransport::new(b"ab");
        assert_eq!(transport.receive_byte().unwrap(), b'a');
        assert_eq!(transport.receive_byte().unwrap(), b'b');
        assert_eq!(transport.receive_byte().unwrap_err(), TransportError::Closed);
    }

    #[test]
    fn test_script_transport_captures_transmits() {
        let mut transport = ScriptTransport::default();
        transport.transmit(b"OK\r\n").unwrap();
        transport.transmit(b"SAVED\r\n").unwrap();
        assert_eq!(transport.transmitted(), b"OK\r\nSAVED\r\n");
    }
}
