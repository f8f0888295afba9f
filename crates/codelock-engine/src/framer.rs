//! Byte-stream framing into command lines.

use crate::transport::{Transport, TransportError};
use codelock_protocol::MAX_LINE_LENGTH;

/// Accumulates received bytes into command lines.
///
/// Carriage returns are discarded wherever they occur, `\n` terminates a
/// line, and the buffer holds at most [`MAX_LINE_LENGTH`] bytes. When an
/// input line exceeds the buffer, the accumulated bytes are handed off as a
/// line immediately: the byte that hit the limit is dropped, and the rest
/// of the over-long input line is left unread, so it becomes the prefix of
/// the next command line. The spill-over is part of the device's wire
/// behavior: peers cannot assume the tail of an over-long line is discarded.
#[derive(Debug, Default)]
pub struct LineFramer {
    buf: Vec<u8>,
    line: String,
}

impl LineFramer {
    /// Create a new framer with an empty line buffer.
    pub fn new() -> Self {
        LineFramer {
            buf: Vec::with_capacity(MAX_LINE_LENGTH),
            line: String::with_capacity(MAX_LINE_LENGTH),
        }
    }

    /// Read the next command line from `transport`.
    ///
    /// Blocks until a line is complete. The returned line excludes the
    /// terminator and may be empty. A transport error is terminal and is
    /// propagated unchanged.
    pub fn read_line<T: Transport>(&mut self, transport: &mut T) -> Result<&str, TransportError> {
        self.buf.clear();
        loop {
            let byte = transport.receive_byte()?;
            match byte {
                b'\r' => continue,
                b'\n' => break,
                byte => {
                    if self.buf.len() < MAX_LINE_LENGTH {
                        self.buf.push(byte);
                    } else {
                        // Buffer full: force-terminate here. This byte is
                        // dropped and the remainder of the input line is
                        // consumed by the next framing cycle.
                        break;
                    }
                }
            }
        }
        self.line.clear();
        self.line.push_str(&String::from_utf8_lossy(&self.buf));
        Ok(&self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ScriptTransport;

    #[test]
    fn test_read_simple_line() {
        let mut transport = ScriptTransport::new(b"CONNECT\n");
        let mut framer = LineFramer::new();
        assert_eq!(framer.read_line(&mut transport).unwrap(), "CONNECT");
    }

    #[test]
    fn test_carriage_returns_stripped_anywhere() {
        let mut transport = ScriptTransport::new(b"CON\rNECT\r\n");
        let mut framer = LineFramer::new();
        assert_eq!(framer.read_line(&mut transport).unwrap(), "CONNECT");
    }

    #[test]
    fn test_empty_line() {
        let mut transport = ScriptTransport::new(b"\r\n");
        let mut framer = LineFramer::new();
        assert_eq!(framer.read_line(&mut transport).unwrap(), "");
    }

    #[test]
    fn test_consecutive_lines() {
        let mut transport = ScriptTransport::new(b"ONE\nTWO\n");
        let mut framer = LineFramer::new();
        assert_eq!(framer.read_line(&mut transport).unwrap(), "ONE");
        assert_eq!(framer.read_line(&mut transport).unwrap(), "TWO");
    }

    #[test]
    fn test_overlong_line_spills_into_next() {
        // 130 payload bytes: 127 fill the buffer, the 128th is dropped at
        // the limit, and the final two spill into the next line.
        let mut input = vec![b'A'; 130];
        input.push(b'\n');
        let mut transport = ScriptTransport::new(&input);
        let mut framer = LineFramer::new();

        let first = framer.read_line(&mut transport).unwrap().to_string();
        assert_eq!(first.len(), MAX_LINE_LENGTH);

        let second = framer.read_line(&mut transport).unwrap();
        assert_eq!(second, "AA");
    }

    #[test]
    fn test_transport_closed_mid_line() {
        let mut transport = ScriptTransport::new(b"CONNE");
        let mut framer = LineFramer::new();
        assert_eq!(
            framer.read_line(&mut transport).unwrap_err(),
            TransportError::Closed
        );
    }
}
