//! Host-side line codec.
//!
//! Accumulates bytes received from the device and splits them into response
//! lines. The device terminates most responses with `\r\n` but `CODE:`
//! responses with a bare `\n`, so the codec splits on `\n` and strips any
//! `\r` bytes from the line.

use bytes::{Buf, BytesMut};

/// Maximum command line length the device accepts, excluding the terminator.
///
/// Longer input lines are force-terminated by the device at this length and
/// the remainder spills into the next command line.
pub const MAX_LINE_LENGTH: usize = 127;

/// Maximum stored length of one access code, in bytes.
///
/// `SET_CODE` values longer than this are silently truncated by the device.
pub const MAX_CODE_LENGTH: usize = 100;

/// A codec for splitting the device's byte stream into response lines.
#[derive(Debug, Default)]
pub struct LineCodec {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
}

impl LineCodec {
    /// Create a new line codec.
    pub fn new() -> Self {
        LineCodec {
            buffer: BytesMut::with_capacity(MAX_LINE_LENGTH * 2),
        }
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to decode one complete line from the buffer.
    ///
    /// Returns `Some(line)` (terminator and any `\r` bytes removed) if a
    /// `\n` has been received, or `None` if more data is needed.
    pub fn decode_line(&mut self) -> Option<String> {
        let end = self.buffer.iter().position(|&byte| byte == b'\n')?;

        let line_data = self.buffer.split_to(end);
        self.buffer.advance(1); // the '\n' itself

        let line: Vec<u8> = line_data
            .iter()
            .copied()
            .filter(|&byte| byte != b'\r')
            .collect();
        Some(String::from_utf8_lossy(&line).to_string())
    }

    /// Get the number of buffered bytes.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
