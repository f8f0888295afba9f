//! Host-side client for the Dongle Lock.
//!
//! Drives the device's line protocol over any ordered byte stream — a
//! serial port, a TCP socket standing in for one, or an in-memory pipe in
//! tests. The protocol is strictly request/response: the client sends one
//! command line and reads exactly one response line before sending the
//! next.
//!
//! ## Usage
//!
//! ```no_run
//! use codelock_client::Client;
//! use codelock_protocol::SlotIndex;
//! use std::net::TcpStream;
//!
//! let stream = TcpStream::connect("127.0.0.1:4750")?;
//! let mut client = Client::new(stream);
//! client.connect()?;
//! client.set_code(SlotIndex::new(0).unwrap(), "hunter2")?;
//! assert_eq!(
//!     client.get_code(SlotIndex::new(0).unwrap())?,
//!     Some("hunter2".to_string())
//! );
//! client.disconnect()?;
//! # Ok::<(), codelock_client::ClientError>(())
//! ```

use codelock_protocol::{Command, LineCodec, ProtocolError, Response, SlotIndex};
use log::{debug, trace};
use std::io::{Read, Write};
use thiserror::Error;

/// Errors that can occur when talking to the device.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The device sent a line that is not a known response.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The device answered `ERROR`: no session open, or it considered the
    /// command malformed.
    #[error("device rejected the command")]
    Rejected,

    /// The device answered with a response that does not fit the command.
    #[error("unexpected response: {0:?}")]
    UnexpectedResponse(Response),

    /// The stream reached end-of-file before a full response line arrived.
    #[error("link closed by peer")]
    LinkClosed,
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// A blocking Dongle Lock client over an ordered byte stream.
pub struct Client<S> {
    stream: S,
    codec: LineCodec,
}

impl<S: Read + Write> Client<S> {
    /// Wrap a byte stream. No handshake is performed; call
    /// [`Client::connect`] to open a session.
    pub fn new(stream: S) -> Self {
        Client {
            stream,
            codec: LineCodec::new(),
        }
    }

    /// Consume the client and return the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }

    /// Send one command and read its single response line.
    pub fn execute(&mut self, command: &Command) -> ClientResult<Response> {
        let line = command.to_command_string();
        trace!("tx command: {:?}", line);
        self.stream.write_all(&command.encode())?;
        self.stream.flush()?;

        let response = self.read_response()?;
        trace!("rx response: {:?}", response);
        Ok(response)
    }

    /// Open a session. Idempotent on the device side.
    pub fn connect(&mut self) -> ClientResult<()> {
        match self.execute(&Command::Connect)? {
            Response::Ok => {
                debug!("session opened");
                Ok(())
            }
            Response::Error => Err(ClientError::Rejected),
            other => Err(ClientError::UnexpectedResponse(other)),
        }
    }

    /// Close the session. The device keeps the stored codes.
    pub fn disconnect(&mut self) -> ClientResult<()> {
        match self.execute(&Command::Disconnect)? {
            Response::Ok => {
                debug!("session closed");
                Ok(())
            }
            Response::Error => Err(ClientError::Rejected),
            other => Err(ClientError::UnexpectedResponse(other)),
        }
    }

    /// Store a code. Values longer than the device's capacity are truncated
    /// by the device, silently.
    pub fn set_code(&mut self, slot: SlotIndex, value: &str) -> ClientResult<()> {
        let command = Command::SetCode {
            slot,
            value: value.to_string(),
        };
        match self.execute(&command)? {
            Response::Saved => Ok(()),
            Response::Error => Err(ClientError::Rejected),
            other => Err(ClientError::UnexpectedResponse(other)),
        }
    }

    /// Read the code in a slot, or `None` when the slot holds nothing.
    pub fn get_code(&mut self, slot: SlotIndex) -> ClientResult<Option<String>> {
        match self.execute(&Command::GetCode { slot })? {
            Response::Code(value) => Ok(Some(value)),
            Response::NotFound => Ok(None),
            Response::Error => Err(ClientError::Rejected),
            other => Err(ClientError::UnexpectedResponse(other)),
        }
    }

    /// Read bytes until the codec yields one full response line.
    fn read_response(&mut self) -> ClientResult<Response> {
        loop {
            if let Some(line) = self.codec.decode_line() {
                return Ok(Response::parse(&line)?);
            }
            let mut buf = [0u8; 256];
            let n = self.stream.read(&mut buf)?;
            if n == 0 {
                return Err(ClientError::LinkClosed);
            }
            self.codec.push(&buf[..n]);
        }
    }
}
