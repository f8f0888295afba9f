//! Responses emitted by the Dongle Lock device.
//!
//! Every command produces exactly one response line. All responses are
//! terminated with `\r\n` except `CODE:<value>`, which the device firmware
//! has always terminated with a bare `\n`; that quirk is part of the wire
//! format and is kept byte-for-byte.

use crate::error::{ProtocolError, ProtocolResult};

/// Prefix of a code-value response.
pub const CODE_PREFIX: &str = "CODE:";

/// A response line, one per command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Command accepted (`OK`).
    Ok,

    /// Command rejected: no session open, or the line was malformed
    /// (`ERROR`).
    Error,

    /// The queried slot holds no code (`NOT_FOUND`).
    NotFound,

    /// The code was stored (`SAVED`).
    Saved,

    /// The code stored in the queried slot (`CODE:<value>`).
    Code(String),
}

impl Response {
    /// Encode the response as the exact bytes the device puts on the wire.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Response::Ok => b"OK\r\n".to_vec(),
            Response::Error => b"ERROR\r\n".to_vec(),
            Response::NotFound => b"NOT_FOUND\r\n".to_vec(),
            Response::Saved => b"SAVED\r\n".to_vec(),
            // Bare '\n' terminator, unlike every other response.
            Response::Code(value) => format!("{}{}\n", CODE_PREFIX, value).into_bytes(),
        }
    }

    /// Parse a response line (terminator already stripped).
    pub fn parse(line: &str) -> ProtocolResult<Response> {
        match line {
            "OK" => Ok(Response::Ok),
            "ERROR" => Ok(Response::Error),
            "NOT_FOUND" => Ok(Response::NotFound),
            "SAVED" => Ok(Response::Saved),
            _ => match line.strip_prefix(CODE_PREFIX) {
                Some(value) => Ok(Response::Code(value.to_string())),
                None => Err(ProtocolError::UnrecognizedResponse(line.to_string())),
            },
        }
    }

    /// Check if this is the `OK` acknowledgement.
    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok)
    }

    /// Check if this is the `ERROR` rejection.
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error)
    }

    /// Get the code value if this is a `CODE:` response.
    pub fn as_code(&self) -> Option<&str> {
        match self {
            Response::Code(value) => Some(value),
            _ => None,
        }
    }
}
