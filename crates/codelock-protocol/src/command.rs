//! Commands accepted by the Dongle Lock device.
//!
//! Commands are single case-sensitive ASCII lines. The grammar is strict:
//! `GET_CODE_<n>` must end immediately after the digit, and `SET_CODE_<n>`
//! must be followed by exactly one `:` before the value.

use crate::error::{ProtocolError, ProtocolResult};
use crate::slot::SlotIndex;

/// The connect handshake line.
pub const CONNECT: &str = "CONNECT";

/// The disconnect line.
pub const DISCONNECT: &str = "DISCONNECT";

/// Prefix of the code-query command, up to the slot digit.
pub const GET_CODE_PREFIX: &str = "GET_CODE_";

/// Prefix of the code-store command, up to the slot digit.
pub const SET_CODE_PREFIX: &str = "SET_CODE_";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a session. Accepted in any state.
    Connect,

    /// Close the session. The store survives.
    Disconnect,

    /// Read the code stored in a slot.
    GetCode {
        /// The slot to query.
        slot: SlotIndex,
    },

    /// Store a code into a slot.
    ///
    /// The value is the remainder of the line after the first `:`. It may
    /// be empty and may itself contain `:` characters. The device truncates
    /// it to the store's capacity when saving.
    SetCode {
        /// The slot to write.
        slot: SlotIndex,
        /// The code value as it appeared on the line.
        value: String,
    },
}

impl Command {
    /// Parse a command line (terminator already stripped).
    ///
    /// Any line that does not match one of the four accepted shapes is a
    /// [`ProtocolError::MalformedCommand`] — wrong digit, missing colon,
    /// trailing characters after a GET digit, or an unknown verb.
    pub fn parse(line: &str) -> ProtocolResult<Command> {
        if line == CONNECT {
            return Ok(Command::Connect);
        }
        if line == DISCONNECT {
            return Ok(Command::Disconnect);
        }

        if let Some(rest) = line.strip_prefix(GET_CODE_PREFIX) {
            // Exactly one digit, nothing after it.
            let mut chars = rest.chars();
            if let Some(slot) = chars.next().and_then(SlotIndex::from_wire_digit) {
                if chars.next().is_none() {
                    return Ok(Command::GetCode { slot });
                }
            }
            return Err(ProtocolError::MalformedCommand(line.to_string()));
        }

        if let Some(rest) = line.strip_prefix(SET_CODE_PREFIX) {
            // One digit, then exactly one ':', then the value (possibly empty).
            let mut chars = rest.chars();
            let slot = chars.next().and_then(SlotIndex::from_wire_digit);
            if let (Some(slot), Some(':')) = (slot, chars.next()) {
                return Ok(Command::SetCode {
                    slot,
                    value: chars.as_str().to_string(),
                });
            }
            return Err(ProtocolError::MalformedCommand(line.to_string()));
        }

        Err(ProtocolError::MalformedCommand(line.to_string()))
    }

    /// The command line without its terminator.
    pub fn to_command_string(&self) -> String {
        match self {
            Command::Connect => CONNECT.to_string(),
            Command::Disconnect => DISCONNECT.to_string(),
            Command::GetCode { slot } => format!("{}{}", GET_CODE_PREFIX, slot.wire_digit()),
            Command::SetCode { slot, value } => {
                format!("{}{}:{}", SET_CODE_PREFIX, slot.wire_digit(), value)
            }
        }
    }

    /// Encode the command as bytes to send, including the `\n` terminator.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = self.to_command_string().into_bytes();
        buf.push(b'\n');
        buf
    }
}
