//! Dongle Lock line protocol
//!
//! This crate provides the wire-level types for talking to a Dongle Lock
//! device: a serial access-code store driven by a line-based text protocol.
//!
//! # Protocol Overview
//!
//! The protocol is a simple line-based text interface:
//!
//! - **Commands** (host → device): single ASCII lines terminated with `\n`
//!   (carriage returns are ignored by the device wherever they appear)
//! - **Responses** (device → host): one literal line per command
//!
//! # Command Set
//!
//! | Command | Meaning |
//! |---|---|
//! | `CONNECT` | Open a session; always accepted |
//! | `DISCONNECT` | Close the session |
//! | `GET_CODE_<n>` | Read slot `n` (1–3) |
//! | `SET_CODE_<n>:<value>` | Store `value` into slot `n` (1–3) |
//!
//! Every command except `CONNECT` is rejected with `ERROR` while no session
//! is open. Responses are `OK`, `ERROR`, `NOT_FOUND`, `SAVED`, or
//! `CODE:<value>`; all are `\r\n`-terminated except `CODE:`, which the
//! device terminates with a bare `\n`.
//!
//! # Example
//!
//! ```
//! use codelock_protocol::{Command, Response, SlotIndex};
//!
//! let slot = SlotIndex::new(1).unwrap();
//! let cmd = Command::GetCode { slot };
//! assert_eq!(cmd.encode(), b"GET_CODE_2\n");
//!
//! let response = Response::parse("CODE:hunter2").unwrap();
//! assert_eq!(response, Response::Code("hunter2".to_string()));
//! ```

mod codec;
mod command;
mod error;
mod response;
mod slot;

pub use codec::*;
pub use command::*;
pub use error::*;
pub use response::*;
pub use slot::*;
