//! Session gate and command dispatch.
//!
//! One command line in, one outcome out. The gate is evaluated before the
//! command shape: while no session is open, everything except `CONNECT` is
//! rejected, malformed or not.

use crate::store::CodeStore;
use codelock_protocol::{Command, Response};
use log::debug;

/// Connection state of the single serial session.
///
/// There is exactly one session at a time, with no timeout: the state only
/// changes on a successful `CONNECT` or `DISCONNECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No session open; only `CONNECT` is accepted.
    #[default]
    Disconnected,
    /// A session is open; all commands are accepted.
    Connected,
}

/// Result of dispatching one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `CONNECT` or `DISCONNECT` accepted.
    Ok,
    /// Command attempted while disconnected.
    Unauthorized,
    /// The line matched no accepted command shape.
    Malformed,
    /// Queried slot holds no code.
    NotFound,
    /// Code stored.
    Saved,
    /// Queried slot holds this code.
    Found(String),
}

impl Outcome {
    /// The response line this outcome puts on the wire.
    ///
    /// `Unauthorized` and `Malformed` are indistinguishable to the peer;
    /// both answer `ERROR`.
    pub fn into_response(self) -> Response {
        match self {
            Outcome::Ok => Response::Ok,
            Outcome::Unauthorized | Outcome::Malformed => Response::Error,
            Outcome::NotFound => Response::NotFound,
            Outcome::Saved => Response::Saved,
            Outcome::Found(value) => Response::Code(value),
        }
    }
}

/// Applies command lines against the session gate and the code store.
#[derive(Debug, Default)]
pub struct Dispatcher {
    session: SessionState,
    store: CodeStore,
}

impl Dispatcher {
    /// Create a dispatcher with no session open and an empty store.
    pub fn new() -> Self {
        Dispatcher::default()
    }

    /// The current session state.
    pub fn session(&self) -> SessionState {
        self.session
    }

    /// The code store.
    pub fn store(&self) -> &CodeStore {
        &self.store
    }

    /// Handle one command line and produce its outcome.
    ///
    /// Priority order: `CONNECT` is accepted in any state (idempotent, the
    /// store is untouched); everything else answers `Unauthorized` while
    /// disconnected; only then is the command shape dispatched.
    pub fn handle_line(&mut self, line: &str) -> Outcome {
        match Command::parse(line) {
            Ok(Command::Connect) => {
                self.session = SessionState::Connected;
                debug!("session opened");
                Outcome::Ok
            }
            _ if self.session == SessionState::Disconnected => {
                debug!("command rejected: no session open");
                Outcome::Unauthorized
            }
            Ok(Command::Disconnect) => {
                self.session = SessionState::Disconnected;
                debug!("session closed");
                Outcome::Ok
            }
            Ok(Command::GetCode { slot }) => match self.store.get(slot) {
                Some(value) => Outcome::Found(value.to_string()),
                None => Outcome::NotFound,
            },
            Ok(Command::SetCode { slot, value }) => {
                self.store.set(slot, &value);
                debug!("code stored in slot {}", slot);
                Outcome::Saved
            }
            Err(err) => {
                debug!("{}", err);
                Outcome::Malformed
            }
        }
    }
}
