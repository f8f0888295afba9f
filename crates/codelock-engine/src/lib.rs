//! # codelock-engine
//!
//! The Dongle Lock protocol engine: the device side of the serial line
//! protocol. It frames the incoming byte stream into command lines, gates
//! them behind the connect/disconnect session flag, applies them to the
//! three-slot code store, and transmits one response line per command.
//!
//! The engine is fully synchronous and single-threaded: one command is
//! read, dispatched, and answered before the next byte is consumed. It
//! never terminates on its own; it runs until its [`Transport`] reports a
//! terminal error, which the surrounding harness turns into a process exit
//! or device reset.
//!
//! ## Usage
//!
//! ```
//! use codelock_engine::Engine;
//! use codelock_protocol::Response;
//!
//! let mut engine = Engine::new();
//! assert_eq!(engine.handle_line("CONNECT"), Response::Ok);
//! assert_eq!(engine.handle_line("SET_CODE_1:hunter2"), Response::Saved);
//! assert_eq!(
//!     engine.handle_line("GET_CODE_1"),
//!     Response::Code("hunter2".to_string())
//! );
//! ```
//!
//! Driving a transport end to end:
//!
//! ```
//! use codelock_engine::{Engine, ScriptTransport, TransportError};
//!
//! let mut transport = ScriptTransport::new(b"CONNECT\nGET_CODE_1\n");
//! let mut engine = Engine::new();
//! // Runs until the scripted bytes are exhausted.
//! assert_eq!(engine.run(&mut transport).unwrap_err(), TransportError::Closed);
//! assert_eq!(transport.transmitted(), b"OK\r\nNOT_FOUND\r\n");
//! ```

pub mod dispatch;
pub mod framer;
pub mod store;
pub mod transport;

pub use dispatch::{Dispatcher, Outcome, SessionState};
pub use framer::LineFramer;
pub use store::{AccessCode, CodeStore};
pub use transport::{ScriptTransport, Transport, TransportError};

use codelock_protocol::Response;
use log::trace;

/// The protocol engine.
///
/// Owns the line framer, the session gate, and the code store. One engine
/// instance is constructed at startup and lives for the whole process run;
/// session state and stored codes have no other lifetime.
#[derive(Debug, Default)]
pub struct Engine {
    framer: LineFramer,
    dispatcher: Dispatcher,
}

impl Engine {
    /// Create an engine with no session open and all slots empty.
    pub fn new() -> Self {
        Engine::default()
    }

    /// The current session state.
    pub fn session(&self) -> SessionState {
        self.dispatcher.session()
    }

    /// The code store.
    pub fn store(&self) -> &CodeStore {
        self.dispatcher.store()
    }

    /// Run the read-dispatch-respond loop until the transport faults.
    ///
    /// Never returns `Ok`: the only way out is a terminal
    /// [`TransportError`], which the caller turns into whatever "halt"
    /// means for its environment. Request/response ordering is strict —
    /// line N's response is fully transmitted before line N+1 is read.
    pub fn run<T: Transport>(&mut self, transport: &mut T) -> Result<(), TransportError> {
        loop {
            self.step(transport)?;
        }
    }

    /// Process exactly one command line: read it, dispatch it, transmit
    /// the response.
    pub fn step<T: Transport>(&mut self, transport: &mut T) -> Result<(), TransportError> {
        let line = self.framer.read_line(transport)?;
        trace!("rx line: {:?}", line);
        let response = self.dispatcher.handle_line(line).into_response();
        trace!("tx response: {:?}", response);
        transport.transmit(&response.encode())
    }

    /// Dispatch one already-framed line, bypassing the transport.
    pub fn handle_line(&mut self, line: &str) -> Response {
        self.dispatcher.handle_line(line).into_response()
    }
}
