//! Error types for the line protocol.

use thiserror::Error;

/// Errors that can occur when parsing protocol lines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A command line did not match any accepted shape.
    #[error("malformed command line: {0:?}")]
    MalformedCommand(String),

    /// A response line did not match any of the known literals.
    #[error("unrecognized response line: {0:?}")]
    UnrecognizedResponse(String),
}

/// Result type alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
