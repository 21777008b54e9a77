//! Error types for the task client.
//!
//! # Design
//! Two kinds reach callers. `ValidationError` is raised locally and never
//! touches the network. `TransportError` covers everything that went wrong
//! on the way to or from the server; a 404 and a 500 differ only in the code
//! they carry.

use thiserror::Error;

/// Local input rejected before any request is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter a task name")]
    BlankName,
}

/// The remote call did not produce a 2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("HTTP Error {0}")]
    Status(u16),

    /// The round-trip could not complete (DNS, refused connection, I/O).
    #[error("request failed: {0}")]
    Network(String),

    /// The request payload could not be serialized to JSON.
    #[error("could not encode request: {0}")]
    Encode(String),
}

/// Any failure of a controller action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
