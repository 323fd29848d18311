//! Domain error types

use thiserror::Error;

/// Domain-level errors, all caused by caller-supplied input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Command cannot be empty")]
    EmptyCommand,

    #[error("Invalid session id: {0}")]
    InvalidSessionId(String),
}
