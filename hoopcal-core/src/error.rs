//! Error types for hoopcal.

use thiserror::Error;

/// Errors that can occur in hoopcal operations.
#[derive(Error, Debug)]
pub enum HoopcalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for hoopcal operations.
pub type HoopcalResult<T> = Result<T, HoopcalError>;
