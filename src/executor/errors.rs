//! Execution errors
//!
//! Failures of the query-execution capability. They are propagated as-is;
//! nothing in charbase retries them.

use thiserror::Error;

/// Result type for query execution
pub type ExecutionResult<T> = Result<T, ExecutionError>;

#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Backing store could not run the query
    #[error("Query execution failed: {0}")]
    Backend(String),

    /// Backing store unreachable
    #[error("Character store unavailable: {0}")]
    Unavailable(String),

    /// Stored rows could not be read
    #[error("Character store unreadable: {0}")]
    Io(#[from] std::io::Error),

    /// Stored rows could not be decoded
    #[error("Character store malformed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ExecutionError {
    /// Execution failures are never the client's fault
    pub fn status_code(&self) -> u16 {
        match self {
            ExecutionError::Unavailable(_) => 503,
            _ => 500,
        }
    }
}
