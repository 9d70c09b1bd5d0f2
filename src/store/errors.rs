//! # Store Errors

use std::io;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by a record store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Disk I/O failed
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Operation log failed validation on replay
    #[error("corrupt operation log at line {line}: {reason}")]
    Corruption { line: usize, reason: String },

    /// A record could not be serialized for the log
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Removal targeted an id that is not in the collection
    #[error("no record with id {0}")]
    NotFound(String),

    /// Insert collided with an existing id
    #[error("duplicate record id {0}")]
    DuplicateId(String),

    /// Single-record fetch matched nothing
    #[error("query matched no records")]
    NoMatch,

    /// A failed append could not be rolled back; the log refuses further writes
    #[error("operation log is unusable after a failed rollback")]
    LogUnusable,

    /// Collection lock poisoned by a panicking writer
    #[error("collection lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn corruption(line: usize, reason: impl Into<String>) -> Self {
        StoreError::Corruption {
            line,
            reason: reason.into(),
        }
    }
}
