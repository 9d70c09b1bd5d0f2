//! # Control Errors

use thiserror::Error;

use crate::record::DecodeError;
use crate::store::StoreError;

/// Result type for control operations
pub type ControlResult<T> = Result<T, ControlError>;

/// Control operation errors
#[derive(Debug, Error)]
pub enum ControlError {
    /// Template missing or unusable before any store access
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Wire payload could not be decoded
    #[error("cannot decode request: {0}")]
    Decode(#[from] DecodeError),

    /// Filter matched zero records
    #[error("no users match {0}")]
    NotFound(String),

    /// Underlying store operation failed
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl ControlError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        ControlError::InvalidInput(reason.into())
    }

    /// Stable error code for response envelopes
    pub fn code(&self) -> &'static str {
        match self {
            ControlError::InvalidInput(_) => "USER_INVALID_INPUT",
            ControlError::Decode(_) => "USER_DECODE_ERROR",
            ControlError::NotFound(_) => "USER_NOT_FOUND",
            ControlError::Store(_) => "USER_STORE_ERROR",
        }
    }

    /// Whether the store was reached and failed
    pub fn is_store_failure(&self) -> bool {
        matches!(self, ControlError::Store(_))
    }
}
