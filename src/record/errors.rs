//! Decode errors for inbound payloads

use thiserror::Error;

/// Result type for codec operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Inbound payload could not be turned into a record
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Request body was empty
    #[error("empty request body")]
    Empty,

    /// Body was valid JSON but not an object
    #[error("request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// Body was not a JSON object matching the record shape
    #[error("malformed request body: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Malformed(err.to_string())
    }
}
