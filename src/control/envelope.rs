//! Response envelopes
//!
//! Every request yields exactly one envelope. `OK` carries the real outcome;
//! the transport status does not.

use serde::{Deserialize, Serialize};

use super::errors::{ControlError, ControlResult};
use crate::record::Record;

/// Uniform success/failure wrapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "OK")]
    pub ok: bool,

    /// Id assigned by a create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Matched records, newest first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<Record>>,

    /// Number of records removed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Envelope {
    fn ok() -> Self {
        Self {
            ok: true,
            id: None,
            users: None,
            deleted: None,
            error: None,
            code: None,
        }
    }

    pub fn created(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::ok()
        }
    }

    pub fn users(users: Vec<Record>) -> Self {
        Self {
            users: Some(users),
            ..Self::ok()
        }
    }

    pub fn deleted(count: usize) -> Self {
        Self {
            deleted: Some(count),
            ..Self::ok()
        }
    }

    pub fn failure(err: &ControlError) -> Self {
        Self {
            ok: false,
            error: Some(err.to_string()),
            code: Some(err.code().to_string()),
            ..Self::ok()
        }
    }

    /// Fold an operation result into its single envelope
    pub fn from_result(result: ControlResult<Envelope>) -> Self {
        match result {
            Ok(envelope) => envelope,
            Err(err) => Self::failure(&err),
        }
    }
}
