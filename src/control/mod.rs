//! # User Control
//!
//! Business logic over the user collection: create, get, delete and
//! delete-many, all driven by a query template.
//!
//! # Lookup rules
//!
//! A template selects records by its first non-empty field in the order
//! `id`, `name`, `email`, `phone`, `tag`. An all-empty template selects every
//! record. Matches are ordered newest first; single-record operations act on
//! the newest match.
//!
//! # Results
//!
//! Every operation returns `ControlResult<Envelope>`. Callers that need a
//! response body fold the result with [`Envelope::from_result`], which turns
//! any error into a failure envelope.

mod context;
mod control;
mod envelope;
mod errors;
mod operation;

pub use context::RequestContext;
pub use control::Control;
pub use envelope::Envelope;
pub use errors::{ControlError, ControlResult};
pub use operation::Operation;
