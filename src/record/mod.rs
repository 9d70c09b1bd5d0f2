//! # User Records
//!
//! The persisted entity and the codec that moves it on and off the wire.
//!
//! Request bodies are JSON objects with optional `id`, `name`, `email`,
//! `phone` and `tag` fields. Missing fields take their zero value and
//! unknown fields are ignored. Decoding is the only validation a request
//! body receives.

mod codec;
mod errors;
mod user;

pub use codec::Codec;
pub use errors::{DecodeError, DecodeResult};
pub use user::Record;
