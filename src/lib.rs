//! userbase - user records behind a small HTTP API
//!
//! Requests carry a partial user record as a query template. The template's
//! most specific non-empty field (`id`, `name`, `email`, `phone`, `tag`)
//! selects the matching records, newest first.

pub mod cli;
pub mod config;
pub mod control;
pub mod http_server;
pub mod record;
pub mod store;
