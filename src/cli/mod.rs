//! CLI module for userbase
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP API
//! - check-config: Validate a configuration file
//! - exec: Run one operation with a JSON template from stdin

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, OperationArg};
pub use commands::{check_config, exec, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_body, write_envelope};
