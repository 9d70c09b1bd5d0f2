//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::control::Operation;

/// userbase - user records behind a small HTTP API
#[derive(Parser, Debug)]
#[command(name = "userbase")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (defaults apply if it does not exist)
        #[arg(long, default_value = "./userbase.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,

        /// Log every request and response
        #[arg(long)]
        verbose: bool,
    },

    /// Validate a configuration file and print the effective settings
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./userbase.json")]
        config: PathBuf,
    },

    /// Run a single operation, reading the JSON template from stdin
    Exec {
        /// Operation to run
        #[arg(value_enum)]
        operation: OperationArg,

        /// Path to configuration file
        #[arg(long, default_value = "./userbase.json")]
        config: PathBuf,
    },
}

/// Operation names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OperationArg {
    Create,
    Get,
    Delete,
    DeleteMany,
}

impl From<OperationArg> for Operation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Create => Operation::Create,
            OperationArg::Get => Operation::Get,
            OperationArg::Delete => Operation::Delete,
            OperationArg::DeleteMany => Operation::DeleteMany,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["userbase", "serve", "--port", "9000", "--verbose"]).unwrap();
        match cli.command {
            Command::Serve {
                config,
                port,
                verbose,
            } => {
                assert_eq!(config, PathBuf::from("./userbase.json"));
                assert_eq!(port, Some(9000));
                assert!(verbose);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_exec() {
        let cli = Cli::try_parse_from(["userbase", "exec", "delete-many"]).unwrap();
        match cli.command {
            Command::Exec { operation, .. } => {
                assert_eq!(Operation::from(operation), Operation::DeleteMany)
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_operation() {
        assert!(Cli::try_parse_from(["userbase", "exec", "update"]).is_err());
    }
}
