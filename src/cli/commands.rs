//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::control::{Control, ControlError, Envelope, Operation, RequestContext};
use crate::http_server::{HttpServer, RouteTable};
use crate::record::Codec;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_body, write_envelope};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            port,
            verbose,
        } => serve(&config, port, verbose),
        Command::CheckConfig { config } => check_config(&config),
        Command::Exec { operation, config } => exec(&config, operation.into()),
    }
}

/// Install the global subscriber. RUST_LOG wins over the configured level.
fn init_logging(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    // Already installed when embedded in a host that set its own subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Start the HTTP server and block until shutdown
pub fn serve(config_path: &Path, port: Option<u16>, verbose: bool) -> CliResult<()> {
    let mut config = Config::load_or_default(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }
    config.verbose |= verbose;
    init_logging(&config);

    tracing::info!(
        config = %config_path.display(),
        backend = ?config.store.backend,
        collection = %config.store.collection,
        verbose = config.verbose,
        "starting userbase"
    );

    let rt = runtime()?;
    rt.block_on(async {
        let store = config.store.open()?;
        let control = Arc::new(Control::new(store));
        let routes = RouteTable::new(control, &config.routes, config.adapter_options())
            .map_err(|e| CliError::boot_failed(format!("Invalid route pattern: {}", e)))?;

        for adapter in routes.adapters() {
            tracing::info!(operation = %adapter.operation(), pattern = adapter.pattern(), "route");
        }

        HttpServer::new(config.server.clone(), routes)
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Validate a config file and print it with defaults filled in
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let rendered = serde_json::to_string_pretty(&config)
        .map_err(|e| CliError::io_error(format!("JSON error: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

/// Run one operation against the configured store.
///
/// The envelope is always written to stdout; a failure envelope also turns
/// into a non-zero exit.
pub fn exec(config_path: &Path, operation: Operation) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    init_logging(&config);

    let body = read_body()?;

    let rt = runtime()?;
    let envelope = rt.block_on(async {
        let store = config.store.open()?;
        let control = Control::new(store);
        let ctx = RequestContext::new(format!("exec:{}", operation));

        let envelope = match Codec::decode(&body) {
            Ok(template) => Envelope::from_result(control.invoke(operation, &ctx, Some(template)).await),
            Err(e) => Envelope::failure(&ControlError::from(e)),
        };
        Ok::<_, CliError>(envelope)
    })?;

    write_envelope(&envelope)?;

    match (envelope.ok, envelope.error) {
        (true, _) => Ok(()),
        (false, error) => Err(CliError::operation_failed(
            error.unwrap_or_else(|| format!("{} failed", operation)),
        )),
    }
}
