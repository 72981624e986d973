// cogitate-cli/src/main.rs
// ============================================================================
// Module: Cogitate CLI Entry Point
// Description: Command dispatcher that builds a CogitateServer from
//              environment configuration and drives it over stdio.
// Purpose: The single binary a host process launches to run the
//          cognitive-reasoning server.
// Dependencies: clap, cogitate-config, cogitate-mcp, thiserror
// ============================================================================

//! ## Overview
//! One subcommand, `serve`, mirroring the teacher's `decision-gate-cli`
//! `clap::Parser`/`Subcommand` split, trimmed to this server's single
//! entry point: there is no runpack export/verify surface here, since this
//! server has no runpack concept. `serve` loads [`cogitate_config::Config`]
//! from the environment, applies any CLI overrides, and runs the server
//! until stdin closes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use cogitate_config::Config;
use cogitate_config::ConfigError;
use cogitate_config::StoreBackendKind;
use cogitate_mcp::AuditSink;
use cogitate_mcp::CogitateServer;
use cogitate_mcp::FileAuditSink;
use cogitate_mcp::NoopAuditSink;
use cogitate_mcp::ServerConfig;
use cogitate_mcp::StderrAuditSink;
use cogitate_mcp::run_stdio;
use cogitate_mcp::server::StoreBackend;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "cogitate", disable_help_subcommand = true, arg_required_else_help = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the cognitive-reasoning server over stdio.
    Serve(ServeCommand),
}

/// Configuration for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Enables verbose audit output, overriding `COGITATE_DEBUG`.
    #[arg(long)]
    debug: bool,
    /// Selects the `SQLite` store backend at this path, overriding
    /// `COGITATE_STORE_BACKEND`/`COGITATE_STORE_PATH`.
    #[arg(long, value_name = "PATH")]
    store_path: Option<PathBuf>,
    /// Appends audit events as JSON lines to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    audit_log: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that can terminate the CLI before the server loop starts.
#[derive(Debug, Error)]
enum CliError {
    /// Environment configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// The server failed to construct (store open failure, bad workflow
    /// registration).
    #[error("server error: {0}")]
    Server(#[from] cogitate_mcp::server::ServerError),
    /// The stdio transport loop failed.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
    /// The audit log file could not be opened.
    #[error("could not open audit log {path}: {source}")]
    AuditLog {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(command) => command_serve(command),
    }
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command: builds a server from the environment (with
/// CLI overrides applied) and runs it until stdin closes.
fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let audit_log = command.audit_log.clone();
    let config = resolve_config(command)?;

    let audit: Arc<dyn AuditSink> = match audit_log {
        Some(path) => {
            let sink = FileAuditSink::new(&path).map_err(|source| CliError::AuditLog { path, source })?;
            Arc::new(sink)
        }
        None if config.debug => Arc::new(StderrAuditSink),
        None => Arc::new(NoopAuditSink),
    };

    let store_backend = match (config.store_backend, config.store_path) {
        (StoreBackendKind::Memory, _) => StoreBackend::Memory,
        (StoreBackendKind::Sqlite, Some(path)) => StoreBackend::Sqlite(path),
        (StoreBackendKind::Sqlite, None) => {
            return Err(CliError::Config(ConfigError::MissingRequired("COGITATE_STORE_PATH")));
        }
    };

    let server = CogitateServer::with_audit_sink(ServerConfig { store_backend }, audit)?;
    run_stdio(&server)?;
    Ok(ExitCode::SUCCESS)
}

/// Loads [`Config`] from the environment, then applies this command's flags
/// as overrides.
fn resolve_config(command: ServeCommand) -> CliResult<Config> {
    let mut config = Config::from_env()?;
    if command.debug {
        config.debug = true;
    }
    if let Some(store_path) = command.store_path {
        config.store_backend = StoreBackendKind::Sqlite;
        config.store_path = Some(store_path);
    }
    Ok(config)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    use std::io::Write;
    let _ = writeln!(std::io::stderr(), "{message}");
    ExitCode::FAILURE
}
