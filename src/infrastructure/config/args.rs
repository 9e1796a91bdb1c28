use super::app_config::{LogLevel, StorageBackend};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(
    name = "portico",
    version,
    about = "Session-aware navigation menu and development reverse proxy",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the static app and intercept API requests.
    Serve(ServeArgs),
    /// Inspect or change the persisted session.
    Session(SessionArgs),
}

/// Options for `serve`.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Socket address to listen on.
    #[arg(long, value_name = "ADDR", env = "PORTICO_LISTEN")]
    pub listen: Option<String>,

    /// Directory with the built single-page app.
    #[arg(long, value_name = "DIR")]
    pub static_dir: Option<PathBuf>,

    /// JSON rule table replacing the configured rules.
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Upstream request timeout in seconds, at least 1.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub upstream_timeout: Option<u64>,
}

/// Options for `session`.
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Storage backend holding the token.
    #[arg(long, value_enum)]
    pub storage: Option<StorageBackend>,

    /// Session file used by the file backend.
    #[arg(long, value_name = "PATH")]
    pub storage_path: Option<PathBuf>,

    /// Session operation.
    #[command(subcommand)]
    pub action: SessionAction,
}

/// Operations on the persisted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum SessionAction {
    /// Print whether a session token is stored.
    Status,
    /// Store the placeholder token.
    Login,
    /// Remove the stored token.
    Logout,
    /// Print the navigation menu for the current session.
    Menu,
}
