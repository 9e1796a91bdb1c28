//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::args::{CliArgs, Command};
use crate::domain::entities::ProxyRule;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where the session token is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// TOML file in the data directory.
    #[default]
    File,
    /// System keyring.
    Keyring,
    /// Process memory only.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Keyring => write!(f, "keyring"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Application configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Dev server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Session storage configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// Proxy rule table.
    #[serde(default)]
    pub proxy: ProxyConfig,
}

/// Dev server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Directory with the built single-page app.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Upstream request timeout in seconds.
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
}

impl ServerConfig {
    /// Upstream timeout as a duration.
    #[must_use]
    pub const fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            static_dir: default_static_dir(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
        }
    }
}

/// Session storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Storage backend.
    #[serde(default)]
    pub storage: StorageBackend,

    /// Override for the file backend location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
}

/// Proxy rule table, evaluated top to bottom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Ordered rules. Omitting the key selects the built-in table.
    #[serde(default = "ProxyRule::default_table")]
    pub rules: Vec<ProxyRule>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            rules: ProxyRule::default_table(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:4200".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("dist")
}

const fn default_upstream_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    ///
    /// Rule files named on the command line are loaded by
    /// [`super::StorageManager::load_rules`], not here.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }

        match &args.command {
            Command::Serve(serve) => {
                if let Some(listen) = &serve.listen {
                    self.server.listen.clone_from(listen);
                }
                if let Some(static_dir) = &serve.static_dir {
                    self.server.static_dir.clone_from(static_dir);
                }
                if let Some(timeout) = serve.upstream_timeout {
                    self.server.upstream_timeout_secs = timeout;
                }
            }
            Command::Session(session) => {
                if let Some(storage) = session.storage {
                    self.session.storage = storage;
                }
                if let Some(path) = &session.storage_path {
                    self.session.storage_path = Some(path.clone());
                }
            }
        }
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            server: ServerConfig::default(),
            session: SessionConfig::default(),
            proxy: ProxyConfig::default(),
        }
    }
}
