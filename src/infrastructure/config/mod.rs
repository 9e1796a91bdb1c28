//! Application configuration.

/// Configuration file schema.
pub mod app_config;
/// Command-line arguments.
pub mod args;
/// Configuration file loading.
pub mod storage;

pub use app_config::{AppConfig, LogLevel, ProxyConfig, ServerConfig, SessionConfig, StorageBackend};
pub use args::{CliArgs, Command, ServeArgs, SessionAction, SessionArgs};
pub use storage::{ConfigError, StorageManager};
