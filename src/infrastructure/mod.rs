//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Development server.
pub mod server;
/// Key-value storage adapters.
pub mod storage;
/// Upstream HTTP transport.
pub mod upstream;

pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageBackend, StorageManager};
pub use server::DevServer;
pub use storage::{FileStore, KeyringStore, MemoryStore, open_store};
pub use upstream::HttpUpstream;
