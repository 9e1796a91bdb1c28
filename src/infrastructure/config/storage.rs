use super::app_config::AppConfig;
use crate::domain::entities::ProxyRule;
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";
const APP_NAME: &str = "portico";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration loading failures. All of them abort startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform configuration directory.
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Default configuration could not be serialized.
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    /// Configuration file does not parse.
    #[error("invalid config file {path}: {source}")]
    TomlDe {
        /// Offending file.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: toml::de::Error,
    },
    /// Upstream timeout set to zero.
    #[error("invalid config file {path}: upstream_timeout_secs must be at least 1")]
    ZeroUpstreamTimeout {
        /// Offending file.
        path: PathBuf,
    },
    /// Rule table does not parse or holds an invalid rule.
    #[error("invalid rule table {path}: {source}")]
    Rules {
        /// Offending file.
        path: PathBuf,
        /// Parser or validation error.
        #[source]
        source: serde_json::Error,
    },
}

/// Locates and loads configuration files.
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Create a new `StorageManager`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::ConfigDirNotFound)?;

        Ok(Self { config_dir })
    }

    /// Creates a new `StorageManager` with a specific directory (useful for testing).
    #[must_use]
    pub fn with_dir(path: PathBuf) -> Self {
        Self { config_dir: path }
    }

    /// Returns the configuration directory path.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Loads the application configuration, writing defaults if the file is missing.
    ///
    /// A file that does not parse is an error: it carries the proxy rule
    /// table, and silently replacing it would route traffic differently.
    /// A zero upstream timeout is rejected the same way.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let config_path = path_override.map_or_else(
            || self.config_dir.join(CONFIG_FILE_NAME),
            std::path::Path::to_path_buf,
        );

        if !config_path.exists() {
            info!(
                "Config file not found at {:?}, creating default.",
                config_path
            );
            let default_config = AppConfig::default();
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }
            Self::save_to_file(&config_path, &default_config)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&config_path)?;
        let config =
            toml::from_str::<AppConfig>(&content).map_err(|source| ConfigError::TomlDe {
                path: config_path.clone(),
                source,
            })?;

        if config.server.upstream_timeout_secs == 0 {
            return Err(ConfigError::ZeroUpstreamTimeout { path: config_path });
        }

        Ok(config)
    }

    /// Loads a JSON rule table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or a rule is malformed.
    pub fn load_rules(path: &Path) -> Result<Vec<ProxyRule>, ConfigError> {
        let content = fs::read_to_string(path)?;
        let rules: Vec<ProxyRule> =
            serde_json::from_str(&content).map_err(|source| ConfigError::Rules {
                path: path.to_path_buf(),
                source,
            })?;

        info!(path = %path.display(), count = rules.len(), "Loaded proxy rules");
        Ok(rules)
    }

    fn save_to_file<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(data)?;

        let parent = path
            .parent()
            .ok_or_else(|| std::io::Error::other("Invalid path"))?;
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}
