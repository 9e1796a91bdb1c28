//! File-backed key-value storage.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::domain::errors::StorageError;
use crate::domain::ports::KeyValueStore;

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";
const APP_NAME: &str = "portico";
const STORE_FILE_NAME: &str = "session.toml";

/// Stores every key in one TOML table on disk.
///
/// Writes go to a temporary file in the same directory and are renamed into
/// place, so a crash never leaves a half-written file behind.
pub struct FileStore {
    path: Option<PathBuf>,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Creates store in the platform data directory.
    ///
    /// If project directories cannot be determined the store reports
    /// itself unavailable on every call.
    #[must_use]
    pub fn new() -> Self {
        let path = Self::default_path();
        if path.is_none() {
            warn!("Failed to determine project directories. Session persistence disabled.");
        }

        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Creates store backed by a specific file (useful for testing).
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            write_lock: Mutex::new(()),
        }
    }

    /// Default store location.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join(STORE_FILE_NAME))
    }

    fn require_path(&self) -> Result<&Path, StorageError> {
        self.path
            .as_deref()
            .ok_or_else(|| StorageError::unavailable("no data directory for session storage"))
    }

    fn load(&self, key: &str) -> Result<BTreeMap<String, String>, StorageError> {
        let path = self.require_path()?;

        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(path).map_err(|e| read_error(key, path, &e))?;
        toml::from_str(&content).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Session file is corrupt");
            StorageError::read_failed(key, format!("{}: {e}", path.display()))
        })
    }

    fn save(&self, key: &str, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let path = self.require_path()?;

        let parent = path
            .parent()
            .ok_or_else(|| StorageError::unavailable("invalid session file path"))?;
        fs::create_dir_all(parent).map_err(|e| write_error(key, path, e))?;

        let content = toml::to_string_pretty(entries).map_err(|e| write_error(key, path, e))?;
        let mut temp_file =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| write_error(key, path, e))?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| write_error(key, path, e))?;
        temp_file
            .persist(path)
            .map_err(|e| write_error(key, path, e.error))?;

        Ok(())
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

fn write_error(key: &str, path: &Path, error: impl std::fmt::Display) -> StorageError {
    StorageError::write_failed(key, format!("{}: {error}", path.display()))
}

fn read_error(key: &str, path: &Path, error: &std::io::Error) -> StorageError {
    if error.kind() == std::io::ErrorKind::PermissionDenied {
        StorageError::unavailable(format!("{}: {error}", path.display()))
    } else {
        StorageError::read_failed(key, format!("{}: {error}", path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load(key)?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let mut entries = self.load(key)?;
        entries.insert(key.to_string(), value.to_string());
        self.save(key, &entries)?;
        debug!(key, "Stored entry on disk");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let mut entries = self.load(key)?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(key, &entries)?;
        debug!(key, "Removed entry from disk");
        Ok(())
    }
}
