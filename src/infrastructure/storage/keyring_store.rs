//! Keyring-backed key-value storage.

use keyring::Entry;
use tracing::{debug, warn};

use crate::domain::errors::StorageError;
use crate::domain::ports::KeyValueStore;

const KEYRING_SERVICE: &str = "portico";

/// System keyring adapter; each key is one keyring entry.
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    /// Creates store under the default service name.
    #[must_use]
    pub fn new() -> Self {
        Self::with_service(KEYRING_SERVICE)
    }

    /// Creates store with a custom service name.
    #[must_use]
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, StorageError> {
        Entry::new(&self.service, key)
            .map_err(|e| StorageError::unavailable(format!("failed to access keyring: {e}")))
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

fn map_keyring_error(key: &str, error: keyring::Error, write: bool) -> StorageError {
    match error {
        keyring::Error::NoStorageAccess(e) => StorageError::unavailable(e.to_string()),
        keyring::Error::PlatformFailure(e) => StorageError::unavailable(e.to_string()),
        other if write => StorageError::write_failed(key, other.to_string()),
        other => StorageError::read_failed(key, other.to_string()),
    }
}

impl KeyValueStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        debug!(service = %self.service, key, "Reading keyring entry");

        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => {
                debug!(key, "No keyring entry");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, key, "Failed to read keyring entry");
                Err(map_keyring_error(key, e, false))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        debug!(service = %self.service, key, "Writing keyring entry");

        self.entry(key)?.set_password(value).map_err(|e| {
            warn!(error = %e, key, "Failed to write keyring entry");
            map_keyring_error(key, e, true)
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        debug!(service = %self.service, key, "Deleting keyring entry");

        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                warn!(error = %e, key, "Failed to delete keyring entry");
                Err(map_keyring_error(key, e, true))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore = "requires system keyring"]
    fn test_store_and_remove_entry() {
        let store = KeyringStore::with_service("portico-test");

        store.set("authToken", "token").unwrap();
        assert_eq!(store.get("authToken").unwrap().as_deref(), Some("token"));

        store.remove("authToken").unwrap();
        assert!(store.get("authToken").unwrap().is_none());
        store.remove("authToken").unwrap();
    }
}
