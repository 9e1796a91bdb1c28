//! Stub keyring storage for builds without keyring support.

use tracing::debug;

use crate::domain::errors::StorageError;
use crate::domain::ports::KeyValueStore;

/// Keyring placeholder that is never available.
/// Used when the `keyring` feature is disabled.
pub struct KeyringStore;

impl KeyringStore {
    /// Creates new stub storage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Creates storage with custom service name (no-op in stub).
    #[must_use]
    pub fn with_service(_service: impl Into<String>) -> Self {
        Self
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

fn disabled() -> StorageError {
    debug!("Keyring feature disabled - no keyring storage available");
    StorageError::unavailable("keyring support not compiled in")
}

impl KeyValueStore for KeyringStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(disabled())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(disabled())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(disabled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_reports_unavailable() {
        let store = KeyringStore::new();

        assert!(store.get("authToken").unwrap_err().is_unavailable());
        assert!(store.set("authToken", "token").unwrap_err().is_unavailable());
        assert!(store.remove("authToken").unwrap_err().is_unavailable());
    }
}
