//! Durable key-value storage port definition.

use crate::domain::errors::StorageError;

/// Port for string key-value persistence.
///
/// Calls are synchronous: the session lives on a single UI event loop and
/// every mutation runs to completion before the next event is handled.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    /// Returns error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory store that counts writes.
    #[derive(Default)]
    pub struct MockKeyValueStore {
        entries: Mutex<HashMap<String, String>>,
        writes: AtomicUsize,
    }

    impl MockKeyValueStore {
        /// Creates empty mock storage.
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates mock storage holding one entry.
        pub fn with_entry(key: &str, value: &str) -> Self {
            let store = Self::new();
            store
                .entries
                .lock()
                .insert(key.to_string(), value.to_string());
            store
        }

        /// Number of `set`/`remove` calls seen so far.
        pub fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    impl KeyValueStore for MockKeyValueStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.entries.lock().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.entries
                .lock()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.entries.lock().remove(key);
            Ok(())
        }
    }

    /// Store whose backend is switched off.
    pub struct UnavailableStore;

    impl KeyValueStore for UnavailableStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::unavailable("storage disabled by host"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::unavailable("storage disabled by host"))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::unavailable("storage disabled by host"))
        }
    }
}
