//! Key-value storage adapters.

mod file_store;
#[cfg(feature = "keyring")]
mod keyring_store;
#[cfg(not(feature = "keyring"))]
mod keyring_store_stub;
mod memory_store;

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

pub use file_store::FileStore;
#[cfg(feature = "keyring")]
pub use keyring_store::KeyringStore;
#[cfg(not(feature = "keyring"))]
pub use keyring_store_stub::KeyringStore;
pub use memory_store::MemoryStore;

use crate::domain::ports::KeyValueStore;
use crate::infrastructure::config::StorageBackend;

/// Opens the configured backend. `path` only applies to [`StorageBackend::File`].
#[must_use]
pub fn open_store(backend: StorageBackend, path: Option<&Path>) -> Arc<dyn KeyValueStore> {
    debug!(%backend, "Opening session storage");

    match backend {
        StorageBackend::File => match path {
            Some(path) => Arc::new(FileStore::with_path(path)),
            None => Arc::new(FileStore::new()),
        },
        StorageBackend::Keyring => Arc::new(KeyringStore::new()),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    }
}
