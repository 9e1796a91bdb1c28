//! Persisted session token.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::AuthToken;
use crate::domain::errors::StorageError;
use crate::domain::ports::KeyValueStore;

/// Storage key holding the session token.
pub const TOKEN_KEY: &str = "authToken";

/// Owns the single optional session token in durable storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl SessionStore {
    /// Creates store writing under [`TOKEN_KEY`].
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(storage, TOKEN_KEY)
    }

    /// Creates store with a custom storage key.
    #[must_use]
    pub fn with_key(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Storage key in use.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Persists the token, replacing any previous one.
    ///
    /// # Errors
    /// Returns error if the backing storage cannot be written.
    pub fn set_token(&self, token: &AuthToken) -> Result<(), StorageError> {
        debug!(key = %self.key, token = %token, "Storing session token");
        self.storage.set(&self.key, token.as_str())?;
        info!("Session token stored");
        Ok(())
    }

    /// Returns the persisted token, if any.
    ///
    /// # Errors
    /// Returns error if the backing storage cannot be read.
    pub fn get_token(&self) -> Result<Option<AuthToken>, StorageError> {
        Ok(self.storage.get(&self.key)?.map(AuthToken::new))
    }

    /// Deletes the persisted token. No-op when nothing is stored.
    ///
    /// # Errors
    /// Returns error if the backing storage cannot be written.
    pub fn remove_token(&self) -> Result<(), StorageError> {
        debug!(key = %self.key, "Removing session token");
        self.storage.remove(&self.key)?;
        info!("Session token removed");
        Ok(())
    }

    /// Whether a non-empty token is stored.
    ///
    /// Storage failures count as logged out.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        match self.get_token() {
            Ok(Some(token)) => !token.is_empty(),
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "Session storage unreadable, treating as logged out");
                false
            }
        }
    }
}
