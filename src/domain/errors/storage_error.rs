//! Key-value storage error types.

use thiserror::Error;

/// Storage error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StorageError {
    #[error("durable storage is unavailable: {message}")]
    Unavailable { message: String },

    #[error("failed to read `{key}`: {message}")]
    ReadFailed { key: String, message: String },

    #[error("failed to write `{key}`: {message}")]
    WriteFailed { key: String, message: String },
}

impl StorageError {
    /// Creates unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates read failure.
    #[must_use]
    pub fn read_failed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ReadFailed {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates write failure.
    #[must_use]
    pub fn write_failed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WriteFailed {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Returns whether the backend itself could not be reached.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
