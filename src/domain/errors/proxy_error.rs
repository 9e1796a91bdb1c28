//! Proxy forwarding error types.

use std::time::Duration;

use thiserror::Error;

/// Failures while relaying a request upstream.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ProxyError {
    #[error("upstream {url} is unavailable: {message}")]
    UpstreamUnavailable { url: String, message: String },

    #[error("upstream {url} did not answer within {timeout:?}")]
    UpstreamTimeout { url: String, timeout: Duration },

    #[error("failed to read request body: {message}")]
    InvalidRequest { message: String },

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("unexpected proxy error: {message}")]
    Unexpected { message: String },
}

impl ProxyError {
    /// Creates upstream unavailable error.
    #[must_use]
    pub fn unavailable(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the upstream could not be reached in time or at all.
    #[must_use]
    pub const fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. } | Self::UpstreamTimeout { .. }
        )
    }

    /// HTTP status the dev server answers with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::UpstreamUnavailable { .. } => 502,
            Self::UpstreamTimeout { .. } => 504,
            Self::InvalidRequest { .. } => 400,
            Self::PayloadTooLarge { .. } => 413,
            Self::Unexpected { .. } => 500,
        }
    }
}
