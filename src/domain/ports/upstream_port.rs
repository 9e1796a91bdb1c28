//! Upstream relay port definition.

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};

use crate::domain::errors::ProxyError;

/// Request relayed to an upstream origin.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    /// HTTP method of the inbound request.
    pub method: Method,
    /// Absolute upstream URL after prefix rewriting.
    pub url: String,
    /// Headers to send, hop-by-hop headers already removed.
    pub headers: HeaderMap,
    /// Buffered request body.
    pub body: Bytes,
    /// Whether the upstream certificate is validated.
    pub verify_tls: bool,
}

impl UpstreamRequest {
    /// Creates a body-less request with empty headers.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>, verify_tls: bool) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            verify_tls,
        }
    }

    /// Sets request headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }
}

/// Upstream answer, passed back to the caller as-is.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Upstream status, including non-2xx.
    pub status: StatusCode,
    /// Upstream headers.
    pub headers: HeaderMap,
    /// Buffered upstream body.
    pub body: Bytes,
}

/// Port for relaying requests to a backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamPort: Send + Sync {
    /// Sends the request and returns whatever the backend answered.
    ///
    /// # Errors
    /// Returns error only when no response was obtained.
    async fn forward(&self, request: UpstreamRequest) -> Result<UpstreamResponse, ProxyError>;
}
