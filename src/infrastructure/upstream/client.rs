//! HTTP client relaying proxied requests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, redirect};
use tracing::{debug, warn};

use crate::domain::errors::ProxyError;
use crate::domain::ports::{UpstreamPort, UpstreamRequest, UpstreamResponse};

/// reqwest-backed upstream transport.
///
/// Holds one client that validates certificates and one that does not;
/// each request picks by its rule's `verify_tls` flag.
pub struct HttpUpstream {
    verified: Client,
    unverified: Client,
    timeout: Duration,
}

impl HttpUpstream {
    /// Creates transport with an explicit per-request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ProxyError> {
        Ok(Self {
            verified: build_client(timeout, false)?,
            unverified: build_client(timeout, true)?,
            timeout,
        })
    }

    fn map_send_error(&self, url: &str, error: &reqwest::Error) -> ProxyError {
        warn!(%url, error = %error, "Failed to reach upstream");
        if error.is_timeout() {
            ProxyError::UpstreamTimeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else if error.is_connect() {
            ProxyError::unavailable(url, "connection failed")
        } else {
            ProxyError::unavailable(url, error.to_string())
        }
    }
}

fn build_client(timeout: Duration, accept_invalid_certs: bool) -> Result<Client, ProxyError> {
    Client::builder()
        .timeout(timeout)
        .redirect(redirect::Policy::none())
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()
        .map_err(|e| ProxyError::unexpected(format!("failed to create HTTP client: {e}")))
}

#[async_trait]
impl UpstreamPort for HttpUpstream {
    async fn forward(&self, request: UpstreamRequest) -> Result<UpstreamResponse, ProxyError> {
        let client = if request.verify_tls {
            &self.verified
        } else {
            &self.unverified
        };
        let url = request.url;

        debug!(%url, method = %request.method, "Sending upstream request");

        let response = client
            .request(request.method, &url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| self.map_send_error(&url, &e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(&url, &e))?;

        debug!(%url, status = status.as_u16(), bytes = body.len(), "Upstream response received");

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
