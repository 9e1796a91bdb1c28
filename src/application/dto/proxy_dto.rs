//! Proxy request and response DTOs.

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, StatusCode, header};

use crate::domain::ports::UpstreamResponse;

/// Inbound request data needed to relay it.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    /// HTTP method.
    pub method: Method,
    /// Request headers as received.
    pub headers: HeaderMap,
    /// Buffered body.
    pub body: Bytes,
}

impl InboundRequest {
    /// Creates request data.
    #[must_use]
    pub const fn new(method: Method, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            headers,
            body,
        }
    }
}

/// Response handed back to the client.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl ProxyResponse {
    /// Plain-text response with a fixed body.
    #[must_use]
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );

        Self {
            status,
            headers,
            body: Bytes::from(body.into()),
        }
    }

    /// Body as UTF-8 text, lossy.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl From<UpstreamResponse> for ProxyResponse {
    fn from(response: UpstreamResponse) -> Self {
        Self {
            status: response.status,
            headers: response.headers,
            body: response.body,
        }
    }
}
