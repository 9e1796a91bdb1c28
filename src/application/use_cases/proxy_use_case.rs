//! Request interception use case.

use std::sync::Arc;

use http::{HeaderMap, StatusCode, header};
use tracing::{debug, info, warn};

use crate::application::dto::{InboundRequest, ProxyResponse};
use crate::application::services::ProxyRouter;
use crate::domain::entities::RouteDecision;
use crate::domain::errors::ProxyError;
use crate::domain::ports::{UpstreamPort, UpstreamRequest};

const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Turns routing decisions into responses.
#[derive(Clone)]
pub struct ProxyUseCase {
    router: ProxyRouter,
    upstream: Arc<dyn UpstreamPort>,
}

impl ProxyUseCase {
    /// Creates new proxy use case.
    #[must_use]
    pub fn new(router: ProxyRouter, upstream: Arc<dyn UpstreamPort>) -> Self {
        Self { router, upstream }
    }

    /// Evaluates the rule table for a request target.
    #[must_use]
    pub fn decide(&self, path: &str, query: Option<&str>) -> RouteDecision {
        self.router.route(path, query)
    }

    /// Completes an intercepted request.
    ///
    /// Returns `Ok(None)` for [`RouteDecision::PassThrough`]; the caller then
    /// serves the request itself. Upstream responses of any status are
    /// returned unchanged.
    ///
    /// # Errors
    /// Returns error if the upstream could not be reached.
    pub async fn complete(
        &self,
        decision: RouteDecision,
        request: InboundRequest,
    ) -> Result<Option<ProxyResponse>, ProxyError> {
        match decision {
            RouteDecision::PassThrough => Ok(None),
            RouteDecision::Deny { status, body } => {
                let status = StatusCode::from_u16(status)
                    .map_err(|e| ProxyError::unexpected(format!("invalid deny status: {e}")))?;
                Ok(Some(ProxyResponse::text(status, body)))
            }
            RouteDecision::Forward { url, verify_tls } => {
                let upstream_request =
                    UpstreamRequest::new(request.method, url.clone(), verify_tls)
                        .with_headers(strip_hop_by_hop(request.headers, true))
                        .with_body(request.body);

                debug!(%url, method = %upstream_request.method, "Relaying request upstream");

                let response = self.upstream.forward(upstream_request).await.map_err(|e| {
                    warn!(%url, error = %e, "Upstream request failed");
                    e
                })?;

                info!(%url, status = response.status.as_u16(), "Upstream responded");

                let mut response = ProxyResponse::from(response);
                response.headers = strip_hop_by_hop(response.headers, false);
                Ok(Some(response))
            }
        }
    }
}

/// Drops connection-scoped headers; `host` too when relaying a request.
fn strip_hop_by_hop(mut headers: HeaderMap, drop_host: bool) -> HeaderMap {
    let listed: Vec<String> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    for name in HOP_BY_HOP_HEADERS {
        headers.remove(name);
    }
    for name in listed {
        headers.remove(name.as_str());
    }
    if drop_host {
        headers.remove(header::HOST);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::UpstreamResponse;
    use crate::domain::ports::mocks::MockUpstreamPort;
    use bytes::Bytes;
    use http::{HeaderValue, Method};
    use std::time::Duration;

    fn get_request() -> InboundRequest {
        InboundRequest::new(Method::GET, HeaderMap::new(), Bytes::new())
    }

    fn use_case(upstream: MockUpstreamPort) -> ProxyUseCase {
        ProxyUseCase::new(ProxyRouter::default(), Arc::new(upstream))
    }

    #[tokio::test]
    async fn test_deny_never_contacts_upstream() {
        let mut upstream = MockUpstreamPort::new();
        upstream.expect_forward().never();
        let proxy = use_case(upstream);

        let decision = proxy.decide("/api/v3/reports", None);
        let response = proxy.complete(decision, get_request()).await.unwrap().unwrap();

        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.body_text(), "Access to /api/v3/ is forbidden.");
    }

    #[tokio::test]
    async fn test_actuator_denied() {
        let mut upstream = MockUpstreamPort::new();
        upstream.expect_forward().never();
        let proxy = use_case(upstream);

        let decision = proxy.decide("/api/actuator/health", None);
        let response = proxy.complete(decision, get_request()).await.unwrap().unwrap();

        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.body_text(), "Access to /api/actuator/ is forbidden.");
    }

    #[tokio::test]
    async fn test_forward_relays_rewritten_url() {
        let mut upstream = MockUpstreamPort::new();
        upstream
            .expect_forward()
            .withf(|request| {
                request.url == "http://localhost:8080/users/42"
                    && request.method == Method::POST
                    && !request.verify_tls
                    && request.body == Bytes::from_static(b"{\"name\":\"x\"}")
            })
            .times(1)
            .returning(|_| {
                Ok(UpstreamResponse {
                    status: StatusCode::CREATED,
                    headers: HeaderMap::new(),
                    body: Bytes::from_static(b"created"),
                })
            });
        let proxy = use_case(upstream);

        let request = InboundRequest::new(
            Method::POST,
            HeaderMap::new(),
            Bytes::from_static(b"{\"name\":\"x\"}"),
        );
        let decision = proxy.decide("/api/users/42", None);
        let response = proxy.complete(decision, request).await.unwrap().unwrap();

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body_text(), "created");
    }

    #[tokio::test]
    async fn test_backend_errors_are_not_masked() {
        let mut upstream = MockUpstreamPort::new();
        upstream.expect_forward().returning(|_| {
            Ok(UpstreamResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                headers: HeaderMap::new(),
                body: Bytes::from_static(b"boom"),
            })
        });
        let proxy = use_case(upstream);

        let decision = proxy.decide("/api/users", None);
        let response = proxy.complete(decision, get_request()).await.unwrap().unwrap();

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body_text(), "boom");
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates_without_retry() {
        let mut upstream = MockUpstreamPort::new();
        upstream
            .expect_forward()
            .times(1)
            .returning(|request| Err(ProxyError::unavailable(request.url, "connection refused")));
        let proxy = use_case(upstream);

        let decision = proxy.decide("/api/users", None);
        let error = proxy.complete(decision, get_request()).await.unwrap_err();

        assert!(error.is_upstream_failure());
        assert_eq!(error.status_code(), 502);
    }

    #[tokio::test]
    async fn test_timeout_is_distinct() {
        let mut upstream = MockUpstreamPort::new();
        upstream.expect_forward().returning(|request| {
            Err(ProxyError::UpstreamTimeout {
                url: request.url,
                timeout: Duration::from_secs(1),
            })
        });
        let proxy = use_case(upstream);

        let decision = proxy.decide("/api/slow", None);
        let error = proxy.complete(decision, get_request()).await.unwrap_err();

        assert_eq!(error.status_code(), 504);
    }

    #[tokio::test]
    async fn test_pass_through_yields_none() {
        let mut upstream = MockUpstreamPort::new();
        upstream.expect_forward().never();
        let proxy = use_case(upstream);

        let decision = proxy.decide("/static/logo.png", None);
        assert_eq!(decision, RouteDecision::PassThrough);
        assert!(proxy.complete(decision, get_request()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_hop_by_hop_headers_not_relayed() {
        let mut upstream = MockUpstreamPort::new();
        upstream
            .expect_forward()
            .withf(|request| {
                request.headers.get(header::HOST).is_none()
                    && request.headers.get(header::CONNECTION).is_none()
                    && request.headers.get("x-trace").is_none()
                    && request.headers.get(header::AUTHORIZATION).is_some()
            })
            .returning(|_| {
                let mut headers = HeaderMap::new();
                headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
                headers.insert(header::ETAG, HeaderValue::from_static("\"v1\""));
                Ok(UpstreamResponse {
                    status: StatusCode::OK,
                    headers,
                    body: Bytes::new(),
                })
            });
        let proxy = use_case(upstream);

        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:4200"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive, x-trace"));
        headers.insert("x-trace", HeaderValue::from_static("1"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer token"));
        let request = InboundRequest::new(Method::GET, headers, Bytes::new());

        let decision = proxy.decide("/api/users", None);
        let response = proxy.complete(decision, request).await.unwrap().unwrap();

        assert!(response.headers.get(header::TRANSFER_ENCODING).is_none());
        assert_eq!(response.headers.get(header::ETAG).unwrap(), "\"v1\"");
    }
}
