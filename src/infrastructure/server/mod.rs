//! Development server: static app plus intercepted API traffic.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::{DefaultBodyLimit, FromRequest, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::application::dto::{InboundRequest, ProxyResponse};
use crate::application::services::ProxyRouter;
use crate::application::use_cases::ProxyUseCase;
use crate::domain::entities::{ProxyRule, RouteDecision};
use crate::domain::errors::ProxyError;
use crate::domain::ports::UpstreamPort;
use crate::infrastructure::config::ServerConfig;
use crate::infrastructure::upstream::HttpUpstream;

const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone)]
struct ServerState {
    proxy: Arc<ProxyUseCase>,
    assets: ServeDir<ServeFile>,
}

/// Single-page app server with the proxy rule table in front.
pub struct DevServer {
    listen: String,
    router: Router,
}

impl DevServer {
    /// Builds the server with the reqwest upstream transport.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &ServerConfig, rules: Vec<ProxyRule>) -> Result<Self, ProxyError> {
        let upstream = Arc::new(HttpUpstream::with_timeout(config.upstream_timeout())?);
        Ok(Self::with_upstream(config, rules, upstream))
    }

    /// Builds the server around a custom upstream transport.
    #[must_use]
    pub fn with_upstream(
        config: &ServerConfig,
        rules: Vec<ProxyRule>,
        upstream: Arc<dyn UpstreamPort>,
    ) -> Self {
        let proxy = ProxyUseCase::new(ProxyRouter::new(rules), upstream);

        Self {
            listen: config.listen.clone(),
            router: build_router(proxy, &config.static_dir),
        }
    }

    /// The axum application.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Binds and serves until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    /// Returns error if the listener cannot be bound.
    pub async fn run(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(&self.listen).await?;
        info!(address = %listener.local_addr()?, "Dev server running");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Dev server stopped");
        Ok(())
    }
}

fn build_router(proxy: ProxyUseCase, static_dir: &Path) -> Router {
    let assets = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));
    let state = ServerState {
        proxy: Arc::new(proxy),
        assets,
    };

    Router::new()
        .fallback(handle_request)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

async fn handle_request(State(state): State<ServerState>, request: Request) -> Response {
    let decision = state
        .proxy
        .decide(request.uri().path(), request.uri().query());

    if decision == RouteDecision::PassThrough {
        return serve_static(state.assets, request).await;
    }

    let method = request.method().clone();
    let headers = request.headers().clone();
    let body = match Bytes::from_request(request, &state).await {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return ProxyError::PayloadTooLarge {
                limit: MAX_BODY_BYTES,
            }
            .into_response();
        }
        Err(rejection) => return ProxyError::invalid_request(rejection.body_text()).into_response(),
    };

    let inbound = InboundRequest::new(method, headers, body);
    match state.proxy.complete(decision, inbound).await {
        Ok(Some(response)) => into_http_response(response),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => e.into_response(),
    }
}

async fn serve_static(assets: ServeDir<ServeFile>, request: Request) -> Response {
    match assets.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

fn into_http_response(response: ProxyResponse) -> Response {
    let mut http_response = Response::new(Body::from(response.body));
    *http_response.status_mut() = response.status;
    *http_response.headers_mut() = response.headers;
    http_response
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, self.to_string()).into_response()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
