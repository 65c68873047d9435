//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the resolve handler
//! - Wire up middleware (request ID, tracing, access log, timeout)
//! - Bind server to listener
//! - Turn resolver outcomes into responses

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    middleware,
    response::Response,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::TimeoutConfig;
use crate::http::middleware::access_log_middleware;
use crate::http::request::{HostSource, UuidRequestId, X_REQUEST_ID};
use crate::http::response::{self, render_document};
use crate::observability::metrics;
use crate::resolve::{ResolveError, Resolver};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub host_source: Arc<HostSource>,
}

/// HTTP server answering go-get queries.
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    rule_count: usize,
}

impl HttpServer {
    /// Create a new HTTP server around a fully loaded resolver.
    pub fn new(resolver: Resolver, host_source: HostSource, timeouts: &TimeoutConfig) -> Self {
        let rule_count = resolver.len();
        let state = AppState {
            resolver: Arc::new(resolver),
            host_source: Arc::new(host_source),
        };

        let router = Self::build_router(timeouts, state);
        Self { router, rule_count }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(timeouts: &TimeoutConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", get(resolve_handler))
            .route("/", get(resolve_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(timeouts.request_secs)))
            .layer(middleware::from_fn(access_log_middleware))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Number of rules being served.
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            rules = self.rule_count,
            "Serving on {} with {} rule(s)",
            addr,
            self.rule_count
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve `host + path` and answer with a go-import document.
async fn resolve_handler(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    // A path that is not UTF-8 once decoded cannot match any rule.
    let resolved = match state.host_source.subject(&uri, &headers) {
        Some(subject) => state.resolver.resolve(&subject).map(|record| (subject, record)),
        None => Err(ResolveError::NotFound),
    };

    let (subject, record) = match resolved {
        Ok(resolved) => resolved,
        Err(err @ ResolveError::NotFound) => {
            tracing::debug!(path = %uri.path(), "No rule matched");
            metrics::record_resolution("not_found");
            return response::plain_error(StatusCode::NOT_FOUND, &err);
        }
    };

    tracing::debug!(
        subject = %subject,
        root = %record.root,
        vcs = %record.vcs,
        repo_url = %record.repo_url,
        "Module resolved"
    );

    match render_document(&record) {
        Ok(body) => {
            metrics::record_resolution("resolved");
            response::html(body)
        }
        Err(err) => {
            tracing::error!(subject = %subject, error = %err, "Template rendering failed");
            metrics::record_resolution("render_error");
            response::plain_error(StatusCode::INTERNAL_SERVER_ERROR, &err)
        }
    }
}
