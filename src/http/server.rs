//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Serve static assets for everything that is not an API route
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, BackoffConfig};
use crate::ecfs::{EcfsClient, Proceeding};
use crate::http::handlers;

/// Application state injected into handlers.
///
/// The proceeding is fetched once at startup and never mutated, so handlers
/// share it without locking.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: Arc<EcfsClient>,
    pub proceeding: Arc<Proceeding>,
    pub backoff: BackoffConfig,
}

impl AppState {
    pub fn new(client: EcfsClient, proceeding: Proceeding, backoff: BackoffConfig) -> Self {
        Self {
            client: Arc::new(client),
            proceeding: Arc::new(proceeding),
            backoff,
        }
    }
}

/// HTTP server for the comment form.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and state.
    pub fn new(config: AppConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// `/submit` sits outside the timeout: once a filing is in flight only the
    /// backoff ceiling bounds it, and dropping the handler would lose the
    /// outcome of a POST the API may already have accepted.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let timed = Router::new()
            .route("/health", get(handlers::health))
            .fallback_service(ServeDir::new(&config.web.static_dir))
            .layer(TimeoutLayer::new(Duration::from_secs(config.web.request_timeout_secs)));

        Router::new()
            .route("/submit", post(handlers::submit))
            .merge(timed)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.web.max_body_size))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for driving without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            static_dir = %self.config.web.static_dir,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
