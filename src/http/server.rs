//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Construct the service objects shared by handlers
//! - Bind server to listener and shut down gracefully

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderName,
    routing::get,
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ReceiverConfig;
use crate::http::handlers::{health, home, webhook};
use crate::ingest::Normalizer;
use crate::lifecycle::shutdown_signal;
use crate::storage::{FileRecordSink, LocalUploadStore, RecordSink, UploadStore};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub normalizer: Normalizer,
    pub sink: Arc<dyn RecordSink>,
}

impl AppState {
    pub fn new(
        uploads: Arc<dyn UploadStore>,
        sink: Arc<dyn RecordSink>,
        max_body_bytes: usize,
    ) -> Self {
        Self {
            normalizer: Normalizer::new(uploads, max_body_bytes),
            sink,
        }
    }

    /// Filesystem-backed state for the configured directories.
    pub fn from_config(config: &ReceiverConfig) -> Self {
        let uploads = Arc::new(LocalUploadStore::new(&config.storage.upload_dir));
        let sink = Arc::new(FileRecordSink::new(config.storage.records_dir()));
        Self::new(uploads, sink, config.limits.max_body_bytes)
    }
}

/// HTTP server for the webhook receiver.
pub struct HttpServer {
    router: Router,
    config: ReceiverConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ReceiverConfig) -> Self {
        let state = AppState::from_config(&config);
        Self::with_state(config, state)
    }

    /// Create a server around caller-supplied storage.
    pub fn with_state(config: ReceiverConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ReceiverConfig, state: AppState) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);

        Router::new()
            .route("/", get(home))
            .route("/health", get(health))
            .route("/webhook", get(webhook).post(webhook).put(webhook))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
    }

    /// The configured router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run until Ctrl+C / SIGTERM.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.run_until(listener, shutdown_signal()).await
    }

    /// Run until `signal` resolves, then drain in-flight requests.
    pub async fn run_until<F>(self, listener: TcpListener, signal: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }
}
