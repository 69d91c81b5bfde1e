// Web server — Axum front end for the similarity checker.
//
// Routes:
//   GET  /                  hello + structured logging smoke test
//   GET  /health            liveness probe
//   POST /check_plagiarism  form fields text1/text2, responds with the score
//   GET  /check_plagiarism  query params text1/text2, responds with time + score
//                           and reports both to the configured result sink
//
// All responses are plain text except /health.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio_util::task::TaskTracker;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::similarity::SimilarityScorer;
use crate::sink::ResultSink;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub scorer: SimilarityScorer,
    pub sink: Arc<dyn ResultSink>,
    pub config: Arc<Config>,
    /// Background result uploads still in flight.
    pub uploads: TaskTracker,
}

/// How long shutdown waits for in-flight uploads before giving up on them.
pub const UPLOAD_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

impl AppState {
    pub fn new(config: Config, sink: Arc<dyn ResultSink>) -> Self {
        Self {
            scorer: SimilarityScorer::new(config.empty_policy),
            sink,
            config: Arc::new(config),
            uploads: TaskTracker::new(),
        }
    }
}

/// Start the Axum web server and block until a shutdown signal arrives.
///
/// SIGINT (Ctrl-C) and SIGTERM (Cloud Run container stop) both trigger a
/// graceful shutdown: in-flight requests finish, pending result uploads are
/// drained (up to UPLOAD_DRAIN_TIMEOUT), then this returns Ok.
pub async fn run_server(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.config.bind, state.config.port);
    let uploads = state.uploads.clone();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Similarity checker listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    drain_uploads(&uploads, UPLOAD_DRAIN_TIMEOUT).await;
    info!("Server stopped");
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::hello::hello))
        .route("/health", get(health))
        .route(
            "/check_plagiarism",
            get(handlers::check::check_query).post(handlers::check::check_form),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Close the upload tracker and wait for the pending uploads.
///
/// Returns false if the timeout expired with uploads still running.
pub async fn drain_uploads(uploads: &TaskTracker, timeout: Duration) -> bool {
    uploads.close();
    if uploads.is_empty() {
        return true;
    }

    info!(pending = uploads.len(), "Waiting for result uploads to finish");
    match tokio::time::timeout(timeout, uploads.wait()).await {
        Ok(()) => true,
        Err(_) => {
            warn!(
                pending = uploads.len(),
                "Result uploads still running at shutdown, dropping them"
            );
            false
        }
    }
}

/// Plain-text error response helper.
pub fn text_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, message.into()).into_response()
}

/// Resolve when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(signal = "SIGINT", "Caught signal, shutting down"),
        _ = terminate => info!(signal = "SIGTERM", "Caught signal, shutting down"),
    }
}
