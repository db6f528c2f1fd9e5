//! HTTP request adapter for docproc.
//!
//! Exposes `POST /upload`, which wraps one document into a batch of one and
//! returns the dispatcher's grouped output, and `GET /health`.

mod error;
mod handlers;

use std::any::Any;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use docproc_core::BatchProcessor;

pub use error::{ApiError, ErrorBody, ErrorDetail};
pub use handlers::{HealthResponse, UploadRequest};

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<BatchProcessor>,
}

impl AppState {
    pub fn new(processor: BatchProcessor) -> Self {
        Self {
            processor: Arc::new(processor),
        }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(handlers::upload))
        .route("/health", get(handlers::health))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the process exits.
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state)).await
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    ApiError::Internal(detail).into_response()
}
