//! Request handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use docproc_core::{Document, GroupedOutput};

use crate::error::ApiError;
use crate::AppState;

/// Body of `POST /upload`.
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub content: String,
    #[serde(rename = "type")]
    pub doc_type: String,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Process one document as a batch of one and return the grouped output.
///
/// Any malformed body is a 400; an unknown type is a 200 with `{}`.
pub async fn upload(
    State(state): State<AppState>,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<Json<GroupedOutput>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    debug!(
        "Upload of type {:?} with {} bytes of content",
        request.doc_type,
        request.content.len()
    );

    let document = Document::new(request.doc_type, request.content);
    let output = state.processor.process(vec![document]).await;

    Ok(Json(output))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
