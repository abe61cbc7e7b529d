//! API route handlers.
//!
//! Request parsing and response shaping only — all real work happens in the
//! controller. Failures from the store or pipeline surface as a generic
//! `500 {"detail": ...}` body; request-shape validation is axum's `Json`
//! extractor.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::controller::{Controller, StatusReport};
use crate::store::{AddReceipt, StoreError};
use crate::workflow::AskOutcome;

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub controller: Arc<Controller>,
}

// ============================================================================
// Error mapping
// ============================================================================

/// Store/pipeline failure surfaced over HTTP as `500 {"detail": ...}`.
pub struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "detail": self.0.to_string() })),
        )
            .into_response()
    }
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Request body for `POST /add`.
#[derive(Debug, Deserialize)]
pub struct AddRequest {
    pub text: String,
}

/// Request body for `POST /ask`.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Active storage backend ("qdrant" or "memory").
    pub backend: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /add — store a document.
pub async fn add_document(
    State(state): State<ApiState>,
    Json(req): Json<AddRequest>,
) -> Result<Json<AddReceipt>, ApiError> {
    let receipt = state.controller.handle_add(&req.text).await?;
    Ok(Json(receipt))
}

/// POST /ask — run a question through the retrieve → answer pipeline.
pub async fn ask_question(
    State(state): State<ApiState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskOutcome>, ApiError> {
    let outcome = state.controller.handle_ask(&req.question).await?;
    Ok(Json(outcome))
}

/// GET /status — combined backend and pipeline status.
pub async fn get_status(State(state): State<ApiState>) -> Json<StatusReport> {
    Json(state.controller.handle_status().await)
}

/// GET /health — liveness probe.
pub async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        backend: state.controller.backend_name(),
    })
}
