//! API route definitions.
//!
//! - POST /add    - store a document
//! - POST /ask    - question answering through the pipeline
//! - GET  /status - backend and pipeline readiness
//! - GET  /health - liveness probe

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{self, ApiState};

/// Create all API routes.
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/add", post(handlers::add_document))
        .route("/ask", post(handlers::ask_question))
        .route("/status", get(handlers::get_status))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
