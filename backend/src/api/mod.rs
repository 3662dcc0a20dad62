//! API module
//!
//! HTTP handlers for the practice-session surface and the router that
//! wires them together.

pub mod catalog;
pub mod sessions;

use crate::state::SharedState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// "healthy" when the process is up
    pub status: String,
    /// Crate version
    pub version: String,
    /// Human-readable summary
    pub message: String,
    /// Model used for practice sessions
    pub model: String,
    /// Whether model calls can be made at all
    pub api_key_configured: bool,
}

/// GET /api/health
pub async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    let message = if state.api_key_configured {
        "Backend is healthy".to_string()
    } else {
        "Backend is up but ANTHROPIC_API_KEY is not set; session turns will fail".to_string()
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message,
        model: state.model.clone(),
        api_key_configured: state.api_key_configured,
    })
}

/// Build the API router (without middleware layers)
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/catalog", get(catalog::get_catalog))
        .route("/api/sessions", post(sessions::start_session))
        .route("/api/sessions/turn", post(sessions::submit_turn))
        .route("/api/sessions/finish", post(sessions::finish_session))
        .with_state(state)
}
