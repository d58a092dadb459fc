//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        policy: None,
    })
}

/// Readiness check (reports the active policy snapshot)
pub async fn readiness_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let terms = state.policy.current();
    Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        policy: Some(terms.name.clone().unwrap_or_else(|| "unnamed".to_string())),
    })
}
