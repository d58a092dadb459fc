//! Policy handlers

use axum::{extract::State, Json};

use crate::dto::policy::PolicyResponse;
use crate::{error::ApiError, AppState};

/// Returns the active policy terms
pub async fn get_policy(State(state): State<AppState>) -> Json<PolicyResponse> {
    Json(PolicyResponse {
        status: "ok",
        policy: state.policy.current().to_document(),
    })
}

/// Re-reads the configured policy file
///
/// A file that fails validation is rejected and the current terms stay active.
/// The file is read on the blocking pool.
pub async fn reload_policy(State(state): State<AppState>) -> Result<Json<PolicyResponse>, ApiError> {
    let store = state.policy.clone();
    let path = state.config.policy_file.clone();
    let terms = tokio::task::spawn_blocking(move || store.reload(path))
        .await
        .map_err(|e| ApiError::Internal(format!("policy reload task failed: {}", e)))??;
    tracing::info!(
        policy = terms.name.as_deref().unwrap_or("unnamed"),
        file = %state.config.policy_file,
        "Policy terms reloaded"
    );

    Ok(Json(PolicyResponse {
        status: "ok",
        policy: terms.to_document(),
    }))
}
