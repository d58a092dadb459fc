//! Document handlers

use axum::{body::Bytes, extract::State, Json};

use crate::dto::documents::FingerprintResponse;
use crate::{error::ApiError, AppState};

/// Fingerprints an uploaded document and reports whether a submitted claim
/// already used it
///
/// The fingerprint is only registered when a claim carrying it is submitted.
pub async fn fingerprint_document(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FingerprintResponse>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::InvalidPayload("document body is empty".to_string()));
    }

    let fingerprint = state.duplicates.fingerprint(&body);
    let is_duplicate = state.duplicates.is_known(&fingerprint).await?;

    Ok(Json(FingerprintResponse {
        status: "ok",
        fingerprint,
        is_duplicate,
    }))
}
