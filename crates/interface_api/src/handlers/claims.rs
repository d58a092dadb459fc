//! Claims handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::Instrument;

use core_kernel::ClaimId;
use domain_claims::{AdjudicationResult, Adjudicator, TemplateNarrator};

use crate::dto::claims::*;
use crate::{error::ApiError, AppState};

/// Adjudicates a submitted claim
///
/// A claim whose document fingerprint was already submitted skips the engine
/// and goes straight to manual review. The fingerprint is registered once the
/// claim has a decision.
pub async fn submit_claim(
    State(state): State<AppState>,
    payload: Result<Json<SubmitClaimRequest>, JsonRejection>,
) -> Result<Json<SubmitClaimResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidPayload(e.body_text()))?;

    if request.claim.is_empty() {
        return Err(ApiError::InvalidPayload(
            "claim has no line items and no positive total".to_string(),
        ));
    }

    let claim_id = ClaimId::new_v7();
    let span = tracing::info_span!("claim", claim_id = %claim_id);
    process(state, request, claim_id).instrument(span).await
}

async fn process(
    state: AppState,
    request: SubmitClaimRequest,
    claim_id: ClaimId,
) -> Result<Json<SubmitClaimResponse>, ApiError> {
    let claim = request.claim;
    let fingerprint = request.document_fingerprint.as_deref();

    let seen = match fingerprint {
        Some(fp) => is_known(&state, fp).await,
        None => false,
    };

    let mut decision = if seen {
        AdjudicationResult::duplicate(&claim)
    } else {
        let policy = state.policy.current();
        Adjudicator::new(&policy).adjudicate(&claim)?
    };

    // Only adjudicated claims claim the document, so a failed submission can be retried
    if let (Some(fp), false) = (fingerprint, seen) {
        if register(&state, fp).await {
            decision = AdjudicationResult::duplicate(&claim);
        }
    }

    let narrative = match state.narrator.narrate(&claim, &decision).await {
        Ok(narrative) => narrative,
        Err(e) => {
            tracing::warn!(error = %e, "Narrator failed, using template narrative");
            TemplateNarrator::render(&claim, &decision)
        }
    };

    Ok(Json(SubmitClaimResponse {
        status: "ok",
        claim_id: claim_id.to_string(),
        decision,
        narrative,
    }))
}

/// Duplicate check is advisory; a failing detector lets the claim through
async fn is_known(state: &AppState, fingerprint: &str) -> bool {
    match state.duplicates.is_known(fingerprint).await {
        Ok(known) => known,
        Err(e) => {
            tracing::warn!(error = %e, "Duplicate check failed, adjudicating normally");
            false
        }
    }
}

/// Returns true if another submission registered the fingerprint first
async fn register(state: &AppState, fingerprint: &str) -> bool {
    match state.duplicates.check_and_register(fingerprint).await {
        Ok(verdict) => verdict.is_duplicate,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to register document fingerprint");
            false
        }
    }
}
