//! Claims DTOs

use serde::{Deserialize, Serialize};

use domain_claims::{AdjudicationResult, ClaimRecord, Narrative};

#[derive(Debug, Deserialize)]
pub struct SubmitClaimRequest {
    pub claim: ClaimRecord,
    /// Fingerprint of the uploaded bill, from `/documents/fingerprint`
    #[serde(default)]
    pub document_fingerprint: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitClaimResponse {
    pub status: &'static str,
    pub claim_id: String,
    pub decision: AdjudicationResult,
    pub narrative: Narrative,
}
