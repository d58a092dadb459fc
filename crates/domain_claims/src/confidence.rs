//! Confidence scoring
//!
//! Blends how sure the extractor was about the claim with how clear-cut the
//! rule outcome is.

use serde::{Deserialize, Serialize};

use crate::reason::{ReasonCode, Reasons};

pub const EXTRACTION_WEIGHT: f64 = 0.4;
pub const POLICY_WEIGHT: f64 = 0.6;

const POLICY_CONF_CLEAR: f64 = 1.0;
const POLICY_CONF_POLICY_REJECTION: f64 = 0.95;
const POLICY_CONF_MISSING_DOCUMENTS: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub extraction_conf: f64,
    pub policy_conf: f64,
    pub extraction_weight: f64,
    pub policy_weight: f64,
}

pub struct ConfidenceScorer;

impl ConfidenceScorer {
    /// Returns the score in [0, 1], rounded to two decimals, and its inputs
    pub fn score(extraction_confidence: f64, reasons: &Reasons) -> (f64, ConfidenceBreakdown) {
        let extraction_conf = if extraction_confidence.is_finite() {
            extraction_confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };

        let policy_conf = if reasons.contains(&ReasonCode::MissingDocuments) {
            POLICY_CONF_MISSING_DOCUMENTS
        } else if reasons.iter().any(ReasonCode::is_policy_rejection) {
            POLICY_CONF_POLICY_REJECTION
        } else {
            POLICY_CONF_CLEAR
        };

        let raw = extraction_conf * EXTRACTION_WEIGHT + policy_conf * POLICY_WEIGHT;
        let score = (raw.clamp(0.0, 1.0) * 100.0).round() / 100.0;

        (
            score,
            ConfidenceBreakdown {
                extraction_conf,
                policy_conf,
                extraction_weight: EXTRACTION_WEIGHT,
                policy_weight: POLICY_WEIGHT,
            },
        )
    }
}
