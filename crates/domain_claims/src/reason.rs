//! Reason codes
//!
//! Every rule outcome is reported as a short symbolic code. Codes are kept
//! in a sorted set so a result never repeats a code and always lists them in
//! the same order.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    // Eligibility
    PolicyInactive,
    WaitingPeriod,
    EligibilityCheckError,
    // Documentation
    MissingDocuments,
    DoctorRegInvalid,
    // Coverage
    ServiceNotCovered,
    SubLimitExceeded,
    PerClaimExceeded,
    // Fraud
    HighValueClaimManualReview,
    MultipleClaimsSameDay,
    /// Raised by callers that short-circuit on duplicate documents
    DuplicateImageDetected,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::PolicyInactive => "POLICY_INACTIVE",
            ReasonCode::WaitingPeriod => "WAITING_PERIOD",
            ReasonCode::EligibilityCheckError => "ELIGIBILITY_CHECK_ERROR",
            ReasonCode::MissingDocuments => "MISSING_DOCUMENTS",
            ReasonCode::DoctorRegInvalid => "DOCTOR_REG_INVALID",
            ReasonCode::ServiceNotCovered => "SERVICE_NOT_COVERED",
            ReasonCode::SubLimitExceeded => "SUB_LIMIT_EXCEEDED",
            ReasonCode::PerClaimExceeded => "PER_CLAIM_EXCEEDED",
            ReasonCode::HighValueClaimManualReview => "HIGH_VALUE_CLAIM_MANUAL_REVIEW",
            ReasonCode::MultipleClaimsSameDay => "MULTIPLE_CLAIMS_SAME_DAY",
            ReasonCode::DuplicateImageDetected => "DUPLICATE_IMAGE_DETECTED",
        }
    }

    /// Codes that reject the claim on policy grounds
    pub fn is_policy_rejection(&self) -> bool {
        matches!(
            self,
            ReasonCode::PolicyInactive
                | ReasonCode::WaitingPeriod
                | ReasonCode::EligibilityCheckError
                | ReasonCode::PerClaimExceeded
        )
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// De-duplicated, ordered set of reason codes
pub type Reasons = BTreeSet<ReasonCode>;
