//! Fraud screening: high-value and high-velocity claims

use domain_policy::PolicyTerms;

use crate::claim::ClaimRecord;
use crate::reason::{ReasonCode, Reasons};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FraudOutcome {
    pub ok: bool,
    pub flags: Reasons,
}

pub struct FraudScreener;

impl FraudScreener {
    /// Both checks are independent; thresholds are exclusive
    pub fn check(claim: &ClaimRecord, policy: &PolicyTerms) -> FraudOutcome {
        let mut flags = Reasons::new();

        if claim.total_amount > policy.fraud.high_value_amount {
            tracing::debug!(total = %claim.total_amount, threshold = %policy.fraud.high_value_amount, "High-value claim");
            flags.insert(ReasonCode::HighValueClaimManualReview);
        }

        if claim.prev_claims_same_day > policy.fraud.same_day_claims {
            tracing::debug!(
                prev_claims_same_day = claim.prev_claims_same_day,
                threshold = policy.fraud.same_day_claims,
                "Same-day claim velocity exceeded"
            );
            flags.insert(ReasonCode::MultipleClaimsSameDay);
        }

        FraudOutcome {
            ok: flags.is_empty(),
            flags,
        }
    }
}
