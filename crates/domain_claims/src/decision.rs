//! Decision resolution
//!
//! A priority cascade over the stage outcomes; the first matching rule wins:
//!
//! ```text
//! eligibility failed            -> REJECTED
//! documents failed              -> REJECTED
//! fraud screen failed           -> MANUAL_REVIEW
//! PER_CLAIM_EXCEEDED            -> REJECTED
//! SERVICE_NOT_COVERED, paid 0   -> REJECTED
//! paid == claimed               -> APPROVED
//! paid > 0, benefit adj. only   -> APPROVED
//! paid > 0                      -> PARTIAL
//! otherwise                     -> REJECTED
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use core_kernel::Money;

use crate::coverage::CoverageOutcome;
use crate::reason::{ReasonCode, Reasons};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approved,
    Partial,
    Rejected,
    ManualReview,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approved => "APPROVED",
            Decision::Partial => "PARTIAL",
            Decision::Rejected => "REJECTED",
            Decision::ManualReview => "MANUAL_REVIEW",
        }
    }

    /// Returns true if the decision pays out
    pub fn pays(&self) -> bool {
        matches!(self, Decision::Approved | Decision::Partial)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pass/fail of the gating stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageChecks {
    pub eligibility_ok: bool,
    pub documents_ok: bool,
    pub fraud_ok: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub decision: Decision,
    pub approved_amount: Money,
}

pub struct DecisionResolver;

impl DecisionResolver {
    /// Picks the final decision and zeroes the ledger for non-paying outcomes
    pub fn resolve(
        checks: StageChecks,
        reasons: &Reasons,
        claimed: Money,
        coverage: &mut CoverageOutcome,
    ) -> Resolution {
        let decision = Self::decide(checks, reasons, claimed, coverage);

        let approved_amount = if decision.pays() {
            coverage.approved_amount
        } else {
            coverage.ledger.zero_final();
            Money::zero()
        };

        Resolution {
            decision,
            approved_amount,
        }
    }

    fn decide(
        checks: StageChecks,
        reasons: &Reasons,
        claimed: Money,
        coverage: &CoverageOutcome,
    ) -> Decision {
        let approved = coverage.approved_amount;

        if !checks.eligibility_ok || !checks.documents_ok {
            return Decision::Rejected;
        }
        if !checks.fraud_ok {
            return Decision::ManualReview;
        }
        if reasons.contains(&ReasonCode::PerClaimExceeded) {
            return Decision::Rejected;
        }
        if reasons.contains(&ReasonCode::ServiceNotCovered) && approved.is_zero() {
            return Decision::Rejected;
        }

        if approved == claimed {
            Decision::Approved
        } else if approved.is_positive()
            && coverage
                .ledger
                .deductions()
                .all(|entry| entry.kind.is_benefit_adjustment())
        {
            Decision::Approved
        } else if approved.is_positive() {
            Decision::Partial
        } else {
            Decision::Rejected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{EntryKind, Ledger};
    use rust_decimal_macros::dec;

    const PASS: StageChecks = StageChecks {
        eligibility_ok: true,
        documents_ok: true,
        fraud_ok: true,
    };

    fn coverage(claimed: Money, deductions: &[(EntryKind, Money)]) -> CoverageOutcome {
        let mut ledger = Ledger::opened_with(claimed);
        let mut approved = claimed;
        for (kind, amount) in deductions {
            ledger.deduct("deduction", *amount, *kind);
            approved = approved - *amount;
        }
        ledger.close(approved);

        CoverageOutcome {
            ok: true,
            flags: Reasons::new(),
            approved_amount: approved,
            ledger,
            specific_limit_applied: false,
            network_discount_applied: false,
            sublimit_category: None,
        }
    }

    fn money(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount)
    }

    #[test]
    fn test_full_amount_approved() {
        let claimed = money(dec!(1500));
        let mut cov = coverage(claimed, &[]);
        let resolution = DecisionResolver::resolve(PASS, &Reasons::new(), claimed, &mut cov);
        assert_eq!(resolution.decision, Decision::Approved);
        assert_eq!(resolution.approved_amount, claimed);
    }

    #[test]
    fn test_copay_only_is_approved() {
        let claimed = money(dec!(1500));
        let mut cov = coverage(claimed, &[(EntryKind::Copay, money(dec!(150)))]);
        let resolution = DecisionResolver::resolve(PASS, &Reasons::new(), claimed, &mut cov);
        assert_eq!(resolution.decision, Decision::Approved);
        assert_eq!(resolution.approved_amount.amount(), dec!(1350));
    }

    #[test]
    fn test_exclusion_is_partial() {
        let claimed = money(dec!(12000));
        let mut cov = coverage(claimed, &[(EntryKind::Exclusion, money(dec!(4000)))]);
        let reasons = Reasons::from([ReasonCode::ServiceNotCovered]);
        let resolution = DecisionResolver::resolve(PASS, &reasons, claimed, &mut cov);
        assert_eq!(resolution.decision, Decision::Partial);
        assert_eq!(resolution.approved_amount.amount(), dec!(8000));
    }

    #[test]
    fn test_everything_excluded_is_rejected() {
        let claimed = money(dec!(4000));
        let mut cov = coverage(claimed, &[(EntryKind::Exclusion, claimed)]);
        let reasons = Reasons::from([ReasonCode::ServiceNotCovered]);
        let resolution = DecisionResolver::resolve(PASS, &reasons, claimed, &mut cov);
        assert_eq!(resolution.decision, Decision::Rejected);
    }

    #[test]
    fn test_per_claim_exceeded_overrides_coverage() {
        let claimed = money(dec!(7500));
        let mut cov = coverage(claimed, &[(EntryKind::PerClaimLimit, money(dec!(2500)))]);
        let reasons = Reasons::from([ReasonCode::PerClaimExceeded]);
        let resolution = DecisionResolver::resolve(PASS, &reasons, claimed, &mut cov);
        assert_eq!(resolution.decision, Decision::Rejected);
        assert!(resolution.approved_amount.is_zero());
        assert_eq!(cov.ledger.final_amount(), Some(Money::zero()));
    }

    #[test]
    fn test_priority_order() {
        let claimed = money(dec!(60000));
        let reasons = Reasons::new();

        let checks = StageChecks { fraud_ok: false, ..PASS };
        let mut cov = coverage(claimed, &[]);
        assert_eq!(
            DecisionResolver::resolve(checks, &reasons, claimed, &mut cov).decision,
            Decision::ManualReview
        );

        let checks = StageChecks {
            documents_ok: false,
            fraud_ok: false,
            ..PASS
        };
        let mut cov = coverage(claimed, &[]);
        assert_eq!(
            DecisionResolver::resolve(checks, &reasons, claimed, &mut cov).decision,
            Decision::Rejected
        );
    }

    #[test]
    fn test_zero_claim_is_approved_for_nothing() {
        let claimed = Money::zero();
        let mut cov = coverage(claimed, &[]);
        let resolution = DecisionResolver::resolve(PASS, &Reasons::new(), claimed, &mut cov);
        assert_eq!(resolution.decision, Decision::Approved);
        assert!(resolution.approved_amount.is_zero());
    }
}
