//! Claim adjudication
//!
//! Runs every stage against one policy snapshot and assembles the result.
//! The computation is pure: same claim and policy, same result.
//!
//! ```text
//! eligibility ─┐
//! documents  ──┤
//! coverage   ──┼──► reasons ──► DecisionResolver ──► ConfidenceScorer ──► AdjudicationResult
//! fraud      ──┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use core_kernel::Money;
use domain_policy::PolicyTerms;

use crate::claim::ClaimRecord;
use crate::confidence::{ConfidenceBreakdown, ConfidenceScorer};
use crate::coverage::CoverageCalculator;
use crate::decision::{Decision, DecisionResolver, StageChecks};
use crate::documents::DocumentValidator;
use crate::eligibility::EligibilityChecker;
use crate::error::ClaimError;
use crate::fraud::FraudScreener;
use crate::ledger::Ledger;
use crate::reason::{ReasonCode, Reasons};
use crate::redaction::redacted_view;

/// Result of claim adjudication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjudicationResult {
    pub decision: Decision,
    pub approved_amount: Money,
    pub claimed_amount: Money,
    pub reasons: Reasons,
    pub confidence: f64,
    pub confidence_breakdown: ConfidenceBreakdown,
    /// Ledger from the claimed total down to the approved amount
    pub breakdown: Ledger,
    pub notes: BTreeMap<String, String>,
}

impl AdjudicationResult {
    /// Result for a claim whose document was already seen on another claim
    ///
    /// Callers use this instead of running the engine.
    pub fn duplicate(claim: &ClaimRecord) -> Self {
        let claimed = claim.total_amount;
        let reasons = Reasons::from([ReasonCode::DuplicateImageDetected]);
        let (confidence, confidence_breakdown) =
            ConfidenceScorer::score(claim.extraction_confidence(), &reasons);

        let mut breakdown = Ledger::opened_with(claimed);
        breakdown.close(Money::zero());

        Self {
            decision: Decision::ManualReview,
            approved_amount: Money::zero(),
            claimed_amount: claimed,
            reasons,
            confidence,
            confidence_breakdown,
            breakdown,
            notes: BTreeMap::new(),
        }
    }

    pub fn is_paid(&self) -> bool {
        self.decision.pays() && self.approved_amount.is_positive()
    }
}

/// Adjudicates claims against a fixed policy snapshot
pub struct Adjudicator<'a> {
    policy: &'a PolicyTerms,
}

impl<'a> Adjudicator<'a> {
    pub fn new(policy: &'a PolicyTerms) -> Self {
        Self { policy }
    }

    /// Adjudicates one claim
    ///
    /// Rule outcomes are reported as reasons on the result. An error means
    /// the coverage amount could not be derived and no decision was made.
    #[instrument(skip_all, fields(policy = self.policy.name.as_deref().unwrap_or("unnamed")))]
    pub fn adjudicate(&self, claim: &ClaimRecord) -> Result<AdjudicationResult, ClaimError> {
        tracing::debug!(claim = %redacted_view(claim), "Adjudicating claim");

        let result = self.run(claim);
        match &result {
            Ok(r) => tracing::info!(
                decision = %r.decision,
                approved = %r.approved_amount,
                claimed = %r.claimed_amount,
                reasons = ?r.reasons,
                confidence = r.confidence,
                "Claim adjudicated"
            ),
            Err(e) => tracing::warn!(error = %e, "Adjudication failed"),
        }
        result
    }

    fn run(&self, claim: &ClaimRecord) -> Result<AdjudicationResult, ClaimError> {
        let eligibility = EligibilityChecker::check(claim, self.policy);
        tracing::debug!(ok = eligibility.ok, flags = ?eligibility.flags, "Eligibility checked");

        let documents = DocumentValidator::check(claim);
        tracing::debug!(ok = documents.ok, flags = ?documents.flags, "Documents checked");

        let mut coverage = CoverageCalculator::calculate(claim, self.policy)?;

        let fraud = FraudScreener::check(claim, self.policy);
        tracing::debug!(ok = fraud.ok, flags = ?fraud.flags, "Fraud screened");

        let reasons: Reasons = eligibility
            .flags
            .iter()
            .chain(&documents.flags)
            .chain(&coverage.flags)
            .chain(&fraud.flags)
            .copied()
            .collect();

        let claimed = claim.total_amount;
        let checks = StageChecks {
            eligibility_ok: eligibility.ok,
            documents_ok: documents.ok,
            fraud_ok: fraud.ok,
        };
        let resolution = DecisionResolver::resolve(checks, &reasons, claimed, &mut coverage);

        let (confidence, confidence_breakdown) =
            ConfidenceScorer::score(claim.extraction_confidence(), &reasons);

        Ok(AdjudicationResult {
            decision: resolution.decision,
            approved_amount: resolution.approved_amount,
            claimed_amount: claimed,
            reasons,
            confidence,
            confidence_breakdown,
            breakdown: coverage.ledger,
            notes: eligibility.notes,
        })
    }
}

/// Adjudicates `claim` against `policy`
pub fn adjudicate(claim: &ClaimRecord, policy: &PolicyTerms) -> Result<AdjudicationResult, ClaimError> {
    Adjudicator::new(policy).adjudicate(claim)
}
