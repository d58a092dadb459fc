//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for adjudication results that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_claims::{AdjudicationResult, ClaimRecord, Decision, EntryKind, ReasonCode};
use rust_decimal::Decimal;

/// Asserts that a Money value equals the expected decimal amount
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "Money mismatch: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts the decision and approved amount together
pub fn assert_decision(result: &AdjudicationResult, decision: Decision, approved: Decimal) {
    assert_eq!(
        result.decision, decision,
        "Unexpected decision {} (reasons: {:?})",
        result.decision, result.reasons
    );
    assert_money_eq(&result.approved_amount, approved);
}

/// Asserts that a reason code was raised
pub fn assert_has_reason(result: &AdjudicationResult, code: ReasonCode) {
    assert!(
        result.reasons.contains(&code),
        "Expected reason {} in {:?}",
        code,
        result.reasons
    );
}

/// Asserts that a reason code was not raised
pub fn assert_lacks_reason(result: &AdjudicationResult, code: ReasonCode) {
    assert!(
        !result.reasons.contains(&code),
        "Did not expect reason {} in {:?}",
        code,
        result.reasons
    );
}

/// Asserts every invariant a result must satisfy regardless of input
///
/// # Panics
///
/// Panics if:
/// - the claimed amount is not the claim's stated total
/// - the approved amount is negative or above the stated total
/// - a non-paying decision carries a non-zero amount
/// - the ledger does not open with the claimed total and close with the
///   approved amount
/// - the confidence is outside [0, 1]
pub fn assert_result_invariants(claim: &ClaimRecord, result: &AdjudicationResult) {
    assert_eq!(
        result.claimed_amount, claim.total_amount,
        "Claimed amount must be the stated total"
    );
    assert!(
        !result.approved_amount.is_negative(),
        "Approved amount is negative: {}",
        result.approved_amount
    );
    assert!(
        result.approved_amount <= claim.total_amount,
        "Approved {} exceeds total_amount {}",
        result.approved_amount,
        claim.total_amount
    );

    if matches!(result.decision, Decision::Rejected | Decision::ManualReview) {
        assert!(
            result.approved_amount.is_zero(),
            "{} must pay nothing, got {}",
            result.decision,
            result.approved_amount
        );
    }

    let entries = result.breakdown.entries();
    assert!(entries.len() >= 2, "Ledger too short: {:?}", entries);

    let first = &entries[0];
    assert_eq!(first.kind, EntryKind::Claimed, "Ledger must open with the claimed total");
    assert_eq!(first.amount, result.claimed_amount);

    let last = &entries[entries.len() - 1];
    assert_eq!(last.kind, EntryKind::Approved, "Ledger must close with the approved amount");
    assert_eq!(last.amount, result.approved_amount);

    assert!(
        (0.0..=1.0).contains(&result.confidence),
        "Confidence out of range: {}",
        result.confidence
    );
}
