//! Property tests: invariants hold for every generated claim

use proptest::prelude::*;

use domain_claims::{adjudicate, Decision, ReasonCode};
use test_utils::{assert_result_invariants, claim_strategy, PolicyFixtures};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn result_invariants_hold(claim in claim_strategy()) {
        let policy = PolicyFixtures::standard();
        let result = adjudicate(&claim, &policy).unwrap();
        assert_result_invariants(&claim, &result);
    }

    #[test]
    fn adjudication_is_deterministic(claim in claim_strategy()) {
        let policy = PolicyFixtures::standard();
        let first = adjudicate(&claim, &policy).unwrap();
        let second = adjudicate(&claim, &policy).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn non_paying_decisions_zero_the_ledger(claim in claim_strategy()) {
        let policy = PolicyFixtures::standard();
        let result = adjudicate(&claim, &policy).unwrap();
        if matches!(result.decision, Decision::Rejected | Decision::ManualReview) {
            prop_assert!(result.approved_amount.is_zero());
            prop_assert_eq!(result.breakdown.final_amount(), Some(core_kernel::Money::zero()));
        }
    }

    #[test]
    fn per_claim_excess_never_pays(claim in claim_strategy()) {
        let policy = PolicyFixtures::standard();
        let result = adjudicate(&claim, &policy).unwrap();
        if result.reasons.contains(&ReasonCode::PerClaimExceeded) {
            prop_assert!(!result.decision.pays());
        }
    }
}
