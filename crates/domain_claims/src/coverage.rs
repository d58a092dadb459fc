//! Coverage calculation
//!
//! Derives the approved amount from the claim's line items and records every
//! adjustment in the ledger. Steps run in a fixed order:
//!
//! 1. exclusions, item by item
//! 2. category sublimit matched from the diagnosis
//! 3. per-claim limit, only when no category sublimit matched
//! 4. network discount
//! 5. copay, only for plain consultation claims outside the network
//! 6. cap at the stated total, so item sums above it never pay out
//!
//! Any failure here is fatal to the whole adjudication.

use core_kernel::Money;
use domain_policy::PolicyTerms;

use crate::claim::{ClaimRecord, ItemCategory, LineItem};
use crate::error::ClaimError;
use crate::ledger::{EntryKind, Ledger};
use crate::reason::{ReasonCode, Reasons};

/// Terms excluded regardless of the policy's own exclusion list
pub const BUILTIN_EXCLUSIONS: [&str; 4] = ["whitening", "aesthetic", "beautification", "cosmetic"];

const SYNTHETIC_ITEM_NAME: &str = "General Medical Expense";
const SYNTHETIC_ITEM_CATEGORY: &str = "General";

#[derive(Debug, Clone, PartialEq)]
pub struct CoverageOutcome {
    pub ok: bool,
    pub flags: Reasons,
    pub approved_amount: Money,
    pub ledger: Ledger,
    /// A category sublimit matched the diagnosis, whether or not it capped
    pub specific_limit_applied: bool,
    pub network_discount_applied: bool,
    pub sublimit_category: Option<String>,
}

pub struct CoverageCalculator;

impl CoverageCalculator {
    pub fn calculate(claim: &ClaimRecord, policy: &PolicyTerms) -> Result<CoverageOutcome, ClaimError> {
        let claimed = claim.total_amount;
        if claimed.is_negative() {
            return Err(ClaimError::adjudication_failed(format!(
                "claimed total is negative: {}",
                claimed
            )));
        }

        let mut ledger = Ledger::opened_with(claimed);
        let mut flags = Reasons::new();

        let synthetic;
        let items: &[LineItem] = if claim.items.is_empty() && claimed.is_positive() {
            synthetic = [LineItem::new(SYNTHETIC_ITEM_NAME, claimed, SYNTHETIC_ITEM_CATEGORY)];
            &synthetic
        } else {
            &claim.items
        };

        let mut running = Money::zero();
        let mut has_consultation = false;
        let mut is_alternative = false;

        for item in items {
            if item.amount.is_negative() {
                return Err(ClaimError::adjudication_failed(format!(
                    "line item '{}' has a negative amount",
                    item.name
                )));
            }

            if is_excluded(item, policy) {
                tracing::debug!(item = %item.name, amount = %item.amount, "Line item excluded");
                flags.insert(ReasonCode::ServiceNotCovered);
                ledger.deduct(format!("Excluded: {}", item.name), item.amount, EntryKind::Exclusion);
                continue;
            }

            running = running.checked_add(&item.amount)?;

            let kind = item.category_kind();
            if kind == ItemCategory::Consultation || item.name.to_lowercase().contains("consult") {
                has_consultation = true;
            }
            if kind == ItemCategory::Alternative {
                is_alternative = true;
            }
        }

        let mut specific_limit_applied = false;
        let mut sublimit_category = None;
        if let Some(rule) = policy.sublimit_for(claim.diagnosis_text()) {
            specific_limit_applied = true;
            sublimit_category = Some(rule.category.clone());
            if running > rule.limit {
                let excess = running.checked_sub(&rule.limit)?;
                flags.insert(ReasonCode::SubLimitExceeded);
                ledger.deduct(
                    format!("Sublimit cap ({})", rule.category),
                    excess,
                    EntryKind::SubLimit,
                );
                running = rule.limit;
            }
        }

        if !specific_limit_applied && running > policy.per_claim_limit {
            let excess = running.checked_sub(&policy.per_claim_limit)?;
            flags.insert(ReasonCode::PerClaimExceeded);
            ledger.deduct("Per-claim limit", excess, EntryKind::PerClaimLimit);
            running = policy.per_claim_limit;
        }

        // Discount applies even under a category sublimit; copay does not
        let network_discount_applied = claim
            .hospital_name()
            .is_some_and(|name| policy.is_network_hospital(name));
        if network_discount_applied {
            let discount = policy.network_discount.apply(&running);
            ledger.deduct(
                format!("Network discount ({})", policy.network_discount),
                discount,
                EntryKind::NetworkDiscount,
            );
            running = running.checked_sub(&discount)?;
        }

        if has_consultation && !network_discount_applied && !specific_limit_applied && !is_alternative {
            let copay = policy.copay.apply(&running);
            if !copay.is_zero() {
                ledger.deduct(format!("Copay ({})", policy.copay), copay, EntryKind::Copay);
                running = running.checked_sub(&copay)?;
            }
        }

        running = running.non_negative();
        if running > claimed {
            let excess = running.checked_sub(&claimed)?;
            ledger.deduct("Claimed total cap", excess, EntryKind::ClaimedTotalCap);
            running = claimed;
        }
        ledger.close(running);

        tracing::debug!(
            claimed = %claimed,
            approved = %running,
            specific_limit_applied,
            network_discount_applied,
            "Coverage calculated"
        );

        Ok(CoverageOutcome {
            ok: flags.is_empty(),
            flags,
            approved_amount: running,
            ledger,
            specific_limit_applied,
            network_discount_applied,
            sublimit_category,
        })
    }
}

fn is_excluded(item: &LineItem, policy: &PolicyTerms) -> bool {
    let name = item.name.to_lowercase();
    let category = item.category.as_deref().unwrap_or_default().to_lowercase();
    let matches = |term: &str| !term.is_empty() && (name.contains(term) || category.contains(term));

    policy.exclusions.iter().any(|t| matches(t)) || BUILTIN_EXCLUSIONS.iter().any(|t| matches(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::Hospital;
    use rust_decimal_macros::dec;

    fn policy() -> PolicyTerms {
        PolicyTerms::from_json_str(
            r#"{
                "per_claim_limit": 5000,
                "sublimits": { "dental": 10000 },
                "exclusions": ["Weight Loss"],
                "network_hospitals": ["Apollo Hospitals"],
                "copay_percentage": 10,
                "network_discount_percentage": 20,
                "fraud_thresholds": { "high_value_amount": 50000, "same_day_claims": 2 }
            }"#,
        )
        .unwrap()
    }

    fn item(name: &str, amount: rust_decimal::Decimal, category: &str) -> LineItem {
        LineItem::new(name, Money::new(amount), category)
    }

    fn kinds(outcome: &CoverageOutcome) -> Vec<EntryKind> {
        outcome.ledger.entries().iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_consultation_copay() {
        let claim = ClaimRecord {
            total_amount: Money::new(dec!(1500)),
            items: vec![
                item("Consultation Fee", dec!(1000), "Consultation"),
                item("Blood Test", dec!(500), "Diagnostic"),
            ],
            ..Default::default()
        };

        let outcome = CoverageCalculator::calculate(&claim, &policy()).unwrap();
        assert!(outcome.ok);
        assert_eq!(outcome.approved_amount.amount(), dec!(1350));
        assert_eq!(kinds(&outcome), vec![EntryKind::Claimed, EntryKind::Copay, EntryKind::Approved]);
    }

    #[test]
    fn test_exclusions_policy_and_builtin() {
        let claim = ClaimRecord {
            total_amount: Money::new(dec!(3000)),
            items: vec![
                item("Weight loss programme", dec!(1000), "Other"),
                item("Facial", dec!(500), "Cosmetic"),
                item("X-Ray", dec!(1500), "Diagnostic"),
            ],
            ..Default::default()
        };

        let outcome = CoverageCalculator::calculate(&claim, &policy()).unwrap();
        assert!(outcome.flags.contains(&ReasonCode::ServiceNotCovered));
        assert_eq!(outcome.approved_amount.amount(), dec!(1500));
        assert_eq!(outcome.ledger.entries()[1].label, "Excluded: Weight loss programme");
        assert_eq!(outcome.ledger.entries()[1].amount.amount(), dec!(-1000));
    }

    #[test]
    fn test_sublimit_match_disables_copay_and_global_cap() {
        let claim = ClaimRecord {
            total_amount: Money::new(dec!(12000)),
            diagnosis: Some("Dental abscess".to_string()),
            items: vec![
                item("Consultation", dec!(1000), "Consultation"),
                item("Extraction", dec!(11000), "Dental"),
            ],
            ..Default::default()
        };

        let outcome = CoverageCalculator::calculate(&claim, &policy()).unwrap();
        assert!(outcome.specific_limit_applied);
        assert_eq!(outcome.sublimit_category.as_deref(), Some("dental"));
        assert!(outcome.flags.contains(&ReasonCode::SubLimitExceeded));
        assert!(!outcome.flags.contains(&ReasonCode::PerClaimExceeded));
        assert_eq!(outcome.approved_amount.amount(), dec!(10000));
    }

    #[test]
    fn test_network_discount_replaces_copay() {
        let claim = ClaimRecord {
            total_amount: Money::new(dec!(2000)),
            items: vec![item("Consultation", dec!(2000), "Consultation")],
            hospital: Some(Hospital {
                name: Some("apollo hospitals, Bangalore".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let outcome = CoverageCalculator::calculate(&claim, &policy()).unwrap();
        assert!(outcome.network_discount_applied);
        assert_eq!(outcome.approved_amount.amount(), dec!(1600));
        assert!(!kinds(&outcome).contains(&EntryKind::Copay));
    }

    #[test]
    fn test_alternative_medicine_skips_copay() {
        let claim = ClaimRecord {
            total_amount: Money::new(dec!(1000)),
            items: vec![
                item("Consultation", dec!(400), "Consultation"),
                item("Panchakarma", dec!(600), "Alternative Medicine"),
            ],
            ..Default::default()
        };

        let outcome = CoverageCalculator::calculate(&claim, &policy()).unwrap();
        assert_eq!(outcome.approved_amount.amount(), dec!(1000));
    }

    #[test]
    fn test_total_without_items_is_synthesized() {
        let claim = ClaimRecord {
            total_amount: Money::new(dec!(800)),
            ..Default::default()
        };

        let outcome = CoverageCalculator::calculate(&claim, &policy()).unwrap();
        assert_eq!(outcome.approved_amount.amount(), dec!(800));
        assert_eq!(kinds(&outcome), vec![EntryKind::Claimed, EntryKind::Approved]);
    }

    #[test]
    fn test_items_above_total_are_capped() {
        let claim = ClaimRecord {
            total_amount: Money::new(dec!(1000)),
            items: vec![item("MRI", dec!(1800), "Diagnostic")],
            ..Default::default()
        };

        let outcome = CoverageCalculator::calculate(&claim, &policy()).unwrap();
        assert_eq!(outcome.approved_amount.amount(), dec!(1000));
        assert!(kinds(&outcome).contains(&EntryKind::ClaimedTotalCap));
    }

    #[test]
    fn test_zero_total_caps_items_to_nothing() {
        let claim = ClaimRecord {
            items: vec![item("Consultation", dec!(1000), "Consultation")],
            ..Default::default()
        };

        let outcome = CoverageCalculator::calculate(&claim, &policy()).unwrap();
        assert!(outcome.approved_amount.is_zero());
        assert_eq!(outcome.ledger.entries()[0].amount, Money::zero());
        assert!(kinds(&outcome).contains(&EntryKind::ClaimedTotalCap));
    }

    #[test]
    fn test_negative_item_is_fatal() {
        let claim = ClaimRecord {
            total_amount: Money::new(dec!(1000)),
            items: vec![item("Refund", dec!(-200), "Other")],
            ..Default::default()
        };

        let err = CoverageCalculator::calculate(&claim, &policy()).unwrap_err();
        assert!(matches!(err, ClaimError::AdjudicationFailed { .. }));
    }
}
