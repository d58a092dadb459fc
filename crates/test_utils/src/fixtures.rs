//! Pre-built Test Fixtures
//!
//! Provides ready-to-use policy and claim data. The standard policy is the
//! one every scenario test is written against; changing a number here changes
//! expected amounts across the suite.

use domain_claims::{ClaimRecord, Hospital};
use domain_policy::PolicyTerms;
use rust_decimal_macros::dec;

use crate::builders::ClaimBuilder;

/// Standard group OPD policy used throughout the tests
pub const STANDARD_POLICY_JSON: &str = r#"{
    "policy_name": "Group Health OPD",
    "effective_date": "2024-01-01",
    "default_join_date": "2024-01-01",
    "per_claim_limit": 5000,
    "sublimits": {
        "dental": { "limit": 10000, "keywords": ["dental", "tooth", "teeth", "root canal", "cavity", "gum"] },
        "vision": 3000
    },
    "exclusions": ["weight loss", "bariatric", "infertility"],
    "network_hospitals": ["Apollo Hospitals", "Fortis Healthcare"],
    "waiting_periods": { "diabetes": 90, "hypertension": 90 },
    "copay_percentage": 10,
    "network_discount_percentage": 20,
    "fraud_thresholds": { "high_value_amount": 50000, "same_day_claims": 2 }
}"#;

/// Fixture for policy terms
pub struct PolicyFixtures;

impl PolicyFixtures {
    /// The standard policy
    pub fn standard() -> PolicyTerms {
        PolicyTerms::from_json_str(STANDARD_POLICY_JSON).expect("standard policy fixture is valid")
    }

    /// Standard policy as raw JSON, for loaders and HTTP tests
    pub fn standard_json() -> &'static str {
        STANDARD_POLICY_JSON
    }

    /// Standard policy as a JSON value
    pub fn standard_value() -> serde_json::Value {
        serde_json::from_str(STANDARD_POLICY_JSON).expect("standard policy fixture is valid JSON")
    }

    /// A policy carrying only the required fields
    pub fn minimal() -> PolicyTerms {
        PolicyTerms::from_json_str(
            r#"{
                "per_claim_limit": 5000,
                "copay_percentage": 0,
                "network_discount_percentage": 0,
                "fraud_thresholds": { "high_value_amount": 50000, "same_day_claims": 2 }
            }"#,
        )
        .expect("minimal policy fixture is valid")
    }
}

/// Fixture for claims matching well-known adjudication outcomes
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Out-of-network consultation with diagnostics; copay applies
    pub fn simple_consultation() -> ClaimRecord {
        ClaimBuilder::new()
            .with_diagnosis("Viral fever")
            .with_item("Consultation Fee", dec!(1000), "Consultation")
            .with_item("Blood Test", dec!(500), "Diagnostic")
            .with_total(dec!(1500))
            .build()
    }

    /// Dental treatment with a cosmetic add-on
    pub fn dental_with_whitening() -> ClaimRecord {
        ClaimBuilder::new()
            .with_diagnosis("tooth decay requiring root canal")
            .with_item("Root Canal", dec!(8000), "Dental")
            .with_item("Teeth Whitening", dec!(4000), "Cosmetic")
            .with_total(dec!(12000))
            .build()
    }

    /// Above the per-claim limit with no category sublimit
    pub fn over_per_claim_limit() -> ClaimRecord {
        ClaimBuilder::new()
            .with_diagnosis("Gastroenteritis")
            .with_item("Consultation Fee", dec!(2000), "Consultation")
            .with_item("Medicines", dec!(5500), "Pharmacy")
            .with_total(dec!(7500))
            .build()
    }

    /// Pharmacy-only bill with neither prescription nor diagnosis
    pub fn pharmacy_without_prescription() -> ClaimRecord {
        ClaimBuilder::new()
            .without_diagnosis()
            .with_documents(&["bill"])
            .with_item("Paracetamol", dec!(800), "Pharmacy")
            .with_item("Antibiotics", dec!(1200), "Pharmacy")
            .with_total(dec!(2000))
            .build()
    }

    /// Bill total above the high-value fraud threshold
    pub fn high_value() -> ClaimRecord {
        ClaimBuilder::new()
            .with_diagnosis("Viral fever")
            .with_total(dec!(60000))
            .build()
    }

    /// Treated before the policy became effective
    pub fn before_policy_start() -> ClaimRecord {
        ClaimBuilder::new()
            .with_treatment_date("2023-12-15")
            .with_diagnosis("Viral fever")
            .with_item("Consultation Fee", dec!(1000), "Consultation")
            .with_total(dec!(1000))
            .build()
    }

    /// Consultation at a network hospital
    pub fn network_consultation() -> ClaimRecord {
        let mut claim = ClaimBuilder::new()
            .with_diagnosis("Migraine")
            .with_item("Consultation Fee", dec!(2000), "Consultation")
            .with_total(dec!(2000))
            .build();
        claim.hospital = Some(Hospital {
            name: Some("Apollo Hospitals, Bangalore".to_string()),
            in_network: true,
            ..Default::default()
        });
        claim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_policy_loads() {
        let policy = PolicyFixtures::standard();
        assert_eq!(policy.name.as_deref(), Some("Group Health OPD"));
        assert_eq!(policy.sublimits.len(), 2);
    }

    #[test]
    fn test_fixture_totals() {
        assert_eq!(ClaimFixtures::simple_consultation().total_amount.amount(), dec!(1500));
        assert_eq!(ClaimFixtures::dental_with_whitening().items.len(), 2);
    }
}
