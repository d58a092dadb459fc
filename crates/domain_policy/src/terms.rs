//! Policy terms
//!
//! `PolicyDocument` is the JSON shape the policy is configured in.
//! `PolicyTerms` is the validated, immutable form the adjudication engine
//! reads. Conversion between the two fails fast on missing or out-of-range
//! values so that no claim is ever judged against a half-configured policy.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{parse_date_str, CoreError, Money, Rate};
use crate::error::PolicyError;

/// Keywords used when a sublimit is configured as a bare amount
fn default_keywords(category: &str) -> Vec<String> {
    let words: &[&str] = match category {
        "dental" => &["dental", "tooth", "teeth", "root canal", "cavity", "gum"],
        "vision" => &["eye", "vision", "spectacle", "cataract"],
        _ => &[],
    };
    if words.is_empty() {
        vec![category.to_string()]
    } else {
        words.iter().map(|w| w.to_string()).collect()
    }
}

/// Policy configuration as written in the policy file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_join_date: Option<String>,
    pub per_claim_limit: Decimal,
    #[serde(default)]
    pub sublimits: BTreeMap<String, SublimitEntry>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub network_hospitals: Vec<String>,
    #[serde(default)]
    pub waiting_periods: BTreeMap<String, u32>,
    pub copay_percentage: Decimal,
    pub network_discount_percentage: Decimal,
    pub fraud_thresholds: FraudThresholdsDocument,
}

/// A category sublimit, either a bare amount or an amount with keywords
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SublimitEntry {
    Amount(Decimal),
    Detailed {
        limit: Decimal,
        #[serde(default)]
        keywords: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudThresholdsDocument {
    pub high_value_amount: Decimal,
    pub same_day_claims: u32,
}

/// A category-specific cap selected by diagnosis keywords
#[derive(Debug, Clone, PartialEq)]
pub struct SublimitRule {
    pub category: String,
    pub limit: Money,
    /// Lower-cased keywords matched against the diagnosis text
    pub keywords: Vec<String>,
}

impl SublimitRule {
    /// Returns true if the lower-cased diagnosis mentions any keyword
    pub fn matches(&self, diagnosis_lower: &str) -> bool {
        self.keywords.iter().any(|k| diagnosis_lower.contains(k.as_str()))
    }
}

/// Delay after enrollment before a condition becomes claimable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingPeriod {
    /// Lower-cased diagnosis keyword
    pub condition: String,
    pub days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FraudThresholds {
    /// Claims above this total go to manual review
    pub high_value_amount: Money,
    /// More same-day claims than this go to manual review
    pub same_day_claims: u32,
}

/// Validated, immutable policy terms
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyTerms {
    pub name: Option<String>,
    pub effective_date: Option<NaiveDate>,
    /// Baseline used when a member's join date is unknown
    pub default_join_date: Option<NaiveDate>,
    pub per_claim_limit: Money,
    /// Ordered by category name
    pub sublimits: Vec<SublimitRule>,
    /// Lower-cased exclusion terms
    pub exclusions: Vec<String>,
    pub network_hospitals: Vec<String>,
    /// Ordered by condition name
    pub waiting_periods: Vec<WaitingPeriod>,
    pub copay: Rate,
    pub network_discount: Rate,
    pub fraud: FraudThresholds,
}

impl PolicyTerms {
    /// Parses and validates policy terms from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, PolicyError> {
        let document: PolicyDocument = serde_json::from_str(json)?;
        Self::try_from(document)
    }

    /// Loads policy terms from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let terms = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            policy = terms.name.as_deref().unwrap_or("unnamed"),
            per_claim_limit = %terms.per_claim_limit,
            sublimits = terms.sublimits.len(),
            waiting_periods = terms.waiting_periods.len(),
            "Loaded policy terms"
        );
        Ok(terms)
    }

    /// Returns true if the hospital name contains a configured network hospital
    pub fn is_network_hospital(&self, hospital_name: &str) -> bool {
        let name = hospital_name.to_lowercase();
        self.network_hospitals
            .iter()
            .any(|h| !h.is_empty() && name.contains(&h.to_lowercase()))
    }

    /// Returns the first sublimit category whose keywords the diagnosis mentions
    pub fn sublimit_for(&self, diagnosis: &str) -> Option<&SublimitRule> {
        let diagnosis = diagnosis.to_lowercase();
        self.sublimits.iter().find(|rule| rule.matches(&diagnosis))
    }

    /// Returns every waiting period whose condition the diagnosis mentions
    pub fn waiting_periods_for<'a>(&'a self, diagnosis: &str) -> Vec<&'a WaitingPeriod> {
        let diagnosis = diagnosis.to_lowercase();
        self.waiting_periods
            .iter()
            .filter(|wp| diagnosis.contains(wp.condition.as_str()))
            .collect()
    }

    /// Converts back into the configuration document shape
    pub fn to_document(&self) -> PolicyDocument {
        PolicyDocument {
            policy_name: self.name.clone(),
            effective_date: self.effective_date.map(|d| d.format("%Y-%m-%d").to_string()),
            default_join_date: self.default_join_date.map(|d| d.format("%Y-%m-%d").to_string()),
            per_claim_limit: self.per_claim_limit.amount(),
            sublimits: self
                .sublimits
                .iter()
                .map(|rule| {
                    (
                        rule.category.clone(),
                        SublimitEntry::Detailed {
                            limit: rule.limit.amount(),
                            keywords: rule.keywords.clone(),
                        },
                    )
                })
                .collect(),
            exclusions: self.exclusions.clone(),
            network_hospitals: self.network_hospitals.clone(),
            waiting_periods: self
                .waiting_periods
                .iter()
                .map(|wp| (wp.condition.clone(), wp.days))
                .collect(),
            copay_percentage: self.copay.as_percentage().normalize(),
            network_discount_percentage: self.network_discount.as_percentage().normalize(),
            fraud_thresholds: FraudThresholdsDocument {
                high_value_amount: self.fraud.high_value_amount.amount(),
                same_day_claims: self.fraud.same_day_claims,
            },
        }
    }
}

impl TryFrom<PolicyDocument> for PolicyTerms {
    type Error = PolicyError;

    fn try_from(doc: PolicyDocument) -> Result<Self, Self::Error> {
        let effective_date = parse_optional_date("effective_date", doc.effective_date.as_deref())?;
        let default_join_date =
            parse_optional_date("default_join_date", doc.default_join_date.as_deref())?;

        let per_claim_limit = non_negative("per_claim_limit", doc.per_claim_limit)?;

        let mut sublimits = Vec::with_capacity(doc.sublimits.len());
        for (category, entry) in doc.sublimits {
            let category = category.trim().to_lowercase();
            let field = format!("sublimits.{}", category);
            let (limit, keywords) = match entry {
                SublimitEntry::Amount(limit) => (limit, default_keywords(&category)),
                SublimitEntry::Detailed { limit, keywords } if keywords.is_empty() => {
                    (limit, default_keywords(&category))
                }
                SublimitEntry::Detailed { limit, keywords } => (limit, keywords),
            };
            sublimits.push(SublimitRule {
                limit: non_negative(&field, limit)?,
                keywords: normalize_terms(keywords),
                category,
            });
        }
        sublimits.sort_by(|a, b| a.category.cmp(&b.category));

        let waiting_periods = doc
            .waiting_periods
            .into_iter()
            .map(|(condition, days)| WaitingPeriod {
                condition: condition.trim().to_lowercase(),
                days,
            })
            .filter(|wp| !wp.condition.is_empty())
            .collect();

        let copay = rate("copay_percentage", doc.copay_percentage)?;
        let network_discount = rate("network_discount_percentage", doc.network_discount_percentage)?;

        let fraud = FraudThresholds {
            high_value_amount: non_negative(
                "fraud_thresholds.high_value_amount",
                doc.fraud_thresholds.high_value_amount,
            )?,
            same_day_claims: doc.fraud_thresholds.same_day_claims,
        };

        Ok(Self {
            name: doc.policy_name,
            effective_date,
            default_join_date,
            per_claim_limit,
            sublimits,
            exclusions: normalize_terms(doc.exclusions),
            network_hospitals: doc
                .network_hospitals
                .into_iter()
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .collect(),
            waiting_periods,
            copay,
            network_discount,
            fraud,
        })
    }
}

fn parse_optional_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, PolicyError> {
    match raw {
        None => Ok(None),
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) => parse_date_str(text)
            .map(Some)
            .ok_or_else(|| CoreError::invalid_date(format!("{} = {:?}", field, text)).into()),
    }
}

fn non_negative(field: &str, value: Decimal) -> Result<Money, PolicyError> {
    if value < dec!(0) {
        return Err(PolicyError::invalid_field(field, format!("must not be negative, got {}", value)));
    }
    Ok(Money::new(value))
}

fn rate(field: &str, percentage: Decimal) -> Result<Rate, PolicyError> {
    Rate::from_percentage(percentage).map_err(|e| PolicyError::invalid_field(field, e.to_string()))
}

fn normalize_terms(terms: Vec<String>) -> Vec<String> {
    terms
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
