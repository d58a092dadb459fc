//! Claim record
//!
//! The structured claim produced by the extraction step or submitted
//! directly by a caller. Known fields are typed; anything else is kept in
//! `extensions` and passed through untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use core_kernel::{Money, RawDate};

/// Extraction confidence assumed when the extractor reports none
pub const DEFAULT_EXTRACTION_CONFIDENCE: f64 = 0.9;

/// Known line-item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    Consultation,
    Pharmacy,
    Diagnostic,
    Dental,
    Vision,
    Alternative,
    Cosmetic,
    General,
    Other,
}

impl ItemCategory {
    /// Maps a free-text category onto the known vocabulary
    pub fn classify(raw: &str) -> Self {
        let raw = raw.trim().to_lowercase();
        if raw.contains("alternative") || raw.contains("ayurved") || raw.contains("homeopath") {
            ItemCategory::Alternative
        } else if raw.contains("consult") {
            ItemCategory::Consultation
        } else if raw.contains("pharma") || raw.contains("medicine") {
            ItemCategory::Pharmacy
        } else if raw.contains("diagnos") || raw.contains("lab") || raw.contains("test") {
            ItemCategory::Diagnostic
        } else if raw.contains("dental") {
            ItemCategory::Dental
        } else if raw.contains("vision") || raw.contains("optical") {
            ItemCategory::Vision
        } else if raw.contains("cosmetic") {
            ItemCategory::Cosmetic
        } else if raw == "general" {
            ItemCategory::General
        } else {
            ItemCategory::Other
        }
    }
}

/// A billed line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: Money,
    /// Category as extracted; not guaranteed to be normalized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl LineItem {
    pub fn new(name: impl Into<String>, amount: Money, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            category: Some(category.into()),
        }
    }

    /// Normalized category
    pub fn category_kind(&self) -> ItemCategory {
        self.category
            .as_deref()
            .map(ItemCategory::classify)
            .unwrap_or(ItemCategory::Other)
    }
}

/// A supporting document attached to the claim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportingDocument {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_reg: Option<String>,
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl SupportingDocument {
    pub fn of_type(doc_type: impl Into<String>) -> Self {
        Self {
            doc_type: Some(doc_type.into()),
            ..Default::default()
        }
    }

    pub fn is_type(&self, expected: &str) -> bool {
        self.doc_type
            .as_deref()
            .is_some_and(|t| t.trim().eq_ignore_ascii_case(expected))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<RawDate>,
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Advisory only; network membership is re-derived from policy terms
    #[serde(default)]
    pub in_network: bool,
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

/// A claim submitted for adjudication
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_date: Option<RawDate>,
    #[serde(default)]
    pub total_amount: Money,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub documents: Vec<SupportingDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<Hospital>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    /// Registration number printed outside any specific document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_reg: Option<String>,
    #[serde(default)]
    pub prev_claims_same_day: u32,
    #[serde(
        default,
        alias = "_extraction_conf",
        skip_serializing_if = "Option::is_none"
    )]
    pub extraction_confidence: Option<f64>,
    /// Fields the engine does not interpret
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl ClaimRecord {
    /// Diagnosis text, empty when absent
    pub fn diagnosis_text(&self) -> &str {
        self.diagnosis.as_deref().map(str::trim).unwrap_or("")
    }

    pub fn has_diagnosis(&self) -> bool {
        !self.diagnosis_text().is_empty()
    }

    pub fn hospital_name(&self) -> Option<&str> {
        self.hospital.as_ref().and_then(|h| h.name.as_deref())
    }

    /// Extraction confidence clamped to [0, 1], with the default applied
    pub fn extraction_confidence(&self) -> f64 {
        self.extraction_confidence
            .filter(|c| c.is_finite())
            .unwrap_or(DEFAULT_EXTRACTION_CONFIDENCE)
            .clamp(0.0, 1.0)
    }

    /// Every doctor registration number on the claim, top-level first
    pub fn doctor_registrations(&self) -> impl Iterator<Item = &str> {
        self.doctor_reg
            .as_deref()
            .into_iter()
            .chain(self.documents.iter().filter_map(|d| d.doctor_reg.as_deref()))
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }

    /// Returns true if the claim carries neither items nor a positive total
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && !self.total_amount.is_positive()
    }
}
