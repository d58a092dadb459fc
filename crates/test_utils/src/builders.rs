//! Test Data Builders
//!
//! Provides builder patterns for constructing claims with sensible defaults.
//! A default claim is clean against the standard policy: treated after the
//! policy start, member enrolled on the start date, out of network, with a
//! prescription carrying a valid doctor registration and a bill.

use core_kernel::{Money, RawDate};
use domain_claims::{ClaimRecord, Hospital, LineItem, Member, SupportingDocument};
use rust_decimal::Decimal;

/// Registration number that passes the format check
pub const VALID_DOCTOR_REG: &str = "KA/45678/2015";

/// Builder for constructing test claims
#[derive(Debug, Clone)]
pub struct ClaimBuilder {
    treatment_date: Option<RawDate>,
    total_amount: Option<Decimal>,
    items: Vec<LineItem>,
    documents: Vec<SupportingDocument>,
    member_id: String,
    join_date: Option<RawDate>,
    hospital_name: Option<String>,
    diagnosis: Option<String>,
    doctor_reg: Option<String>,
    prev_claims_same_day: u32,
    extraction_confidence: Option<f64>,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            treatment_date: Some(RawDate::from("2024-11-01")),
            total_amount: None,
            items: Vec::new(),
            documents: vec![
                SupportingDocument {
                    doctor_reg: Some(VALID_DOCTOR_REG.to_string()),
                    ..SupportingDocument::of_type("prescription")
                },
                SupportingDocument::of_type("bill"),
            ],
            member_id: "EMP001".to_string(),
            join_date: Some(RawDate::from("2024-01-01")),
            hospital_name: Some("City Care Clinic".to_string()),
            diagnosis: None,
            doctor_reg: None,
            prev_claims_same_day: 0,
            extraction_confidence: None,
        }
    }

    /// Sets the treatment date from any accepted representation
    pub fn with_treatment_date(mut self, date: impl Into<RawDate>) -> Self {
        self.treatment_date = Some(date.into());
        self
    }

    pub fn without_treatment_date(mut self) -> Self {
        self.treatment_date = None;
        self
    }

    /// Sets the bill total; defaults to the sum of the items
    pub fn with_total(mut self, total: Decimal) -> Self {
        self.total_amount = Some(total);
        self
    }

    /// Adds a line item
    pub fn with_item(mut self, name: &str, amount: Decimal, category: &str) -> Self {
        self.items.push(LineItem::new(name, Money::new(amount), category));
        self
    }

    /// Replaces the documents with plain documents of the given types
    pub fn with_documents(mut self, types: &[&str]) -> Self {
        self.documents = types.iter().map(|t| SupportingDocument::of_type(*t)).collect();
        self
    }

    pub fn without_documents(mut self) -> Self {
        self.documents.clear();
        self
    }

    pub fn with_join_date(mut self, date: impl Into<RawDate>) -> Self {
        self.join_date = Some(date.into());
        self
    }

    pub fn without_join_date(mut self) -> Self {
        self.join_date = None;
        self
    }

    pub fn with_hospital(mut self, name: impl Into<String>) -> Self {
        self.hospital_name = Some(name.into());
        self
    }

    pub fn with_diagnosis(mut self, diagnosis: impl Into<String>) -> Self {
        self.diagnosis = Some(diagnosis.into());
        self
    }

    pub fn without_diagnosis(mut self) -> Self {
        self.diagnosis = None;
        self
    }

    /// Sets the top-level doctor registration
    pub fn with_doctor_reg(mut self, reg: impl Into<String>) -> Self {
        self.doctor_reg = Some(reg.into());
        self
    }

    pub fn with_prev_claims_same_day(mut self, count: u32) -> Self {
        self.prev_claims_same_day = count;
        self
    }

    pub fn with_extraction_confidence(mut self, confidence: f64) -> Self {
        self.extraction_confidence = Some(confidence);
        self
    }

    /// Builds the claim
    pub fn build(self) -> ClaimRecord {
        let total = self
            .total_amount
            .unwrap_or_else(|| self.items.iter().map(|i| i.amount.amount()).sum());

        ClaimRecord {
            treatment_date: self.treatment_date,
            total_amount: Money::new(total),
            items: self.items,
            documents: self.documents,
            member: Some(Member {
                member_id: Some(self.member_id),
                join_date: self.join_date,
                ..Default::default()
            }),
            hospital: self.hospital_name.map(|name| Hospital {
                name: Some(name),
                ..Default::default()
            }),
            diagnosis: self.diagnosis,
            doctor_reg: self.doctor_reg,
            prev_claims_same_day: self.prev_claims_same_day,
            extraction_confidence: self.extraction_confidence,
            extensions: Default::default(),
        }
    }
}
