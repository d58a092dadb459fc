//! Supporting-document checks
//!
//! Rules:
//! - a claim needs at least one document or one line item
//! - pharmacy items need a prescription document, or a diagnosis in its place
//! - every doctor registration number present must be well formed

use once_cell::sync::Lazy;
use regex::Regex;

use crate::claim::{ClaimRecord, ItemCategory};
use crate::reason::{ReasonCode, Reasons};

/// State code, optional council sub-code, serial, year: `KA/45678/2015`, `AYUR/KL/2345/2019`
static DOCTOR_REG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{2,10}[/\-]?(?:[A-Z]{2,3}[/\-]?)?[0-9]{1,6}[/\-]?[0-9]{4}$")
        .expect("doctor registration pattern is valid")
});

const PRESCRIPTION: &str = "prescription";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentOutcome {
    pub ok: bool,
    pub flags: Reasons,
}

pub struct DocumentValidator;

impl DocumentValidator {
    pub fn check(claim: &ClaimRecord) -> DocumentOutcome {
        let mut flags = Reasons::new();

        if claim.documents.is_empty() && claim.items.is_empty() {
            flags.insert(ReasonCode::MissingDocuments);
        }

        let needs_prescription = claim
            .items
            .iter()
            .any(|item| item.category_kind() == ItemCategory::Pharmacy);
        let has_prescription = claim.documents.iter().any(|d| d.is_type(PRESCRIPTION));
        if needs_prescription && !has_prescription && !claim.has_diagnosis() {
            flags.insert(ReasonCode::MissingDocuments);
        }

        if let Some(bad) = claim
            .doctor_registrations()
            .find(|reg| !is_valid_doctor_reg(reg))
        {
            tracing::debug!(registration_len = bad.len(), "Doctor registration failed format check");
            flags.insert(ReasonCode::DoctorRegInvalid);
        }

        DocumentOutcome {
            ok: flags.is_empty(),
            flags,
        }
    }
}

/// Checks a registration number against the accepted format
pub fn is_valid_doctor_reg(reg: &str) -> bool {
    DOCTOR_REG_PATTERN.is_match(reg.trim())
}
