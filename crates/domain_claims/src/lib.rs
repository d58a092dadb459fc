//! Claims Adjudication Domain
//!
//! This crate decides whether a claim is approved, partially approved,
//! rejected or referred for manual review, and how much is paid.
//!
//! # Pipeline
//!
//! ```text
//! ClaimRecord ─► Eligibility ─► Documents ─► Coverage ─► Fraud ─► Decision ─► Confidence
//! ```
//!
//! Every stage reads the same immutable [`PolicyTerms`](domain_policy::PolicyTerms)
//! snapshot. Rule outcomes accumulate as [`ReasonCode`]s; only a coverage
//! computation that cannot complete is reported as a [`ClaimError`].
//!
//! ```rust,ignore
//! let policy = PolicyTerms::from_file("data/policy_terms.json")?;
//! let result = Adjudicator::new(&policy).adjudicate(&claim)?;
//! println!("{} {}", result.decision, result.approved_amount);
//! ```

pub mod claim;
pub mod reason;
pub mod ledger;
pub mod eligibility;
pub mod documents;
pub mod coverage;
pub mod fraud;
pub mod confidence;
pub mod decision;
pub mod adjudication;
pub mod redaction;
pub mod collaborators;
pub mod error;

pub use claim::{ClaimRecord, Hospital, ItemCategory, LineItem, Member, SupportingDocument};
pub use reason::{ReasonCode, Reasons};
pub use ledger::{EntryKind, Ledger, LedgerEntry};
pub use eligibility::{EligibilityChecker, EligibilityOutcome};
pub use documents::{is_valid_doctor_reg, DocumentOutcome, DocumentValidator};
pub use coverage::{CoverageCalculator, CoverageOutcome};
pub use fraud::{FraudOutcome, FraudScreener};
pub use confidence::{ConfidenceBreakdown, ConfidenceScorer};
pub use decision::{Decision, DecisionResolver, Resolution, StageChecks};
pub use adjudication::{adjudicate, AdjudicationResult, Adjudicator};
pub use redaction::{redact, redacted_view};
pub use collaborators::{
    DuplicateDetector, DuplicateVerdict, InMemoryDuplicateRegistry, Narrative, Narrator,
    TemplateNarrator,
};
pub use error::ClaimError;
