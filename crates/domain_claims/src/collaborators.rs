//! Collaborator ports
//!
//! The engine never calls out. Callers consult these ports around it:
//! duplicate detection before adjudication, narration after.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use core_kernel::{DomainPort, PortError};

use crate::adjudication::AdjudicationResult;
use crate::claim::ClaimRecord;
use crate::decision::Decision;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateVerdict {
    pub is_duplicate: bool,
    pub fingerprint: String,
}

/// Detects documents already submitted on an earlier claim
#[async_trait]
pub trait DuplicateDetector: DomainPort {
    /// Stable fingerprint of the document bytes
    fn fingerprint(&self, document: &[u8]) -> String;

    /// Returns true if the fingerprint was already registered
    async fn is_known(&self, fingerprint: &str) -> Result<bool, PortError>;

    /// Checks a fingerprint against prior submissions and remembers it
    async fn check_and_register(&self, fingerprint: &str) -> Result<DuplicateVerdict, PortError>;
}

/// Fingerprints kept by a default registry before the oldest are evicted
pub const DEFAULT_REGISTRY_CAPACITY: usize = 100_000;

/// Process-local registry keyed by SHA-256 of the document bytes
///
/// Exact-match only; a re-encoded image of the same bill is not caught.
/// Lives as long as the process and holds at most `capacity` fingerprints,
/// forgetting the oldest first.
#[derive(Debug)]
pub struct InMemoryDuplicateRegistry {
    capacity: usize,
    seen: Mutex<SeenSet>,
}

#[derive(Debug, Default)]
struct SeenSet {
    members: HashSet<String>,
    order: VecDeque<String>,
}

impl InMemoryDuplicateRegistry {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_REGISTRY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            seen: Mutex::new(SeenSet::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.seen.lock().map(|s| s.members.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryDuplicateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainPort for InMemoryDuplicateRegistry {}

#[async_trait]
impl DuplicateDetector for InMemoryDuplicateRegistry {
    fn fingerprint(&self, document: &[u8]) -> String {
        hex::encode(Sha256::digest(document))
    }

    async fn is_known(&self, fingerprint: &str) -> Result<bool, PortError> {
        let seen = self
            .seen
            .lock()
            .map_err(|_| PortError::internal("duplicate registry lock poisoned"))?;
        Ok(seen.members.contains(fingerprint.trim()))
    }

    async fn check_and_register(&self, fingerprint: &str) -> Result<DuplicateVerdict, PortError> {
        let fingerprint = fingerprint.trim();
        if fingerprint.is_empty() {
            return Err(PortError::validation("fingerprint is empty"));
        }

        let mut seen = self
            .seen
            .lock()
            .map_err(|_| PortError::internal("duplicate registry lock poisoned"))?;
        let is_duplicate = seen.members.contains(fingerprint);

        if is_duplicate {
            tracing::info!(fingerprint = %fingerprint, "Duplicate document detected");
        } else {
            if seen.order.len() >= self.capacity {
                if let Some(oldest) = seen.order.pop_front() {
                    seen.members.remove(&oldest);
                }
            }
            seen.members.insert(fingerprint.to_string());
            seen.order.push_back(fingerprint.to_string());
        }

        Ok(DuplicateVerdict {
            is_duplicate,
            fingerprint: fingerprint.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub summary: String,
    pub medical_context: String,
}

/// Produces human-readable text for a decided claim
#[async_trait]
pub trait Narrator: DomainPort {
    async fn narrate(
        &self,
        claim: &ClaimRecord,
        result: &AdjudicationResult,
    ) -> Result<Narrative, PortError>;
}

/// Deterministic narrator; also the fallback when a remote narrator fails
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    pub fn render(claim: &ClaimRecord, result: &AdjudicationResult) -> Narrative {
        let reasons = if result.reasons.is_empty() {
            "no issues found".to_string()
        } else {
            result
                .reasons
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let summary = match result.decision {
            Decision::Approved => format!(
                "Claim approved for {} of {} claimed ({}).",
                result.approved_amount, result.claimed_amount, reasons
            ),
            Decision::Partial => format!(
                "Claim partially approved for {} of {} claimed ({}).",
                result.approved_amount, result.claimed_amount, reasons
            ),
            Decision::Rejected => format!("Claim rejected ({}).", reasons),
            Decision::ManualReview => format!("Claim referred for manual review ({}).", reasons),
        };

        let medical_context = if claim.has_diagnosis() {
            format!("Diagnosis on record: {}.", claim.diagnosis_text())
        } else {
            "No diagnosis on record.".to_string()
        };

        Narrative {
            summary,
            medical_context,
        }
    }
}

impl DomainPort for TemplateNarrator {}

#[async_trait]
impl Narrator for TemplateNarrator {
    async fn narrate(
        &self,
        claim: &ClaimRecord,
        result: &AdjudicationResult,
    ) -> Result<Narrative, PortError> {
        Ok(Self::render(claim, result))
    }
}
