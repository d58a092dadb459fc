//! Shared access to the active policy terms
//!
//! Adjudications read an `Arc<PolicyTerms>` snapshot and keep it for the
//! whole computation. A reload validates the new terms first and then swaps
//! the pointer, so no adjudication ever sees a partially updated policy.

use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::error::PolicyError;
use crate::terms::PolicyTerms;

/// Process-wide holder of the current policy snapshot
#[derive(Debug, Clone)]
pub struct PolicyStore {
    current: Arc<RwLock<Arc<PolicyTerms>>>,
}

impl PolicyStore {
    /// Creates a store holding the given terms
    pub fn new(terms: PolicyTerms) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(terms))),
        }
    }

    /// Loads the initial snapshot from a policy file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        Ok(Self::new(PolicyTerms::from_file(path)?))
    }

    /// Returns the current snapshot
    pub fn current(&self) -> Arc<PolicyTerms> {
        // The guarded value is a pointer that is only ever replaced whole,
        // so a poisoned lock still holds a consistent snapshot.
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Swaps in new terms and returns the previous snapshot
    pub fn replace(&self, terms: PolicyTerms) -> Arc<PolicyTerms> {
        let next = Arc::new(terms);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, next)
    }

    /// Re-reads a policy file; on failure the current snapshot stays active
    pub fn reload(&self, path: impl AsRef<Path>) -> Result<Arc<PolicyTerms>, PolicyError> {
        let terms = PolicyTerms::from_file(path.as_ref()).map_err(|e| {
            tracing::warn!(error = %e, "Policy reload rejected, keeping current terms");
            e
        })?;
        self.replace(terms);
        Ok(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn terms(limit: u32) -> PolicyTerms {
        PolicyTerms::from_json_str(&format!(
            r#"{{
                "per_claim_limit": {},
                "copay_percentage": 0,
                "network_discount_percentage": 0,
                "fraud_thresholds": {{ "high_value_amount": 50000, "same_day_claims": 2 }}
            }}"#,
            limit
        ))
        .unwrap()
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let store = PolicyStore::new(terms(5000));
        let snapshot = store.current();

        let previous = store.replace(terms(7000));

        assert_eq!(snapshot.per_claim_limit.amount(), dec!(5000));
        assert_eq!(previous.per_claim_limit.amount(), dec!(5000));
        assert_eq!(store.current().per_claim_limit.amount(), dec!(7000));
    }

    #[test]
    fn test_failed_reload_keeps_current() {
        let store = PolicyStore::new(terms(5000));

        let result = store.reload("/nonexistent/policy_terms.json");

        assert!(matches!(result, Err(PolicyError::Io { .. })));
        assert_eq!(store.current().per_claim_limit.amount(), dec!(5000));
    }

    #[test]
    fn test_clones_share_snapshot() {
        let store = PolicyStore::new(terms(5000));
        let clone = store.clone();

        clone.replace(terms(9000));

        assert_eq!(store.current().per_claim_limit.amount(), dec!(9000));
    }
}
