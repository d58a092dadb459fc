//! Policy Terms Domain
//!
//! This crate owns the policy configuration the adjudication engine reads:
//! coverage limits, category sublimits, exclusions, network hospitals,
//! waiting periods, copay and discount rates, and fraud thresholds.
//!
//! Terms are loaded once, validated up front and then shared read-only.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::PolicyStore;
//!
//! let store = PolicyStore::load("data/policy_terms.json")?;
//! let terms = store.current();
//! assert!(terms.is_network_hospital("Apollo Hospitals"));
//! ```

pub mod terms;
pub mod store;
pub mod error;

pub use terms::{
    PolicyTerms, PolicyDocument, SublimitEntry, SublimitRule, WaitingPeriod,
    FraudThresholds, FraudThresholdsDocument,
};
pub use store::PolicyStore;
pub use error::PolicyError;
