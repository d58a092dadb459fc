//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims adjudication test suite.
//!
//! # Modules
//!
//! - `fixtures`: The standard policy and claims with known outcomes
//! - `builders`: Builder patterns for test claim construction
//! - `assertions`: Custom assertion helpers for adjudication results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
