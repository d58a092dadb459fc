//! Core Kernel - Foundational types for the claims adjudicator
//!
//! This crate provides the building blocks shared by the policy and claims
//! domains:
//! - Money and percentage rates with precise decimal arithmetic
//! - Date normalization for heterogeneous date inputs
//! - Identifiers and the port infrastructure for external collaborators

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, Rate, MoneyError};
pub use temporal::{RawDate, normalize_date, parse_date_str};
pub use identifiers::ClaimId;
pub use ports::{PortError, DomainPort};
pub use error::CoreError;
