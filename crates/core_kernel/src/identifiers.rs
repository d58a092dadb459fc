//! Claim identifiers
//!
//! Assigned by the transport layer when a claim is received. The adjudication
//! engine never generates them, which keeps it deterministic.

use std::fmt;

use uuid::Uuid;

/// Time-ordered claim identifier, displayed as `CLM-<uuid>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimId(Uuid);

impl ClaimId {
    pub const PREFIX: &'static str = "CLM";

    pub fn new_v7() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Self::PREFIX, self.0)
    }
}
