//! Claims domain errors

use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur in the claims domain
///
/// Rule outcomes are never errors; they are reported as reason codes on the
/// result. An error here means no consistent decision could be derived.
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Adjudication failed: {reason}")]
    AdjudicationFailed { reason: String },
}

impl ClaimError {
    pub fn adjudication_failed(reason: impl Into<String>) -> Self {
        ClaimError::AdjudicationFailed {
            reason: reason.into(),
        }
    }
}

impl From<MoneyError> for ClaimError {
    fn from(err: MoneyError) -> Self {
        ClaimError::adjudication_failed(err.to_string())
    }
}
