//! Ports for external collaborators
//!
//! The adjudication engine is a pure function; everything that talks to the
//! outside world (duplicate detection against prior claims, narrative
//! generation) sits behind a port trait defined in the owning domain and
//! implemented by an adapter.
//!
//! ```text
//!   Transport ──► Port trait (domain) ◄── Adapter (in-process, external API)
//! ```
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait Narrator: DomainPort {
//!     async fn narrate(&self, claim: &ClaimRecord, result: &AdjudicationResult)
//!         -> Result<Narrative, PortError>;
//! }
//! ```

use thiserror::Error;

/// Error type for port operations
///
/// Callers treat a validation failure as the caller's fault and anything else
/// as the adapter's.
#[derive(Debug, Error)]
pub enum PortError {
    /// The input was rejected by the adapter
    #[error("Validation error: {message}")]
    Validation {
        message: String,
    },

    /// The adapter failed internally
    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl PortError {
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker so adapters can be shared across
/// request handlers.
pub trait DomainPort: Send + Sync + 'static {}
