//! Policy domain errors
//!
//! Every variant here is a configuration fault: it is raised while loading
//! policy terms, before any claim is adjudicated against them.

use thiserror::Error;

use core_kernel::CoreError;

/// Errors that can occur while loading or validating policy terms
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Policy file could not be read
    #[error("Cannot read policy file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Policy document is not valid JSON or misses a required field
    #[error("Malformed policy document: {0}")]
    Parse(String),

    /// A field is present but its value is not acceptable
    #[error("Invalid policy field `{field}`: {reason}")]
    InvalidField {
        field: String,
        reason: String,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl PolicyError {
    /// Creates an invalid field error
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PolicyError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for PolicyError {
    fn from(err: serde_json::Error) -> Self {
        PolicyError::Parse(err.to_string())
    }
}
