//! Document DTOs

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FingerprintResponse {
    pub status: &'static str,
    pub fingerprint: String,
    pub is_duplicate: bool,
}
