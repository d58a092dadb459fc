//! Policy DTOs

use serde::Serialize;

use domain_policy::PolicyDocument;

#[derive(Debug, Serialize)]
pub struct PolicyResponse {
    pub status: &'static str,
    pub policy: PolicyDocument,
}
