//! Redaction of member-identifying data before it reaches the logs

use serde_json::{Map, Value};

use crate::claim::ClaimRecord;

pub const REDACTED: &str = "***REDACTED***";

/// Keys whose values are never logged, at any depth
pub const SENSITIVE_KEYS: [&str; 6] = ["member_id", "name", "patient_name", "phone", "email", "aadhaar"];

/// Returns a copy of `value` with every sensitive key masked
pub fn redact(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, v)| {
                    let masked = if is_sensitive(key) {
                        Value::String(REDACTED.to_string())
                    } else {
                        redact(v)
                    };
                    (key.clone(), masked)
                })
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

/// The claim as it may appear in logs
pub fn redacted_view(claim: &ClaimRecord) -> Value {
    match serde_json::to_value(claim) {
        Ok(value) => redact(&value),
        Err(e) => {
            tracing::warn!(error = %e, "Claim could not be serialized for logging");
            Value::Null
        }
    }
}

fn is_sensitive(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_keys_are_masked() {
        let value = json!({
            "member": { "member_id": "EMP001", "join_date": "2024-01-01" },
            "patient_name": "Rajesh Kumar",
            "contacts": [{ "phone": "9876543210", "Email": "r@example.com" }],
            "total_amount": 1500
        });

        let redacted = redact(&value);
        assert_eq!(redacted["member"]["member_id"], REDACTED);
        assert_eq!(redacted["member"]["join_date"], "2024-01-01");
        assert_eq!(redacted["patient_name"], REDACTED);
        assert_eq!(redacted["contacts"][0]["phone"], REDACTED);
        assert_eq!(redacted["contacts"][0]["Email"], REDACTED);
        assert_eq!(redacted["total_amount"], 1500);
    }

    #[test]
    fn test_claim_view_masks_extensions() {
        let claim: ClaimRecord = serde_json::from_value(json!({
            "total_amount": 500,
            "aadhaar": "1234-5678-9012",
            "member": { "member_id": "EMP002" }
        }))
        .unwrap();

        let view = redacted_view(&claim);
        assert_eq!(view["aadhaar"], REDACTED);
        assert_eq!(view["member"]["member_id"], REDACTED);
        assert!(!view.to_string().contains("EMP002"));
    }
}
