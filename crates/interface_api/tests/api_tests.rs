//! HTTP API tests

use std::path::PathBuf;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use domain_policy::PolicyStore;
use interface_api::{config::ApiConfig, create_router, AppState};
use test_utils::PolicyFixtures;

fn server_with_policy_file(policy_file: &str) -> TestServer {
    let config = ApiConfig {
        policy_file: policy_file.to_string(),
        ..ApiConfig::default()
    };
    let state = AppState::new(config, PolicyStore::new(PolicyFixtures::standard()));
    TestServer::new(create_router(state)).unwrap()
}

fn server() -> TestServer {
    server_with_policy_file("does-not-exist.json")
}

fn temp_policy_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{}-{}.json", name, std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

fn consultation_claim() -> Value {
    json!({
        "treatment_date": "2024-11-01",
        "total_amount": 1500,
        "items": [
            { "name": "Consultation Fee", "amount": 1000, "category": "Consultation" },
            { "name": "Blood Test", "amount": 500, "category": "Diagnostic" }
        ],
        "documents": [{ "type": "prescription", "doctor_reg": "KA/45678/2015" }],
        "member": { "member_id": "EMP001", "join_date": "2024-01-01" },
        "hospital": { "name": "City Care Clinic" },
        "diagnosis": "Viral fever"
    })
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_and_readiness() {
        let server = server();

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "healthy");

        let response = server.get("/health/ready").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["policy"], "Group Health OPD");
    }
}

mod claims {
    use super::*;

    #[tokio::test]
    async fn test_submit_returns_decision_and_narrative() {
        let server = server();

        let response = server
            .post("/api/v1/claims/submit")
            .json(&json!({ "claim": consultation_claim() }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert!(body["claim_id"].as_str().unwrap().starts_with("CLM-"));
        assert_eq!(body["decision"]["decision"], "APPROVED");
        assert_eq!(body["decision"]["approved_amount"], 1350.0);
        assert!(body["narrative"]["summary"].as_str().unwrap().contains("approved"));
    }

    #[tokio::test]
    async fn test_empty_claim_is_invalid_payload() {
        let server = server();

        let response = server
            .post("/api/v1/claims/submit")
            .json(&json!({ "claim": { "diagnosis": "Viral fever" } }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"]["code"], "INVALID_PAYLOAD");
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_payload() {
        let server = server();

        let response = server
            .post("/api/v1/claims/submit")
            .json(&json!({ "claim": { "total_amount": "lots" } }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"]["code"], "INVALID_PAYLOAD");
    }

    #[tokio::test]
    async fn test_negative_amount_is_adjudication_failure() {
        let server = server();
        let mut claim = consultation_claim();
        claim["items"][1]["amount"] = json!(-500);

        let response = server
            .post("/api/v1/claims/submit")
            .json(&json!({ "claim": claim }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<Value>()["error"]["code"], "ADJUDICATION_FAILED");
    }

    #[tokio::test]
    async fn test_repeated_document_goes_to_manual_review() {
        let server = server();

        let fingerprint = server
            .post("/api/v1/documents/fingerprint")
            .bytes("scanned bill".into())
            .await
            .json::<Value>()["fingerprint"]
            .as_str()
            .unwrap()
            .to_string();

        let submit = || {
            server
                .post("/api/v1/claims/submit")
                .json(&json!({ "claim": consultation_claim(), "document_fingerprint": fingerprint }))
        };

        let first: Value = submit().await.json();
        assert_eq!(first["decision"]["decision"], "APPROVED");

        let second: Value = submit().await.json();
        assert_eq!(second["decision"]["decision"], "MANUAL_REVIEW");
        assert_eq!(second["decision"]["reasons"], json!(["DUPLICATE_IMAGE_DETECTED"]));
        assert_eq!(second["decision"]["approved_amount"], 0.0);
    }

    #[tokio::test]
    async fn test_failed_submission_does_not_claim_document() {
        let server = server();
        let mut broken = consultation_claim();
        broken["items"][1]["amount"] = json!(-500);

        let response = server
            .post("/api/v1/claims/submit")
            .json(&json!({ "claim": broken, "document_fingerprint": "abc123" }))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let retry: Value = server
            .post("/api/v1/claims/submit")
            .json(&json!({ "claim": consultation_claim(), "document_fingerprint": "abc123" }))
            .await
            .json();
        assert_eq!(retry["decision"]["decision"], "APPROVED");
        assert_eq!(retry["decision"]["reasons"], json!([]));
    }
}

mod documents {
    use super::*;

    #[tokio::test]
    async fn test_fingerprint_is_stable_and_read_only() {
        let server = server();

        let first: Value = server
            .post("/api/v1/documents/fingerprint")
            .bytes("page-1".into())
            .await
            .json();
        let second: Value = server
            .post("/api/v1/documents/fingerprint")
            .bytes("page-1".into())
            .await
            .json();

        assert_eq!(first["fingerprint"], second["fingerprint"]);
        assert_eq!(first["fingerprint"].as_str().unwrap().len(), 64);
        assert_eq!(second["is_duplicate"], false);
    }

    #[tokio::test]
    async fn test_empty_document_is_rejected() {
        let server = server();

        let response = server
            .post("/api/v1/documents/fingerprint")
            .bytes(axum::body::Bytes::new())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

mod policy {
    use super::*;

    #[tokio::test]
    async fn test_get_policy() {
        let server = server();

        let response = server.get("/api/v1/policy").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["policy"]["per_claim_limit"], 5000.0);
        assert_eq!(body["policy"]["fraud_thresholds"]["same_day_claims"], 2);
    }

    #[tokio::test]
    async fn test_reload_swaps_terms() {
        let mut updated = PolicyFixtures::standard_value();
        updated["per_claim_limit"] = json!(8000);
        let path = temp_policy_file("reload-ok", &updated.to_string());
        let server = server_with_policy_file(path.to_str().unwrap());

        let response = server.post("/api/v1/policy/reload").await;
        response.assert_status_ok();

        let body: Value = server.get("/api/v1/policy").await.json();
        assert_eq!(body["policy"]["per_claim_limit"], 8000.0);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_current_terms() {
        let path = temp_policy_file("reload-bad", r#"{ "per_claim_limit": 1000 }"#);
        let server = server_with_policy_file(path.to_str().unwrap());

        let response = server.post("/api/v1/policy/reload").await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<Value>()["error"]["code"], "POLICY_RELOAD_FAILED");

        let body: Value = server.get("/api/v1/policy").await.json();
        assert_eq!(body["policy"]["per_claim_limit"], 5000.0);

        std::fs::remove_file(path).ok();
    }
}

#[tokio::test]
async fn test_unknown_route_uses_error_shape() {
    let server = server();

    let response = server.get("/api/v1/claims/unknown").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "NOT_FOUND");
}
