//! Integration tests for the classifier server
//!
//! Tests the classification endpoint, health check and metrics.


use axum::body::Bytes;
use sagefin::core::http::serve_until_shutdown;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::common::{fixture_classifier, ConstantModel};
use test_utils::TestClassifierServer;

#[tokio::test]
async fn classify_returns_household_for_reference_row() {
    let app = TestClassifierServer::new();
    let response = app
        .server
        .post("/classify")
        .json(&json!([{"amount": 42.0, "merchant_code": 7}]))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Vec<String> = response.json();
    assert_eq!(body, vec!["Household".to_string()]);
}

#[tokio::test]
async fn classify_preserves_batch_order() {
    let app = TestClassifierServer::new();
    let response = app
        .server
        .post("/classify")
        .json(&json!([
            {"amount": 20.0, "merchant_code": 9},
            {"amount": 1500.0, "merchant_code": 3},
            {"amount": 20.0, "merchant_code": 3},
            {"amount": 20.0, "merchant_code": 20}
        ]))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Vec<String> = response.json();
    assert_eq!(body, vec!["Tourism", "Salary", "Food", "Transportation"]);
}

#[tokio::test]
async fn classify_accepts_columnar_payload() {
    let app = TestClassifierServer::new();
    let response = app
        .server
        .post("/classify")
        .json(&json!({"amount": [42.0, 12.0], "merchant_code": [7, 0]}))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Vec<String> = response.json();
    assert_eq!(body, vec!["Household", "Apparel"]);
}

#[tokio::test]
async fn classify_is_repeatable() {
    let app = TestClassifierServer::new();
    let payload = json!([{"amount": 5.0, "merchant_code": 2}, {"amount": 7.5, "merchant_code": 13}]);

    let first: Value = app.server.post("/classify").json(&payload).await.json();
    let second: Value = app.server.post("/classify").json(&payload).await.json();
    assert_eq!(first, second);
}

#[tokio::test]
async fn classify_rejects_schema_mismatch() {
    let app = TestClassifierServer::new();
    let response = app
        .server
        .post("/classify")
        .json(&json!([{"amount": 42.0, "merchant": 7}]))
        .await;
    assert_eq!(response.status_code(), 422);

    let body: Value = response.json();
    assert_eq!(body["error"], "schema_mismatch");
    assert!(body["message"].as_str().unwrap().contains("row 0"));
}

#[tokio::test]
async fn classify_names_unknown_field_with_string_value() {
    let app = TestClassifierServer::new();
    let response = app
        .server
        .post("/classify")
        .json(&json!([{"amount": 1.0, "merchant_code": 2, "note": "memo"}]))
        .await;
    assert_eq!(response.status_code(), 422);

    let body: Value = response.json();
    assert_eq!(body["error"], "schema_mismatch");
    assert_eq!(body["message"], "row 0 has unknown feature `note`");
}

#[tokio::test]
async fn classify_rejects_malformed_json() {
    let app = TestClassifierServer::new();
    let response = app
        .server
        .post("/classify")
        .bytes(Bytes::from_static(b"[{\"amount\": 42.0,"))
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn classify_reports_unmapped_class_as_server_error() {
    let app = TestClassifierServer::with_model(Arc::new(ConstantModel::new(9)));
    let response = app
        .server
        .post("/classify")
        .json(&json!([{"amount": 42.0, "merchant_code": 7}]))
        .await;
    assert_eq!(response.status_code(), 500);

    let body: Value = response.json();
    assert_eq!(body["error"], "unknown_category");
}

#[tokio::test]
async fn health_endpoint_describes_loaded_model() {
    let app = TestClassifierServer::new();
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "sagefin-classifier");
    assert_eq!(body["model"]["num_class"], 6);
    assert_eq!(body["model"]["features"], json!(["amount", "merchant_code"]));
}

#[tokio::test]
async fn metrics_endpoint_tracks_classifications() {
    let app = TestClassifierServer::new();
    let _ = app
        .server
        .post("/classify")
        .json(&json!([{"amount": 1.0, "merchant_code": 1}, {"amount": 2.0, "merchant_code": 2}]))
        .await;
    let _ = app.server.post("/classify").json(&json!("nope")).await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_request_duration_seconds"));
    assert!(body.contains("transactions_classified_total 2"));
    assert!(body.contains("classification_failures_total{kind=\"schema_mismatch\"} 1"));
    assert_eq!(app.metrics.transactions_classified_total.get(), 2);
}

#[tokio::test]
async fn server_fails_when_port_is_taken() {
    let taken = tokio::net::TcpListener::bind("0.0.0.0:0").await.unwrap();
    let port = taken.local_addr().unwrap().port();

    let result = serve_until_shutdown(
        port,
        Arc::new(fixture_classifier()),
        std::future::pending::<()>(),
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn server_stops_cleanly_on_shutdown() {
    let result = serve_until_shutdown(0, Arc::new(fixture_classifier()), async {}).await;
    assert!(result.is_ok());
}
