mod common;

use common::{is_lower_hex, TestApp};
use notifier_service::models::ResponseRecord;
use notifier_service::services::ResponseEncoding;
use reqwest::Client;

// =============================================================================
// Health Check
// =============================================================================

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "notifier-service");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.headers()["x-request-id"], "trace-me");
}

// =============================================================================
// Data
// =============================================================================

#[tokio::test]
async fn data_returns_signed_record() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let started = chrono::Utc::now().timestamp();
    let response = client
        .get(format!("{}/data", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(response.headers()["content-type"], "application/json");

    let record: ResponseRecord = response.json().await.expect("Failed to parse response");
    assert_eq!(record.data.title, "Secure Data Visualization");
    assert_eq!(record.data.notifiers.len(), 1);

    let notifier = &record.data.notifiers[0];
    assert_eq!(notifier.id, "1");
    assert_eq!(notifier.message, "New Data Available");
    assert!((notifier.timestamp - started).abs() <= 30);
    assert_eq!(notifier.color.len(), 7);
    assert!(notifier.color.starts_with('#'));
    assert!(is_lower_hex(&notifier.color[1..]));

    assert_eq!(record.signature.len(), 512);
    assert!(is_lower_hex(&record.signature));
}

#[tokio::test]
async fn data_accepts_post() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/data", app.address))
        .body("ignored")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn consecutive_requests_are_independent() {
    let app = TestApp::spawn().await;
    let client = Client::new();
    let url = format!("{}/data", app.address);

    let first: ResponseRecord = client
        .get(&url)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let second: ResponseRecord = client
        .get(&url)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(first.data.title, second.data.title);
    assert_ne!(first.signature, second.signature);
}

#[tokio::test]
async fn empty_encoding_serves_empty_body() {
    let app = TestApp::spawn_with(ResponseEncoding::Empty).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/data", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    let body = response.text().await.expect("Failed to read body");
    assert!(body.is_empty());
}

// =============================================================================
// Metrics
// =============================================================================

#[tokio::test]
async fn metrics_endpoint_reports_served_payloads() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let data = client
        .get(format!("{}/data", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(data.status().is_success());

    let response = client
        .get(format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains(r#"notifier_payloads_total{encoding="json",outcome="ok"}"#));
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_request_duration_seconds"));
}
