use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "notifier-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
