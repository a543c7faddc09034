use crate::services::{record_payload, PayloadError};
use crate::startup::AppState;
use axum::{extract::State, http::header, response::IntoResponse};
use service_core::error::AppError;

/// Serve a freshly generated notifier payload.
///
/// Registered for every method. Key generation is CPU-bound, so the whole
/// pipeline runs on the blocking pool.
pub async fn serve_data(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let factory = state.payloads.clone();
    let encoding = factory.encoding();

    let result = match tokio::task::spawn_blocking(move || factory.render()).await {
        Ok(rendered) => rendered,
        Err(e) => Err(PayloadError::from(e)),
    };

    match result {
        Ok(rendered) => {
            record_payload(encoding.as_str(), "ok");
            tracing::info!(
                encoding = %encoding,
                body_len = rendered.body.len(),
                "Served notifier payload"
            );
            Ok(([(header::CONTENT_TYPE, rendered.content_type)], rendered.body))
        }
        Err(e) => {
            record_payload(encoding.as_str(), "error");
            tracing::error!(error = ?e, "Failed to generate notifier payload");
            Err(e.into())
        }
    }
}
