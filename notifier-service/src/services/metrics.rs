//! Metrics collection for notifier-service.
//!
//! HTTP request metrics come from the shared middleware through the `metrics`
//! facade; payload outcomes are tracked in a dedicated Prometheus registry.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{IntCounterVec, Opts, Registry};
use std::sync::{Mutex, OnceLock};

static INIT_LOCK: Mutex<()> = Mutex::new(());

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static NOTIFIER_PAYLOADS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize metrics collection. Calling it again is a no-op.
pub fn init_metrics() -> Result<(), anyhow::Error> {
    let _guard = INIT_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;
    let _ = METRICS_HANDLE.set(handle);

    let registry = Registry::new();

    let payloads_counter = IntCounterVec::new(
        Opts::new(
            "notifier_payloads_total",
            "Total payloads generated by response encoding and outcome",
        ),
        &["encoding", "outcome"],
    )
    .map_err(|e| anyhow::anyhow!("Failed to create notifier_payloads_total metric: {}", e))?;

    registry
        .register(Box::new(payloads_counter.clone()))
        .map_err(|e| anyhow::anyhow!("Failed to register notifier_payloads_total: {}", e))?;

    let _ = PROMETHEUS_REGISTRY.set(registry);
    let _ = NOTIFIER_PAYLOADS_TOTAL.set(payloads_counter);

    Ok(())
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = PROMETHEUS_REGISTRY.get() {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).ok();
        if let Ok(custom_metrics) = String::from_utf8(buffer) {
            output.push_str(&custom_metrics);
        }
    }

    output
}

/// Record the outcome of one payload generation.
pub fn record_payload(encoding: &str, outcome: &str) {
    if let Some(counter) = NOTIFIER_PAYLOADS_TOTAL.get() {
        counter.with_label_values(&[encoding, outcome]).inc();
    }
}
