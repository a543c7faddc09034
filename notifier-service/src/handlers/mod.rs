//! HTTP handlers for notifier-service.

pub mod data;
pub mod health;
pub mod metrics;

pub use data::serve_data;
pub use health::health_check;
pub use metrics::metrics_endpoint;
