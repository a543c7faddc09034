pub mod encoding;
pub mod error;
pub mod metrics;
pub mod notifier;
pub mod payload;
pub mod signing;

pub use encoding::{encode, ResponseEncoding};
pub use error::PayloadError;
pub use metrics::{get_metrics, init_metrics, record_payload};
pub use notifier::{generate_envelope, generate_notifier, random_color};
pub use payload::{PayloadFactory, RenderedPayload};
pub use signing::{sign_request, CsrSigner, SignedRequest};
