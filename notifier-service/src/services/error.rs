use service_core::error::AppError;
use thiserror::Error;

/// Failures of the per-request payload pipeline.
///
/// Each variant fails only the request that produced it.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("random source unavailable")]
    ColorSource(#[source] rand::Error),

    #[error("RSA key generation failed")]
    KeyGeneration(#[source] rsa::Error),

    #[error("invalid certificate request subject '{subject}'")]
    Subject {
        subject: String,
        #[source]
        source: der::Error,
    },

    #[error("certificate request construction failed")]
    CertificateRequest(#[from] x509_cert::builder::Error),

    #[error("certificate request encoding failed")]
    Encoding(#[source] der::Error),

    #[error("signing failed")]
    Signing(#[from] rsa::signature::Error),

    #[error("serialization failed")]
    Serialization(#[from] serde_json::Error),

    #[error("payload task failed")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl From<PayloadError> for AppError {
    fn from(err: PayloadError) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}
