use crate::config::NotifierConfig;
use crate::models::ResponseRecord;
use crate::services::encoding::{encode, ResponseEncoding};
use crate::services::error::PayloadError;
use crate::services::notifier::{generate_envelope, generate_notifier};
use crate::services::signing::CsrSigner;

/// Response text plus the content type it should be served with.
#[derive(Debug, Clone)]
pub struct RenderedPayload {
    pub body: String,
    pub content_type: &'static str,
}

/// Assembles a fresh [`ResponseRecord`] on every call. Holds no per-request
/// state.
#[derive(Debug, Clone)]
pub struct PayloadFactory {
    title: String,
    identifier: String,
    message: String,
    signer: CsrSigner,
    encoding: ResponseEncoding,
}

impl PayloadFactory {
    pub fn new(
        title: impl Into<String>,
        identifier: impl Into<String>,
        message: impl Into<String>,
        signer: CsrSigner,
        encoding: ResponseEncoding,
    ) -> Self {
        Self {
            title: title.into(),
            identifier: identifier.into(),
            message: message.into(),
            signer,
            encoding,
        }
    }

    pub fn from_config(config: &NotifierConfig) -> Result<Self, PayloadError> {
        let signer = CsrSigner::new(config.signing.key_bits, &config.signing.subject)?;

        Ok(Self::new(
            config.payload.title.clone(),
            config.payload.identifier.clone(),
            config.payload.message.clone(),
            signer,
            config.response.encoding,
        ))
    }

    pub fn encoding(&self) -> ResponseEncoding {
        self.encoding
    }

    pub fn generate_data_model(&self) -> Result<ResponseRecord, PayloadError> {
        let notifier = generate_notifier(&self.identifier, &self.message)?;
        let data = generate_envelope(&self.title, vec![notifier]);
        let signature = self.signer.sign()?;

        Ok(ResponseRecord { data, signature })
    }

    pub fn render(&self) -> Result<RenderedPayload, PayloadError> {
        let record = self.generate_data_model()?;

        Ok(RenderedPayload {
            body: encode(&record, self.encoding)?,
            content_type: self.encoding.content_type(),
        })
    }
}
