use crate::models::{Envelope, Notifier};
use crate::services::error::PayloadError;
use chrono::Utc;
use rand::{rngs::OsRng, RngCore};

/// Build a notifier stamped with the current time and a random display color.
pub fn generate_notifier(id: &str, message: &str) -> Result<Notifier, PayloadError> {
    Ok(Notifier {
        id: id.to_string(),
        message: message.to_string(),
        timestamp: Utc::now().timestamp(),
        color: random_color()?,
    })
}

/// Random RGB color rendered as `#rrggbb`.
pub fn random_color() -> Result<String, PayloadError> {
    let mut rgb = [0u8; 3];
    OsRng
        .try_fill_bytes(&mut rgb)
        .map_err(PayloadError::ColorSource)?;
    Ok(format!("#{}", hex::encode(rgb)))
}

pub fn generate_envelope(title: &str, notifiers: Vec<Notifier>) -> Envelope {
    Envelope {
        title: title.to_string(),
        notifiers,
    }
}
