use crate::services::encoding::ResponseEncoding;
use crate::services::signing::{DEFAULT_KEY_BITS, DEFAULT_SUBJECT, MAX_KEY_BITS, MIN_KEY_BITS};
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifierConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub payload: PayloadConfig,
    pub signing: SigningConfig,
    pub response: ResponseConfig,
}

/// Inputs for the fabricated notifier and its envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct PayloadConfig {
    pub title: String,
    pub identifier: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SigningConfig {
    pub key_bits: usize,
    /// Distinguished name of the throwaway certificate request, e.g. `CN=Notifier`.
    pub subject: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseConfig {
    pub encoding: ResponseEncoding,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            title: "Secure Data Visualization".to_string(),
            identifier: "1".to_string(),
            message: "New Data Available".to_string(),
        }
    }
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            key_bits: DEFAULT_KEY_BITS,
            subject: DEFAULT_SUBJECT.to_string(),
        }
    }
}

impl NotifierConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let payload_defaults = PayloadConfig::default();

        let key_bits = parse_key_bits(&get_env(
            "SIGNING_KEY_BITS",
            &DEFAULT_KEY_BITS.to_string(),
        ))?;

        let encoding = get_env("RESPONSE_ENCODING", ResponseEncoding::Json.as_str())
            .parse::<ResponseEncoding>()
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        Ok(NotifierConfig {
            common: common_config,
            payload: PayloadConfig {
                title: get_env("PAYLOAD_TITLE", &payload_defaults.title),
                identifier: get_env("PAYLOAD_IDENTIFIER", &payload_defaults.identifier),
                message: get_env("PAYLOAD_MESSAGE", &payload_defaults.message),
            },
            signing: SigningConfig {
                key_bits,
                subject: get_env("SIGNING_SUBJECT", DEFAULT_SUBJECT),
            },
            response: ResponseConfig { encoding },
        })
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_key_bits(raw: &str) -> Result<usize, AppError> {
    let bits: usize = raw.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "SIGNING_KEY_BITS must be an integer, got '{}': {}",
            raw,
            e
        ))
    })?;

    if !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&bits) {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "SIGNING_KEY_BITS must be between {} and {}, got {}",
            MIN_KEY_BITS,
            MAX_KEY_BITS,
            bits
        )));
    }

    Ok(bits)
}
