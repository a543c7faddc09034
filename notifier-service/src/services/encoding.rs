use crate::services::error::PayloadError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a rendered payload is turned into response text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseEncoding {
    /// Full JSON document.
    #[default]
    Json,
    /// Discards the value and yields an empty body.
    Empty,
}

impl ResponseEncoding {
    pub fn content_type(&self) -> &'static str {
        match self {
            ResponseEncoding::Json => "application/json",
            ResponseEncoding::Empty => "text/plain; charset=utf-8",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseEncoding::Json => "json",
            ResponseEncoding::Empty => "empty",
        }
    }
}

impl fmt::Display for ResponseEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ResponseEncoding::Json),
            "empty" => Ok(ResponseEncoding::Empty),
            other => Err(format!(
                "unknown response encoding '{}', expected 'json' or 'empty'",
                other
            )),
        }
    }
}

pub fn encode<T: Serialize>(value: &T, encoding: ResponseEncoding) -> Result<String, PayloadError> {
    match encoding {
        ResponseEncoding::Json => Ok(serde_json::to_string(value)?),
        ResponseEncoding::Empty => Ok(String::new()),
    }
}
