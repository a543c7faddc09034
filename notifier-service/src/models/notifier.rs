use serde::{Deserialize, Serialize};

/// A single fabricated notification record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notifier {
    pub id: String,
    pub message: String,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    /// Display color as `#rrggbb`.
    pub color: String,
}

/// A titled collection of notifiers, in construction order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope {
    pub title: String,
    #[serde(rename = "notifier")]
    pub notifiers: Vec<Notifier>,
}

/// The body served on `/data`.
///
/// `signature` is computed over a throwaway certificate request and does not
/// cover `data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseRecord {
    pub data: Envelope,
    pub signature: String,
}
