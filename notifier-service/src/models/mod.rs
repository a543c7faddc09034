pub mod notifier;

pub use notifier::{Envelope, Notifier, ResponseRecord};
