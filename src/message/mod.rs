//! Messaging-platform notification mapping.
//!
//! Maps the form fields of a WhatsApp-style notification (either straight
//! from a normalized request or from a stored acknowledgment envelope) onto a
//! typed [`WebhookMessage`].

pub mod fields;
pub mod webhook_message;

use thiserror::Error;

pub use fields::{MessageField, KNOWN_FIELDS};
pub use webhook_message::WebhookMessage;

/// Errors from explicit envelope conversion.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The envelope string is not valid JSON.
    #[error("invalid envelope JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The envelope decoded to something other than a JSON object.
    #[error("envelope must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}
