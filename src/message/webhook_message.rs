//! Typed notification record.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::fields::{MessageField, KNOWN_FIELDS};
use super::MappingError;

/// A messaging-platform notification.
///
/// Every attribute is the raw string from the source form, or `None` when the
/// key was missing. Nothing is parsed; coordinates stay strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookMessage {
    pub recipient: Option<String>,
    pub sender: Option<String>,
    pub text: Option<String>,
    pub receive_date: Option<String>,
    pub expiry_date: Option<String>,
    pub content_type: Option<String>,
    pub media_type: Option<String>,
    pub message_id: Option<String>,
    pub end_user_name: Option<String>,
    pub button_reply_title: Option<String>,
    pub button_reply_id: Option<String>,
    pub button_payload: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl WebhookMessage {
    /// Map live form fields.
    pub fn from_form(form: &BTreeMap<String, String>) -> Self {
        Self::extract(|key| form.get(key).cloned())
    }

    /// Map the `data_received.form` block of an acknowledgment envelope.
    ///
    /// Missing `data_received` or `form` levels give an all-absent message.
    pub fn from_envelope(envelope: &Value) -> Result<Self, MappingError> {
        let envelope = envelope
            .as_object()
            .ok_or_else(|| MappingError::NotAnObject(json_kind(envelope)))?;

        let form = envelope
            .get("data_received")
            .and_then(|received| received.get("form"))
            .and_then(Value::as_object);

        Ok(Self::extract(|key| {
            form.and_then(|fields| fields.get(key)).and_then(scalar_text)
        }))
    }

    /// Decode a JSON envelope string and map it. Decode failures propagate.
    pub fn from_envelope_str(envelope: &str) -> Result<Self, MappingError> {
        let value: Value = serde_json::from_str(envelope)?;
        Self::from_envelope(&value)
    }

    pub fn get(&self, field: MessageField) -> Option<&str> {
        let slot = match field {
            MessageField::Recipient => &self.recipient,
            MessageField::Sender => &self.sender,
            MessageField::Text => &self.text,
            MessageField::ReceiveDate => &self.receive_date,
            MessageField::ExpiryDate => &self.expiry_date,
            MessageField::ContentType => &self.content_type,
            MessageField::MediaType => &self.media_type,
            MessageField::MessageId => &self.message_id,
            MessageField::EndUserName => &self.end_user_name,
            MessageField::ButtonReplyTitle => &self.button_reply_title,
            MessageField::ButtonReplyId => &self.button_reply_id,
            MessageField::ButtonPayload => &self.button_payload,
            MessageField::Latitude => &self.latitude,
            MessageField::Longitude => &self.longitude,
        };
        slot.as_deref()
    }

    fn slot_mut(&mut self, field: MessageField) -> &mut Option<String> {
        match field {
            MessageField::Recipient => &mut self.recipient,
            MessageField::Sender => &mut self.sender,
            MessageField::Text => &mut self.text,
            MessageField::ReceiveDate => &mut self.receive_date,
            MessageField::ExpiryDate => &mut self.expiry_date,
            MessageField::ContentType => &mut self.content_type,
            MessageField::MediaType => &mut self.media_type,
            MessageField::MessageId => &mut self.message_id,
            MessageField::EndUserName => &mut self.end_user_name,
            MessageField::ButtonReplyTitle => &mut self.button_reply_title,
            MessageField::ButtonReplyId => &mut self.button_reply_id,
            MessageField::ButtonPayload => &mut self.button_payload,
            MessageField::Latitude => &mut self.latitude,
            MessageField::Longitude => &mut self.longitude,
        }
    }

    fn extract(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut message = Self::default();
        for (field, key) in KNOWN_FIELDS {
            *message.slot_mut(*field) = lookup(key);
        }
        message
    }
}

/// Strings verbatim, numbers and booleans as their JSON text, anything else absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(_) | Value::Bool(_) => Some(value.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Display for WebhookMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WebhookMessage(")?;
        for (i, (field, _)) in KNOWN_FIELDS.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", field.name(), self.get(*field).unwrap_or("None"))?;
        }
        write!(f, ")")
    }
}
