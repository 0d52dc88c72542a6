//! Known field-name table.

/// Destination attributes of a [`WebhookMessage`](super::WebhookMessage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageField {
    Recipient,
    Sender,
    Text,
    ReceiveDate,
    ExpiryDate,
    ContentType,
    MediaType,
    MessageId,
    EndUserName,
    ButtonReplyTitle,
    ButtonReplyId,
    ButtonPayload,
    Latitude,
    Longitude,
}

impl MessageField {
    /// Attribute name as it appears in the message's string form.
    pub fn name(self) -> &'static str {
        match self {
            MessageField::Recipient => "recipient",
            MessageField::Sender => "sender",
            MessageField::Text => "text",
            MessageField::ReceiveDate => "receive_date",
            MessageField::ExpiryDate => "expiry_date",
            MessageField::ContentType => "content_type",
            MessageField::MediaType => "media_type",
            MessageField::MessageId => "message_id",
            MessageField::EndUserName => "end_user_name",
            MessageField::ButtonReplyTitle => "button_reply_title",
            MessageField::ButtonReplyId => "button_reply_id",
            MessageField::ButtonPayload => "button_payload",
            MessageField::Latitude => "latitude",
            MessageField::Longitude => "longitude",
        }
    }
}

/// Destination field → source form key. Keys are matched exactly.
pub const KNOWN_FIELDS: &[(MessageField, &str)] = &[
    (MessageField::Recipient, "to"),
    (MessageField::Sender, "from"),
    (MessageField::Text, "text"),
    (MessageField::ReceiveDate, "ReceiveDate"),
    (MessageField::ExpiryDate, "ExpiryDate"),
    (MessageField::ContentType, "content_type"),
    (MessageField::MediaType, "media_type"),
    (MessageField::MessageId, "Message_ID"),
    (MessageField::EndUserName, "EndUserName"),
    (MessageField::ButtonReplyTitle, "BUTTON_REPLY_TITLE"),
    (MessageField::ButtonReplyId, "BUTTON_REPLY_ID"),
    (MessageField::ButtonPayload, "ButtonPayload"),
    (MessageField::Latitude, "latitude"),
    (MessageField::Longitude, "longitude"),
];
