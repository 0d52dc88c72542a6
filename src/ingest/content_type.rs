//! Content-Type detection.

use axum::http::{header, HeaderMap};

/// How an inbound body is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `application/json`
    Json,
    /// `application/x-www-form-urlencoded`
    Form,
    /// `multipart/form-data`
    Multipart,
    /// Anything else, kept as raw text.
    Other,
}

/// Substring patterns checked in order; the first hit wins.
const DISPATCH_TABLE: &[(&str, BodyKind)] = &[
    ("application/json", BodyKind::Json),
    ("application/x-www-form-urlencoded", BodyKind::Form),
    ("multipart/form-data", BodyKind::Multipart),
];

impl BodyKind {
    /// Classify a raw Content-Type value (case-insensitive substring match).
    pub fn from_content_type(content_type: &str) -> Self {
        let lowered = content_type.to_ascii_lowercase();
        DISPATCH_TABLE
            .iter()
            .find(|(pattern, _)| lowered.contains(pattern))
            .map(|(_, kind)| *kind)
            .unwrap_or(BodyKind::Other)
    }

    /// Classify the request's `Content-Type` header. Missing or non-ASCII
    /// headers count as [`BodyKind::Other`].
    pub fn detect(headers: &HeaderMap) -> Self {
        Self::from_content_type(content_type(headers))
    }
}

/// The declared content type, or `""` when absent or unreadable.
pub fn content_type(headers: &HeaderMap) -> &str {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
