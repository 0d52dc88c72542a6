//! Response envelopes.
//!
//! # Responsibilities
//! - Success acknowledgment echoed back to the webhook caller
//! - Map processing failures to HTTP 500 with a JSON body
//!
//! # Design Decisions
//! - Callers always get JSON; `status` and the HTTP code carry the outcome
//! - Only the error's message text is exposed, never a backtrace

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::ingest::NormalizedRequest;
use crate::storage::StorageError;

pub const SUCCESS_MESSAGE: &str = "Webhook data received successfully";

/// Body of a successful `/webhook` call.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
    pub message: &'static str,
    pub request_method: String,
    pub content_type: String,
    pub data_received: NormalizedRequest,
    pub files_saved: Vec<String>,
    pub saved_filename: String,
    /// String form of the mapped notification; only for form bodies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_message: Option<String>,
}

impl WebhookAck {
    pub fn new(
        request_method: String,
        content_type: String,
        data_received: NormalizedRequest,
        saved_filename: String,
        webhook_message: Option<String>,
    ) -> Self {
        let files_saved = data_received.files_saved.clone();
        Self {
            status: "success",
            message: SUCCESS_MESSAGE,
            request_method,
            content_type,
            data_received,
            files_saved,
            saved_filename,
            webhook_message,
        }
    }
}

impl IntoResponse for WebhookAck {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Failures that abort a webhook call.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Writing an upload or the record failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let body = json!({
            "status": "error",
            "message": format!("Error processing webhook: {}", self),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
