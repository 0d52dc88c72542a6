//! Content-type dispatch.
//!
//! # Responsibilities
//! - Read the request body within the configured limit
//! - Interpret it according to [`BodyKind`]
//! - Capture uploaded files before the stream is gone
//! - Collect query parameters
//!
//! # Design Decisions
//! - Every parse step has an explicit fallback value instead of an error
//! - Only upload storage failures leave this module as errors

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::content_type::BodyKind;
use super::filename::sanitize_filename;
use super::form::{parse_form, parse_query};
use super::normalized::{NormalizedRequest, RequestBody};
use crate::storage::{StorageError, UploadStore};

/// Turns inbound requests into [`NormalizedRequest`]s.
#[derive(Clone)]
pub struct Normalizer {
    uploads: Arc<dyn UploadStore>,
    max_body_bytes: usize,
}

impl Normalizer {
    pub fn new(uploads: Arc<dyn UploadStore>, max_body_bytes: usize) -> Self {
        Self {
            uploads,
            max_body_bytes,
        }
    }

    /// Normalize a request, consuming its body.
    ///
    /// Malformed bodies never fail; the only error is a failed upload write.
    pub async fn normalize(&self, request: Request) -> Result<NormalizedRequest, StorageError> {
        let kind = BodyKind::detect(request.headers());
        let query = request.uri().query().map(str::to_owned);

        let mut normalized = match kind {
            BodyKind::Json => {
                let bytes = self.read_body(request).await;
                NormalizedRequest::new(RequestBody::Json(parse_json(&bytes)))
            }
            BodyKind::Form => {
                let bytes = self.read_body(request).await;
                NormalizedRequest::new(RequestBody::Form(parse_form(&bytes)))
            }
            BodyKind::Multipart => self.read_multipart(request).await?,
            BodyKind::Other => {
                let bytes = self.read_body(request).await;
                NormalizedRequest::new(parse_raw(&bytes))
            }
        };

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            normalized.query_params = parse_query(&query);
        }

        Ok(normalized)
    }

    async fn read_body(&self, request: Request) -> Bytes {
        match axum::body::to_bytes(request.into_body(), self.max_body_bytes).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(error = %err, limit = self.max_body_bytes, "Unreadable request body, treating as empty");
                Bytes::new()
            }
        }
    }

    async fn read_multipart(&self, request: Request) -> Result<NormalizedRequest, StorageError> {
        let mut normalized = NormalizedRequest::new(RequestBody::Form(BTreeMap::new()));
        let mut fields = BTreeMap::new();

        let mut multipart = match Multipart::from_request(request, &()).await {
            Ok(multipart) => multipart,
            Err(rejection) => {
                warn!(error = %rejection, "Invalid multipart request, no fields parsed");
                return Ok(normalized);
            }
        };

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(err) => {
                    warn!(error = %err, "Malformed multipart stream, keeping parsed fields");
                    break;
                }
            };

            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_owned) {
                None => match field.text().await {
                    Ok(value) => {
                        fields.insert(name, value);
                    }
                    Err(err) => warn!(field = %name, error = %err, "Skipping unreadable form field"),
                },
                Some(original) if original.is_empty() => {
                    debug!(field = %name, "Skipping file part without a filename");
                }
                Some(original) => {
                    let bytes = match field.bytes().await {
                        Ok(bytes) => bytes,
                        Err(err) => {
                            warn!(field = %name, error = %err, "Skipping unreadable file part");
                            continue;
                        }
                    };
                    let stored = self.store_upload(&original, bytes).await?;
                    debug!(field = %name, original = %original, stored = %stored, "Saved uploaded file");
                    normalized.push_file(name, stored);
                }
            }
        }

        normalized.body = RequestBody::Form(fields);
        Ok(normalized)
    }

    /// The single filesystem side effect of normalization.
    async fn store_upload(&self, original: &str, bytes: Bytes) -> Result<String, StorageError> {
        let sanitized = sanitize_filename(original);
        let uploads = Arc::clone(&self.uploads);
        tokio::task::spawn_blocking(move || uploads.store(&sanitized, &bytes)).await?
    }
}

/// JSON body, or `{}` when empty, malformed or `null`.
fn parse_json(bytes: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Null) => Value::Object(Map::new()),
        Ok(value) => value,
        Err(err) => {
            if !bytes.is_empty() {
                warn!(error = %err, "Malformed JSON body, substituting empty object");
            }
            Value::Object(Map::new())
        }
    }
}

/// Raw text body; invalid UTF-8 becomes `""`, an empty body is absent.
fn parse_raw(bytes: &[u8]) -> RequestBody {
    if bytes.is_empty() {
        return RequestBody::Absent;
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => RequestBody::Raw(text.to_string()),
        Err(err) => {
            warn!(error = %err, "Body is not valid UTF-8, substituting empty text");
            RequestBody::Raw(String::new())
        }
    }
}
