//! Route handlers.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::http::response::{WebhookAck, WebhookError};
use crate::http::server::AppState;
use crate::ingest::content_type::content_type;
use crate::message::WebhookMessage;
use crate::observability::metrics;
use crate::storage::StorageError;

const HOME_PAGE: &str = "\
<h1>Webhook Server is Running</h1>
<p>Send POST requests to /webhook endpoint</p>
";

pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET|POST|PUT /webhook`.
pub async fn webhook(State(state): State<AppState>, request: Request) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();

    let response = match receive(&state, request).await {
        Ok(ack) => ack.into_response(),
        Err(err) => {
            tracing::error!(method = %method, error = %err, "Error processing webhook");
            err.into_response()
        }
    };

    metrics::record_webhook(&method, response.status().as_u16(), start);
    response
}

async fn receive(state: &AppState, request: Request) -> Result<WebhookAck, WebhookError> {
    let method = request.method().to_string();
    let content_type = content_type(request.headers()).to_string();
    let headers = header_map(request.headers());
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::info!(
        method = %method,
        peer = %peer,
        content_type = %content_type,
        "Received webhook"
    );

    let data = state.normalizer.normalize(request).await?;
    if !data.files_saved.is_empty() {
        metrics::record_files_saved(data.files_saved.len());
    }

    let webhook_message = data
        .body
        .form()
        .map(|form| WebhookMessage::from_form(form).to_string());

    let sink = Arc::clone(&state.sink);
    let record = data.clone();
    let request_type = method.clone();
    let saved_filename =
        tokio::task::spawn_blocking(move || sink.save(&request_type, &headers, &record))
            .await
            .map_err(StorageError::from)??;

    tracing::info!(
        method = %method,
        saved_filename = %saved_filename,
        files_saved = data.files_saved.len(),
        "Webhook persisted"
    );

    Ok(WebhookAck::new(
        method,
        content_type,
        data,
        saved_filename,
        webhook_message,
    ))
}

/// Request headers as a flat map; repeated headers are joined with `", "`
/// and values that are not visible ASCII are skipped.
pub fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        map.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    map
}
