//! In-process tests for the `/webhook` endpoint.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use webhook_receiver::http::{AppState, HttpServer};
use webhook_receiver::ingest::NormalizedRequest;
use webhook_receiver::storage::{LocalUploadStore, RecordSink, StorageError};

mod common;

use common::{multipart_body, multipart_content_type, record_count, send, test_config, Part};

fn post(uri: &str, content_type: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn test_json_body_is_echoed() {
    let root = tempfile::tempdir().unwrap();
    let config = test_config(root.path());
    let uploads = config.storage.upload_dir.clone();
    let router = HttpServer::new(config).router();

    let payload = json!({"event": "message", "nested": {"ids": [1, 2, 3]}, "ok": true});
    let (status, body) = send(
        router,
        post("/webhook", "application/json", payload.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Webhook data received successfully");
    assert_eq!(body["request_method"], "POST");
    assert_eq!(body["content_type"], "application/json");
    assert_eq!(body["data_received"], json!({"json": payload}));
    assert_eq!(body["files_saved"], json!([]));
    assert!(body.get("webhook_message").is_none());

    let saved = body["saved_filename"].as_str().unwrap();
    let record: Value =
        serde_json::from_slice(&std::fs::read(uploads.join(saved)).unwrap()).unwrap();
    assert_eq!(record["request_type"], "POST");
    assert_eq!(record["headers"]["content-type"], "application/json");
    assert_eq!(record["data"], json!({"json": payload}));
}

#[tokio::test]
async fn test_invalid_json_still_succeeds() {
    let root = tempfile::tempdir().unwrap();
    let router = HttpServer::new(test_config(root.path())).router();

    let (status, body) = send(
        router,
        post("/webhook", "application/json; charset=utf-8", "{\"broken\": "),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data_received"], json!({"json": {}}));
}

#[tokio::test]
async fn test_form_body_maps_message() {
    let root = tempfile::tempdir().unwrap();
    let router = HttpServer::new(test_config(root.path())).router();

    let form = "to=917065017600&from=917483396805&text=first&text=hello+kruthi\
                &Message_ID=wamid.ABC&EndUserName=Karthik+K+C";
    let (status, body) = send(
        router,
        post("/webhook", "application/x-www-form-urlencoded", form),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data_received"]["form"],
        json!({
            "to": "917065017600",
            "from": "917483396805",
            "text": "hello kruthi",
            "Message_ID": "wamid.ABC",
            "EndUserName": "Karthik K C"
        })
    );

    let message = body["webhook_message"].as_str().unwrap();
    assert!(message.contains("recipient=917065017600"));
    assert!(message.contains("sender=917483396805"));
    assert!(message.contains("text=hello kruthi"));
    assert!(message.contains("message_id=wamid.ABC"));
    assert!(message.contains("latitude=None"));
}

#[tokio::test]
async fn test_multipart_sanitizes_and_skips_empty_filenames() {
    let root = tempfile::tempdir().unwrap();
    let config = test_config(root.path());
    let uploads = config.storage.upload_dir.clone();
    let router = HttpServer::new(config).router();

    let body = multipart_body(&[
        Part::Field { name: "to", value: "917065017600" },
        Part::File { name: "doc", filename: "../../etc/passwd", content: b"not really" },
        Part::File { name: "blank", filename: "", content: b"ignored" },
    ]);
    let (status, body) = send(
        router,
        post("/webhook", &multipart_content_type(), body),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["files_saved"], json!(["etc_passwd"]));
    assert_eq!(body["data_received"]["files"], json!({"doc": "etc_passwd"}));
    assert_eq!(body["data_received"]["form"], json!({"to": "917065017600"}));

    let stored = uploads.join("etc_passwd");
    assert!(stored.starts_with(&uploads));
    assert_eq!(std::fs::read(&stored).unwrap(), b"not really");
    assert!(!root.path().join("etc").exists());
}

#[tokio::test]
async fn test_get_without_body() {
    let root = tempfile::tempdir().unwrap();
    let router = HttpServer::new(test_config(root.path())).router();

    let request = Request::builder()
        .uri("/webhook")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request_method"], "GET");
    assert_eq!(body["content_type"], "");
    assert_eq!(body["data_received"], json!({}));
    assert_eq!(body["files_saved"], json!([]));
}

#[tokio::test]
async fn test_raw_body_and_query_params() {
    let root = tempfile::tempdir().unwrap();
    let router = HttpServer::new(test_config(root.path())).router();

    let request = Request::builder()
        .method("PUT")
        .uri("/webhook?source=crm&source=erp&id=7")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("plain payload"))
        .unwrap();
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request_method"], "PUT");
    assert_eq!(
        body["data_received"],
        json!({"raw": "plain payload", "query_params": {"source": "erp", "id": "7"}})
    );
}

#[tokio::test]
async fn test_sequential_posts_keep_every_record() {
    let root = tempfile::tempdir().unwrap();
    let config = test_config(root.path());
    let uploads = config.storage.upload_dir.clone();
    let router = HttpServer::new(config).router();

    let (_, first) = send(router.clone(), post("/webhook", "application/json", "{\"n\":1}")).await;
    let (_, second) = send(router, post("/webhook", "application/json", "{\"n\":2}")).await;

    assert_ne!(first["saved_filename"], second["saved_filename"]);
    assert_eq!(record_count(&uploads), 2);
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let root = tempfile::tempdir().unwrap();
    let router = HttpServer::new(test_config(root.path())).router();

    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("x-request-id", "abc-123")
        .body(Body::from("x"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(router, request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}

#[tokio::test]
async fn test_other_methods_rejected() {
    let root = tempfile::tempdir().unwrap();
    let router = HttpServer::new(test_config(root.path())).router();

    let request = Request::builder()
        .method("DELETE")
        .uri("/webhook")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(router, request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_home_and_health() {
    let root = tempfile::tempdir().unwrap();
    let router = HttpServer::new(test_config(root.path())).router();

    let response = tower::ServiceExt::oneshot(
        router.clone(),
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&html).contains("Webhook Server is Running"));

    let (status, body) = send(
        router,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

/// Sink that always fails, as a full disk would.
struct FailingSink;

impl RecordSink for FailingSink {
    fn save(
        &self,
        _request_type: &str,
        _headers: &BTreeMap<String, String>,
        _data: &NormalizedRequest,
    ) -> Result<String, StorageError> {
        Err(StorageError::Io {
            path: "webhook_data_test.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        })
    }
}

#[tokio::test]
async fn test_persistence_failure_is_500() {
    let root = tempfile::tempdir().unwrap();
    let config = test_config(root.path());
    let state = AppState::new(
        Arc::new(LocalUploadStore::new(&config.storage.upload_dir)),
        Arc::new(FailingSink),
        config.limits.max_body_bytes,
    );
    let router = HttpServer::with_state(config, state).router();

    let (status, body) = send(router, post("/webhook", "application/json", "{}")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Error processing webhook: "));
    assert!(message.contains("disk full"));
}

#[tokio::test]
async fn test_upload_failure_is_500() {
    let root = tempfile::tempdir().unwrap();
    let mut config = test_config(root.path());
    config.storage.upload_dir = root.path().join("missing");
    config.storage.records_dir = Some(root.path().join("uploads"));
    let router = HttpServer::new(config).router();

    let body = multipart_body(&[Part::File { name: "doc", filename: "a.txt", content: b"x" }]);
    let (status, body) = send(router, post("/webhook", &multipart_content_type(), body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
}
