//! Shared utilities for integration and load testing.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::net::SocketAddr;
use std::path::Path;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower::ServiceExt;
use webhook_receiver::lifecycle::prepare_directories;
use webhook_receiver::{HttpServer, ReceiverConfig};

pub const BOUNDARY: &str = "----webhooktestboundary";

/// Config whose storage lives under `root`, with directories created.
pub fn test_config(root: &Path) -> ReceiverConfig {
    let mut config = ReceiverConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.storage.upload_dir = root.join("uploads");
    prepare_directories(&config).unwrap();
    config
}

/// Drive one request through the router in-process.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// A part of a hand-built multipart body.
pub enum Part<'a> {
    Field { name: &'a str, value: &'a str },
    File { name: &'a str, filename: &'a str, content: &'a [u8] },
}

/// Encode `parts` as `multipart/form-data` using [`BOUNDARY`].
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Field { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File { name, filename, content } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Number of `webhook_data_*.json` records in `dir`.
pub fn record_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.starts_with("webhook_data_") && name.ends_with(".json")
        })
        .count()
}

/// Start a real server on an ephemeral port. Dropping or firing the sender
/// stops it.
#[allow(dead_code)]
pub async fn start_server(config: ReceiverConfig) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = TcpListener::bind(config.listener.bind_address()).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server
            .run_until(listener, async {
                let _ = rx.await;
            })
            .await;
    });

    (addr, tx)
}
