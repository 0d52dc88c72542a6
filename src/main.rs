//! Webhook Receiver
//!
//! A small HTTP endpoint that accepts webhook calls of any content type,
//! stores a timestamped JSON record per call and echoes a structured
//! acknowledgment.
//!
//! # Architecture Overview
//!
//! ```text
//!     Webhook caller           ┌──────────────────────────────────────────────────┐
//!     ─────────────────────────┼─▶ http::server ─▶ ingest::Normalizer             │
//!                              │                        │                         │
//!                              │                        ├─▶ storage::UploadStore  │
//!                              │                        ▼                         │
//!                              │                  message::WebhookMessage         │
//!                              │                        │                         │
//!                              │                        ▼                         │
//!     Acknowledgment           │                  storage::RecordSink             │
//!     ◀────────────────────────┼── http::response ◀─────┘                         │
//!                              │                                                  │
//!                              │  config · observability · lifecycle              │
//!                              └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use webhook_receiver::config::load_config;
use webhook_receiver::config::validation::validate_config;
use webhook_receiver::config::ConfigError;
use webhook_receiver::lifecycle::prepare_directories;
use webhook_receiver::observability::{logging, metrics};
use webhook_receiver::HttpServer;

#[derive(Parser)]
#[command(name = "webhook-receiver")]
#[command(about = "Receive, normalize and persist inbound webhooks", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port (takes precedence over config and PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.listener.port = port;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);
    tracing::info!("webhook-receiver v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upload_dir = %config.storage.upload_dir.display(),
        max_body_bytes = config.limits.max_body_bytes,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    prepare_directories(&config)?;

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
