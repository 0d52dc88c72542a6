//! Webhook Receiver Library

pub mod config;
pub mod http;
pub mod ingest;
pub mod lifecycle;
pub mod message;
pub mod observability;
pub mod storage;

pub use config::schema::ReceiverConfig;
pub use http::HttpServer;
pub use message::WebhookMessage;
