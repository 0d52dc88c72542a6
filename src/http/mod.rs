//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request id, trace, timeout, body limit)
//!     → handlers.rs (home, health, webhook)
//!         → ingest::Normalizer
//!         → message::WebhookMessage
//!         → storage::RecordSink
//!     → response.rs (acknowledgment or error envelope)
//!     → Send to client
//! ```

pub mod handlers;
pub mod response;
pub mod server;

pub use response::{WebhookAck, WebhookError};
pub use server::{AppState, HttpServer, X_REQUEST_ID};
