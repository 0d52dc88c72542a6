//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and storage produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached by tower-http and shows up in trace spans
//! - Metrics macros are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
