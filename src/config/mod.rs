//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: PORT, WEBHOOK_*)
//!     → validation.rs (semantic checks)
//!     → ReceiverConfig (validated, immutable)
//!     → handed to HttpServer at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so the service runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ReceiverConfig;
pub use schema::{LimitsConfig, ListenerConfig, ObservabilityConfig, StorageConfig, TimeoutConfig};
