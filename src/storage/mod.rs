//! Persistence subsystem.
//!
//! # Responsibilities
//! - Write one JSON record per webhook call (`records.rs`)
//! - Write uploaded multipart files (`uploads.rs`)
//!
//! # Design Decisions
//! - Both concerns sit behind traits so handlers never touch the filesystem
//! - Implementations are synchronous; async callers use `spawn_blocking`
//! - Failures propagate to the endpoint and become HTTP 500

pub mod records;
pub mod uploads;

use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

use crate::ingest::NormalizedRequest;

pub use records::{FileRecordSink, PersistedRecord};
pub use uploads::LocalUploadStore;

/// Errors raised while writing records or uploads.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record could not be encoded as JSON.
    #[error("failed to encode record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Blocking storage task panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Destination for webhook records.
pub trait RecordSink: Send + Sync {
    /// Persist `{timestamp, request_type, headers, data}` and return the
    /// filename it was written under.
    fn save(
        &self,
        request_type: &str,
        headers: &BTreeMap<String, String>,
        data: &NormalizedRequest,
    ) -> Result<String, StorageError>;
}

/// Destination for uploaded file parts.
pub trait UploadStore: Send + Sync {
    /// Write `bytes` under an already sanitized `filename` and return the
    /// name it was stored as.
    fn store(&self, filename: &str, bytes: &[u8]) -> Result<String, StorageError>;
}
