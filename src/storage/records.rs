//! Timestamped JSON records on disk.

use chrono::Local;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::{RecordSink, StorageError};
use crate::ingest::NormalizedRequest;

/// Second-resolution timestamp used in record bodies and filenames.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// The on-disk shape of one webhook call.
#[derive(Debug, Serialize)]
pub struct PersistedRecord<'a> {
    pub timestamp: &'a str,
    pub request_type: &'a str,
    pub headers: &'a BTreeMap<String, String>,
    pub data: &'a NormalizedRequest,
}

/// Writes `webhook_data_<timestamp>.json` files into a directory.
///
/// Files are opened create-new. When a record for the same second already
/// exists the name gets a short random suffix instead of overwriting it.
#[derive(Debug, Clone)]
pub struct FileRecordSink {
    dir: PathBuf,
}

impl FileRecordSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) fn write_record(&self, record: &PersistedRecord<'_>) -> Result<String, StorageError> {
        let contents = serde_json::to_vec_pretty(record)?;
        let (filename, path, mut file) = self.create_record_file(record.timestamp)?;
        file.write_all(&contents)
            .and_then(|_| file.flush())
            .map_err(|source| StorageError::Io { path, source })?;
        Ok(filename)
    }

    fn create_record_file(&self, timestamp: &str) -> Result<(String, PathBuf, File), StorageError> {
        let mut filename = format!("webhook_data_{timestamp}.json");
        loop {
            let path = self.dir.join(&filename);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((filename, path, file)),
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    let suffix = Uuid::new_v4().simple().to_string();
                    tracing::debug!(
                        existing = %filename,
                        "Record name taken within the same second, adding suffix"
                    );
                    filename = format!("webhook_data_{timestamp}_{}.json", &suffix[..8]);
                }
                Err(source) => return Err(StorageError::Io { path, source }),
            }
        }
    }
}

impl RecordSink for FileRecordSink {
    fn save(
        &self,
        request_type: &str,
        headers: &BTreeMap<String, String>,
        data: &NormalizedRequest,
    ) -> Result<String, StorageError> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.write_record(&PersistedRecord {
            timestamp: &timestamp,
            request_type,
            headers,
            data,
        })
    }
}
