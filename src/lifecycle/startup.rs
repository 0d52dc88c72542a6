//! Startup preparation.

use std::fs;
use std::io;

use crate::config::ReceiverConfig;

/// Create the upload and record directories if they are missing.
pub fn prepare_directories(config: &ReceiverConfig) -> io::Result<()> {
    fs::create_dir_all(&config.storage.upload_dir)?;
    fs::create_dir_all(config.storage.records_dir())?;
    tracing::info!(
        upload_dir = %config.storage.upload_dir.display(),
        records_dir = %config.storage.records_dir().display(),
        "Storage directories ready"
    );
    Ok(())
}
