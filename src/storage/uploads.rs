//! Flat upload directory.

use std::fs;
use std::path::{Path, PathBuf};

use super::{StorageError, UploadStore};

/// Stores uploads directly in one directory.
///
/// There is no per-request subdirectory: a later upload with the same
/// sanitized name replaces the earlier file.
#[derive(Debug, Clone)]
pub struct LocalUploadStore {
    dir: PathBuf,
}

impl LocalUploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl UploadStore for LocalUploadStore {
    fn store(&self, filename: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let path = self.dir.join(filename);
        fs::write(&path, bytes).map_err(|source| StorageError::Io { path, source })?;
        tracing::debug!(filename, size = bytes.len(), "Upload stored");
        Ok(filename.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path());

        assert_eq!(store.store("note.txt", b"first").unwrap(), "note.txt");
        store.store("note.txt", b"second").unwrap();

        assert_eq!(fs::read(dir.path().join("note.txt")).unwrap(), b"second");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
