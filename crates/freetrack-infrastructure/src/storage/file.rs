//! File-backed key-value store.
//!
//! Each key is one file, `{dir}/{key}.json`. Writes are atomic (see
//! [`super::atomic`]).

use std::fs;
use std::io;
use std::path::PathBuf;

use freetrack_core::storage::KeyValueStore;
use freetrack_core::{FreetrackError, Result};

use super::atomic::write_atomic;
use crate::paths::FreetrackPaths;

/// A [`KeyValueStore`] that keeps one file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    const EXTENSION: &'static str = "json";

    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates a store in the platform data directory.
    pub fn open_default(paths: &FreetrackPaths) -> Result<Self> {
        Ok(Self::new(paths.storage_dir()?))
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    /// Returns the file a key maps to, rejecting keys that are not plain
    /// file names.
    pub fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, Self::EXTENSION)))
    }
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(FreetrackError::config(format!(
            "Invalid storage key '{}': use letters, digits, '-', '_' or '.'",
            key
        )))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.key_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => {
                tracing::debug!("Read {} bytes from {:?}", bytes.len(), path);
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.key_path(key)?;
        write_atomic(&path, value).map_err(|e| {
            FreetrackError::storage(format!("Failed to write {:?}: {}", path, e))
        })?;
        tracing::debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}
