//! Unified path management for freetrack files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/freetrack/            # Config directory
//! └── config.toml                 # Application configuration
//!
//! ~/.local/share/freetrack/       # Data directory
//! ├── storage/                    # Key-value storage files
//! │   └── free-services-tracker.json
//! └── logs/                       # Application logs
//!     └── freetrack.log.YYYY-MM-DD
//! ```
//!
//! With a base override (tests, portable installs) everything lives under
//! `{base}/config` and `{base}/data` instead.

use std::path::PathBuf;

use freetrack_core::FreetrackError;

const APP_DIR_NAME: &str = "freetrack";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for FreetrackError {
    fn from(err: PathError) -> Self {
        FreetrackError::config(err.to_string())
    }
}

/// Resolves where freetrack keeps its files.
#[derive(Debug, Clone, Default)]
pub struct FreetrackPaths {
    base_override: Option<PathBuf>,
}

impl FreetrackPaths {
    /// Creates a resolver. `None` uses the platform directories.
    pub fn new(base_override: Option<PathBuf>) -> Self {
        Self { base_override }
    }

    /// Returns the configuration directory (e.g. `~/.config/freetrack/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_override {
            Some(base) => Ok(base.join("config")),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the data directory (e.g. `~/.local/share/freetrack/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_override {
            Some(base) => Ok(base.join("data")),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the directory holding key-value storage files.
    pub fn storage_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("storage"))
    }

    /// Returns the log directory.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }
}
