//! Loads and saves `config.toml`.

use std::fs;
use std::path::PathBuf;

use freetrack_core::Result;
use freetrack_core::config::FreetrackConfig;

use crate::paths::FreetrackPaths;
use crate::storage::write_atomic;

/// Reads and writes [`FreetrackConfig`] as TOML.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses `config.toml` in the resolved config directory.
    pub fn new(paths: &FreetrackPaths) -> Result<Self> {
        Ok(Self {
            path: paths.config_file()?,
        })
    }

    /// Uses a specific file (for testing).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Loads the config. A missing or empty file yields the defaults.
    pub fn load(&self) -> Result<FreetrackConfig> {
        if !self.path.exists() {
            tracing::debug!("No config at {:?}, using defaults", self.path);
            return Ok(FreetrackConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(FreetrackConfig::default());
        }

        let config: FreetrackConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Writes the config atomically.
    pub fn save(&self, config: &FreetrackConfig) -> Result<()> {
        let content = toml::to_string_pretty(config)?;
        write_atomic(&self.path, content.as_bytes())?;
        tracing::info!("Saved config to {:?}", self.path);
        Ok(())
    }
}
