//! Logging initialization.
//!
//! Installs a global `tracing` subscriber writing to stderr and to a
//! daily-rolling file (`freetrack.log.YYYY-MM-DD`). The level comes from
//! `RUST_LOG`, defaulting to `info`.

use std::fs;
use std::path::Path;

use freetrack_core::{FreetrackError, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "freetrack.log";

/// Installs the global subscriber.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the file writer. Fails if a subscriber is already set.
pub fn init_logging(log_dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .try_init()
        .map_err(|e| FreetrackError::config(format!("Failed to initialize logging: {}", e)))?;

    tracing::info!("Logging to {:?}", log_dir);
    Ok(guard)
}
