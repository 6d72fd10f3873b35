//! Log output setup
//!
//! The terminal UI owns stdout and stderr, so logs are only written when a log
//! file is requested. Filtering follows `RUST_LOG`, defaulting to `info`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors that can occur while installing the log subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log file could not be opened
    #[error("Failed to open log file: {0}")]
    Io(#[from] std::io::Error),

    /// A global subscriber is already installed
    #[error("Failed to install log subscriber: {0}")]
    Init(String),
}

/// Installs a file-backed subscriber when `path` is given.
///
/// Returns `Ok(false)` when logging stays disabled.
pub fn init(path: Option<&Path>) -> Result<bool, LoggingError> {
    let Some(path) = path else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(true)
}
