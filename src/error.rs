//! Error types for logging bootstrap
//!
//! Only failures the surrounding application cannot safely continue past
//! surface as errors. A missing settings file is recovered internally and
//! never reaches the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Error types for bootstrap resolution and backend initialization
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Settings file does not exist. Matched internally to recover;
    /// callers of `initialize` never observe this variant.
    #[error("logging configuration '{}' does not exist", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Settings file exists but could not be read
    #[error("failed to read logging configuration '{}'", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Settings file is not valid TOML
    #[error("malformed logging configuration '{}'", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Resolved log output file could not be opened for append
    #[error("failed to open log file '{}'", path.display())]
    LogFileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The logging backend rejected the resolved configuration
    #[error("logging backend error: {0}")]
    Backend(String),
}
