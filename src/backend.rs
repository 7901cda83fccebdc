//! Logging backend abstraction
//!
//! This module defines the trait the bootstrap resolver drives. The
//! resolver itself never talks to `tracing` internals; it hands a fully
//! resolved configuration to whichever backend the host wired in.

use crate::error::BootstrapError;
use crate::level::LogLevel;
use std::path::PathBuf;

/// Fully resolved configuration handed to a logging backend
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedConfig {
    /// Filter directives, e.g. `"info,hyper=warn"`
    pub directives: String,

    /// Output file to append to; `None` means console
    pub file: Option<PathBuf>,
}

/// A logging backend the resolver can configure.
///
/// `apply` replaces the backend's active configuration wholesale;
/// `set_level` adjusts one target on top of the active configuration.
/// Both may be called repeatedly, last call wins.
pub trait LoggingSystem {
    /// Replace the active configuration
    fn apply(&mut self, config: &AppliedConfig) -> Result<(), BootstrapError>;

    /// Force a single target to the given level, leaving the rest of the
    /// active configuration untouched
    fn set_level(&mut self, target: &str, level: LogLevel) -> Result<(), BootstrapError>;
}
