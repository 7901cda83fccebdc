//! Constants for property keys, flag tokens, and default locations
//!
//! This module defines the string constants used during bootstrap
//! resolution. Following JPL Rule 1: All identifiers use clear,
//! descriptive names.

/// Property keys looked up across the ordered property sources
pub mod keys {
    /// Location of the logging settings file
    pub const CONFIG: &str = "logging.config";

    /// Explicit log output file, used verbatim
    pub const FILE: &str = "logging.file";

    /// Log output directory, combined with the default file name
    pub const PATH: &str = "logging.path";
}

/// Command-line flag tokens recognized during argument scanning
pub mod flags {
    /// Enables debug-level bootstrap output
    pub const DEBUG: &str = "--debug";

    /// Enables trace-level bootstrap output
    pub const TRACE: &str = "--trace";
}

/// Substitution variables available inside the settings file
pub mod vars {
    /// Resolved log output file
    pub const LOG_FILE: &str = "LOG_FILE";

    /// Resolved log output directory
    pub const LOG_PATH: &str = "LOG_PATH";

    /// Current process id
    pub const PID: &str = "PID";
}

/// Built-in defaults used when no override is present
pub mod defaults {
    /// Settings file looked for when `logging.config` is not set
    pub const CONFIG_LOCATION: &str = "logging.toml";

    /// File name used when only `logging.path` is configured
    pub const FILE_NAME: &str = "spring.log";

    /// Filter directives applied when no settings file exists at all
    pub const DIRECTIVES: &str = "info";
}

/// Log target for the bootstrap crate's own diagnostics.
///
/// Level overrides requested via `--debug` / `--trace` apply to this
/// target only, never to the whole process.
pub const BOOTSTRAP_TARGET: &str = "bootlog";
