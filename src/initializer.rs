//! Two-phase logging bootstrap
//!
//! Hosts call [`LoggingInitializer::initialize_from_args`] as early as
//! possible with the raw process arguments, then
//! [`LoggingInitializer::initialize`] once property sources are populated.
//! Each `initialize` call fully re-resolves the effective configuration and
//! re-applies it to the backend; nothing is cached between calls.

use crate::backend::{AppliedConfig, LoggingSystem};
use crate::constants::{BOOTSTRAP_TARGET, defaults, flags, keys};
use crate::error::BootstrapError;
use crate::level::LogLevel;
use crate::property::PropertySources;
use crate::settings::{LogSettings, Substitutions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolves and applies the effective logging configuration at startup
pub struct LoggingInitializer {
    parse_args: bool,
    requested_level: Option<LogLevel>,
    explicit_level: Option<LogLevel>,
}

impl Default for LoggingInitializer {
    fn default() -> Self {
        Self {
            parse_args: true,
            requested_level: None,
            explicit_level: None,
        }
    }
}

impl LoggingInitializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable `--debug` / `--trace` argument scanning
    /// (enabled by default)
    pub fn set_parse_args(&mut self, parse_args: bool) {
        self.parse_args = parse_args;
    }

    /// Explicitly set the bootstrap logger's verbosity.
    ///
    /// An explicitly set level wins outright over anything parsed from the
    /// command line.
    pub fn set_bootstrap_level(&mut self, level: LogLevel) {
        self.explicit_level = Some(level);
    }

    /// Scan raw process arguments for verbosity flags.
    ///
    /// Recognizes exact `--debug` and `--trace` tokens; `--trace` wins when
    /// both are present. Unknown tokens are ignored. Does not touch the
    /// backend; the result takes effect on the next [`initialize`] call.
    ///
    /// [`initialize`]: LoggingInitializer::initialize
    pub fn initialize_from_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.parse_args {
            return;
        }
        for arg in args {
            let requested = match arg.as_ref() {
                flags::DEBUG => LogLevel::Debug,
                flags::TRACE => LogLevel::Trace,
                _ => continue,
            };
            if self.requested_level.is_none_or(|current| requested > current) {
                self.requested_level = Some(requested);
            }
        }
    }

    /// Resolve the effective configuration from `sources` and apply it to
    /// `system`.
    ///
    /// Resolution order:
    /// 1. settings file from `logging.config`, else the built-in default
    ///    location, else built-in minimal settings;
    /// 2. output target from `logging.file`, else `logging.path` joined
    ///    with the default file name, else whatever the settings file says;
    /// 3. verbosity for the bootstrap target from the explicit setter,
    ///    else the parsed arguments, else left at the configured default.
    ///
    /// A `logging.config` override pointing at a missing file is warned
    /// about and skipped, leaving the backend's active configuration in
    /// place. Malformed or unreadable files are fatal.
    pub fn initialize(
        &mut self,
        sources: &PropertySources,
        system: &mut dyn LoggingSystem,
    ) -> Result<(), BootstrapError> {
        let log_file = sources.get(keys::FILE);
        let log_path = sources.get(keys::PATH);
        let resolved_target = match (&log_file, &log_path) {
            (Some(file), _) => Some(file.clone()),
            (None, Some(path)) => Some(
                Path::new(path)
                    .join(defaults::FILE_NAME)
                    .to_string_lossy()
                    .into_owned(),
            ),
            (None, None) => None,
        };

        if let Some(settings) = self.resolve_settings(sources)? {
            let substitutions = Substitutions {
                log_file: resolved_target.clone(),
                log_path,
                pid: std::process::id(),
            };
            let from_settings = settings
                .file
                .as_deref()
                .map(|file| substitutions.expand(file))
                .filter(|file| !file.is_empty());
            let config = AppliedConfig {
                directives: settings.directives(),
                file: resolved_target.or(from_settings).map(PathBuf::from),
            };
            system.apply(&config)?;
            debug!(
                directives = %config.directives,
                file = ?config.file,
                "applied logging configuration"
            );
        }

        if let Some(level) = self.explicit_level.or(self.requested_level) {
            system.set_level(BOOTSTRAP_TARGET, level)?;
        }
        Ok(())
    }

    /// Load the settings file named by `logging.config`, or the default
    /// location. `Ok(None)` means "keep the backend's active
    /// configuration".
    fn resolve_settings(
        &self,
        sources: &PropertySources,
    ) -> Result<Option<LogSettings>, BootstrapError> {
        match sources.get(keys::CONFIG) {
            Some(location) => match LogSettings::load(Path::new(&location)) {
                Ok(settings) => Ok(Some(settings)),
                Err(BootstrapError::ConfigNotFound { .. }) => {
                    // The backend is not configured yet, so the warning
                    // goes to the pre-init channel.
                    eprintln!(
                        "Logging configuration '{}' does not exist, keeping active configuration",
                        location
                    );
                    Ok(None)
                }
                Err(e) => Err(e),
            },
            None => match LogSettings::load(Path::new(defaults::CONFIG_LOCATION)) {
                Ok(settings) => Ok(Some(settings)),
                Err(BootstrapError::ConfigNotFound { .. }) => Ok(Some(LogSettings::default())),
                Err(e) => Err(e),
            },
        }
    }
}
