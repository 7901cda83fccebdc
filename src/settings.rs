//! Logging settings file loading and placeholder expansion
//!
//! This module handles loading the TOML settings file that configures the
//! logging backend. Following JPL Rule 24: All configuration is validated
//! at load time, before any of it is applied.

use crate::error::BootstrapError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default root filter level
const DEFAULT_ROOT_LEVEL: &str = "info";

/// Contents of a logging settings file.
///
/// ```toml
/// root = "info"
/// file = "${LOG_FILE}"
///
/// [targets]
/// hyper = "warn"
/// ```
///
/// `root` and the `targets` table combine into `EnvFilter` directives;
/// `file`, when present and non-empty after substitution, routes output to
/// an append-mode file instead of the console.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogSettings {
    /// Root filter level applied to all targets without an override
    #[serde(default = "default_root_level")]
    pub root: String,

    /// Per-target level overrides
    #[serde(default)]
    pub targets: BTreeMap<String, String>,

    /// Output file, possibly containing `${LOG_FILE}` / `${LOG_PATH}` /
    /// `${PID}` placeholders. Empty after substitution means console.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_root_level() -> String {
    DEFAULT_ROOT_LEVEL.to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            root: default_root_level(),
            targets: BTreeMap::new(),
            file: None,
        }
    }
}

impl LogSettings {
    /// Load settings from a TOML file.
    ///
    /// A missing file is reported as `ConfigNotFound` so the caller can
    /// decide whether that is recoverable; any other read or parse failure
    /// is fatal.
    pub fn load(path: &Path) -> Result<Self, BootstrapError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BootstrapError::ConfigNotFound { path: path.into() }
            } else {
                BootstrapError::ConfigRead {
                    path: path.into(),
                    source: e,
                }
            }
        })?;
        toml::from_str(&raw).map_err(|e| BootstrapError::ConfigParse {
            path: path.into(),
            source: e,
        })
    }

    /// Render root level and target overrides as a single `EnvFilter`
    /// directive string, e.g. `"info,hyper=warn"`.
    pub fn directives(&self) -> String {
        let mut directives = self.root.clone();
        for (target, level) in &self.targets {
            directives.push(',');
            directives.push_str(target);
            directives.push('=');
            directives.push_str(level);
        }
        directives
    }
}

/// Values substituted into the settings file's placeholders.
///
/// These replace the process-global `LOG_FILE` / `LOG_PATH` / `PID`
/// variables of older bootstrap designs: they are passed explicitly into
/// the apply step instead of being written to the environment.
#[derive(Debug, Clone, Default)]
pub struct Substitutions {
    /// Resolved log output file, if any
    pub log_file: Option<String>,

    /// Resolved log output directory, if any
    pub log_path: Option<String>,

    /// Current process id
    pub pid: u32,
}

impl Substitutions {
    /// Expand `${LOG_FILE}`, `${LOG_PATH}` and `${PID}` in `input`.
    /// Unresolved variables expand to the empty string.
    pub fn expand(&self, input: &str) -> String {
        input
            .replace("${LOG_FILE}", self.log_file.as_deref().unwrap_or(""))
            .replace("${LOG_PATH}", self.log_path.as_deref().unwrap_or(""))
            .replace("${PID}", &self.pid.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_settings(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_settings() {
        let file = write_settings(
            r#"
            root = "warn"
            file = "${LOG_FILE}"

            [targets]
            hyper = "error"
            "#,
        );
        let settings = LogSettings::load(file.path()).unwrap();
        assert_eq!(settings.root, "warn");
        assert_eq!(settings.file.as_deref(), Some("${LOG_FILE}"));
        assert_eq!(settings.targets.get("hyper").map(String::as_str), Some("error"));
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let file = write_settings("");
        let settings = LogSettings::load(file.path()).unwrap();
        assert_eq!(settings, LogSettings::default());
        assert_eq!(settings.root, "info");
        assert!(settings.file.is_none());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = LogSettings::load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, BootstrapError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let file = write_settings("root = [not toml");
        let err = LogSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, BootstrapError::ConfigParse { .. }));
    }

    #[test]
    fn test_directives_include_target_overrides() {
        let file = write_settings(
            r#"
            root = "debug"

            [targets]
            a = "trace"
            b = "off"
            "#,
        );
        let settings = LogSettings::load(file.path()).unwrap();
        assert_eq!(settings.directives(), "debug,a=trace,b=off");
    }

    #[test]
    fn test_expand_substitutions() {
        let subs = Substitutions {
            log_file: Some("out.log".to_string()),
            log_path: None,
            pid: 42,
        };
        assert_eq!(subs.expand("${LOG_FILE}"), "out.log");
        assert_eq!(subs.expand("${LOG_PATH}fallback-${PID}"), "fallback-42");
        assert_eq!(subs.expand("plain"), "plain");
    }
}
