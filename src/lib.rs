//! Logging bootstrap for application startup
//!
//! This crate resolves the effective logging configuration before the rest
//! of an application starts: which settings file to load, where log output
//! goes, and how verbose the bootstrap logger itself should be. Resolution
//! layers three inputs, highest priority first:
//!
//! 1. explicit properties (`logging.config`, `logging.file`,
//!    `logging.path`) from an ordered set of [`PropertySources`];
//! 2. `--debug` / `--trace` command-line flags;
//! 3. the settings file's own contents, with built-in minimal defaults
//!    when no file exists.
//!
//! The host drives two phases at startup:
//!
//! ```no_run
//! use bootlog::{LoggingInitializer, PropertySources, TracingSystem};
//!
//! let mut system = TracingSystem::install();
//! let mut initializer = LoggingInitializer::new();
//! initializer.initialize_from_args(std::env::args().skip(1));
//!
//! let sources = PropertySources::new();
//! initializer.initialize(&sources, &mut system).expect("logging bootstrap failed");
//! ```

pub mod backend;
pub mod constants;
pub mod error;
pub mod initializer;
pub mod level;
pub mod property;
pub mod settings;
pub mod tracing_backend;

pub use backend::{AppliedConfig, LoggingSystem};
pub use error::BootstrapError;
pub use initializer::LoggingInitializer;
pub use level::LogLevel;
pub use property::{EnvPropertySource, MapPropertySource, PropertySource, PropertySources};
pub use settings::{LogSettings, Substitutions};
pub use tracing_backend::TracingSystem;
