//! `tracing`-based logging backend
//!
//! The global `tracing` subscriber can only be installed once per process,
//! but bootstrap resolution may run more than once (and resolve different
//! settings each time). The subscriber is therefore installed with a
//! reloadable `EnvFilter` and a switchable writer, so every `apply` call
//! swaps the filter and output target in place instead of re-registering.

use crate::backend::{AppliedConfig, LoggingSystem};
use crate::constants::defaults;
use crate::error::BootstrapError;
use crate::level::LogLevel;
use once_cell::sync::OnceCell;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Where log records currently go
enum LogTarget {
    Console,
    File(File),
}

/// Writer whose destination can be swapped while the subscriber stays
/// installed
#[derive(Clone)]
struct SwitchWriter {
    target: Arc<Mutex<LogTarget>>,
}

impl SwitchWriter {
    fn console() -> Self {
        Self {
            target: Arc::new(Mutex::new(LogTarget::Console)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LogTarget> {
        // A poisoned lock only means another thread panicked mid-write;
        // the target itself is still usable.
        self.target.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_target(&self, target: LogTarget) {
        *self.lock() = target;
    }
}

impl io::Write for SwitchWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut *self.lock() {
            LogTarget::Console => io::stderr().write(buf),
            LogTarget::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.lock() {
            LogTarget::Console => io::stderr().flush(),
            LogTarget::File(file) => file.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for SwitchWriter {
    type Writer = SwitchWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

struct Shared {
    filter: FilterHandle,
    writer: SwitchWriter,
    // Last directives applied to the global filter. Shared across
    // handles so set_level through any handle composes on the active
    // configuration, not a per-handle snapshot.
    base_directives: Mutex<String>,
}

static SHARED: OnceCell<Shared> = OnceCell::new();

/// Logging backend driving the process-global `tracing` subscriber
pub struct TracingSystem {
    shared: &'static Shared,
}

impl TracingSystem {
    /// Install the global subscriber if this process has not done so yet,
    /// and return a handle that can reconfigure it.
    ///
    /// Safe to call multiple times; later calls reuse the installed
    /// subscriber.
    pub fn install() -> Self {
        let shared = SHARED.get_or_init(|| {
            let (filter_layer, filter_handle) =
                reload::Layer::new(EnvFilter::new(defaults::DIRECTIVES));
            let writer = SwitchWriter::console();
            let fmt_layer = fmt::layer()
                .with_writer(writer.clone())
                .with_ansi(false);
            let _ = tracing_subscriber::registry()
                .with(filter_layer)
                .with(fmt_layer)
                .try_init();
            Shared {
                filter: filter_handle,
                writer,
                base_directives: Mutex::new(defaults::DIRECTIVES.to_string()),
            }
        });
        Self { shared }
    }

    fn reload(&self, directives: &str) -> Result<(), BootstrapError> {
        let filter =
            EnvFilter::try_new(directives).map_err(|e| BootstrapError::Backend(e.to_string()))?;
        self.shared
            .filter
            .reload(filter)
            .map_err(|e| BootstrapError::Backend(e.to_string()))
    }

    fn base_directives(&self) -> MutexGuard<'_, String> {
        self.shared
            .base_directives
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

impl LoggingSystem for TracingSystem {
    fn apply(&mut self, config: &AppliedConfig) -> Result<(), BootstrapError> {
        match &config.file {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent).map_err(|e| BootstrapError::LogFileOpen {
                            path: path.clone(),
                            source: e,
                        })?;
                    }
                }
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| BootstrapError::LogFileOpen {
                        path: path.clone(),
                        source: e,
                    })?;
                self.shared.writer.set_target(LogTarget::File(file));
            }
            None => self.shared.writer.set_target(LogTarget::Console),
        }

        // RUST_LOG wins over the settings file, matching the usual
        // try_from_default_env fallback order.
        let base = std::env::var(EnvFilter::DEFAULT_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| config.directives.clone());
        self.reload(&base)?;
        *self.base_directives() = base;
        Ok(())
    }

    fn set_level(&mut self, target: &str, level: LogLevel) -> Result<(), BootstrapError> {
        let directives = format!(
            "{},{}={}",
            self.base_directives(),
            target,
            level.as_directive()
        );
        self.reload(&directives)
    }
}
