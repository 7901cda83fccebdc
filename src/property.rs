//! Ordered property lookup for bootstrap resolution
//!
//! The resolver never reads configuration directly; it queries an ordered
//! list of named sources, highest priority first. The first source that
//! returns a value for a key wins, so a host can layer command-line
//! properties over application configuration over the process environment.

use std::collections::HashMap;

/// A single named key/value lookup source
pub trait PropertySource {
    /// Name of the source, for diagnostics only
    fn name(&self) -> &str;

    /// Look up a property value by key
    fn get(&self, key: &str) -> Option<String>;
}

/// Ordered collection of property sources, queried first-to-last
#[derive(Default)]
pub struct PropertySources {
    sources: Vec<Box<dyn PropertySource>>,
}

impl PropertySources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source with the highest priority
    pub fn add_first(&mut self, source: Box<dyn PropertySource>) {
        self.sources.insert(0, source);
    }

    /// Add a source with the lowest priority
    pub fn add_last(&mut self, source: Box<dyn PropertySource>) {
        self.sources.push(source);
    }

    /// Resolve a key across all sources, highest priority first.
    ///
    /// Returns `None` only when no source knows the key.
    pub fn get(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.get(key))
    }
}

/// In-memory property source backed by a map
pub struct MapPropertySource {
    name: String,
    values: HashMap<String, String>,
}

impl MapPropertySource {
    pub fn new(name: impl Into<String>, values: HashMap<String, String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Convenience constructor for a single key/value pair
    pub fn single(
        name: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self::new(name, values)
    }
}

impl PropertySource for MapPropertySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Property source backed by process environment variables.
///
/// Keys are mangled the usual way: `logging.config` is looked up as
/// `LOGGING_CONFIG`. Typically added last, so explicit sources win.
pub struct EnvPropertySource;

impl PropertySource for EnvPropertySource {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        let var = key.to_ascii_uppercase().replace(['.', '-'], "_");
        std::env::var(var).ok()
    }
}
