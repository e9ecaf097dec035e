//! Configuration sources (files, environment, command line)
//!
//! Each source produces one partial [`ConfigObject`]. The registry maps a
//! [`SourceKind`] to the provider that serves it; composition walks the
//! requested kinds in order and fails on the first error.

use crate::domain::{ConfigObject, Options, SourceKind};
use crate::error::{ConfigError, Result};
use std::collections::BTreeMap;

pub mod argv;
pub mod env;
pub mod file;

pub use argv::ArgvSource;
pub use env::EnvSource;
pub use file::FileSource;

/// Produces one partial configuration.
pub trait Source: Send + Sync {
    fn load(&self, options: &Options) -> Result<ConfigObject>;
}

/// Providers available to a composer, keyed by source kind.
pub struct SourceRegistry {
    providers: BTreeMap<SourceKind, Box<dyn Source>>,
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SourceRegistry {
    /// File, environment and argv providers reading from the running process.
    pub fn builtin() -> Self {
        let mut providers: BTreeMap<SourceKind, Box<dyn Source>> = BTreeMap::new();
        providers.insert(SourceKind::File, Box::new(FileSource));
        providers.insert(SourceKind::Env, Box::new(EnvSource::from_process()));
        providers.insert(SourceKind::Argv, Box::new(ArgvSource::from_process()));
        Self { providers }
    }

    /// Replace the environment provider, e.g. with a fixed snapshot.
    pub fn with_env(mut self, source: EnvSource) -> Self {
        self.providers.insert(SourceKind::Env, Box::new(source));
        self
    }

    /// Replace the argv provider, e.g. with arguments collected elsewhere.
    pub fn with_argv(mut self, source: ArgvSource) -> Self {
        self.providers.insert(SourceKind::Argv, Box::new(source));
        self
    }

    pub fn contains(&self, kind: &SourceKind) -> bool {
        self.providers.contains_key(kind)
    }

    pub fn get(&self, kind: &SourceKind) -> Result<&dyn Source> {
        self.providers
            .get(kind)
            .map(|provider| &**provider)
            .ok_or_else(|| ConfigError::UnknownSource(kind.to_string()))
    }

    /// Run every source named in `options.sources`, in order.
    pub fn load_all(&self, options: &Options) -> Result<Vec<ConfigObject>> {
        options
            .sources
            .iter()
            .map(|kind| {
                let loaded = self.get(kind)?.load(options)?;
                tracing::debug!(source = %kind, keys = loaded.len(), "loaded configuration source");
                Ok(loaded)
            })
            .collect()
    }
}
