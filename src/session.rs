//! Composition session
//!
//! A [`Session`] owns the state of one configuration consumer: the options of
//! the last run, the configuration it produced, and the providers it draws
//! from. Composition takes `&mut self`, so at most one run is in flight per
//! session.

use crate::domain::{ConfigObject, Options, OptionsOverrides, SourceKind};
use crate::error::{ConfigError, Result};
use crate::merge::deep_merge;
use crate::sources::{Source, SourceRegistry};
use crate::utils::resolve_config_path;
use std::path::{Path, PathBuf};

pub struct Session {
    config: Option<ConfigObject>,
    options: Options,
    registry: SourceRegistry,
    cwd: Option<PathBuf>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Session backed by the built-in file, environment and argv sources.
    pub fn new() -> Self {
        Self::with_registry(SourceRegistry::builtin())
    }

    pub fn with_registry(registry: SourceRegistry) -> Self {
        Self { config: None, options: Options::default(), registry, cwd: None }
    }

    /// Resolve relative config paths against `cwd` instead of the process's
    /// current directory.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Compose a configuration from the sources named in `overrides` (or the
    /// defaults) and cache it.
    ///
    /// Fails with [`ConfigError::PathNotFound`] before loading anything if the
    /// file source is requested and its directory does not exist. On any
    /// failure the cached configuration is cleared.
    pub fn compose(&mut self, overrides: OptionsOverrides) -> Result<&ConfigObject> {
        self.config = None;
        let mut options = Options::with_overrides(overrides);
        options.path = self.resolve_path(&options.path)?;
        self.options = options;

        if self.options.uses_source(&SourceKind::File) {
            ensure_config_path(&self.options.path)?;
        }

        let partials = self.registry.load_all(&self.options)?;
        let config = deep_merge(&partials);
        tracing::info!(
            sources = %display_sources(&self.options.sources),
            keys = config.len(),
            "configuration composed"
        );
        Ok(&*self.config.insert(config))
    }

    /// Options used by the last composition, or the defaults.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The configuration cached by the last successful composition.
    pub fn config(&self) -> Option<&ConfigObject> {
        self.config.as_ref()
    }

    /// Drop the cached configuration and restore a fresh copy of the default options.
    pub fn reset(&mut self) {
        self.config = None;
        self.options = Options::default();
    }

    /// Register an additional named source.
    ///
    /// Custom sources are not supported yet: the provider is discarded and
    /// composing with `name` still fails with [`ConfigError::UnknownSource`].
    pub fn add_source(&mut self, name: &str, _provider: Box<dyn Source>) {
        tracing::warn!(source = name, "custom configuration sources are not supported; ignoring");
    }

    fn resolve_path(&self, path: &Path) -> Result<PathBuf> {
        let cwd = match &self.cwd {
            Some(cwd) => cwd.clone(),
            None => std::env::current_dir()
                .map_err(|err| ConfigError::file_system(PathBuf::from("."), err))?,
        };
        Ok(resolve_config_path(path, &cwd))
    }
}

/// `PathNotFound` only when `path` is known not to exist; any other failure to
/// inspect it is a file system error.
fn ensure_config_path(path: &Path) -> Result<()> {
    match path.try_exists() {
        Ok(true) => Ok(()),
        Ok(false) => Err(ConfigError::PathNotFound { path: path.to_path_buf() }),
        Err(err) => Err(ConfigError::file_system(path, err)),
    }
}

fn display_sources(sources: &[SourceKind]) -> String {
    sources.iter().map(SourceKind::as_str).collect::<Vec<_>>().join(",")
}

/// Compose once with a throwaway session.
pub fn compose(overrides: OptionsOverrides) -> Result<ConfigObject> {
    let mut session = Session::new();
    session.compose(overrides).cloned()
}
