//! Core data types: configuration objects, composer options and source names.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A composed (or partial) configuration: string keys mapping to JSON values.
///
/// Only nested objects are merged recursively; arrays and scalars are
/// replaced wholesale by later sources.
pub type ConfigObject = Map<String, Value>;

/// Default directory searched by the file source.
pub const DEFAULT_CONFIG_PATH: &str = "./config";

/// Names a configuration source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    /// Configuration files in [`Options::path`].
    File,
    /// The process environment.
    Env,
    /// Command-line arguments.
    Argv,
    /// Any other name. Only resolves if a provider was registered for it.
    Custom(String),
}

impl SourceKind {
    pub fn as_str(&self) -> &str {
        match self {
            SourceKind::File => "file",
            SourceKind::Env => "env",
            SourceKind::Argv => "argv",
            SourceKind::Custom(name) => name,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SourceKind {
    fn from(s: &str) -> Self {
        match s.trim() {
            "file" => SourceKind::File,
            "env" => SourceKind::Env,
            "argv" => SourceKind::Argv,
            other => SourceKind::Custom(other.to_string()),
        }
    }
}

impl FromStr for SourceKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SourceKind::from(s))
    }
}

impl Serialize for SourceKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SourceKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(SourceKind::from(name.as_str()))
    }
}

/// Options controlling a composition run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Environment name; selects the `<path>/<env>/` overlay directory.
    pub env: Option<String>,
    /// Directory holding configuration files.
    pub path: PathBuf,
    /// Nest each file's content under its file stem.
    pub namespace: bool,
    /// Sources in precedence order, lowest first.
    pub sources: Vec<SourceKind>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            env: None,
            path: PathBuf::from(DEFAULT_CONFIG_PATH),
            namespace: false,
            sources: vec![SourceKind::File],
        }
    }
}

impl Options {
    /// Build options from a fresh copy of the defaults with `overrides` applied.
    pub fn with_overrides(overrides: OptionsOverrides) -> Self {
        let mut options = Options::default();
        if let Some(env) = overrides.env {
            options.env = Some(env);
        }
        if let Some(path) = overrides.path {
            options.path = path;
        }
        if let Some(namespace) = overrides.namespace {
            options.namespace = namespace;
        }
        if let Some(sources) = overrides.sources {
            options.sources = sources;
        }
        options
    }

    pub fn uses_source(&self, kind: &SourceKind) -> bool {
        self.sources.contains(kind)
    }
}

/// Caller-supplied option overrides. Unset fields keep their default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsOverrides {
    pub env: Option<String>,
    pub path: Option<PathBuf>,
    pub namespace: Option<bool>,
    pub sources: Option<Vec<SourceKind>>,
}

impl OptionsOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn namespace(mut self, namespace: bool) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SourceKind>,
    {
        self.sources = Some(sources.into_iter().map(Into::into).collect());
        self
    }
}
