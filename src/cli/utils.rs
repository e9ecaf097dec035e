//! Shared CLI utilities.

use anyhow::{Context, Result};
use clap::Args;
use configurant::{OptionsOverrides, SourceKind};
use serde::Serialize;
use std::path::PathBuf;

/// Option flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct OptionFlags {
    /// Directory holding configuration files
    #[arg(short, long, value_name = "DIR", env = "CONFIGURANT_PATH")]
    pub path: Option<PathBuf>,

    /// Environment whose overlay directory is merged over the base files
    #[arg(short, long, value_name = "NAME", env = "CONFIGURANT_ENV")]
    pub env: Option<String>,

    /// Nest each file's configuration under its file name
    #[arg(short, long)]
    pub namespace: bool,

    /// Sources in precedence order, lowest first (comma-separated: file,env,argv)
    #[arg(short, long, value_name = "SOURCES")]
    pub sources: Option<String>,
}

impl OptionFlags {
    pub fn to_overrides(&self) -> OptionsOverrides {
        OptionsOverrides {
            env: self.env.clone(),
            path: self.path.clone(),
            namespace: self.namespace.then_some(true),
            sources: parse_csv(&self.sources)
                .map(|names| names.iter().map(|name| SourceKind::from(name.as_str())).collect()),
        }
    }
}

/// Parse a comma-separated string into a `Vec<String>`, trimming whitespace and
/// discarding empty segments.  Returns `None` when `value` is `None`.
pub fn parse_csv(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.to_string())
            .collect::<Vec<_>>()
    })
}

pub fn render_json<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    rendered.context("Failed to serialize output as JSON")
}
