//! File source
//!
//! Loads every recognized configuration file directly inside the configured
//! directory, in file-name order. A file with the same name under
//! `<path>/<env>/` is deep-merged on top of its base file. With `namespace`
//! enabled each file's content is nested under its file stem.

use crate::domain::{ConfigObject, Options};
use crate::error::{ConfigError, Result};
use crate::merge::merge_owned;
use crate::sources::Source;
use crate::utils::decode_text;
use serde_json::Value;
use std::ffi::OsString;
use std::path::Path;
use walkdir::WalkDir;

/// Recognized file formats, selected by extension (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str())?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl Source for FileSource {
    fn load(&self, options: &Options) -> Result<ConfigObject> {
        let mut merged = ConfigObject::new();
        for file_name in list_config_files(&options.path)? {
            let fragment = load_fragment(options, &file_name)?;
            merge_owned(&mut merged, fragment);
        }
        Ok(merged)
    }
}

/// File names of recognized configuration files directly inside `dir`, sorted.
pub fn list_config_files(dir: &Path) -> Result<Vec<OsString>> {
    let metadata = std::fs::metadata(dir).map_err(|err| ConfigError::file_system(dir, err))?;
    if !metadata.is_dir() {
        let err = std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory");
        return Err(ConfigError::file_system(dir, err));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
            ConfigError::file_system(path, err.into())
        })?;
        let path = entry.path();
        if !path.is_file() || Format::from_path(path).is_none() {
            continue;
        }
        files.push(entry.file_name().to_os_string());
    }
    Ok(files)
}

/// Load one file, apply its environment overlay and optional namespace.
fn load_fragment(options: &Options, file_name: &OsString) -> Result<ConfigObject> {
    let base_path = options.path.join(file_name);
    let mut fragment = load_file(&base_path)?;

    if let Some(env) = options.env.as_deref() {
        let overlay_path = options.path.join(env).join(file_name);
        if overlay_path.is_file() {
            tracing::debug!(file = %overlay_path.display(), env, "applying environment overlay");
            merge_owned(&mut fragment, load_file(&overlay_path)?);
        }
    }

    if options.namespace {
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut wrapped = ConfigObject::new();
        wrapped.insert(stem, Value::Object(fragment));
        fragment = wrapped;
    }

    Ok(fragment)
}

/// Read and parse a single configuration file into an object.
pub fn load_file(path: &Path) -> Result<ConfigObject> {
    let Some(format) = Format::from_path(path) else {
        return Err(ConfigError::parse(path, "unsupported file extension"));
    };

    let bytes = std::fs::read(path).map_err(|err| ConfigError::file_system(path, err))?;
    let Some(content) = decode_text(&bytes) else {
        return Err(ConfigError::parse(path, "file is not valid UTF-8 or UTF-16 text"));
    };

    let value = match format {
        Format::Json => serde_json::from_str::<Value>(&content)
            .map_err(|err| ConfigError::parse(path, format!("invalid JSON: {err}")))?,
        Format::Toml => {
            let parsed = toml::from_str::<toml::Value>(&content)
                .map_err(|err| ConfigError::parse(path, format!("invalid TOML: {err}")))?;
            toml_to_json(parsed).map_err(|message| ConfigError::parse(path, message))?
        }
        Format::Yaml => match serde_yaml::from_str::<Value>(&content) {
            // An empty YAML document is an empty configuration.
            Ok(Value::Null) => Value::Object(ConfigObject::new()),
            Ok(value) => value,
            Err(err) => return Err(ConfigError::parse(path, format!("invalid YAML: {err}"))),
        },
    };

    tracing::debug!(file = %path.display(), "loaded configuration file");
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::parse(
            path,
            format!("expected a top-level object, found {}", json_type_name(&other)),
        )),
    }
}

/// JSON has no NaN or infinity, so such TOML floats are rejected.
fn toml_to_json(value: toml::Value) -> std::result::Result<Value, String> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => match serde_json::Number::from_f64(f) {
            Some(n) => Value::Number(n),
            None => return Err(format!("non-finite float {f} cannot be represented")),
        },
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            Value::Array(items.into_iter().map(toml_to_json).collect::<std::result::Result<_, _>>()?)
        }
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| toml_to_json(v).map(|v| (k, v)))
                .collect::<std::result::Result<_, _>>()?,
        ),
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
