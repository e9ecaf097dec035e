//! Environment source
//!
//! Every environment variable becomes a string value. Names containing a `.`
//! after the first character (e.g. `db.host`) are expanded into nested
//! objects. Values are never coerced: `PORT=8080` stays the string `"8080"`.

use crate::domain::{ConfigObject, Options};
use crate::error::Result;
use crate::merge::expand_namespaced;
use crate::sources::Source;
use serde_json::Value;

#[derive(Debug, Clone)]
enum Snapshot {
    /// Read `std::env` each time the source loads.
    Process,
    Fixed(Vec<(String, String)>),
}

#[derive(Debug, Clone)]
pub struct EnvSource {
    snapshot: Snapshot,
}

impl EnvSource {
    pub fn from_process() -> Self {
        Self { snapshot: Snapshot::Process }
    }

    /// Use a fixed set of variables instead of the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { snapshot: Snapshot::Fixed(vars) }
    }

    fn variables(&self) -> Vec<(String, String)> {
        match &self.snapshot {
            Snapshot::Fixed(vars) => vars.clone(),
            Snapshot::Process => std::env::vars_os()
                .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
                    (Ok(key), Ok(value)) => Some((key, value)),
                    (key, _) => {
                        tracing::warn!(
                            variable = ?key.unwrap_or_else(|k| k.to_string_lossy().into_owned()),
                            "skipping environment variable that is not valid unicode"
                        );
                        None
                    }
                })
                .collect(),
        }
    }
}

impl Source for EnvSource {
    fn load(&self, _options: &Options) -> Result<ConfigObject> {
        let flat: ConfigObject = self
            .variables()
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        Ok(expand_namespaced(flat))
    }
}
