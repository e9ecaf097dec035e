//! Command-line argument source
//!
//! Arguments are parsed with the usual flag conventions:
//!
//! - `--key=value` and `--key value` set `key`
//! - `--flag` sets `true`, `--no-flag` sets `false`
//! - `-abc` sets `a`, `b` and `c` to `true`; `-k value` and `-k=value` set `k`
//! - `--` ends flag parsing
//! - everything else is positional and collected, in order, under `_`
//!
//! Numeric-looking values become numbers, repeated flags collect into an
//! array, and namespaced flags (`--db.host=x`) are expanded into nested objects.

use crate::domain::{ConfigObject, Options};
use crate::error::Result;
use crate::merge::expand_namespaced;
use crate::sources::Source;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};

/// Key holding positional arguments.
pub const POSITIONAL_KEY: &str = "_";

static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?$").expect("valid regex")
});

static HEX_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[xX][0-9a-fA-F]+$").expect("valid regex"));

#[derive(Debug, Clone)]
enum Arguments {
    /// `std::env::args` without the program name.
    Process,
    Fixed(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct ArgvSource {
    args: Arguments,
}

impl ArgvSource {
    pub fn from_process() -> Self {
        Self { args: Arguments::Process }
    }

    /// Parse these arguments (program name excluded) instead of the process's.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { args: Arguments::Fixed(args.into_iter().map(Into::into).collect()) }
    }

    fn arguments(&self) -> Vec<String> {
        match &self.args {
            Arguments::Fixed(args) => args.clone(),
            Arguments::Process => std::env::args_os()
                .skip(1)
                .filter_map(|arg| match arg.into_string() {
                    Ok(arg) => Some(arg),
                    Err(arg) => {
                        tracing::warn!(argument = ?arg, "skipping argument that is not valid unicode");
                        None
                    }
                })
                .collect(),
        }
    }
}

impl Source for ArgvSource {
    fn load(&self, _options: &Options) -> Result<ConfigObject> {
        Ok(expand_namespaced(parse_args(&self.arguments())))
    }
}

/// Parse arguments into a flat object. Namespaced keys are left as they are.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> ConfigObject {
    let mut parsed = ConfigObject::new();
    let mut positionals = Vec::new();
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_ref();

        if arg == "--" {
            positionals.extend(args[i + 1..].iter().map(|a| coerce(a.as_ref())));
            break;
        }

        if let Some(long) = arg.strip_prefix("--") {
            if let Some((key, value)) = long.split_once('=') {
                set_flag(&mut parsed, key, coerce(value));
            } else if let Some(key) = long.strip_prefix("no-") {
                set_flag(&mut parsed, key, Value::Bool(false));
            } else {
                let (value, consumed) = flag_value(args.get(i + 1).map(|a| a.as_ref()));
                set_flag(&mut parsed, long, value);
                i += consumed;
            }
        } else if arg.len() > 1 && arg.starts_with('-') && !NUMBER.is_match(arg) {
            i += parse_short_flags(&mut parsed, &arg[1..], args.get(i + 1).map(|a| a.as_ref()));
        } else {
            positionals.push(coerce(arg));
        }

        i += 1;
    }

    parsed.insert(POSITIONAL_KEY.to_string(), Value::Array(positionals));
    parsed
}

/// Handle a cluster of short flags (`abc` from `-abc`). Returns how many of
/// the following arguments were consumed as a value.
fn parse_short_flags(parsed: &mut ConfigObject, letters: &str, next: Option<&str>) -> usize {
    let chars: Vec<(usize, char)> = letters.char_indices().collect();

    for (pos, &(offset, letter)) in chars.iter().enumerate() {
        let rest = &letters[offset + letter.len_utf8()..];
        let key = letter.to_string();

        if let Some(value) = rest.strip_prefix('=') {
            set_flag(parsed, &key, coerce(value));
            return 0;
        }
        if letter.is_ascii_alphabetic() && !rest.is_empty() && NUMBER.is_match(rest) {
            set_flag(parsed, &key, coerce(rest));
            return 0;
        }
        if pos + 1 == chars.len() {
            let (value, consumed) = flag_value(next);
            set_flag(parsed, &key, value);
            return consumed;
        }
        set_flag(parsed, &key, Value::Bool(true));
    }
    0
}

/// Value for a flag given the argument after it, and whether it was consumed.
fn flag_value(next: Option<&str>) -> (Value, usize) {
    match next {
        Some("true") => (Value::Bool(true), 1),
        Some("false") => (Value::Bool(false), 1),
        Some(next) if !looks_like_flag(next) => (coerce(next), 1),
        _ => (Value::Bool(true), 0),
    }
}

fn looks_like_flag(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-') && !NUMBER.is_match(arg)
}

/// Store `value` under `key`; a repeated key collects its values in an array.
fn set_flag(parsed: &mut ConfigObject, key: &str, value: Value) {
    match parsed.get_mut(key) {
        Some(Value::Array(values)) => values.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parsed.insert(key.to_string(), value);
        }
    }
}

/// Turn numeric-looking text into a JSON number; anything else stays text.
fn coerce(raw: &str) -> Value {
    if HEX_NUMBER.is_match(raw) {
        if let Ok(n) = i64::from_str_radix(&raw[2..], 16) {
            return Value::from(n);
        }
    }
    if NUMBER.is_match(raw) {
        if let Ok(n) = raw.parse::<i64>() {
            return Value::from(n);
        }
        if let Ok(f) = raw.parse::<f64>() {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                return Value::from(f as i64);
            }
            if let Some(n) = Number::from_f64(f) {
                return Value::Number(n);
            }
        }
    }
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(args: &[&str]) -> Value {
        Value::Object(parse_args(args))
    }

    #[test]
    fn empty_arguments_yield_only_positionals() {
        assert_eq!(parse(&[]), json!({"_": []}));
    }

    #[test]
    fn long_flags_with_and_without_values() {
        assert_eq!(
            parse(&["--name=Foo", "--port", "8080", "--verbose", "--no-color"]),
            json!({"_": [], "name": "Foo", "port": 8080, "verbose": true, "color": false})
        );
    }

    #[test]
    fn long_flag_does_not_swallow_following_flag() {
        assert_eq!(parse(&["--debug", "--level", "warn"]), json!({"_": [], "debug": true, "level": "warn"}));
    }

    #[test]
    fn explicit_boolean_values() {
        assert_eq!(parse(&["--cache", "false"]), json!({"_": [], "cache": false}));
    }

    #[test]
    fn short_flag_clusters() {
        assert_eq!(
            parse(&["-abc", "-n", "5", "-x=1", "-p3000"]),
            json!({"_": [], "a": true, "b": true, "c": true, "n": 5, "x": 1, "p": 3000})
        );
    }

    #[test]
    fn positionals_and_terminator() {
        assert_eq!(
            parse(&["serve", "--port=1", "extra", "--", "--not-a-flag", "7"]),
            json!({"_": ["serve", "extra", "--not-a-flag", 7], "port": 1})
        );
    }

    #[test]
    fn negative_numbers_are_values_not_flags() {
        assert_eq!(parse(&["--offset", "-5", "-1.5"]), json!({"_": [-1.5], "offset": -5}));
    }

    #[test]
    fn repeated_flags_collect_into_array() {
        assert_eq!(
            parse(&["--tag", "a", "--tag=b", "--tag", "c"]),
            json!({"_": [], "tag": ["a", "b", "c"]})
        );
    }

    #[test]
    fn numbers_are_coerced() {
        assert_eq!(coerce("42"), json!(42));
        assert_eq!(coerce("0x1f"), json!(31));
        assert_eq!(coerce("2.5"), json!(2.5));
        assert_eq!(coerce("1e3"), json!(1000));
        assert_eq!(coerce("1.2.3"), json!("1.2.3"));
        assert_eq!(coerce("abc"), json!("abc"));
    }

    #[test]
    fn namespaced_flags_are_expanded() {
        let source = ArgvSource::from_args(["--db.host=localhost", "--db.port", "5432", "run"]);
        let config = source.load(&Options::default()).expect("load");
        assert_eq!(
            Value::Object(config),
            json!({"_": ["run"], "db": {"host": "localhost", "port": 5432}})
        );
    }
}
