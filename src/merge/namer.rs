//! Namespaced keys
//!
//! A flat key such as `db.host` names a nested location. Keys are namespaced
//! only when they contain a separator after the first character, so `.hidden`
//! and `plain` stay flat.

use crate::domain::ConfigObject;
use serde_json::Value;

pub const SEPARATOR: char = '.';

pub fn is_namespaced(key: &str) -> bool {
    key.find(SEPARATOR).is_some_and(|idx| idx > 0)
}

/// Build the nested object a namespaced key describes.
///
/// `nest("a.b.c", 5)` yields `{"a": {"b": {"c": 5}}}`. The last segment holds
/// the value; each earlier segment wraps the result in one more level.
pub fn nest(key: &str, value: Value) -> ConfigObject {
    let mut segments = key.rsplit(SEPARATOR);
    let mut inner = ConfigObject::new();
    // rsplit always yields at least one segment
    let leaf = segments.next().unwrap_or(key);
    inner.insert(leaf.to_string(), value);

    for segment in segments {
        let mut outer = ConfigObject::new();
        outer.insert(segment.to_string(), Value::Object(inner));
        inner = outer;
    }
    inner
}

/// Replace every namespaced key in `flat` with its nested form.
///
/// Flat keys are kept as they are. Expansions are deep-merged onto the result
/// in key order, so `a.b` and `a.c` end up side by side under `a`, and a
/// namespaced key takes precedence over a plain scalar with the same head.
pub fn expand_namespaced(flat: ConfigObject) -> ConfigObject {
    let mut expanded = ConfigObject::new();
    let mut namespaced = Vec::new();
    for (key, value) in flat {
        if is_namespaced(&key) {
            namespaced.push((key, value));
        } else {
            expanded.insert(key, value);
        }
    }

    for (key, value) in namespaced {
        super::merge_owned(&mut expanded, nest(&key, value));
    }
    expanded
}
