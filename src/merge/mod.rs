//! Deep merging of configuration objects
//!
//! Objects are merged key by key at every depth. Every other value (strings,
//! numbers, booleans, null and arrays) is replaced wholesale by the later source,
//! as is any object/non-object conflict.

use crate::domain::ConfigObject;
use serde_json::Value;

pub mod namer;

pub use namer::{expand_namespaced, is_namespaced, nest, SEPARATOR};

/// Merge `sources` left to right into a fresh object.
///
/// Later sources win on conflicting keys. Inputs are never modified, so the
/// same object can be passed to several merges. No sources yields `{}`.
pub fn deep_merge<'a, I>(sources: I) -> ConfigObject
where
    I: IntoIterator<Item = &'a ConfigObject>,
{
    let mut merged = ConfigObject::new();
    for source in sources {
        merge_into(&mut merged, source);
    }
    merged
}

/// Merge `source` onto `target` in place.
pub fn merge_into(target: &mut ConfigObject, source: &ConfigObject) {
    for (key, value) in source {
        match value {
            Value::Object(incoming) => match target.get_mut(key) {
                Some(Value::Object(existing)) => merge_into(existing, incoming),
                _ => {
                    target.insert(key.clone(), value.clone());
                }
            },
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Like [`merge_into`] but consumes `source`, avoiding clones.
pub fn merge_owned(target: &mut ConfigObject, source: ConfigObject) {
    for (key, value) in source {
        match value {
            Value::Object(incoming) => match target.get_mut(&key) {
                Some(Value::Object(existing)) => merge_owned(existing, incoming),
                _ => {
                    target.insert(key, Value::Object(incoming));
                }
            },
            value => {
                target.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> ConfigObject {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn empty_input_yields_empty_object() {
        let merged = deep_merge(std::iter::empty());
        assert!(merged.is_empty());
    }

    #[test]
    fn later_scalar_wins() {
        let a = obj(json!({"name": "My App"}));
        let b = obj(json!({"name": "Foo"}));
        assert_eq!(Value::Object(deep_merge([&a, &b])), json!({"name": "Foo"}));
    }

    #[test]
    fn nested_objects_are_unioned() {
        let a = obj(json!({"a": {"x": 1}}));
        let b = obj(json!({"a": {"y": 2}}));
        assert_eq!(Value::Object(deep_merge([&a, &b])), json!({"a": {"x": 1, "y": 2}}));
    }

    #[test]
    fn deep_conflicts_resolve_to_later_source() {
        let a = obj(json!({"db": {"host": "localhost", "pool": {"min": 1, "max": 5}}}));
        let b = obj(json!({"db": {"pool": {"max": 20}}}));
        assert_eq!(
            Value::Object(deep_merge([&a, &b])),
            json!({"db": {"host": "localhost", "pool": {"min": 1, "max": 20}}})
        );
    }

    #[test]
    fn scalar_and_object_conflicts_take_later_value_entirely() {
        let a = obj(json!({"db": {"host": "localhost"}}));
        let b = obj(json!({"db": "postgres://db"}));
        assert_eq!(Value::Object(deep_merge([&a, &b])), json!({"db": "postgres://db"}));
        assert_eq!(Value::Object(deep_merge([&b, &a])), json!({"db": {"host": "localhost"}}));
    }

    #[test]
    fn arrays_are_replaced_not_merged() {
        let a = obj(json!({"hosts": ["a", "b", "c"]}));
        let b = obj(json!({"hosts": ["z"]}));
        assert_eq!(Value::Object(deep_merge([&a, &b])), json!({"hosts": ["z"]}));
    }

    #[test]
    fn null_overrides_earlier_value() {
        let a = obj(json!({"timeout": 30}));
        let b = obj(json!({"timeout": null}));
        assert_eq!(Value::Object(deep_merge([&a, &b])), json!({"timeout": null}));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let a = obj(json!({"a": {"x": 1}, "list": [1, 2]}));
        let b = obj(json!({"a": {"x": 2, "y": 3}, "list": [3]}));
        let (a_before, b_before) = (a.clone(), b.clone());
        let _ = deep_merge([&a, &b]);
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn folding_is_consistent() {
        let a = obj(json!({"a": {"x": 1}, "n": 1}));
        let b = obj(json!({"a": {"y": 2}, "n": 2}));
        let c = obj(json!({"a": {"x": 3}, "m": true}));
        let all_at_once = deep_merge([&a, &b, &c]);
        let ab = deep_merge([&a, &b]);
        let stepwise = deep_merge([&ab, &c]);
        assert_eq!(all_at_once, stepwise);
    }

    #[test]
    fn owned_merge_matches_borrowed_merge() {
        let a = obj(json!({"a": {"x": 1}, "s": "keep"}));
        let b = obj(json!({"a": {"y": 2}, "s": "override"}));
        let mut owned = a.clone();
        merge_owned(&mut owned, b.clone());
        assert_eq!(owned, deep_merge([&a, &b]));
    }
}
