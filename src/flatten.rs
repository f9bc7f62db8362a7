//! Nested-to-flat key conversion.
//!
//! Converts nested file content into a flat map whose keys are path segments
//! joined with `_`. Objects are recursed into; arrays are leaves.

use crate::value::Value;
use serde_json::Value as Json;
use std::collections::HashMap;

/// Flatten a nested source into path-keyed leaf values.
///
/// Depth-first walk: each object level appends `_<key>` to the path (the root
/// contributes nothing, so top-level keys have no leading underscore). A leaf
/// is anything that is not an object. An empty object has no leaves and
/// produces no key; `null` leaves are dropped the same way. A non-object root
/// yields an empty map.
///
/// # Example
/// ```
/// use flatcfg::{Value, flatten};
/// use serde_json::json;
///
/// let flat = flatten(&json!({"a": {"b": {"c": 1}}}));
/// assert_eq!(flat.get("a_b_c"), Some(&Value::Int(1)));
/// ```
pub fn flatten(source: &Json) -> HashMap<String, Value> {
    let mut flat = HashMap::new();
    if let Json::Object(map) = source {
        for (key, node) in map {
            walk(key.clone(), node, &mut flat);
        }
    }
    flat
}

fn walk(path: String, node: &Json, flat: &mut HashMap<String, Value>) {
    match node {
        Json::Object(map) => {
            for (key, child) in map {
                walk(format!("{path}_{key}"), child, flat);
            }
        }
        leaf => {
            if let Some(value) = leaf_value(leaf) {
                flat.insert(path, value);
            }
        }
    }
}

fn leaf_value(leaf: &Json) -> Option<Value> {
    match leaf {
        Json::String(s) => Some(Value::Str(s.clone())),
        Json::Bool(b) => Some(Value::Bool(*b)),
        Json::Number(n) => n.as_i64().map(Value::Int).or_else(|| n.as_f64().map(Value::Float)),
        Json::Array(items) => Some(Value::List(items.iter().map(render_element).collect())),
        // Null is outside the value domain; objects are handled by walk.
        Json::Null | Json::Object(_) => None,
    }
}

/// String elements pass through verbatim; other scalars use their JSON rendering.
fn render_element(item: &Json) -> String {
    match item {
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_input_unchanged() {
        let flat = flatten(&json!({"a": 1, "b": "two", "c": true}));
        assert_eq!(flat.len(), 3);
        assert_eq!(flat.get("a"), Some(&Value::Int(1)));
        assert_eq!(flat.get("b"), Some(&Value::Str("two".to_string())));
        assert_eq!(flat.get("c"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_nested_paths_joined_with_underscore() {
        let flat = flatten(&json!({"a": {"b": {"c": 1}}}));
        assert_eq!(flat.len(), 1);
        assert_eq!(flat.get("a_b_c"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_sibling_leaves_at_each_level() {
        let flat = flatten(&json!({
            "top": "one",
            "obj": {"inner": 2, "deep": {"leaf": 3.5}}
        }));
        assert_eq!(flat.get("top"), Some(&Value::Str("one".to_string())));
        assert_eq!(flat.get("obj_inner"), Some(&Value::Int(2)));
        assert_eq!(flat.get("obj_deep_leaf"), Some(&Value::Float(3.5)));
        assert_eq!(flat.get("obj"), None);
        assert_eq!(flat.get("obj_deep"), None);
    }

    #[test]
    fn test_empty_object_leaf_dropped() {
        let flat = flatten(&json!({"a": {}, "b": 1}));
        assert_eq!(flat.len(), 1);
        assert_eq!(flat.get("a"), None);
    }

    #[test]
    fn test_null_leaf_dropped() {
        let flat = flatten(&json!({"a": null, "b": 1}));
        assert_eq!(flat.len(), 1);
    }

    #[test]
    fn test_array_is_a_leaf() {
        let flat = flatten(&json!({"items": ["a", "b"], "nums": [1, 2]}));
        assert_eq!(
            flat.get("items"),
            Some(&Value::List(vec!["a".to_string(), "b".to_string()]))
        );
        assert_eq!(
            flat.get("nums"),
            Some(&Value::List(vec!["1".to_string(), "2".to_string()]))
        );
    }

    #[test]
    fn test_non_object_root_is_empty() {
        assert!(flatten(&json!("scalar")).is_empty());
        assert!(flatten(&json!([1, 2])).is_empty());
        assert!(flatten(&json!(null)).is_empty());
    }
}
