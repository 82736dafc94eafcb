//! JSON helpers for applying partial updates to records.
//!
//! Records are schema-less `serde_json::Value`s. Updates are deep-merged into the
//! stored value: nested objects merge field by field, every other value type
//! (arrays included) is overwritten by the incoming value.

use serde_json::{Map, Value};

/// A stored document.
pub type Record = Value;

/// Deep copy of a value.
///
/// `serde_json::Value` owns all of its children, so a clone never shares state
/// with its source.
#[inline]
pub fn deep_clone(value: &Value) -> Value {
    value.clone()
}

/// Merge `source` into `target` in place.
///
/// For every field of an object `source`:
/// - an object value is merged recursively into the matching field of `target`
///   (a missing or non-object field is replaced by `{}` first)
/// - any other value overwrites the field
///
/// A non-object `source` replaces `target` entirely.
///
/// # Example
/// ```
/// use indicium_commons::json::deep_merge;
/// use serde_json::json;
///
/// let mut target = json!({ "a": { "b": 1, "c": 2 }, "tags": [1, 2] });
/// deep_merge(&mut target, &json!({ "a": { "b": 10 }, "tags": [3] }));
/// assert_eq!(target, json!({ "a": { "b": 10, "c": 2 }, "tags": [3] }));
/// ```
pub fn deep_merge(target: &mut Value, source: &Value) {
    let Value::Object(source_fields) = source else {
        *target = source.clone();
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Value::Object(target_fields) = target else {
        return;
    };

    for (key, value) in source_fields {
        if value.is_object() {
            let slot = target_fields
                .entry(key.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            deep_merge(slot, value);
        } else {
            target_fields.insert(key.clone(), value.clone());
        }
    }
}

/// Turn a dotted path into a nested object.
///
/// `expand_dotted_path("a.b.c", 1)` returns `{"a": {"b": {"c": 1}}}`. A path
/// without dots yields a single-field object.
pub fn expand_dotted_path(path: &str, value: Value) -> Value {
    path.rsplit('.').fold(value, |inner, segment| {
        let mut fields = Map::new();
        fields.insert(segment.to_string(), inner);
        Value::Object(fields)
    })
}

/// Input accepted by a record update.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateInput {
    /// A partial document, merged as-is. Must be a JSON object.
    Document(Value),
    /// `(dotted.path, value)` pairs, expanded and merged in order.
    Paths(Vec<(String, Value)>),
}

impl UpdateInput {
    /// Normalize into a single object patch.
    ///
    /// Returns `None` when a `Document` input is not a JSON object.
    pub fn into_patch(self) -> Option<Value> {
        match self {
            UpdateInput::Document(value) if value.is_object() => Some(value),
            UpdateInput::Document(_) => None,
            UpdateInput::Paths(entries) => {
                let mut patch = Value::Object(Map::new());
                for (path, value) in entries {
                    deep_merge(&mut patch, &expand_dotted_path(&path, value));
                }
                Some(patch)
            }
        }
    }
}

impl From<Value> for UpdateInput {
    fn from(value: Value) -> Self {
        UpdateInput::Document(value)
    }
}

impl From<Map<String, Value>> for UpdateInput {
    fn from(fields: Map<String, Value>) -> Self {
        UpdateInput::Document(Value::Object(fields))
    }
}

impl From<Vec<(String, Value)>> for UpdateInput {
    fn from(entries: Vec<(String, Value)>) -> Self {
        UpdateInput::Paths(entries)
    }
}

impl From<Vec<(&str, Value)>> for UpdateInput {
    fn from(entries: Vec<(&str, Value)>) -> Self {
        UpdateInput::Paths(
            entries
                .into_iter()
                .map(|(path, value)| (path.to_string(), value))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_into_empty() {
        let mut target = json!({});
        deep_merge(&mut target, &json!({ "name": "Ann", "age": 30 }));
        assert_eq!(target, json!({ "name": "Ann", "age": 30 }));
    }

    #[test]
    fn test_merge_overwrites_scalars_and_keeps_others() {
        let mut target = json!({ "name": "Ann", "age": 30 });
        deep_merge(&mut target, &json!({ "age": 31 }));
        assert_eq!(target, json!({ "name": "Ann", "age": 31 }));
    }

    #[test]
    fn test_merge_replaces_non_object_with_object() {
        let mut target = json!({ "a": 5 });
        deep_merge(&mut target, &json!({ "a": { "b": 1 } }));
        assert_eq!(target, json!({ "a": { "b": 1 } }));

        let mut target = json!("scalar record");
        deep_merge(&mut target, &json!({ "a": 1 }));
        assert_eq!(target, json!({ "a": 1 }));
    }

    #[test]
    fn test_arrays_are_overwritten_not_appended() {
        let mut target = json!({ "tags": ["a", "b"] });
        let patch = json!({ "tags": ["c"] });
        deep_merge(&mut target, &patch);
        deep_merge(&mut target, &patch);
        assert_eq!(target, json!({ "tags": ["c"] }));
    }

    #[test]
    fn test_null_overwrites() {
        let mut target = json!({ "a": { "b": 1 } });
        deep_merge(&mut target, &json!({ "a": null }));
        assert_eq!(target, json!({ "a": null }));
    }

    #[test]
    fn test_expand_dotted_path() {
        assert_eq!(expand_dotted_path("a", json!(1)), json!({ "a": 1 }));
        assert_eq!(
            expand_dotted_path("a.b.c", json!(true)),
            json!({ "a": { "b": { "c": true } } })
        );
    }

    #[test]
    fn test_paths_input_merges_in_order() {
        let input = UpdateInput::from(vec![
            ("a.b", json!(1)),
            ("a.c", json!(2)),
            ("x", json!(5)),
            ("x.y", json!(6)),
        ]);
        assert_eq!(
            input.into_patch(),
            Some(json!({ "a": { "b": 1, "c": 2 }, "x": { "y": 6 } }))
        );
    }

    #[test]
    fn test_dotted_path_matches_nested_document() {
        let dotted = UpdateInput::from(vec![("a.b", json!(1))]).into_patch();
        let nested = UpdateInput::from(json!({ "a": { "b": 1 } })).into_patch();
        assert_eq!(dotted, nested);
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        assert_eq!(UpdateInput::from(json!([1, 2])).into_patch(), None);
        assert_eq!(UpdateInput::from(json!(3)).into_patch(), None);
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let original = json!({ "a": { "b": [1, 2] } });
        let mut copy = deep_clone(&original);
        deep_merge(&mut copy, &json!({ "a": { "b": [] } }));
        assert_eq!(original, json!({ "a": { "b": [1, 2] } }));
    }
}
