//! Loose emptiness, list coercion and key-set helpers over JSON values and
//! ordered maps.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::error::{DomainError, DomainResult};

/// True when the value renders as an empty string.
///
/// `null`, `false` and `""` are empty; numbers and `true` never are. Arrays
/// and objects are empty when every element is, so `[]`, `{}` and
/// `[null, ["", false]]` all qualify.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(_) => false,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.iter().all(is_blank),
        Value::Object(map) => map.values().all(is_blank),
    }
}

/// Wrap a scalar in a one-element array; arrays and objects pass through.
///
/// With `skip_blank`, a blank scalar becomes an empty array instead.
pub fn to_array(value: Value, skip_blank: bool) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) => value,
        scalar if skip_blank && is_blank(&scalar) => Value::Array(Vec::new()),
        scalar => Value::Array(vec![scalar]),
    }
}

/// Pick `keys` from the first source object that has each of them.
///
/// Sources are tried in order. A source that is not an object is the fallback
/// for every key still missing, and later sources are ignored. Keys found
/// nowhere map to `null`.
///
/// ```
/// use serde_json::json;
/// use vvkit::domain::map::aget;
///
/// let picked = aget(&["a", "b", "c"], [&json!({"a": 1}), &json!({"a": 9, "b": 2}), &json!(0)]);
/// assert_eq!(serde_json::Value::Object(picked), json!({"a": 1, "b": 2, "c": 0}));
/// ```
pub fn aget<'a, I>(keys: &[&str], sources: I) -> Map<String, Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut picked = Map::new();
    let mut fallback = Value::Null;
    for source in sources {
        match source {
            Value::Object(map) => {
                for key in keys {
                    if !picked.contains_key(*key) {
                        if let Some(v) = map.get(*key) {
                            picked.insert((*key).to_string(), v.clone());
                        }
                    }
                }
            }
            other => {
                fallback = other.clone();
                break;
            }
        }
    }
    keys.iter()
        .map(|key| {
            let value = picked.remove(*key).unwrap_or_else(|| fallback.clone());
            ((*key).to_string(), value)
        })
        .collect()
}

fn key_set<'q, Q: ?Sized + Hash + Eq>(keys: &[&'q Q]) -> HashSet<&'q Q> {
    keys.iter().copied().collect()
}

/// Entries of `map` whose key is in `keys`, in map order.
pub fn intersect_key<K, V, Q>(map: &IndexMap<K, V>, keys: &[&Q]) -> IndexMap<K, V>
where
    K: Hash + Eq + Clone + Borrow<Q>,
    V: Clone,
    Q: ?Sized + Hash + Eq,
{
    let wanted = key_set(keys);
    map.iter()
        .filter(|(k, _)| wanted.contains(Borrow::<Q>::borrow(*k)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Entries of `map` whose key is not in `keys`, in map order.
pub fn diff_key<K, V, Q>(map: &IndexMap<K, V>, keys: &[&Q]) -> IndexMap<K, V>
where
    K: Hash + Eq + Clone + Borrow<Q>,
    V: Clone,
    Q: ?Sized + Hash + Eq,
{
    let unwanted = key_set(keys);
    map.iter()
        .filter(|(k, _)| !unwanted.contains(Borrow::<Q>::borrow(*k)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Remove `keys` in place, keeping the order of what remains.
pub fn unset_key<K, V, Q>(map: &mut IndexMap<K, V>, keys: &[&Q])
where
    K: Hash + Eq + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
{
    for key in keys {
        map.shift_remove(*key);
    }
}

/// Remove `key` and return its value.
pub fn shift_key<K, V, Q>(map: &mut IndexMap<K, V>, key: &Q) -> Option<V>
where
    K: Hash + Eq + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
{
    map.shift_remove(key)
}

/// Remove every key and return the values in `keys` order.
pub fn shift_keys<K, V, Q>(map: &mut IndexMap<K, V>, keys: &[&Q]) -> Vec<Option<V>>
where
    K: Hash + Eq + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
{
    keys.iter().map(|key| map.shift_remove(*key)).collect()
}

/// Compact JSON with non-ASCII and `/` left unescaped.
pub fn json_encode<T: Serialize + ?Sized>(data: &T) -> DomainResult<String> {
    serde_json::to_string(data).map_err(|e| DomainError::JsonEncode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_nested_blank_arrays_when_checking_then_blank() {
        assert!(is_blank(&json!([null, ["", false], {}])));
        assert!(!is_blank(&json!([null, [0]])));
    }

    #[test]
    fn given_map_with_non_string_keys_when_encoding_then_fails() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], 1);
        assert!(matches!(json_encode(&map), Err(DomainError::JsonEncode(_))));
    }
}
