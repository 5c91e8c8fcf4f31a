//! Cache key derivation for request envelopes.
//!
//! # Key Format
//!
//! Keys follow the format `narodmon:{sha256}` where the digest covers the
//! canonical JSON form of the whole envelope (command included).
//!
//! Canonical form sorts object keys recursively, so two envelopes that differ
//! only in field insertion order map to the same key.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Prefix of every cache key produced by the client.
pub const KEY_PREFIX: &str = "narodmon:";

/// Returns `value` with every object's keys in sorted order.
///
/// Array order is significant and preserved.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let mut sorted = Map::with_capacity(entries.len());
            for (key, inner) in entries {
                sorted.insert(key.clone(), canonicalize(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Derives the cache key for an envelope.
pub fn cache_key(envelope: &Map<String, Value>) -> String {
    let canonical = canonicalize(&Value::Object(envelope.clone()));

    // Value's Display is its compact JSON serialization
    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string().as_bytes());

    format!("{}{:x}", KEY_PREFIX, hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_cache_key_format() {
        let key = cache_key(&object(json!({"cmd": "logout"})));

        assert!(key.starts_with(KEY_PREFIX));
        assert_eq!(key.len(), KEY_PREFIX.len() + 64);
    }

    #[test]
    fn test_cache_key_ignores_insertion_order() {
        let mut a = Map::new();
        a.insert("cmd".to_string(), json!("sensorNear"));
        a.insert("radius".to_string(), json!(100));
        a.insert("types".to_string(), json!([1, 2]));

        let mut b = Map::new();
        b.insert("types".to_string(), json!([1, 2]));
        b.insert("radius".to_string(), json!(100));
        b.insert("cmd".to_string(), json!("sensorNear"));

        assert_eq!(cache_key(&a), cache_key(&b));
    }

    #[test]
    fn test_cache_key_depends_on_command() {
        let a = object(json!({"cmd": "sensorDev", "id": 1}));
        let b = object(json!({"cmd": "sensorLog", "id": 1}));

        assert_ne!(cache_key(&a), cache_key(&b));
    }

    #[test]
    fn test_cache_key_depends_on_array_order() {
        let a = object(json!({"cmd": "sensorInfo", "sensors": [1, 2, 3]}));
        let b = object(json!({"cmd": "sensorInfo", "sensors": [3, 2, 1]}));

        assert_ne!(cache_key(&a), cache_key(&b));
    }

    #[test]
    fn test_canonicalize_sorts_nested_objects() {
        let mut inner = Map::new();
        inner.insert("z".to_string(), json!(1));
        inner.insert("a".to_string(), json!(2));
        let value = json!([Value::Object(inner)]);

        assert_eq!(canonicalize(&value).to_string(), r#"[{"a":2,"z":1}]"#);
    }

    proptest! {
        #[test]
        fn cache_key_is_order_independent(
            fields in proptest::collection::btree_map("[a-z]{1,8}", 0i64..1000, 0..8)
        ) {
            let forward: Map<String, Value> = fields
                .iter()
                .map(|(k, v)| (k.clone(), json!(v)))
                .collect();
            let reversed: Map<String, Value> = fields
                .iter()
                .rev()
                .map(|(k, v)| (k.clone(), json!(v)))
                .collect();

            prop_assert_eq!(cache_key(&forward), cache_key(&reversed));
        }
    }
}
