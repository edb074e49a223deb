//! Structural merge of JSON documents
//!
//! Merge semantics:
//! - Objects: deep-merge by key, incoming-only keys appended in incoming order
//! - Arrays: union, base elements first, incoming elements not yet present appended
//! - Null incoming: base is kept
//! - Scalars and mismatched kinds: incoming wins

use serde_json::Value;

/// Deep merge `incoming` onto `base`.
///
/// `incoming` is consumed, never modified in place from the caller's view.
/// Key positions already present in `base` are preserved.
pub fn deep_merge(base: Value, incoming: Value) -> Value {
    match (base, incoming) {
        // Null never clobbers
        (base, Value::Null) => base,

        (Value::Object(mut base_map), Value::Object(incoming_map)) => {
            for (key, incoming_value) in incoming_map {
                match base_map.get_mut(&key) {
                    Some(slot) => {
                        let existing = std::mem::take(slot);
                        *slot = deep_merge(existing, incoming_value);
                    }
                    None => {
                        base_map.insert(key, incoming_value);
                    }
                }
            }
            Value::Object(base_map)
        }

        (Value::Array(mut items), Value::Array(incoming_items)) => {
            for item in incoming_items {
                if !items.contains(&item) {
                    items.push(item);
                }
            }
            Value::Array(items)
        }

        (_, incoming) => incoming,
    }
}

/// Merge multiple documents in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers.into_iter().fold(Value::Null, deep_merge)
}
