//! Merge-patch builder
//!
//! A patch body starts as the serialized patch object, which carries the
//! desired value of every changed top-level field. It is then adjusted
//! against the schema so that removed settings are sent as `null` and
//! settings absent from the configuration are left out of nested objects.
//! Keys dropped from a map are sent as `null` one by one; maps the API
//! carries inline in their parent object are nulled at the parent level.

use std::collections::HashMap;

use pcsell_core::resource::Value;
use pcsell_core::schema::{AttributeSchema, AttributeType, BlockSchema, ResourceSchema};
use serde_json::{Map, Value as JsonValue};

/// Map attributes whose entries sit directly in the enclosing object
const INLINE_MAPS: &[&str] = &["additional_properties"];

/// Adjust `patch` for the top-level `fields` the patch object can carry
pub fn as_patch(
    patch: &mut Map<String, JsonValue>,
    schema: &ResourceSchema,
    fields: &[&str],
    from: &HashMap<String, Value>,
    to: &HashMap<String, Value>,
) {
    for &name in fields {
        let Some(attr) = schema.get(name) else {
            continue;
        };
        if is_map(attr) && exists(to, name) {
            if let Some(JsonValue::Object(map)) = patch.get_mut(name) {
                null_removed_keys(map, from, to, name);
            }
            continue;
        }
        if !exists(to, name) {
            if has_change(from, to, name) {
                patch.insert(name.to_string(), JsonValue::Null);
            }
            continue;
        }
        if let Some(block) = attr.attr_type.as_block()
            && let Some(nested) = patch.get_mut(name)
        {
            patch_nested(nested, block, name, from, to);
        }
    }
}

fn patch_nested(
    value: &mut JsonValue,
    block: &BlockSchema,
    path: &str,
    from: &HashMap<String, Value>,
    to: &HashMap<String, Value>,
) {
    match value {
        JsonValue::Object(inner) => patch_block(inner, &block.attributes, &format!("{path}.0"), from, to),
        JsonValue::Array(items) => {
            for (i, item) in items.iter_mut().enumerate() {
                if let JsonValue::Object(inner) = item {
                    patch_block(inner, &block.attributes, &format!("{path}.{i}"), from, to);
                }
            }
        }
        _ => {}
    }
}

fn patch_block(
    patch: &mut Map<String, JsonValue>,
    attributes: &HashMap<String, AttributeSchema>,
    path: &str,
    from: &HashMap<String, Value>,
    to: &HashMap<String, Value>,
) {
    for (name, attr) in attributes {
        if attr.computed {
            continue;
        }
        let attr_path = format!("{path}.{name}");
        if is_map(attr) && INLINE_MAPS.contains(&name.as_str()) {
            patch.remove(name);
            null_removed_keys(patch, from, to, &attr_path);
            continue;
        }
        if is_map(attr) && exists(to, &attr_path) {
            if let Some(JsonValue::Object(map)) = patch.get_mut(name) {
                null_removed_keys(map, from, to, &attr_path);
            }
            continue;
        }
        if !exists(to, &attr_path) {
            if has_change(from, to, &attr_path) {
                patch.insert(name.clone(), JsonValue::Null);
            } else {
                patch.remove(name);
            }
            continue;
        }
        if let Some(block) = attr.attr_type.as_block()
            && let Some(nested) = patch.get_mut(name)
        {
            patch_nested(nested, block, &attr_path, from, to);
        }
    }
}

fn is_map(attr: &AttributeSchema) -> bool {
    matches!(attr.attr_type, AttributeType::Map(_))
}

/// Null every key of the map at `path` that the configuration dropped
fn null_removed_keys(
    target: &mut Map<String, JsonValue>,
    from: &HashMap<String, Value>,
    to: &HashMap<String, Value>,
    path: &str,
) {
    let Some(old) = Value::lookup(from, path).and_then(Value::as_map) else {
        return;
    };
    let new = Value::lookup(to, path).and_then(Value::as_map);
    for (key, value) in old {
        if value.is_empty() || new.is_some_and(|m| m.contains_key(key)) {
            continue;
        }
        target.insert(key.clone(), JsonValue::Null);
    }
}

/// Set in the configuration with a non-empty value
fn exists(to: &HashMap<String, Value>, path: &str) -> bool {
    Value::lookup(to, path).is_some_and(|v| !v.is_empty())
}

fn has_change(from: &HashMap<String, Value>, to: &HashMap<String, Value>, path: &str) -> bool {
    match (Value::lookup(from, path), Value::lookup(to, path)) {
        (None, None) => false,
        (Some(old), Some(new)) => old != new,
        (Some(v), None) | (None, Some(v)) => !v.is_empty(),
    }
}
