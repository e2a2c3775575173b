//! Conversion between API objects and configuration attribute maps
//!
//! `*_to_map` copies every present field of an API object into an
//! attribute map; `map_to_*` builds the object back from a map. Nested
//! objects travel as single-element block lists, repeated objects as
//! block lists and translation maps as string maps.

pub mod catalog_plan;
pub mod iam_registration;

use std::collections::HashMap;

use pcsell_core::resource::Value;

/// Attribute map of one block or resource
pub type Attributes = HashMap<String, Value>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error("field '{field}': expected {expected}, got {got}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        got: &'static str,
    },
}

pub type ConvertResult<T> = Result<T, ConvertError>;

fn mismatch(field: &str, expected: &'static str, got: &Value) -> ConvertError {
    ConvertError::TypeMismatch {
        field: field.to_string(),
        expected,
        got: got.type_name(),
    }
}

// =============================================================================
// Object -> map
// =============================================================================

pub(crate) fn put_string(map: &mut Attributes, key: &str, value: &Option<String>) {
    if let Some(s) = value {
        map.insert(key.to_string(), Value::String(s.clone()));
    }
}

pub(crate) fn put_bool(map: &mut Attributes, key: &str, value: Option<bool>) {
    if let Some(b) = value {
        map.insert(key.to_string(), Value::Bool(b));
    }
}

pub(crate) fn put_f64(map: &mut Attributes, key: &str, value: Option<f64>) {
    if let Some(f) = value {
        map.insert(key.to_string(), Value::Float(f));
    }
}

pub(crate) fn put_string_list(map: &mut Attributes, key: &str, value: &Option<Vec<String>>) {
    if let Some(items) = value {
        map.insert(key.to_string(), Value::string_list(items.iter().cloned()));
    }
}

pub(crate) fn put_string_map(
    map: &mut Attributes,
    key: &str,
    value: &Option<HashMap<String, String>>,
) {
    if let Some(entries) = value {
        map.insert(key.to_string(), Value::string_map(entries));
    }
}

/// Nested object as a single-element block list
pub(crate) fn put_block<T>(
    map: &mut Attributes,
    key: &str,
    value: &Option<T>,
    to_map: fn(&T) -> ConvertResult<Attributes>,
) -> ConvertResult<()> {
    if let Some(model) = value {
        map.insert(key.to_string(), Value::block(to_map(model)?));
    }
    Ok(())
}

/// Repeated objects as a block list
pub(crate) fn put_blocks<T>(
    map: &mut Attributes,
    key: &str,
    value: &Option<Vec<T>>,
    to_map: fn(&T) -> ConvertResult<Attributes>,
) -> ConvertResult<()> {
    if let Some(models) = value {
        let items = models
            .iter()
            .map(|m| to_map(m).map(Value::Map))
            .collect::<ConvertResult<Vec<_>>>()?;
        map.insert(key.to_string(), Value::List(items));
    }
    Ok(())
}

// =============================================================================
// Map -> object
// =============================================================================

/// String field; empty strings count as unset
pub(crate) fn get_string(map: &Attributes, key: &str) -> ConvertResult<Option<String>> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(mismatch(key, "String", other)),
    }
}

pub(crate) fn get_bool(map: &Attributes, key: &str) -> ConvertResult<Option<bool>> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(mismatch(key, "Bool", other)),
    }
}

pub(crate) fn get_f64(map: &Attributes, key: &str) -> ConvertResult<Option<f64>> {
    match map.get(key) {
        None => Ok(None),
        Some(v) => v.as_f64().map(Some).ok_or_else(|| mismatch(key, "Float", v)),
    }
}

pub(crate) fn get_string_list(map: &Attributes, key: &str) -> ConvertResult<Option<Vec<String>>> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::List(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| mismatch(key, "String", item))
            })
            .collect::<ConvertResult<Vec<_>>>()
            .map(Some),
        Some(other) => Err(mismatch(key, "List", other)),
    }
}

pub(crate) fn get_string_map(
    map: &Attributes,
    key: &str,
) -> ConvertResult<Option<HashMap<String, String>>> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Map(entries)) => entries
            .iter()
            .map(|(k, v)| {
                v.as_str()
                    .map(|s| (k.clone(), s.to_string()))
                    .ok_or_else(|| mismatch(key, "String", v))
            })
            .collect::<ConvertResult<HashMap<_, _>>>()
            .map(Some),
        Some(other) => Err(mismatch(key, "Map", other)),
    }
}

/// Nested object; only taken when the block list holds a map
pub(crate) fn get_block<T>(
    map: &Attributes,
    key: &str,
    map_to: fn(&Attributes) -> ConvertResult<T>,
) -> ConvertResult<Option<T>> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::List(items)) => match items.first() {
            Some(Value::Map(inner)) => map_to(inner).map(Some),
            Some(other) => Err(mismatch(key, "Map", other)),
            None => Ok(None),
        },
        Some(other) => Err(mismatch(key, "List", other)),
    }
}

pub(crate) fn get_blocks<T>(
    map: &Attributes,
    key: &str,
    map_to: fn(&Attributes) -> ConvertResult<T>,
) -> ConvertResult<Option<Vec<T>>> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::List(items)) => items
            .iter()
            .map(|item| match item {
                Value::Map(inner) => map_to(inner),
                other => Err(mismatch(key, "Map", other)),
            })
            .collect::<ConvertResult<Vec<_>>>()
            .map(Some),
        Some(other) => Err(mismatch(key, "List", other)),
    }
}
