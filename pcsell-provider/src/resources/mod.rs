//! Resource types managed by this provider
//!
//! Each submodule owns one resource type: its schema and the CRUD
//! operations that translate configuration into API calls.

pub mod catalog_plan;
pub mod iam_registration;

use std::collections::HashMap;

use pcsell_core::differ::{attribute_matches, find_changed_attributes};
use pcsell_core::provider::{ProviderError, ProviderResult, ResourceType};
use pcsell_core::resource::{ResourceId, Value};
use pcsell_core::schema::{validators, AttributeSchema, AttributeType, ResourceSchema};
use regex::Regex;

use crate::client::ApiError;
use crate::convert::ConvertError;

// =============================================================================
// Resource Type Definitions
// =============================================================================

macro_rules! define_resource_type {
    ($name:ident, $type_name:expr, $schema:path) => {
        pub struct $name;
        impl ResourceType for $name {
            fn name(&self) -> &'static str {
                $type_name
            }
            fn schema(&self) -> ResourceSchema {
                $schema()
            }
        }
    };
}

define_resource_type!(CatalogPlanType, catalog_plan::RESOURCE_TYPE, catalog_plan::schema);
define_resource_type!(
    IamRegistrationType,
    iam_registration::RESOURCE_TYPE,
    iam_registration::schema
);

/// Returns all resource types supported by this provider
pub fn resource_types() -> Vec<Box<dyn ResourceType>> {
    vec![Box::new(CatalogPlanType), Box::new(IamRegistrationType)]
}

// =============================================================================
// Shared Attributes
// =============================================================================

const PRODUCT_ID_PATTERN: &str = r"^[a-zA-Z0-9]{32}:o:[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$";
const ENV_PATTERN: &str = r"^[a-z]+$";

/// String matching `pattern` with a length in `min..=max`
pub(crate) fn matches_pattern(
    pattern: &str,
    min: usize,
    max: usize,
    value: &Value,
) -> Result<(), String> {
    let re = Regex::new(pattern).map_err(|e| e.to_string())?;
    validators::regexp_len(&re, min, max, value)
}

fn validate_product_id(value: &Value) -> Result<(), String> {
    matches_pattern(PRODUCT_ID_PATTERN, 71, 71, value)
}

fn validate_env(value: &Value) -> Result<(), String> {
    matches_pattern(ENV_PATTERN, 1, 64, value)
}

pub(crate) fn custom_string(name: &str, validate: fn(&Value) -> Result<(), String>) -> AttributeType {
    AttributeType::Custom {
        name: name.to_string(),
        base: Box::new(AttributeType::String),
        validate,
    }
}

pub(crate) fn product_id_attribute() -> AttributeSchema {
    AttributeSchema::new("product_id", custom_string("ProductId", validate_product_id))
        .required()
        .force_new()
        .with_description("The unique ID of the product.")
}

pub(crate) fn env_attribute() -> AttributeSchema {
    AttributeSchema::new("env", custom_string("Env", validate_env)).with_description(
        "The environment to fetch this object from.",
    )
}

// =============================================================================
// Operation Helpers
// =============================================================================

/// Build a discriminated provider error and log it
pub(crate) fn discriminated_error(
    id: &ResourceId,
    operation: &str,
    discriminator: &str,
    message: impl Into<String>,
) -> ProviderError {
    let err = ProviderError::new(message)
        .for_resource(id.clone())
        .discriminated(operation, discriminator);
    log::debug!(
        "{} {} {}: {}",
        id.resource_type,
        operation,
        discriminator,
        err.message
    );
    err
}

/// Error mapper for attributes that cannot be read from configuration
pub(crate) fn parse_error<'a>(
    id: &'a ResourceId,
    operation: &'a str,
    field: &'a str,
) -> impl FnOnce(ConvertError) -> ProviderError + 'a {
    move |e| discriminated_error(id, operation, &format!("parse-{}", field), e.to_string())
}

/// Error mapper for API objects that cannot be turned into attributes
pub(crate) fn to_map_error<'a>(
    id: &'a ResourceId,
    field: &'a str,
) -> impl FnOnce(ConvertError) -> ProviderError + 'a {
    move |e| discriminated_error(id, "read", &format!("{}-to-map", field), e.to_string())
}

pub(crate) fn api_error(
    id: &ResourceId,
    operation: &str,
    discriminator: &str,
    call: &str,
    err: ApiError,
) -> ProviderError {
    discriminated_error(id, operation, discriminator, format!("{} failed: {}", call, err))
        .with_cause(err)
}

pub(crate) fn required_string(
    id: &ResourceId,
    operation: &str,
    attributes: &HashMap<String, Value>,
    key: &str,
) -> ProviderResult<String> {
    attributes
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            discriminated_error(
                id,
                operation,
                &format!("parse-{}", key),
                format!("Missing required attribute '{}'", key),
            )
        })
}

/// Target environment, when configured
pub(crate) fn env_of(attributes: &HashMap<String, Value>) -> Option<String> {
    attributes
        .get("env")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Fail when an attribute that forces re-creation differs
pub(crate) fn check_force_new(
    schema: &ResourceSchema,
    id: &ResourceId,
    from: &HashMap<String, Value>,
    to: &HashMap<String, Value>,
) -> ProviderResult<()> {
    for name in schema.force_new_attributes() {
        let attr_type = schema.get(name).map(|a| &a.attr_type);
        let changed = match (from.get(name), to.get(name)) {
            (None, None) => false,
            (Some(old), Some(new)) => !attribute_matches(new, old, attr_type),
            _ => true,
        };
        if changed {
            return Err(discriminated_error(
                id,
                "update",
                &format!("{}-forces-new", name),
                format!(
                    "Cannot update resource property \"{}\" with the ForceNew annotation. The resource must be re-created to update this property.",
                    name
                ),
            ));
        }
    }
    Ok(())
}

/// Patchable top-level fields that differ between state and configuration
pub(crate) fn changed_patch_fields<'a>(
    schema: &ResourceSchema,
    patch_fields: &[&'a str],
    from: &HashMap<String, Value>,
    to: &HashMap<String, Value>,
) -> Vec<&'a str> {
    let changed = find_changed_attributes(to, from, Some(schema));
    patch_fields
        .iter()
        .copied()
        .filter(|field| changed.iter().any(|c| c == field))
        .collect()
}

/// Serialize a patch object into a JSON map
pub(crate) fn patch_body<T: serde::Serialize>(
    id: &ResourceId,
    patch: &T,
) -> ProviderResult<serde_json::Map<String, serde_json::Value>> {
    match serde_json::to_value(patch) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(discriminated_error(
            id,
            "update",
            "as-patch",
            format!("Patch serialized to a non-object: {}", other),
        )),
        Err(e) => Err(discriminated_error(id, "update", "as-patch", e.to_string())),
    }
}
