//! Schema - Define type schemas for resources
//!
//! Providers define schemas for each resource type,
//! enabling type validation at parse time and change classification at plan time.

use std::collections::HashMap;
use std::fmt;

use crate::resource::Value;

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    /// String
    String,
    /// Integer
    Int,
    /// Floating point number (integers are accepted)
    Float,
    /// Boolean
    Bool,
    /// Enum (list of allowed values)
    Enum(Vec<String>),
    /// Custom type (with validation function)
    Custom {
        name: String,
        base: Box<AttributeType>,
        validate: fn(&Value) -> Result<(), String>,
    },
    /// List
    List(Box<AttributeType>),
    /// Map
    Map(Box<AttributeType>),
    /// Nested block(s), held as a list of maps
    Block(BlockSchema),
}

impl AttributeType {
    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Float, Value::Float(_) | Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::Enum(variants), Value::String(s)) => {
                if variants.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(TypeError::InvalidEnumVariant {
                        value: s.clone(),
                        expected: variants.clone(),
                    })
                }
            }

            (AttributeType::Custom { base, validate, .. }, v) => {
                base.validate(v)?;
                validate(v).map_err(|msg| TypeError::ValidationFailed { message: msg })
            }

            (AttributeType::List(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.validate(v).map_err(|e| TypeError::MapValueError {
                        key: k.clone(),
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Block(block), Value::List(_)) => {
                let mut errors = Vec::new();
                block.validate_at("", value, &mut errors);
                match errors.into_iter().next() {
                    Some(e) => Err(e),
                    None => Ok(()),
                }
            }

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name().to_string(),
            }),
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Float => "Float".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Enum(variants) => format!("Enum({})", variants.join(" | ")),
            AttributeType::Custom { name, .. } => name.clone(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
            AttributeType::Block(_) => "Block".to_string(),
        }
    }

    pub fn as_block(&self) -> Option<&BlockSchema> {
        match self {
            AttributeType::Block(block) => Some(block),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Type error
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid enum variant '{value}', expected one of: {}", expected.join(", "))]
    InvalidEnumVariant {
        value: String,
        expected: Vec<String>,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    #[error("Attribute '{name}' is computed and cannot be set")]
    ComputedAttribute { name: String },

    #[error("Block '{name}' allows at most {max} item(s), got {got}")]
    TooManyItems { name: String, max: usize, got: usize },

    #[error("List item at index {index}: {inner}")]
    ListItemError { index: usize, inner: Box<TypeError> },

    #[error("Map value for key '{key}': {inner}")]
    MapValueError { key: String, inner: Box<TypeError> },

    #[error("{path}: {inner}")]
    AtPath { path: String, inner: Box<TypeError> },
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    /// Filled in by the service; users may not set it
    pub computed: bool,
    /// Changing the value requires re-creating the resource
    pub force_new: bool,
    pub description: Option<String>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            computed: false,
            force_new: false,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

/// Schema of a nested block
#[derive(Debug, Clone, Default)]
pub struct BlockSchema {
    pub attributes: HashMap<String, AttributeSchema>,
    /// `Some(1)` for single nested objects
    pub max_items: Option<usize>,
}

impl BlockSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block holding a single nested object
    pub fn single() -> Self {
        Self {
            attributes: HashMap::new(),
            max_items: Some(1),
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    fn validate_at(&self, path: &str, value: &Value, errors: &mut Vec<TypeError>) {
        let Value::List(items) = value else {
            errors.push(at_path(
                path,
                TypeError::TypeMismatch {
                    expected: "Block".to_string(),
                    got: value.type_name().to_string(),
                },
            ));
            return;
        };

        if let Some(max) = self.max_items
            && items.len() > max
        {
            errors.push(TypeError::TooManyItems {
                name: path.to_string(),
                max,
                got: items.len(),
            });
        }

        for (i, item) in items.iter().enumerate() {
            let item_path = join_path(path, &i.to_string());
            match item {
                Value::Map(map) => validate_attributes(&self.attributes, map, &item_path, errors),
                other => errors.push(at_path(
                    &item_path,
                    TypeError::TypeMismatch {
                        expected: "Map".to_string(),
                        got: other.type_name().to_string(),
                    },
                )),
            }
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn at_path(path: &str, error: TypeError) -> TypeError {
    if path.is_empty() {
        error
    } else {
        TypeError::AtPath {
            path: path.to_string(),
            inner: Box::new(error),
        }
    }
}

fn validate_attributes(
    schemas: &HashMap<String, AttributeSchema>,
    attributes: &HashMap<String, Value>,
    prefix: &str,
    errors: &mut Vec<TypeError>,
) {
    let mut required: Vec<&String> = schemas
        .iter()
        .filter(|(_, s)| s.required && !s.computed)
        .map(|(name, _)| name)
        .collect();
    required.sort();
    for name in required {
        if !attributes.contains_key(name) {
            errors.push(TypeError::MissingRequired {
                name: join_path(prefix, name),
            });
        }
    }

    let mut names: Vec<&String> = attributes.keys().collect();
    names.sort();
    for name in names {
        let path = join_path(prefix, name);
        let value = &attributes[name];
        let Some(schema) = schemas.get(name) else {
            errors.push(TypeError::UnknownAttribute { name: path });
            continue;
        };
        if schema.computed && !schema.required {
            errors.push(TypeError::ComputedAttribute { name: path });
            continue;
        }
        match &schema.attr_type {
            AttributeType::Block(block) => block.validate_at(&path, value, errors),
            other => {
                if let Err(e) = other.validate(value) {
                    errors.push(at_path(&path, e));
                }
            }
        }
    }
}

/// Resource schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: HashMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: HashMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.get(name)
    }

    /// Names of attributes whose change forces re-creation, sorted
    pub fn force_new_attributes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .attributes
            .values()
            .filter(|a| a.force_new)
            .map(|a| a.name.as_str())
            .collect();
        names.sort();
        names
    }

    /// Validate resource attributes
    pub fn validate(&self, attributes: &HashMap<String, Value>) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();
        validate_attributes(&self.attributes, attributes, "", &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Reusable value checks for `AttributeType::Custom` validators
pub mod validators {
    use regex::Regex;

    use crate::resource::Value;

    /// String matching `re` with a length in `min..=max`
    pub fn regexp_len(re: &Regex, min: usize, max: usize, value: &Value) -> Result<(), String> {
        let s = expect_string(value)?;
        let len = s.chars().count();
        if len < min || len > max {
            return Err(format!(
                "value '{}' must be between {} and {} characters long",
                s, min, max
            ));
        }
        regexp(re, value)
    }

    /// String matching `re`
    pub fn regexp(re: &Regex, value: &Value) -> Result<(), String> {
        let s = expect_string(value)?;
        if re.is_match(s) {
            Ok(())
        } else {
            Err(format!("value '{}' must match regular expression {}", s, re))
        }
    }

    /// String that is one of `allowed`
    pub fn allowed_values(allowed: &[&str], value: &Value) -> Result<(), String> {
        let s = expect_string(value)?;
        if allowed.contains(&s) {
            Ok(())
        } else {
            Err(format!(
                "value '{}' must be one of: {}",
                s,
                allowed.join(", ")
            ))
        }
    }

    fn expect_string(value: &Value) -> Result<&str, String> {
        value
            .as_str()
            .ok_or_else(|| format!("Expected string, got {}", value.type_name()))
    }
}

/// Helper functions for common types
pub mod types {
    use super::*;

    pub fn string_list() -> AttributeType {
        AttributeType::List(Box::new(AttributeType::String))
    }

    pub fn string_map() -> AttributeType {
        AttributeType::Map(Box::new(AttributeType::String))
    }

    /// Single nested object
    pub fn single_block(attributes: Vec<AttributeSchema>) -> AttributeType {
        AttributeType::Block(
            attributes
                .into_iter()
                .fold(BlockSchema::single(), BlockSchema::attribute),
        )
    }

    /// Repeated nested objects
    pub fn block_list(attributes: Vec<AttributeSchema>) -> AttributeType {
        AttributeType::Block(
            attributes
                .into_iter()
                .fold(BlockSchema::new(), BlockSchema::attribute),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use std::sync::LazyLock;

    static LOWER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]+$").unwrap());

    fn lower_env() -> AttributeType {
        AttributeType::Custom {
            name: "Env".to_string(),
            base: Box::new(AttributeType::String),
            validate: |v| validators::regexp_len(&LOWER, 1, 64, v),
        }
    }

    fn plan_like_schema() -> ResourceSchema {
        ResourceSchema::new("plan")
            .attribute(AttributeSchema::new("name", AttributeType::String).required())
            .attribute(AttributeSchema::new("env", lower_env()))
            .attribute(AttributeSchema::new("url", AttributeType::String).computed())
            .attribute(AttributeSchema::new(
                "metadata",
                types::single_block(vec![
                    AttributeSchema::new("rc_compatible", AttributeType::Bool),
                    AttributeSchema::new(
                        "pricing",
                        types::single_block(vec![
                            AttributeSchema::new("type", AttributeType::String).required(),
                        ]),
                    ),
                ]),
            ))
    }

    fn block(entries: Vec<(&str, Value)>) -> Value {
        Value::block(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn validate_string_type() {
        let t = AttributeType::String;
        assert!(t.validate(&Value::String("hello".to_string())).is_ok());
        assert!(t.validate(&Value::Int(42)).is_err());
    }

    #[test]
    fn float_accepts_integers() {
        assert!(AttributeType::Float.validate(&Value::Float(72.5)).is_ok());
        assert!(AttributeType::Float.validate(&Value::Int(3)).is_ok());
        assert!(AttributeType::Float.validate(&Value::Bool(true)).is_err());
    }

    #[test]
    fn validate_enum_type() {
        let t = AttributeType::Enum(vec!["a".to_string(), "b".to_string()]);
        assert!(t.validate(&Value::String("a".to_string())).is_ok());
        assert!(t.validate(&Value::String("c".to_string())).is_err());
    }

    #[test]
    fn custom_regexp_len() {
        let t = lower_env();
        assert!(t.validate(&Value::String("prod".to_string())).is_ok());
        assert!(t.validate(&Value::String("".to_string())).is_err());
        assert!(t.validate(&Value::String("Prod".to_string())).is_err());
        assert!(t.validate(&Value::String("a".repeat(65))).is_err());
        assert!(t.validate(&Value::Int(1)).is_err());
    }

    #[test]
    fn allowed_values_message_lists_choices() {
        let err = validators::allowed_values(
            &["platform_service", "service"],
            &Value::String("other".to_string()),
        )
        .unwrap_err();
        assert_eq!(err, "value 'other' must be one of: platform_service, service");
    }

    #[test]
    fn validate_resource_schema() {
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("free-plan".to_string()));
        attrs.insert("env".to_string(), Value::String("current".to_string()));
        attrs.insert(
            "metadata".to_string(),
            block(vec![
                ("rc_compatible", Value::Bool(false)),
                (
                    "pricing",
                    block(vec![("type", Value::String("paid".to_string()))]),
                ),
            ]),
        );

        assert!(plan_like_schema().validate(&attrs).is_ok());
    }

    #[test]
    fn missing_required_attribute() {
        let schema = ResourceSchema::new("bucket")
            .attribute(AttributeSchema::new("name", AttributeType::String).required());

        let attrs = HashMap::new();
        let result = schema.validate(&attrs);
        assert!(result.is_err());
    }

    #[test]
    fn nested_errors_carry_dotted_path() {
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("free-plan".to_string()));
        attrs.insert(
            "metadata".to_string(),
            block(vec![("pricing", block(vec![("type", Value::Int(1))]))]),
        );

        let errors = plan_like_schema().validate(&attrs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "metadata.0.pricing.0.type: Type mismatch: expected String, got Int"
        );
    }

    #[test]
    fn nested_missing_required() {
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("free-plan".to_string()));
        attrs.insert(
            "metadata".to_string(),
            block(vec![("pricing", block(vec![]))]),
        );

        let errors = plan_like_schema().validate(&attrs).unwrap_err();
        assert!(matches!(
            &errors[0],
            TypeError::MissingRequired { name } if name == "metadata.0.pricing.0.type"
        ));
    }

    #[test]
    fn computed_and_unknown_attributes_are_rejected() {
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("free-plan".to_string()));
        attrs.insert("url".to_string(), Value::String("https://x".to_string()));
        attrs.insert("colour".to_string(), Value::String("red".to_string()));

        let errors = plan_like_schema().validate(&attrs).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .any(|e| matches!(e, TypeError::ComputedAttribute { name } if name == "url")));
        assert!(errors
            .iter()
            .any(|e| matches!(e, TypeError::UnknownAttribute { name } if name == "colour")));
    }

    #[test]
    fn single_block_rejects_second_item() {
        let mut pricing = HashMap::new();
        pricing.insert("type".to_string(), Value::String("paid".to_string()));
        let mut metadata = HashMap::new();
        metadata.insert("rc_compatible".to_string(), Value::Bool(true));

        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("free-plan".to_string()));
        attrs.insert(
            "metadata".to_string(),
            Value::List(vec![Value::Map(metadata.clone()), Value::Map(metadata)]),
        );

        let errors = plan_like_schema().validate(&attrs).unwrap_err();
        assert!(matches!(
            &errors[0],
            TypeError::TooManyItems { name, max: 1, got: 2 } if name == "metadata"
        ));
    }

    #[test]
    fn force_new_attributes_sorted() {
        let schema = ResourceSchema::new("r")
            .attribute(AttributeSchema::new("product_id", AttributeType::String).force_new())
            .attribute(AttributeSchema::new("catalog_product_id", AttributeType::String).force_new())
            .attribute(AttributeSchema::new("name", AttributeType::String));
        assert_eq!(
            schema.force_new_attributes(),
            vec!["catalog_product_id", "product_id"]
        );
    }
}
