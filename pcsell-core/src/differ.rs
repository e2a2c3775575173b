//! Differ - Compare desired state with current state to generate a Plan
//!
//! Compares the "desired state" declared in configuration with the "current state"
//! fetched from the Provider, and generates a list of required Effects (Plan).

use std::collections::HashMap;

use crate::effect::Effect;
use crate::plan::Plan;
use crate::resource::{Resource, ResourceId, State, Value};
use crate::schema::{AttributeType, BlockSchema, ResourceSchema};

/// Result of a diff operation
#[derive(Debug, Clone, PartialEq)]
pub enum Diff {
    /// Resource does not exist -> needs creation
    Create(Resource),
    /// Resource exists with differences -> needs update
    Update {
        id: ResourceId,
        from: State,
        to: Resource,
        changed_attributes: Vec<String>,
    },
    /// Resource exists with no differences -> no action needed
    NoChange(ResourceId),
    /// Resource exists but not in desired state -> needs deletion
    Delete(ResourceId),
}

impl Diff {
    /// Returns whether this Diff involves a change
    pub fn is_change(&self) -> bool {
        !matches!(self, Diff::NoChange(_))
    }
}

/// Compare desired state with current state to compute a Diff
pub fn diff(desired: &Resource, current: &State, schema: Option<&ResourceSchema>) -> Diff {
    if !current.exists {
        return Diff::Create(desired.clone());
    }

    let changed = find_changed_attributes(&desired.attributes, &current.attributes, schema);

    if changed.is_empty() {
        Diff::NoChange(desired.id.clone())
    } else {
        Diff::Update {
            id: desired.id.clone(),
            from: current.clone(),
            to: desired.clone(),
            changed_attributes: changed,
        }
    }
}

/// Find changed attributes between desired and current state
///
/// A key counts as changed when the desired value does not match the current
/// one, or when an optional, user-settable attribute is present in current
/// state but no longer declared. With a schema, the same holds inside
/// nested blocks and maps.
pub fn find_changed_attributes(
    desired: &HashMap<String, Value>,
    current: &HashMap<String, Value>,
    schema: Option<&ResourceSchema>,
) -> Vec<String> {
    let mut changed = Vec::new();

    for (key, desired_value) in desired {
        let attr_type = schema.and_then(|s| s.get(key)).map(|a| &a.attr_type);
        match current.get(key) {
            Some(current_value) if attribute_matches(desired_value, current_value, attr_type) => {}
            _ => changed.push(key.clone()),
        }
    }

    if let Some(schema) = schema {
        for (key, current_value) in current {
            if desired.contains_key(key) || current_value.is_empty() {
                continue;
            }
            if let Some(attr) = schema.get(key)
                && !attr.required
                && !attr.computed
            {
                changed.push(key.clone());
            }
        }
    }

    changed.sort();
    changed
}

/// Compare a desired value against what the service holds
///
/// Maps are compared on the keys the configuration sets, so fields the
/// service fills in on its own do not show up as drift.
pub fn value_matches(desired: &Value, current: &Value) -> bool {
    match (desired, current) {
        (Value::Map(d), Value::Map(c)) => d
            .iter()
            .all(|(k, dv)| c.get(k).is_some_and(|cv| value_matches(dv, cv))),
        (Value::List(d), Value::List(c)) => {
            d.len() == c.len() && d.iter().zip(c).all(|(dv, cv)| value_matches(dv, cv))
        }
        (Value::Float(_), Value::Int(_)) | (Value::Int(_), Value::Float(_)) => {
            desired.as_f64() == current.as_f64()
        }
        _ => desired == current,
    }
}

/// Compare a desired value against what the service holds, guided by its type
///
/// Inside blocks, user-settable fields present in current but missing from
/// desired are a change; computed and unknown fields are not. Maps are set
/// by the user as a whole and must hold the same keys.
pub fn attribute_matches(desired: &Value, current: &Value, attr_type: Option<&AttributeType>) -> bool {
    match (attr_type, desired, current) {
        (Some(AttributeType::Block(block)), Value::List(d), Value::List(c)) => {
            d.len() == c.len()
                && d.iter().zip(c).all(|(dv, cv)| match (dv, cv) {
                    (Value::Map(dm), Value::Map(cm)) => block_matches(block, dm, cm),
                    _ => value_matches(dv, cv),
                })
        }
        (Some(AttributeType::Map(inner)), Value::Map(d), Value::Map(c)) => {
            d.iter()
                .all(|(k, dv)| c.get(k).is_some_and(|cv| attribute_matches(dv, cv, Some(inner))))
                && c.iter().all(|(k, cv)| d.contains_key(k) || cv.is_empty())
        }
        (Some(AttributeType::List(inner)), Value::List(d), Value::List(c)) => {
            d.len() == c.len()
                && d.iter()
                    .zip(c)
                    .all(|(dv, cv)| attribute_matches(dv, cv, Some(inner)))
        }
        (Some(AttributeType::Custom { base, .. }), _, _) => {
            attribute_matches(desired, current, Some(base))
        }
        _ => value_matches(desired, current),
    }
}

fn block_matches(
    block: &BlockSchema,
    desired: &HashMap<String, Value>,
    current: &HashMap<String, Value>,
) -> bool {
    let declared_match = desired.iter().all(|(k, dv)| {
        let attr_type = block.attributes.get(k).map(|a| &a.attr_type);
        current
            .get(k)
            .is_some_and(|cv| attribute_matches(dv, cv, attr_type))
    });
    let nothing_removed = current.iter().all(|(k, cv)| {
        desired.contains_key(k)
            || cv.is_empty()
            || block.attributes.get(k).is_none_or(|a| a.computed)
    });
    declared_match && nothing_removed
}

/// Compute Diff for multiple resources and generate a Plan
///
/// `orphans` are states recorded earlier whose resources are no longer
/// declared; they are deleted.
pub fn create_plan(
    desired: &[Resource],
    current_states: &HashMap<ResourceId, State>,
    orphans: &[State],
    schemas: &HashMap<String, ResourceSchema>,
) -> Plan {
    let mut plan = Plan::new();

    for resource in desired {
        let current = current_states
            .get(&resource.id)
            .cloned()
            .unwrap_or_else(|| State::not_found(resource.id.clone()));

        let d = diff(
            resource,
            &current,
            schemas.get(&resource.id.resource_type),
        );

        match d {
            Diff::Create(r) => plan.add(Effect::Create(r)),
            Diff::Update {
                id,
                from,
                to,
                changed_attributes,
            } => {
                plan.add(Effect::Update {
                    id,
                    from,
                    to,
                    changed: changed_attributes,
                });
            }
            Diff::NoChange(_) => {}
            Diff::Delete(id) => {
                if let Some(state) = current_states.get(&id) {
                    add_delete(&mut plan, state);
                }
            }
        }
    }

    for orphan in orphans {
        add_delete(&mut plan, orphan);
    }

    plan
}

/// Plan the deletion of every given state
pub fn create_destroy_plan(states: &[State]) -> Plan {
    let mut plan = Plan::new();
    for state in states {
        add_delete(&mut plan, state);
    }
    plan
}

/// Plan bringing a remote object under management
pub fn create_import_plan(id: ResourceId, identifier: impl Into<String>) -> Plan {
    let mut plan = Plan::new();
    plan.add(Effect::Import {
        id,
        identifier: identifier.into(),
    });
    plan
}

fn add_delete(plan: &mut Plan, state: &State) {
    if let Some(identifier) = &state.identifier {
        plan.add(Effect::Delete {
            id: state.id.clone(),
            identifier: identifier.clone(),
            known: state.attributes.clone(),
        });
    } else {
        log::debug!("skipping delete of {}: no identifier recorded", state.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{types, AttributeSchema, AttributeType};

    fn plan_schema() -> ResourceSchema {
        ResourceSchema::new("plan")
            .attribute(AttributeSchema::new("name", AttributeType::String).required())
            .attribute(AttributeSchema::new(
                "pricing_tags",
                AttributeType::List(Box::new(AttributeType::String)),
            ))
            .attribute(AttributeSchema::new("url", AttributeType::String).computed())
    }

    fn existing(attrs: Vec<(&str, Value)>) -> State {
        State::existing(
            ResourceId::new("plan", "test"),
            attrs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
        .with_identifier("p/c/plan")
    }

    #[test]
    fn diff_create_when_not_exists() {
        let desired = Resource::new("plan", "test");
        let current = State::not_found(ResourceId::new("plan", "test"));

        let result = diff(&desired, &current, None);
        assert!(matches!(result, Diff::Create(_)));
    }

    #[test]
    fn diff_no_change_when_same() {
        let desired =
            Resource::new("plan", "test").with_attribute("name", Value::String("free".to_string()));
        let current = existing(vec![
            ("name", Value::String("free".to_string())),
            ("url", Value::String("https://example.com".to_string())),
        ]);

        let result = diff(&desired, &current, Some(&plan_schema()));
        assert!(matches!(result, Diff::NoChange(_)));
    }

    #[test]
    fn diff_update_when_different() {
        let desired =
            Resource::new("plan", "test").with_attribute("name", Value::String("paid".to_string()));
        let current = existing(vec![("name", Value::String("free".to_string()))]);

        match diff(&desired, &current, None) {
            Diff::Update {
                changed_attributes, ..
            } => assert_eq!(changed_attributes, vec!["name".to_string()]),
            other => panic!("Expected Update, got {:?}", other),
        }
    }

    #[test]
    fn removed_optional_attribute_is_a_change() {
        let desired =
            Resource::new("plan", "test").with_attribute("name", Value::String("free".to_string()));
        let current = existing(vec![
            ("name", Value::String("free".to_string())),
            ("pricing_tags", Value::string_list(["free"])),
        ]);

        match diff(&desired, &current, Some(&plan_schema())) {
            Diff::Update {
                changed_attributes, ..
            } => assert_eq!(changed_attributes, vec!["pricing_tags".to_string()]),
            other => panic!("Expected Update, got {:?}", other),
        }
    }

    #[test]
    fn service_filled_nested_fields_are_not_drift() {
        let mut desired_ui = HashMap::new();
        desired_ui.insert("hidden".to_string(), Value::Bool(true));

        let mut current_ui = desired_ui.clone();
        current_ui.insert("side_by_side_index".to_string(), Value::Int(0));

        assert!(value_matches(
            &Value::block(desired_ui.clone()),
            &Value::block(current_ui.clone())
        ));

        desired_ui.insert("hidden".to_string(), Value::Bool(false));
        assert!(!value_matches(
            &Value::block(desired_ui),
            &Value::block(current_ui)
        ));
    }

    fn display_name_schema() -> ResourceSchema {
        ResourceSchema::new("registration").attribute(AttributeSchema::new(
            "display_name",
            types::single_block(vec![
                AttributeSchema::new("default", AttributeType::String),
                AttributeSchema::new("en", AttributeType::String),
                AttributeSchema::new("updated_at", AttributeType::String).computed(),
            ]),
        ))
    }

    fn display_name(entries: Vec<(&str, &str)>) -> Value {
        Value::block(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect(),
        )
    }

    #[test]
    fn removed_nested_field_is_a_change() {
        let desired = Resource::new("registration", "test")
            .with_attribute("display_name", display_name(vec![("default", "x")]));
        let current = existing(vec![(
            "display_name",
            display_name(vec![("default", "x"), ("en", "y")]),
        )]);

        match diff(&desired, &current, Some(&display_name_schema())) {
            Diff::Update {
                changed_attributes, ..
            } => assert_eq!(changed_attributes, vec!["display_name".to_string()]),
            other => panic!("Expected Update, got {:?}", other),
        }
    }

    #[test]
    fn computed_nested_field_is_not_a_change() {
        let desired = Resource::new("registration", "test")
            .with_attribute("display_name", display_name(vec![("default", "x")]));
        let current = existing(vec![(
            "display_name",
            display_name(vec![("default", "x"), ("updated_at", "2024-01-01")]),
        )]);

        let result = diff(&desired, &current, Some(&display_name_schema()));
        assert!(matches!(result, Diff::NoChange(_)));
    }

    #[test]
    fn removed_map_key_is_a_change() {
        let map_type = types::string_map();
        let desired = Value::string_map(&HashMap::from([("en".to_string(), "Free".to_string())]));
        let current = Value::string_map(&HashMap::from([
            ("en".to_string(), "Free".to_string()),
            ("fr".to_string(), "Gratuit".to_string()),
        ]));

        assert!(!attribute_matches(&desired, &current, Some(&map_type)));
        assert!(attribute_matches(&current, &current, Some(&map_type)));
    }

    #[test]
    fn float_and_int_compare_numerically() {
        assert!(value_matches(&Value::Float(72.0), &Value::Int(72)));
        assert!(!value_matches(&Value::Float(72.5), &Value::Int(72)));
    }

    #[test]
    fn create_plan_from_resources() {
        let resources = vec![
            Resource::new("plan", "new").with_attribute("name", Value::String("a".to_string())),
            Resource::new("plan", "test").with_attribute("name", Value::String("b".to_string())),
        ];

        let mut current_states = HashMap::new();
        current_states.insert(
            ResourceId::new("plan", "test"),
            existing(vec![("name", Value::String("old".to_string()))]),
        );

        let orphan = State::existing(ResourceId::new("plan", "gone"), HashMap::new())
            .with_identifier("p/c/gone");
        let unaddressable = State::existing(ResourceId::new("plan", "lost"), HashMap::new());

        let mut schemas = HashMap::new();
        schemas.insert("plan".to_string(), plan_schema());

        let plan = create_plan(
            &resources,
            &current_states,
            &[orphan, unaddressable],
            &schemas,
        );

        assert_eq!(plan.effects().len(), 3);
        assert!(matches!(plan.effects()[0], Effect::Create(_)));
        assert!(matches!(plan.effects()[1], Effect::Update { .. }));
        assert!(matches!(
            &plan.effects()[2],
            Effect::Delete { identifier, .. } if identifier == "p/c/gone"
        ));
    }

    #[test]
    fn destroy_plan_carries_known_attributes() {
        let state = existing(vec![("env", Value::String("current".to_string()))]);
        let plan = create_destroy_plan(&[state]);
        match &plan.effects()[0] {
            Effect::Delete { known, .. } => {
                assert_eq!(known.get("env"), Some(&Value::String("current".to_string())))
            }
            other => panic!("Expected Delete, got {:?}", other),
        }
    }
}
