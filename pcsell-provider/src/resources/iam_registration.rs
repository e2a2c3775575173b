//! ibm_onboarding_iam_registration
//!
//! IAM registration of a product's service, addressed as
//! `product_id/name` where `name` is the programmatic service name.

use std::collections::HashMap;

use pcsell_core::provider::ProviderResult;
use pcsell_core::resource::{Resource, ResourceId, State, Value};
use pcsell_core::schema::{types, validators, AttributeSchema, AttributeType, ResourceSchema};
use regex::Regex;

use super::{
    api_error, changed_patch_fields, check_force_new, custom_string, discriminated_error,
    env_attribute, env_of, parse_error, patch_body, product_id_attribute, required_string,
    to_map_error,
};
use crate::client::PartnerCenterSellClient;
use crate::convert::iam_registration::*;
use crate::convert::{
    get_block, get_blocks, get_bool, get_string, get_string_list, put_block, put_blocks, put_bool,
    put_string, put_string_list, Attributes,
};
use crate::models::iam_registration::{IamServiceRegistration, IamServiceRegistrationPatch};
use crate::patch::as_patch;
use crate::utils::{compose_id, sep_id_parts, ID_SEPARATOR};

pub const RESOURCE_TYPE: &str = "ibm_onboarding_iam_registration";

/// Top-level fields the PATCH body can carry
pub(crate) const PATCH_FIELDS: &[&str] = &[
    "enabled",
    "service_type",
    "actions",
    "additional_policy_scopes",
    "display_name",
    "parent_ids",
    "resource_hierarchy_attribute",
    "supported_anonymous_accesses",
    "supported_attributes",
    "supported_authorization_subjects",
    "supported_roles",
    "supported_network",
];

const LOCALES: [&str; 11] = [
    "default", "en", "de", "es", "fr", "it", "ja", "ko", "pt_br", "zh_tw", "zh_cn",
];

// =============================================================================
// Schema
// =============================================================================

fn validate_name(value: &Value) -> Result<(), String> {
    let re = Regex::new(r"^[a-z0-9\-.]+$").map_err(|e| e.to_string())?;
    validators::regexp(&re, value)
}

fn validate_service_type(value: &Value) -> Result<(), String> {
    validators::allowed_values(&["platform_service", "service"], value)
}

fn string(name: &str) -> AttributeSchema {
    AttributeSchema::new(name, AttributeType::String)
}

fn boolean(name: &str) -> AttributeSchema {
    AttributeSchema::new(name, AttributeType::Bool)
}

fn string_list(name: &str) -> AttributeSchema {
    AttributeSchema::new(name, types::string_list())
}

/// Block with one string per supported locale
fn translated(name: &str) -> AttributeSchema {
    AttributeSchema::new(
        name,
        types::single_block(LOCALES.iter().map(|locale| string(locale)).collect()),
    )
}

fn hidden_options() -> AttributeSchema {
    AttributeSchema::new("options", types::single_block(vec![boolean("hidden")]))
}

fn supported_attribute_schema() -> AttributeType {
    types::block_list(vec![
        string("key"),
        AttributeSchema::new(
            "options",
            types::single_block(vec![
                string_list("operators"),
                boolean("hidden"),
                string_list("supported_patterns"),
                string_list("policy_types"),
                boolean("is_empty_value_supported"),
                boolean("is_string_exists_false_value_supported"),
                string("key"),
                AttributeSchema::new(
                    "resource_hierarchy",
                    types::single_block(vec![
                        AttributeSchema::new(
                            "key",
                            types::single_block(vec![string("key"), string("value")]),
                        ),
                        AttributeSchema::new("value", types::single_block(vec![string("key")])),
                    ]),
                ),
            ]),
        ),
        translated("display_name"),
        translated("description"),
        AttributeSchema::new(
            "ui",
            types::single_block(vec![
                string("input_type"),
                AttributeSchema::new(
                    "input_details",
                    types::single_block(vec![
                        string("type"),
                        AttributeSchema::new(
                            "values",
                            types::block_list(vec![string("value"), translated("display_name")]),
                        ),
                        AttributeSchema::new(
                            "gst",
                            types::single_block(vec![
                                string("query"),
                                string("value_property_name"),
                                string("label_property_name"),
                                string("input_option_label"),
                            ]),
                        ),
                        AttributeSchema::new(
                            "url",
                            types::single_block(vec![
                                string("url_endpoint"),
                                string("input_option_label"),
                            ]),
                        ),
                    ]),
                ),
            ]),
        ),
    ])
}

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(RESOURCE_TYPE)
        .with_description("IAM registration of a product's service")
        .attribute(product_id_attribute())
        .attribute(env_attribute())
        .attribute(
            AttributeSchema::new("name", custom_string("ProgrammaticName", validate_name))
                .required()
                .force_new()
                .with_description("The IAM registration name, which must be the programmatic name of the product."),
        )
        .attribute(boolean("enabled"))
        .attribute(AttributeSchema::new(
            "service_type",
            custom_string("ServiceType", validate_service_type),
        ))
        .attribute(AttributeSchema::new(
            "actions",
            types::block_list(vec![
                string("id"),
                string_list("roles"),
                translated("description"),
                translated("display_name"),
                hidden_options(),
            ]),
        ))
        .attribute(string_list("additional_policy_scopes"))
        .attribute(translated("display_name"))
        .attribute(string_list("parent_ids"))
        .attribute(AttributeSchema::new(
            "resource_hierarchy_attribute",
            types::single_block(vec![string("key"), string("value")]),
        ))
        .attribute(AttributeSchema::new(
            "supported_anonymous_accesses",
            types::block_list(vec![
                AttributeSchema::new(
                    "attributes",
                    types::single_block(vec![
                        string("account_id"),
                        string("service_name"),
                        AttributeSchema::new("additional_properties", types::string_map()),
                    ]),
                ),
                string_list("roles"),
            ]),
        ))
        .attribute(AttributeSchema::new("supported_attributes", supported_attribute_schema()))
        .attribute(AttributeSchema::new(
            "supported_authorization_subjects",
            types::block_list(vec![
                AttributeSchema::new(
                    "attributes",
                    types::single_block(vec![string("service_name"), string("resource_type")]),
                ),
                string_list("roles"),
            ]),
        ))
        .attribute(AttributeSchema::new(
            "supported_roles",
            types::block_list(vec![
                string("id"),
                translated("description"),
                translated("display_name"),
                AttributeSchema::new(
                    "options",
                    types::single_block(vec![
                        boolean("access_policy"),
                        string_list("policy_type"),
                        string("account_type"),
                    ]),
                ),
            ]),
        ))
        .attribute(AttributeSchema::new(
            "supported_network",
            types::single_block(vec![AttributeSchema::new(
                "environment_attributes",
                types::block_list(vec![string("key"), string_list("values"), hidden_options()]),
            )]),
        ))
}

// =============================================================================
// Conversion
// =============================================================================

fn registration_from_attributes(
    id: &ResourceId,
    operation: &str,
    attrs: &Attributes,
) -> ProviderResult<IamServiceRegistration> {
    let parse = |field: &'static str| parse_error(id, operation, field);
    Ok(IamServiceRegistration {
        name: get_string(attrs, "name").map_err(parse("name"))?,
        enabled: get_bool(attrs, "enabled").map_err(parse("enabled"))?,
        service_type: get_string(attrs, "service_type").map_err(parse("service_type"))?,
        actions: get_blocks(attrs, "actions", map_to_action).map_err(parse("actions"))?,
        additional_policy_scopes: get_string_list(attrs, "additional_policy_scopes")
            .map_err(parse("additional_policy_scopes"))?,
        display_name: get_block(attrs, "display_name", map_to_display_name_object)
            .map_err(parse("display_name"))?,
        parent_ids: get_string_list(attrs, "parent_ids").map_err(parse("parent_ids"))?,
        resource_hierarchy_attribute: get_block(
            attrs,
            "resource_hierarchy_attribute",
            map_to_resource_hierarchy_attribute,
        )
        .map_err(parse("resource_hierarchy_attribute"))?,
        supported_anonymous_accesses: get_blocks(
            attrs,
            "supported_anonymous_accesses",
            map_to_supported_anonymous_access,
        )
        .map_err(parse("supported_anonymous_accesses"))?,
        supported_attributes: get_blocks(attrs, "supported_attributes", map_to_supported_attribute)
            .map_err(parse("supported_attributes"))?,
        supported_authorization_subjects: get_blocks(
            attrs,
            "supported_authorization_subjects",
            map_to_supported_authorization_subject,
        )
        .map_err(parse("supported_authorization_subjects"))?,
        supported_roles: get_blocks(attrs, "supported_roles", map_to_supported_role)
            .map_err(parse("supported_roles"))?,
        supported_network: get_block(attrs, "supported_network", map_to_supported_network)
            .map_err(parse("supported_network"))?,
    })
}

fn registration_to_attributes(
    id: &ResourceId,
    registration: &IamServiceRegistration,
) -> ProviderResult<Attributes> {
    let mut attrs = Attributes::new();
    put_string(&mut attrs, "name", &registration.name);
    put_bool(&mut attrs, "enabled", registration.enabled);
    put_string(&mut attrs, "service_type", &registration.service_type);
    put_blocks(&mut attrs, "actions", &registration.actions, action_to_map)
        .map_err(to_map_error(id, "actions"))?;
    put_string_list(
        &mut attrs,
        "additional_policy_scopes",
        &registration.additional_policy_scopes,
    );
    put_block(
        &mut attrs,
        "display_name",
        &registration.display_name,
        display_name_object_to_map,
    )
    .map_err(to_map_error(id, "display_name"))?;
    put_string_list(&mut attrs, "parent_ids", &registration.parent_ids);
    put_block(
        &mut attrs,
        "resource_hierarchy_attribute",
        &registration.resource_hierarchy_attribute,
        resource_hierarchy_attribute_to_map,
    )
    .map_err(to_map_error(id, "resource_hierarchy_attribute"))?;
    put_blocks(
        &mut attrs,
        "supported_anonymous_accesses",
        &registration.supported_anonymous_accesses,
        supported_anonymous_access_to_map,
    )
    .map_err(to_map_error(id, "supported_anonymous_accesses"))?;
    put_blocks(
        &mut attrs,
        "supported_attributes",
        &registration.supported_attributes,
        supported_attribute_to_map,
    )
    .map_err(to_map_error(id, "supported_attributes"))?;
    put_blocks(
        &mut attrs,
        "supported_authorization_subjects",
        &registration.supported_authorization_subjects,
        supported_authorization_subject_to_map,
    )
    .map_err(to_map_error(id, "supported_authorization_subjects"))?;
    put_blocks(
        &mut attrs,
        "supported_roles",
        &registration.supported_roles,
        supported_role_to_map,
    )
    .map_err(to_map_error(id, "supported_roles"))?;
    put_block(
        &mut attrs,
        "supported_network",
        &registration.supported_network,
        supported_network_to_map,
    )
    .map_err(to_map_error(id, "supported_network"))?;
    Ok(attrs)
}

fn registration_patch(
    desired: IamServiceRegistration,
    fields: &[&str],
) -> IamServiceRegistrationPatch {
    let has = |field: &str| fields.contains(&field);
    IamServiceRegistrationPatch {
        enabled: desired.enabled.filter(|_| has("enabled")),
        service_type: desired.service_type.filter(|_| has("service_type")),
        actions: desired.actions.filter(|_| has("actions")),
        additional_policy_scopes: desired
            .additional_policy_scopes
            .filter(|_| has("additional_policy_scopes")),
        display_name: desired.display_name.filter(|_| has("display_name")),
        parent_ids: desired.parent_ids.filter(|_| has("parent_ids")),
        resource_hierarchy_attribute: desired
            .resource_hierarchy_attribute
            .filter(|_| has("resource_hierarchy_attribute")),
        supported_anonymous_accesses: desired
            .supported_anonymous_accesses
            .filter(|_| has("supported_anonymous_accesses")),
        supported_attributes: desired
            .supported_attributes
            .filter(|_| has("supported_attributes")),
        supported_authorization_subjects: desired
            .supported_authorization_subjects
            .filter(|_| has("supported_authorization_subjects")),
        supported_roles: desired.supported_roles.filter(|_| has("supported_roles")),
        supported_network: desired.supported_network.filter(|_| has("supported_network")),
    }
}

fn split_id(id: &ResourceId, operation: &str, identifier: &str) -> ProviderResult<Vec<String>> {
    sep_id_parts(identifier, ID_SEPARATOR, 2)
        .map_err(|e| discriminated_error(id, operation, "sep-id-parts", e.to_string()))
}

// =============================================================================
// Operations
// =============================================================================

pub async fn create(client: &PartnerCenterSellClient, resource: &Resource) -> ProviderResult<State> {
    let id = &resource.id;
    let attrs = &resource.attributes;

    let product_id = required_string(id, "create", attrs, "product_id")?;
    let name = required_string(id, "create", attrs, "name")?;
    let env = env_of(attrs);
    let registration = registration_from_attributes(id, "create", attrs)?;

    let created = client
        .create_iam_registration(&product_id, env.as_deref(), &registration)
        .await
        .map_err(|e| {
            api_error(id, "create", "create-iam-registration", "CreateIamRegistration", e)
        })?;

    let identifier = compose_id(&[&product_id, created.name.as_deref().unwrap_or(name.as_str())]);
    log::info!("created {} {}", RESOURCE_TYPE, identifier);

    read(client, id, &identifier, attrs).await
}

pub async fn read(
    client: &PartnerCenterSellClient,
    id: &ResourceId,
    identifier: &str,
    known: &HashMap<String, Value>,
) -> ProviderResult<State> {
    let parts = split_id(id, "read", identifier)?;
    let env = env_of(known);

    let registration = match client
        .get_iam_registration(&parts[0], &parts[1], env.as_deref())
        .await
    {
        Ok(registration) => registration,
        Err(e) if e.is_not_found() => {
            log::debug!("{} {} not found", RESOURCE_TYPE, identifier);
            return Ok(State::not_found(id.clone()));
        }
        Err(e) => {
            return Err(api_error(id, "read", "get-iam-registration", "GetIamRegistration", e));
        }
    };

    let mut attrs = registration_to_attributes(id, &registration)?;
    if let Some(env) = env {
        attrs.insert("env".to_string(), Value::String(env));
    }
    for (key, part) in ["product_id", "name"].into_iter().zip(&parts) {
        attrs.insert(key.to_string(), Value::String(part.clone()));
    }

    Ok(State::existing(id.clone(), attrs).with_identifier(identifier))
}

pub async fn update(
    client: &PartnerCenterSellClient,
    id: &ResourceId,
    identifier: &str,
    from: &State,
    to: &Resource,
) -> ProviderResult<State> {
    let parts = split_id(id, "update", identifier)?;
    let schema = schema();
    check_force_new(&schema, id, &from.attributes, &to.attributes)?;

    let fields = changed_patch_fields(&schema, PATCH_FIELDS, &from.attributes, &to.attributes);
    if !fields.is_empty() {
        let desired = registration_from_attributes(id, "update", &to.attributes)?;
        let mut body = patch_body(id, &registration_patch(desired, &fields))?;
        as_patch(&mut body, &schema, &fields, &from.attributes, &to.attributes);

        client
            .update_iam_registration(
                &parts[0],
                &parts[1],
                env_of(&to.attributes).as_deref(),
                &serde_json::Value::Object(body),
            )
            .await
            .map_err(|e| {
                api_error(id, "update", "update-iam-registration", "UpdateIamRegistration", e)
            })?;
    }

    read(client, id, identifier, &to.attributes).await
}

pub async fn delete(
    client: &PartnerCenterSellClient,
    id: &ResourceId,
    identifier: &str,
    known: &HashMap<String, Value>,
) -> ProviderResult<()> {
    let parts = split_id(id, "delete", identifier)?;
    match client
        .delete_iam_registration(&parts[0], &parts[1], env_of(known).as_deref())
        .await
    {
        Ok(()) => Ok(()),
        Err(e) if e.is_not_found() => {
            log::debug!("{} {} already deleted", RESOURCE_TYPE, identifier);
            Ok(())
        }
        Err(e) => Err(api_error(
            id,
            "delete",
            "delete-iam-registration",
            "DeleteIamRegistration",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    fn attrs(entries: Vec<(&str, Value)>) -> Attributes {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn basic_config() -> Attributes {
        attrs(vec![
            (
                "product_id",
                s("f3e41b7c9e5a4b3f8d6c1a2e0b9d8c7a:o:7d4e8f2a-1b3c-4d5e-9f0a-2b4c6d8e0f1a"),
            ),
            ("name", s("pet-store")),
            ("enabled", Value::Bool(true)),
            (
                "display_name",
                Value::block(attrs(vec![("default", s("pet-store"))])),
            ),
        ])
    }

    #[test]
    fn schema_accepts_basic_config() {
        assert!(schema().validate(&basic_config()).is_ok());
    }

    #[test]
    fn schema_rejects_unknown_service_type() {
        let mut config = basic_config();
        config.insert("service_type".to_string(), s("database"));
        assert!(schema().validate(&config).is_err());

        config.insert("service_type".to_string(), s("platform_service"));
        assert!(schema().validate(&config).is_ok());
    }

    #[test]
    fn schema_rejects_uppercase_name() {
        let mut config = basic_config();
        config.insert("name".to_string(), s("PetStore"));
        assert!(schema().validate(&config).is_err());
    }

    #[test]
    fn name_and_product_force_new() {
        assert_eq!(schema().force_new_attributes(), vec!["name", "product_id"]);
    }

    #[test]
    fn registration_carries_nested_blocks() {
        let id = ResourceId::new(RESOURCE_TYPE, "registration");
        let mut config = basic_config();
        config.insert(
            "supported_network".to_string(),
            Value::block(attrs(vec![(
                "environment_attributes",
                Value::List(vec![Value::Map(attrs(vec![
                    ("key", s("networkType")),
                    ("values", Value::string_list(["public"])),
                    (
                        "options",
                        Value::block(attrs(vec![("hidden", Value::Bool(false))])),
                    ),
                ]))]),
            )])),
        );

        let registration = registration_from_attributes(&id, "create", &config).unwrap();
        let network = registration.supported_network.unwrap();
        let environment = &network.environment_attributes.unwrap()[0];
        assert_eq!(environment.key.as_deref(), Some("networkType"));
        assert_eq!(environment.options.as_ref().unwrap().hidden, Some(false));
    }

    #[test]
    fn actions_parse_error_is_discriminated() {
        let id = ResourceId::new(RESOURCE_TYPE, "registration");
        let mut config = basic_config();
        config.insert("actions".to_string(), s("iam.action"));

        let err = registration_from_attributes(&id, "update", &config).unwrap_err();
        assert_eq!(
            err.discriminator_triple(),
            Some((RESOURCE_TYPE, "update", "parse-actions"))
        );
    }

    #[test]
    fn patch_never_carries_name() {
        let id = ResourceId::new(RESOURCE_TYPE, "registration");
        let desired = registration_from_attributes(&id, "update", &basic_config()).unwrap();
        let patch = registration_patch(desired, &["enabled"]);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"enabled": true})
        );
    }

    #[test]
    fn id_with_empty_part_is_rejected() {
        let id = ResourceId::new(RESOURCE_TYPE, "registration");
        assert!(split_id(&id, "read", "prod/pet-store").is_ok());

        for identifier in ["/pet-store", "prod/"] {
            let err = split_id(&id, "read", identifier).unwrap_err();
            assert_eq!(
                err.discriminator_triple(),
                Some((RESOURCE_TYPE, "read", "sep-id-parts"))
            );
        }
    }
}
