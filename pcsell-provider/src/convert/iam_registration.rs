//! IAM service registration conversions

use pcsell_core::resource::Value;

use crate::models::iam_registration::*;

use super::{
    get_block, get_blocks, get_bool, get_string, get_string_list, get_string_map, put_block,
    put_blocks, put_bool, put_string, put_string_list, Attributes, ConvertResult,
};

/// Locale objects share one field set
macro_rules! translated_object_conversions {
    ($model:ident, $to_map:ident, $map_to:ident) => {
        pub fn $to_map(model: &$model) -> ConvertResult<Attributes> {
            let mut map = Attributes::new();
            put_string(&mut map, "default", &model.default);
            put_string(&mut map, "en", &model.en);
            put_string(&mut map, "de", &model.de);
            put_string(&mut map, "es", &model.es);
            put_string(&mut map, "fr", &model.fr);
            put_string(&mut map, "it", &model.it);
            put_string(&mut map, "ja", &model.ja);
            put_string(&mut map, "ko", &model.ko);
            put_string(&mut map, "pt_br", &model.pt_br);
            put_string(&mut map, "zh_tw", &model.zh_tw);
            put_string(&mut map, "zh_cn", &model.zh_cn);
            Ok(map)
        }

        pub fn $map_to(map: &Attributes) -> ConvertResult<$model> {
            Ok($model {
                default: get_string(map, "default")?,
                en: get_string(map, "en")?,
                de: get_string(map, "de")?,
                es: get_string(map, "es")?,
                fr: get_string(map, "fr")?,
                it: get_string(map, "it")?,
                ja: get_string(map, "ja")?,
                ko: get_string(map, "ko")?,
                pt_br: get_string(map, "pt_br")?,
                zh_tw: get_string(map, "zh_tw")?,
                zh_cn: get_string(map, "zh_cn")?,
            })
        }
    };
}

translated_object_conversions!(
    IamServiceRegistrationDescriptionObject,
    description_object_to_map,
    map_to_description_object
);
translated_object_conversions!(
    IamServiceRegistrationDisplayNameObject,
    display_name_object_to_map,
    map_to_display_name_object
);

// =============================================================================
// Object -> map
// =============================================================================

pub fn action_to_map(model: &IamServiceRegistrationAction) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "id", &model.id);
    put_string_list(&mut map, "roles", &model.roles);
    put_block(&mut map, "description", &model.description, description_object_to_map)?;
    put_block(&mut map, "display_name", &model.display_name, display_name_object_to_map)?;
    put_block(&mut map, "options", &model.options, action_options_to_map)?;
    Ok(map)
}

pub fn action_options_to_map(model: &IamServiceRegistrationActionOptions) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_bool(&mut map, "hidden", model.hidden);
    Ok(map)
}

pub fn resource_hierarchy_attribute_to_map(
    model: &IamServiceRegistrationResourceHierarchyAttribute,
) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "key", &model.key);
    put_string(&mut map, "value", &model.value);
    Ok(map)
}

pub fn supported_anonymous_access_to_map(
    model: &IamServiceRegistrationSupportedAnonymousAccess,
) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_block(
        &mut map,
        "attributes",
        &model.attributes,
        supported_anonymous_access_attributes_to_map,
    )?;
    put_string_list(&mut map, "roles", &model.roles);
    Ok(map)
}

pub fn supported_anonymous_access_attributes_to_map(
    model: &IamServiceRegistrationSupportedAnonymousAccessAttributes,
) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "account_id", &model.account_id);
    put_string(&mut map, "service_name", &model.service_name);
    if !model.additional_properties.is_empty() {
        map.insert(
            "additional_properties".to_string(),
            Value::string_map(&model.additional_properties),
        );
    }
    Ok(map)
}

pub fn supported_attribute_to_map(
    model: &IamServiceRegistrationSupportedAttribute,
) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "key", &model.key);
    put_block(&mut map, "options", &model.options, supported_attributes_options_to_map)?;
    put_block(&mut map, "display_name", &model.display_name, display_name_object_to_map)?;
    put_block(&mut map, "description", &model.description, description_object_to_map)?;
    put_block(&mut map, "ui", &model.ui, supported_attribute_ui_to_map)?;
    Ok(map)
}

pub fn supported_attributes_options_to_map(
    model: &SupportedAttributesOptions,
) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string_list(&mut map, "operators", &model.operators);
    put_bool(&mut map, "hidden", model.hidden);
    put_string_list(&mut map, "supported_patterns", &model.supported_patterns);
    put_string_list(&mut map, "policy_types", &model.policy_types);
    put_bool(&mut map, "is_empty_value_supported", model.is_empty_value_supported);
    put_bool(
        &mut map,
        "is_string_exists_false_value_supported",
        model.is_string_exists_false_value_supported,
    );
    put_string(&mut map, "key", &model.key);
    put_block(
        &mut map,
        "resource_hierarchy",
        &model.resource_hierarchy,
        resource_hierarchy_to_map,
    )?;
    Ok(map)
}

pub fn resource_hierarchy_to_map(
    model: &SupportedAttributesOptionsResourceHierarchy,
) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_block(&mut map, "key", &model.key, resource_hierarchy_key_to_map)?;
    put_block(&mut map, "value", &model.value, resource_hierarchy_value_to_map)?;
    Ok(map)
}

pub fn resource_hierarchy_key_to_map(
    model: &SupportedAttributesOptionsResourceHierarchyKey,
) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "key", &model.key);
    put_string(&mut map, "value", &model.value);
    Ok(map)
}

pub fn resource_hierarchy_value_to_map(
    model: &SupportedAttributesOptionsResourceHierarchyValue,
) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "key", &model.key);
    Ok(map)
}

pub fn supported_attribute_ui_to_map(model: &SupportedAttributeUi) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "input_type", &model.input_type);
    put_block(&mut map, "input_details", &model.input_details, ui_input_details_to_map)?;
    Ok(map)
}

pub fn ui_input_details_to_map(model: &SupportedAttributeUiInputDetails) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "type", &model.input_type);
    put_blocks(&mut map, "values", &model.values, ui_input_value_to_map)?;
    put_block(&mut map, "gst", &model.gst, ui_input_gst_to_map)?;
    put_block(&mut map, "url", &model.url, ui_input_url_to_map)?;
    Ok(map)
}

pub fn ui_input_value_to_map(model: &SupportedAttributeUiInputValue) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "value", &model.value);
    put_block(&mut map, "display_name", &model.display_name, display_name_object_to_map)?;
    Ok(map)
}

pub fn ui_input_gst_to_map(model: &SupportedAttributeUiInputGst) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "query", &model.query);
    put_string(&mut map, "value_property_name", &model.value_property_name);
    put_string(&mut map, "label_property_name", &model.label_property_name);
    put_string(&mut map, "input_option_label", &model.input_option_label);
    Ok(map)
}

pub fn ui_input_url_to_map(model: &SupportedAttributeUiInputUrl) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "url_endpoint", &model.url_endpoint);
    put_string(&mut map, "input_option_label", &model.input_option_label);
    Ok(map)
}

pub fn supported_authorization_subject_to_map(
    model: &IamServiceRegistrationSupportedAuthorizationSubject,
) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_block(
        &mut map,
        "attributes",
        &model.attributes,
        authorization_subject_attribute_to_map,
    )?;
    put_string_list(&mut map, "roles", &model.roles);
    Ok(map)
}

pub fn authorization_subject_attribute_to_map(
    model: &SupportAuthorizationSubjectAttribute,
) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "service_name", &model.service_name);
    put_string(&mut map, "resource_type", &model.resource_type);
    Ok(map)
}

pub fn supported_role_to_map(model: &IamServiceRegistrationSupportedRole) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "id", &model.id);
    put_block(&mut map, "description", &model.description, description_object_to_map)?;
    put_block(&mut map, "display_name", &model.display_name, display_name_object_to_map)?;
    put_block(&mut map, "options", &model.options, supported_role_options_to_map)?;
    Ok(map)
}

pub fn supported_role_options_to_map(model: &SupportedRoleOptions) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_bool(&mut map, "access_policy", model.access_policy);
    put_string_list(&mut map, "policy_type", &model.policy_type);
    put_string(&mut map, "account_type", &model.account_type);
    Ok(map)
}

pub fn supported_network_to_map(
    model: &IamServiceRegistrationSupportedNetwork,
) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_blocks(
        &mut map,
        "environment_attributes",
        &model.environment_attributes,
        environment_attribute_to_map,
    )?;
    Ok(map)
}

pub fn environment_attribute_to_map(model: &EnvironmentAttribute) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "key", &model.key);
    put_string_list(&mut map, "values", &model.values);
    put_block(&mut map, "options", &model.options, environment_attribute_options_to_map)?;
    Ok(map)
}

pub fn environment_attribute_options_to_map(
    model: &EnvironmentAttributeOptions,
) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_bool(&mut map, "hidden", model.hidden);
    Ok(map)
}

// =============================================================================
// Map -> object
// =============================================================================

pub fn map_to_action(map: &Attributes) -> ConvertResult<IamServiceRegistrationAction> {
    Ok(IamServiceRegistrationAction {
        id: get_string(map, "id")?,
        roles: get_string_list(map, "roles")?,
        description: get_block(map, "description", map_to_description_object)?,
        display_name: get_block(map, "display_name", map_to_display_name_object)?,
        options: get_block(map, "options", map_to_action_options)?,
    })
}

pub fn map_to_action_options(map: &Attributes) -> ConvertResult<IamServiceRegistrationActionOptions> {
    Ok(IamServiceRegistrationActionOptions {
        hidden: get_bool(map, "hidden")?,
    })
}

pub fn map_to_resource_hierarchy_attribute(
    map: &Attributes,
) -> ConvertResult<IamServiceRegistrationResourceHierarchyAttribute> {
    Ok(IamServiceRegistrationResourceHierarchyAttribute {
        key: get_string(map, "key")?,
        value: get_string(map, "value")?,
    })
}

pub fn map_to_supported_anonymous_access(
    map: &Attributes,
) -> ConvertResult<IamServiceRegistrationSupportedAnonymousAccess> {
    Ok(IamServiceRegistrationSupportedAnonymousAccess {
        attributes: get_block(map, "attributes", map_to_supported_anonymous_access_attributes)?,
        roles: get_string_list(map, "roles")?,
    })
}

pub fn map_to_supported_anonymous_access_attributes(
    map: &Attributes,
) -> ConvertResult<IamServiceRegistrationSupportedAnonymousAccessAttributes> {
    Ok(IamServiceRegistrationSupportedAnonymousAccessAttributes {
        account_id: get_string(map, "account_id")?,
        service_name: get_string(map, "service_name")?,
        additional_properties: get_string_map(map, "additional_properties")?.unwrap_or_default(),
    })
}

pub fn map_to_supported_attribute(
    map: &Attributes,
) -> ConvertResult<IamServiceRegistrationSupportedAttribute> {
    Ok(IamServiceRegistrationSupportedAttribute {
        key: get_string(map, "key")?,
        options: get_block(map, "options", map_to_supported_attributes_options)?,
        display_name: get_block(map, "display_name", map_to_display_name_object)?,
        description: get_block(map, "description", map_to_description_object)?,
        ui: get_block(map, "ui", map_to_supported_attribute_ui)?,
    })
}

pub fn map_to_supported_attributes_options(
    map: &Attributes,
) -> ConvertResult<SupportedAttributesOptions> {
    Ok(SupportedAttributesOptions {
        operators: get_string_list(map, "operators")?,
        hidden: get_bool(map, "hidden")?,
        supported_patterns: get_string_list(map, "supported_patterns")?,
        policy_types: get_string_list(map, "policy_types")?,
        is_empty_value_supported: get_bool(map, "is_empty_value_supported")?,
        is_string_exists_false_value_supported: get_bool(
            map,
            "is_string_exists_false_value_supported",
        )?,
        key: get_string(map, "key")?,
        resource_hierarchy: get_block(map, "resource_hierarchy", map_to_resource_hierarchy)?,
    })
}

pub fn map_to_resource_hierarchy(
    map: &Attributes,
) -> ConvertResult<SupportedAttributesOptionsResourceHierarchy> {
    Ok(SupportedAttributesOptionsResourceHierarchy {
        key: get_block(map, "key", map_to_resource_hierarchy_key)?,
        value: get_block(map, "value", map_to_resource_hierarchy_value)?,
    })
}

pub fn map_to_resource_hierarchy_key(
    map: &Attributes,
) -> ConvertResult<SupportedAttributesOptionsResourceHierarchyKey> {
    Ok(SupportedAttributesOptionsResourceHierarchyKey {
        key: get_string(map, "key")?,
        value: get_string(map, "value")?,
    })
}

pub fn map_to_resource_hierarchy_value(
    map: &Attributes,
) -> ConvertResult<SupportedAttributesOptionsResourceHierarchyValue> {
    Ok(SupportedAttributesOptionsResourceHierarchyValue {
        key: get_string(map, "key")?,
    })
}

pub fn map_to_supported_attribute_ui(map: &Attributes) -> ConvertResult<SupportedAttributeUi> {
    Ok(SupportedAttributeUi {
        input_type: get_string(map, "input_type")?,
        input_details: get_block(map, "input_details", map_to_ui_input_details)?,
    })
}

pub fn map_to_ui_input_details(map: &Attributes) -> ConvertResult<SupportedAttributeUiInputDetails> {
    Ok(SupportedAttributeUiInputDetails {
        input_type: get_string(map, "type")?,
        values: get_blocks(map, "values", map_to_ui_input_value)?,
        gst: get_block(map, "gst", map_to_ui_input_gst)?,
        url: get_block(map, "url", map_to_ui_input_url)?,
    })
}

pub fn map_to_ui_input_value(map: &Attributes) -> ConvertResult<SupportedAttributeUiInputValue> {
    Ok(SupportedAttributeUiInputValue {
        value: get_string(map, "value")?,
        display_name: get_block(map, "display_name", map_to_display_name_object)?,
    })
}

pub fn map_to_ui_input_gst(map: &Attributes) -> ConvertResult<SupportedAttributeUiInputGst> {
    Ok(SupportedAttributeUiInputGst {
        query: get_string(map, "query")?,
        value_property_name: get_string(map, "value_property_name")?,
        label_property_name: get_string(map, "label_property_name")?,
        input_option_label: get_string(map, "input_option_label")?,
    })
}

pub fn map_to_ui_input_url(map: &Attributes) -> ConvertResult<SupportedAttributeUiInputUrl> {
    Ok(SupportedAttributeUiInputUrl {
        url_endpoint: get_string(map, "url_endpoint")?,
        input_option_label: get_string(map, "input_option_label")?,
    })
}

pub fn map_to_supported_authorization_subject(
    map: &Attributes,
) -> ConvertResult<IamServiceRegistrationSupportedAuthorizationSubject> {
    Ok(IamServiceRegistrationSupportedAuthorizationSubject {
        attributes: get_block(map, "attributes", map_to_authorization_subject_attribute)?,
        roles: get_string_list(map, "roles")?,
    })
}

pub fn map_to_authorization_subject_attribute(
    map: &Attributes,
) -> ConvertResult<SupportAuthorizationSubjectAttribute> {
    Ok(SupportAuthorizationSubjectAttribute {
        service_name: get_string(map, "service_name")?,
        resource_type: get_string(map, "resource_type")?,
    })
}

pub fn map_to_supported_role(map: &Attributes) -> ConvertResult<IamServiceRegistrationSupportedRole> {
    Ok(IamServiceRegistrationSupportedRole {
        id: get_string(map, "id")?,
        description: get_block(map, "description", map_to_description_object)?,
        display_name: get_block(map, "display_name", map_to_display_name_object)?,
        options: get_block(map, "options", map_to_supported_role_options)?,
    })
}

pub fn map_to_supported_role_options(map: &Attributes) -> ConvertResult<SupportedRoleOptions> {
    Ok(SupportedRoleOptions {
        access_policy: get_bool(map, "access_policy")?,
        policy_type: get_string_list(map, "policy_type")?,
        account_type: get_string(map, "account_type")?,
    })
}

pub fn map_to_supported_network(
    map: &Attributes,
) -> ConvertResult<IamServiceRegistrationSupportedNetwork> {
    Ok(IamServiceRegistrationSupportedNetwork {
        environment_attributes: get_blocks(
            map,
            "environment_attributes",
            map_to_environment_attribute,
        )?,
    })
}

pub fn map_to_environment_attribute(map: &Attributes) -> ConvertResult<EnvironmentAttribute> {
    Ok(EnvironmentAttribute {
        key: get_string(map, "key")?,
        values: get_string_list(map, "values")?,
        options: get_block(map, "options", map_to_environment_attribute_options)?,
    })
}

pub fn map_to_environment_attribute_options(
    map: &Attributes,
) -> ConvertResult<EnvironmentAttributeOptions> {
    Ok(EnvironmentAttributeOptions {
        hidden: get_bool(map, "hidden")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    fn attrs(entries: Vec<(&str, Value)>) -> Attributes {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn ts() -> Option<String> {
        Some("testString".to_string())
    }

    fn ts_list() -> Value {
        Value::string_list(["testString"])
    }

    // -------------------------------------------------------------------------
    // Fixtures
    // -------------------------------------------------------------------------

    const LOCALES: [&str; 11] = [
        "default", "en", "de", "es", "fr", "it", "ja", "ko", "pt_br", "zh_tw", "zh_cn",
    ];

    fn locale_map() -> Attributes {
        LOCALES.iter().map(|k| (k.to_string(), s("testString"))).collect()
    }

    fn description_model() -> IamServiceRegistrationDescriptionObject {
        IamServiceRegistrationDescriptionObject {
            default: ts(),
            en: ts(),
            de: ts(),
            es: ts(),
            fr: ts(),
            it: ts(),
            ja: ts(),
            ko: ts(),
            pt_br: ts(),
            zh_tw: ts(),
            zh_cn: ts(),
        }
    }

    fn display_name_model() -> IamServiceRegistrationDisplayNameObject {
        IamServiceRegistrationDisplayNameObject {
            default: ts(),
            en: ts(),
            de: ts(),
            es: ts(),
            fr: ts(),
            it: ts(),
            ja: ts(),
            ko: ts(),
            pt_br: ts(),
            zh_tw: ts(),
            zh_cn: ts(),
        }
    }

    fn action_model() -> IamServiceRegistrationAction {
        IamServiceRegistrationAction {
            id: ts(),
            roles: Some(vec!["testString".to_string()]),
            description: Some(description_model()),
            display_name: Some(display_name_model()),
            options: Some(IamServiceRegistrationActionOptions { hidden: Some(true) }),
        }
    }

    fn action_map() -> Attributes {
        attrs(vec![
            ("id", s("testString")),
            ("roles", ts_list()),
            ("description", Value::block(locale_map())),
            ("display_name", Value::block(locale_map())),
            (
                "options",
                Value::block(attrs(vec![("hidden", Value::Bool(true))])),
            ),
        ])
    }

    fn anonymous_attributes_model() -> IamServiceRegistrationSupportedAnonymousAccessAttributes {
        IamServiceRegistrationSupportedAnonymousAccessAttributes {
            account_id: ts(),
            service_name: ts(),
            additional_properties: HashMap::from([(
                "key1".to_string(),
                "testString".to_string(),
            )]),
        }
    }

    fn anonymous_attributes_map() -> Attributes {
        attrs(vec![
            ("account_id", s("testString")),
            ("service_name", s("testString")),
            (
                "additional_properties",
                Value::Map(attrs(vec![("key1", s("testString"))])),
            ),
        ])
    }

    fn hierarchy_model() -> SupportedAttributesOptionsResourceHierarchy {
        SupportedAttributesOptionsResourceHierarchy {
            key: Some(SupportedAttributesOptionsResourceHierarchyKey {
                key: ts(),
                value: ts(),
            }),
            value: Some(SupportedAttributesOptionsResourceHierarchyValue { key: ts() }),
        }
    }

    fn hierarchy_map() -> Attributes {
        attrs(vec![
            (
                "key",
                Value::block(attrs(vec![("key", s("testString")), ("value", s("testString"))])),
            ),
            ("value", Value::block(attrs(vec![("key", s("testString"))]))),
        ])
    }

    fn options_model() -> SupportedAttributesOptions {
        SupportedAttributesOptions {
            operators: Some(vec!["stringEquals".to_string()]),
            hidden: Some(true),
            supported_patterns: Some(vec!["testString".to_string()]),
            policy_types: Some(vec!["access".to_string()]),
            is_empty_value_supported: Some(true),
            is_string_exists_false_value_supported: Some(true),
            key: ts(),
            resource_hierarchy: Some(hierarchy_model()),
        }
    }

    fn options_map() -> Attributes {
        attrs(vec![
            ("operators", Value::string_list(["stringEquals"])),
            ("hidden", Value::Bool(true)),
            ("supported_patterns", ts_list()),
            ("policy_types", Value::string_list(["access"])),
            ("is_empty_value_supported", Value::Bool(true)),
            ("is_string_exists_false_value_supported", Value::Bool(true)),
            ("key", s("testString")),
            ("resource_hierarchy", Value::block(hierarchy_map())),
        ])
    }

    fn gst_model() -> SupportedAttributeUiInputGst {
        SupportedAttributeUiInputGst {
            query: ts(),
            value_property_name: ts(),
            label_property_name: ts(),
            input_option_label: ts(),
        }
    }

    fn gst_map() -> Attributes {
        attrs(vec![
            ("query", s("testString")),
            ("value_property_name", s("testString")),
            ("label_property_name", s("testString")),
            ("input_option_label", s("testString")),
        ])
    }

    fn url_model() -> SupportedAttributeUiInputUrl {
        SupportedAttributeUiInputUrl {
            url_endpoint: ts(),
            input_option_label: ts(),
        }
    }

    fn url_map() -> Attributes {
        attrs(vec![
            ("url_endpoint", s("testString")),
            ("input_option_label", s("testString")),
        ])
    }

    fn input_value_model() -> SupportedAttributeUiInputValue {
        SupportedAttributeUiInputValue {
            value: ts(),
            display_name: Some(display_name_model()),
        }
    }

    fn input_value_map() -> Attributes {
        attrs(vec![
            ("value", s("testString")),
            ("display_name", Value::block(locale_map())),
        ])
    }

    fn input_details_model() -> SupportedAttributeUiInputDetails {
        SupportedAttributeUiInputDetails {
            input_type: ts(),
            values: Some(vec![input_value_model()]),
            gst: Some(gst_model()),
            url: Some(url_model()),
        }
    }

    fn input_details_map() -> Attributes {
        attrs(vec![
            ("type", s("testString")),
            ("values", Value::List(vec![Value::Map(input_value_map())])),
            ("gst", Value::block(gst_map())),
            ("url", Value::block(url_map())),
        ])
    }

    fn ui_model() -> SupportedAttributeUi {
        SupportedAttributeUi {
            input_type: ts(),
            input_details: Some(input_details_model()),
        }
    }

    fn ui_map() -> Attributes {
        attrs(vec![
            ("input_type", s("testString")),
            ("input_details", Value::block(input_details_map())),
        ])
    }

    fn supported_attribute_model() -> IamServiceRegistrationSupportedAttribute {
        IamServiceRegistrationSupportedAttribute {
            key: ts(),
            options: Some(options_model()),
            display_name: Some(display_name_model()),
            description: Some(description_model()),
            ui: Some(ui_model()),
        }
    }

    fn supported_attribute_map() -> Attributes {
        attrs(vec![
            ("key", s("testString")),
            ("options", Value::block(options_map())),
            ("display_name", Value::block(locale_map())),
            ("description", Value::block(locale_map())),
            ("ui", Value::block(ui_map())),
        ])
    }

    fn subject_attribute_model() -> SupportAuthorizationSubjectAttribute {
        SupportAuthorizationSubjectAttribute {
            service_name: ts(),
            resource_type: ts(),
        }
    }

    fn subject_attribute_map() -> Attributes {
        attrs(vec![
            ("service_name", s("testString")),
            ("resource_type", s("testString")),
        ])
    }

    fn role_options_model() -> SupportedRoleOptions {
        SupportedRoleOptions {
            access_policy: Some(true),
            policy_type: Some(vec!["access".to_string()]),
            account_type: Some("enterprise".to_string()),
        }
    }

    fn role_options_map() -> Attributes {
        attrs(vec![
            ("access_policy", Value::Bool(true)),
            ("policy_type", Value::string_list(["access"])),
            ("account_type", s("enterprise")),
        ])
    }

    fn environment_attribute_model() -> EnvironmentAttribute {
        EnvironmentAttribute {
            key: ts(),
            values: Some(vec!["testString".to_string()]),
            options: Some(EnvironmentAttributeOptions { hidden: Some(true) }),
        }
    }

    fn environment_attribute_map() -> Attributes {
        attrs(vec![
            ("key", s("testString")),
            ("values", ts_list()),
            (
                "options",
                Value::block(attrs(vec![("hidden", Value::Bool(true))])),
            ),
        ])
    }

    // -------------------------------------------------------------------------
    // Object -> map
    // -------------------------------------------------------------------------

    #[test]
    fn action_to_map_nests_translations() {
        assert_eq!(action_to_map(&action_model()), Ok(action_map()));
    }

    #[test]
    fn description_object_to_map_copies_every_locale() {
        assert_eq!(description_object_to_map(&description_model()), Ok(locale_map()));
    }

    #[test]
    fn display_name_object_to_map_copies_every_locale() {
        assert_eq!(
            display_name_object_to_map(&display_name_model()),
            Ok(locale_map())
        );
    }

    #[test]
    fn action_options_to_map_copies_hidden() {
        let model = IamServiceRegistrationActionOptions { hidden: Some(true) };
        assert_eq!(
            action_options_to_map(&model),
            Ok(attrs(vec![("hidden", Value::Bool(true))]))
        );
    }

    #[test]
    fn resource_hierarchy_attribute_to_map_copies_pair() {
        let model = IamServiceRegistrationResourceHierarchyAttribute {
            key: ts(),
            value: ts(),
        };
        assert_eq!(
            resource_hierarchy_attribute_to_map(&model),
            Ok(attrs(vec![("key", s("testString")), ("value", s("testString"))]))
        );
    }

    #[test]
    fn supported_anonymous_access_to_map_nests_attributes() {
        let model = IamServiceRegistrationSupportedAnonymousAccess {
            attributes: Some(anonymous_attributes_model()),
            roles: Some(vec!["testString".to_string()]),
        };
        assert_eq!(
            supported_anonymous_access_to_map(&model),
            Ok(attrs(vec![
                ("attributes", Value::block(anonymous_attributes_map())),
                ("roles", ts_list()),
            ]))
        );
    }

    #[test]
    fn supported_anonymous_access_attributes_to_map_keeps_additional_properties() {
        assert_eq!(
            supported_anonymous_access_attributes_to_map(&anonymous_attributes_model()),
            Ok(anonymous_attributes_map())
        );
    }

    #[test]
    fn supported_attribute_to_map_copies_every_block() {
        assert_eq!(
            supported_attribute_to_map(&supported_attribute_model()),
            Ok(supported_attribute_map())
        );
    }

    #[test]
    fn supported_attributes_options_to_map_copies_lists_and_hierarchy() {
        assert_eq!(
            supported_attributes_options_to_map(&options_model()),
            Ok(options_map())
        );
    }

    #[test]
    fn resource_hierarchy_to_map_nests_key_and_value() {
        assert_eq!(resource_hierarchy_to_map(&hierarchy_model()), Ok(hierarchy_map()));
    }

    #[test]
    fn resource_hierarchy_key_to_map_copies_pair() {
        let model = SupportedAttributesOptionsResourceHierarchyKey {
            key: ts(),
            value: ts(),
        };
        assert_eq!(
            resource_hierarchy_key_to_map(&model),
            Ok(attrs(vec![("key", s("testString")), ("value", s("testString"))]))
        );
    }

    #[test]
    fn resource_hierarchy_value_to_map_copies_key() {
        let model = SupportedAttributesOptionsResourceHierarchyValue { key: ts() };
        assert_eq!(
            resource_hierarchy_value_to_map(&model),
            Ok(attrs(vec![("key", s("testString"))]))
        );
    }

    #[test]
    fn supported_attribute_ui_to_map_nests_input_details() {
        assert_eq!(supported_attribute_ui_to_map(&ui_model()), Ok(ui_map()));
    }

    #[test]
    fn ui_input_details_to_map_uses_type_key() {
        assert_eq!(
            ui_input_details_to_map(&input_details_model()),
            Ok(input_details_map())
        );
    }

    #[test]
    fn ui_input_value_to_map_nests_display_name() {
        assert_eq!(ui_input_value_to_map(&input_value_model()), Ok(input_value_map()));
    }

    #[test]
    fn ui_input_gst_to_map_copies_query() {
        assert_eq!(ui_input_gst_to_map(&gst_model()), Ok(gst_map()));
    }

    #[test]
    fn ui_input_url_to_map_copies_endpoint() {
        assert_eq!(ui_input_url_to_map(&url_model()), Ok(url_map()));
    }

    #[test]
    fn supported_authorization_subject_to_map_nests_attributes() {
        let model = IamServiceRegistrationSupportedAuthorizationSubject {
            attributes: Some(subject_attribute_model()),
            roles: Some(vec!["testString".to_string()]),
        };
        assert_eq!(
            supported_authorization_subject_to_map(&model),
            Ok(attrs(vec![
                ("attributes", Value::block(subject_attribute_map())),
                ("roles", ts_list()),
            ]))
        );
    }

    #[test]
    fn authorization_subject_attribute_to_map_copies_names() {
        assert_eq!(
            authorization_subject_attribute_to_map(&subject_attribute_model()),
            Ok(subject_attribute_map())
        );
    }

    #[test]
    fn supported_role_to_map_copies_every_block() {
        let model = IamServiceRegistrationSupportedRole {
            id: ts(),
            description: Some(description_model()),
            display_name: Some(display_name_model()),
            options: Some(role_options_model()),
        };
        assert_eq!(
            supported_role_to_map(&model),
            Ok(attrs(vec![
                ("id", s("testString")),
                ("description", Value::block(locale_map())),
                ("display_name", Value::block(locale_map())),
                ("options", Value::block(role_options_map())),
            ]))
        );
    }

    #[test]
    fn supported_role_options_to_map_copies_policy() {
        assert_eq!(
            supported_role_options_to_map(&role_options_model()),
            Ok(role_options_map())
        );
    }

    #[test]
    fn supported_network_to_map_lists_environment_attributes() {
        let model = IamServiceRegistrationSupportedNetwork {
            environment_attributes: Some(vec![environment_attribute_model()]),
        };
        assert_eq!(
            supported_network_to_map(&model),
            Ok(attrs(vec![(
                "environment_attributes",
                Value::List(vec![Value::Map(environment_attribute_map())]),
            )]))
        );
    }

    #[test]
    fn environment_attribute_to_map_nests_options() {
        assert_eq!(
            environment_attribute_to_map(&environment_attribute_model()),
            Ok(environment_attribute_map())
        );
    }

    #[test]
    fn environment_attribute_options_to_map_copies_hidden() {
        let model = EnvironmentAttributeOptions { hidden: Some(true) };
        assert_eq!(
            environment_attribute_options_to_map(&model),
            Ok(attrs(vec![("hidden", Value::Bool(true))]))
        );
    }

    #[test]
    fn empty_additional_properties_are_left_out() {
        let model = IamServiceRegistrationSupportedAnonymousAccessAttributes {
            account_id: ts(),
            ..Default::default()
        };
        assert_eq!(
            supported_anonymous_access_attributes_to_map(&model),
            Ok(attrs(vec![("account_id", s("testString"))]))
        );
    }

    // -------------------------------------------------------------------------
    // Map -> object
    // -------------------------------------------------------------------------

    #[test]
    fn map_to_action_reads_translations() {
        assert_eq!(map_to_action(&action_map()), Ok(action_model()));
    }

    #[test]
    fn map_to_description_object_reads_every_locale() {
        assert_eq!(map_to_description_object(&locale_map()), Ok(description_model()));
    }

    #[test]
    fn map_to_display_name_object_reads_every_locale() {
        assert_eq!(
            map_to_display_name_object(&locale_map()),
            Ok(display_name_model())
        );
    }

    #[test]
    fn map_to_action_options_reads_hidden() {
        assert_eq!(
            map_to_action_options(&attrs(vec![("hidden", Value::Bool(true))])),
            Ok(IamServiceRegistrationActionOptions { hidden: Some(true) })
        );
    }

    #[test]
    fn map_to_resource_hierarchy_attribute_reads_pair() {
        let map = attrs(vec![("key", s("testString")), ("value", s("testString"))]);
        assert_eq!(
            map_to_resource_hierarchy_attribute(&map),
            Ok(IamServiceRegistrationResourceHierarchyAttribute {
                key: ts(),
                value: ts(),
            })
        );
    }

    #[test]
    fn map_to_supported_anonymous_access_reads_attributes() {
        let map = attrs(vec![
            ("attributes", Value::block(anonymous_attributes_map())),
            ("roles", ts_list()),
        ]);
        assert_eq!(
            map_to_supported_anonymous_access(&map),
            Ok(IamServiceRegistrationSupportedAnonymousAccess {
                attributes: Some(anonymous_attributes_model()),
                roles: Some(vec!["testString".to_string()]),
            })
        );
    }

    #[test]
    fn map_to_supported_anonymous_access_attributes_reads_additional_properties() {
        assert_eq!(
            map_to_supported_anonymous_access_attributes(&anonymous_attributes_map()),
            Ok(anonymous_attributes_model())
        );
    }

    #[test]
    fn map_to_supported_attribute_reads_every_block() {
        assert_eq!(
            map_to_supported_attribute(&supported_attribute_map()),
            Ok(supported_attribute_model())
        );
    }

    #[test]
    fn map_to_supported_attributes_options_reads_lists_and_hierarchy() {
        assert_eq!(
            map_to_supported_attributes_options(&options_map()),
            Ok(options_model())
        );
    }

    #[test]
    fn map_to_resource_hierarchy_reads_key_and_value() {
        assert_eq!(map_to_resource_hierarchy(&hierarchy_map()), Ok(hierarchy_model()));
    }

    #[test]
    fn map_to_resource_hierarchy_key_reads_pair() {
        let map = attrs(vec![("key", s("testString")), ("value", s("testString"))]);
        assert_eq!(
            map_to_resource_hierarchy_key(&map),
            Ok(SupportedAttributesOptionsResourceHierarchyKey {
                key: ts(),
                value: ts(),
            })
        );
    }

    #[test]
    fn map_to_resource_hierarchy_value_reads_key() {
        assert_eq!(
            map_to_resource_hierarchy_value(&attrs(vec![("key", s("testString"))])),
            Ok(SupportedAttributesOptionsResourceHierarchyValue { key: ts() })
        );
    }

    #[test]
    fn map_to_supported_attribute_ui_reads_input_details() {
        assert_eq!(map_to_supported_attribute_ui(&ui_map()), Ok(ui_model()));
    }

    #[test]
    fn map_to_ui_input_details_reads_type_key() {
        assert_eq!(
            map_to_ui_input_details(&input_details_map()),
            Ok(input_details_model())
        );
    }

    #[test]
    fn map_to_ui_input_value_reads_display_name() {
        assert_eq!(map_to_ui_input_value(&input_value_map()), Ok(input_value_model()));
    }

    #[test]
    fn map_to_ui_input_gst_reads_query() {
        assert_eq!(map_to_ui_input_gst(&gst_map()), Ok(gst_model()));
    }

    #[test]
    fn map_to_ui_input_url_reads_endpoint() {
        assert_eq!(map_to_ui_input_url(&url_map()), Ok(url_model()));
    }

    #[test]
    fn map_to_supported_authorization_subject_reads_attributes() {
        let map = attrs(vec![
            ("attributes", Value::block(subject_attribute_map())),
            ("roles", ts_list()),
        ]);
        assert_eq!(
            map_to_supported_authorization_subject(&map),
            Ok(IamServiceRegistrationSupportedAuthorizationSubject {
                attributes: Some(subject_attribute_model()),
                roles: Some(vec!["testString".to_string()]),
            })
        );
    }

    #[test]
    fn map_to_authorization_subject_attribute_reads_names() {
        assert_eq!(
            map_to_authorization_subject_attribute(&subject_attribute_map()),
            Ok(subject_attribute_model())
        );
    }

    #[test]
    fn map_to_supported_role_reads_default_only_names() {
        let mut default_only = Attributes::new();
        default_only.insert("default".to_string(), s("testString"));
        let map = attrs(vec![
            ("id", s("testString")),
            ("description", Value::block(default_only.clone())),
            ("display_name", Value::block(default_only)),
            ("options", Value::block(role_options_map())),
        ]);

        let role = map_to_supported_role(&map).unwrap();
        assert_eq!(role.id, ts());
        assert_eq!(role.display_name.unwrap().default, ts());
        assert_eq!(role.description.unwrap().en, None);
        assert_eq!(role.options, Some(role_options_model()));
    }

    #[test]
    fn map_to_supported_role_options_reads_policy() {
        assert_eq!(
            map_to_supported_role_options(&role_options_map()),
            Ok(role_options_model())
        );
    }

    #[test]
    fn map_to_supported_network_reads_environment_attributes() {
        let map = attrs(vec![(
            "environment_attributes",
            Value::List(vec![Value::Map(environment_attribute_map())]),
        )]);
        assert_eq!(
            map_to_supported_network(&map),
            Ok(IamServiceRegistrationSupportedNetwork {
                environment_attributes: Some(vec![environment_attribute_model()]),
            })
        );
    }

    #[test]
    fn map_to_environment_attribute_reads_options() {
        assert_eq!(
            map_to_environment_attribute(&environment_attribute_map()),
            Ok(environment_attribute_model())
        );
    }

    #[test]
    fn map_to_environment_attribute_options_reads_hidden() {
        assert_eq!(
            map_to_environment_attribute_options(&attrs(vec![("hidden", Value::Bool(true))])),
            Ok(EnvironmentAttributeOptions { hidden: Some(true) })
        );
    }
}
