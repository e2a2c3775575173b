//! IAM service registration objects

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// IAM registration of a service, addressed by its programmatic name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IamServiceRegistration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<IamServiceRegistrationAction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_policy_scopes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<IamServiceRegistrationDisplayNameObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_hierarchy_attribute: Option<IamServiceRegistrationResourceHierarchyAttribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_anonymous_accesses: Option<Vec<IamServiceRegistrationSupportedAnonymousAccess>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_attributes: Option<Vec<IamServiceRegistrationSupportedAttribute>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_authorization_subjects:
        Option<Vec<IamServiceRegistrationSupportedAuthorizationSubject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_roles: Option<Vec<IamServiceRegistrationSupportedRole>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_network: Option<IamServiceRegistrationSupportedNetwork>,
}

/// Body of an IAM registration PATCH request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IamServiceRegistrationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<IamServiceRegistrationAction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_policy_scopes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<IamServiceRegistrationDisplayNameObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_hierarchy_attribute: Option<IamServiceRegistrationResourceHierarchyAttribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_anonymous_accesses: Option<Vec<IamServiceRegistrationSupportedAnonymousAccess>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_attributes: Option<Vec<IamServiceRegistrationSupportedAttribute>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_authorization_subjects:
        Option<Vec<IamServiceRegistrationSupportedAuthorizationSubject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_roles: Option<Vec<IamServiceRegistrationSupportedRole>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_network: Option<IamServiceRegistrationSupportedNetwork>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IamServiceRegistrationAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<IamServiceRegistrationDescriptionObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<IamServiceRegistrationDisplayNameObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<IamServiceRegistrationActionOptions>,
}

/// Translated descriptions, one optional string per supported locale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IamServiceRegistrationDescriptionObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub de: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub es: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub it: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ja: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ko: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pt_br: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zh_tw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zh_cn: Option<String>,
}

/// Translated display names, one optional string per supported locale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IamServiceRegistrationDisplayNameObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub de: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub es: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub it: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ja: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ko: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pt_br: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zh_tw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zh_cn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IamServiceRegistrationActionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IamServiceRegistrationResourceHierarchyAttribute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IamServiceRegistrationSupportedAnonymousAccess {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<IamServiceRegistrationSupportedAnonymousAccessAttributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

/// Anonymous access attributes; properties beyond the two named ones are
/// carried inline on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IamServiceRegistrationSupportedAnonymousAccessAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(flatten)]
    pub additional_properties: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IamServiceRegistrationSupportedAttribute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<SupportedAttributesOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<IamServiceRegistrationDisplayNameObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<IamServiceRegistrationDescriptionObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui: Option<SupportedAttributeUi>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportedAttributesOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operators: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_patterns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_empty_value_supported: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_string_exists_false_value_supported: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_hierarchy: Option<SupportedAttributesOptionsResourceHierarchy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportedAttributesOptionsResourceHierarchy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<SupportedAttributesOptionsResourceHierarchyKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<SupportedAttributesOptionsResourceHierarchyValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportedAttributesOptionsResourceHierarchyKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportedAttributesOptionsResourceHierarchyValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportedAttributeUi {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_details: Option<SupportedAttributeUiInputDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportedAttributeUiInputDetails {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<SupportedAttributeUiInputValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst: Option<SupportedAttributeUiInputGst>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<SupportedAttributeUiInputUrl>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportedAttributeUiInputValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<IamServiceRegistrationDisplayNameObject>,
}

/// Global search query backing a selector input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportedAttributeUiInputGst {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_property_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_property_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_option_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportedAttributeUiInputUrl {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_option_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IamServiceRegistrationSupportedAuthorizationSubject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<SupportAuthorizationSubjectAttribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportAuthorizationSubjectAttribute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IamServiceRegistrationSupportedRole {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<IamServiceRegistrationDescriptionObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<IamServiceRegistrationDisplayNameObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<SupportedRoleOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportedRoleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_policy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IamServiceRegistrationSupportedNetwork {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_attributes: Option<Vec<EnvironmentAttribute>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentAttribute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<EnvironmentAttributeOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentAttributeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}
