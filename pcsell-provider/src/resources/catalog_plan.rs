//! ibm_onboarding_catalog_plan
//!
//! A pricing plan of a catalog product, addressed as
//! `product_id/catalog_product_id/catalog_plan_id`.

use std::collections::HashMap;

use pcsell_core::provider::ProviderResult;
use pcsell_core::resource::{Resource, ResourceId, State, Value};
use pcsell_core::schema::{types, validators, AttributeSchema, AttributeType, ResourceSchema};
use regex::Regex;

use super::{
    api_error, changed_patch_fields, check_force_new, custom_string, discriminated_error,
    env_attribute, env_of, matches_pattern, parse_error, patch_body, product_id_attribute,
    required_string, to_map_error,
};
use crate::client::PartnerCenterSellClient;
use crate::convert::catalog_plan::*;
use crate::convert::{
    get_block, get_bool, get_string, get_string_list, put_block, put_bool, put_string,
    put_string_list, Attributes,
};
use crate::models::catalog_plan::{GlobalCatalogPlan, GlobalCatalogPlanPatch};
use crate::patch::as_patch;
use crate::utils::{compose_id, sep_id_parts, ID_SEPARATOR};

pub const RESOURCE_TYPE: &str = "ibm_onboarding_catalog_plan";

/// Top-level fields the PATCH body can carry
const PATCH_FIELDS: &[&str] = &[
    "object_id",
    "name",
    "active",
    "disabled",
    "overview_ui",
    "tags",
    "pricing_tags",
    "object_provider",
    "metadata",
];

// =============================================================================
// Schema
// =============================================================================

fn validate_catalog_product_id(value: &Value) -> Result<(), String> {
    matches_pattern(r"^[a-zA-Z\-_\d]+$", 2, 128, value)
}

fn validate_name(value: &Value) -> Result<(), String> {
    let re = Regex::new(r"^[a-zA-Z0-9\-.]+$").map_err(|e| e.to_string())?;
    validators::regexp(&re, value)
}

fn string(name: &str) -> AttributeSchema {
    AttributeSchema::new(name, AttributeType::String)
}

fn boolean(name: &str) -> AttributeSchema {
    AttributeSchema::new(name, AttributeType::Bool)
}

fn i18n(name: &str) -> AttributeSchema {
    AttributeSchema::new(name, types::string_map())
}

fn metadata_ui_schema() -> AttributeType {
    types::single_block(vec![
        AttributeSchema::new(
            "strings",
            types::single_block(vec![AttributeSchema::new(
                "en",
                types::single_block(vec![
                    AttributeSchema::new(
                        "bullets",
                        types::block_list(vec![
                            string("description"),
                            i18n("description_i18n"),
                            string("title"),
                            i18n("title_i18n"),
                        ]),
                    ),
                    AttributeSchema::new(
                        "media",
                        types::block_list(vec![
                            string("caption"),
                            i18n("caption_i18n"),
                            string("thumbnail"),
                            string("type"),
                            string("url"),
                        ]),
                    ),
                    string("embeddable_dashboard"),
                ]),
            )]),
        ),
        AttributeSchema::new(
            "urls",
            types::single_block(vec![
                string("doc_url"),
                string("apidocs_url"),
                string("terms_url"),
                string("instructions_url"),
                string("catalog_details_url"),
                string("custom_create_page_url"),
                string("dashboard"),
            ]),
        ),
        boolean("hidden"),
        AttributeSchema::new("side_by_side_index", AttributeType::Float),
    ])
}

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(RESOURCE_TYPE)
        .with_description("Pricing plan of a product in the global catalog")
        .attribute(product_id_attribute())
        .attribute(
            AttributeSchema::new(
                "catalog_product_id",
                custom_string("CatalogProductId", validate_catalog_product_id),
            )
            .required()
            .force_new()
            .with_description("The unique ID of this global catalog product."),
        )
        .attribute(env_attribute())
        .attribute(string("object_id").with_description("The desired ID of the global catalog object."))
        .attribute(
            AttributeSchema::new("name", custom_string("PlanName", validate_name))
                .required()
                .with_description("The programmatic name of this plan."),
        )
        .attribute(boolean("active").required())
        .attribute(boolean("disabled").required())
        .attribute(
            AttributeSchema::new("kind", AttributeType::Enum(vec!["plan".to_string()])).required(),
        )
        .attribute(AttributeSchema::new(
            "overview_ui",
            types::single_block(vec![AttributeSchema::new(
                "en",
                types::single_block(vec![
                    string("display_name"),
                    string("description"),
                    string("long_description"),
                ]),
            )]),
        ))
        .attribute(AttributeSchema::new("tags", types::string_list()).required())
        .attribute(AttributeSchema::new("pricing_tags", types::string_list()))
        .attribute(
            AttributeSchema::new(
                "object_provider",
                types::single_block(vec![string("name"), string("email")]),
            )
            .required()
            .with_description("The provider or owner of the product."),
        )
        .attribute(AttributeSchema::new(
            "metadata",
            types::single_block(vec![
                boolean("rc_compatible"),
                AttributeSchema::new("ui", metadata_ui_schema()),
                AttributeSchema::new(
                    "service",
                    types::single_block(vec![
                        boolean("rc_provisionable"),
                        boolean("iam_compatible"),
                        boolean("bindable"),
                        boolean("plan_updateable"),
                        boolean("service_key_supported"),
                    ]),
                ),
                AttributeSchema::new(
                    "pricing",
                    types::single_block(vec![string("type"), string("origin")]),
                ),
                AttributeSchema::new(
                    "plan",
                    types::single_block(vec![boolean("allow_internal_users"), boolean("bindable")]),
                ),
            ]),
        ))
        .attribute(string("catalog_plan_id").computed())
        .attribute(AttributeSchema::new("geo_tags", types::string_list()).computed())
        .attribute(string("url").computed())
}

// =============================================================================
// Conversion
// =============================================================================

fn plan_from_attributes(
    id: &ResourceId,
    operation: &str,
    attrs: &Attributes,
) -> ProviderResult<GlobalCatalogPlan> {
    let parse = |field: &'static str| parse_error(id, operation, field);
    Ok(GlobalCatalogPlan {
        object_id: get_string(attrs, "object_id").map_err(parse("object_id"))?,
        name: get_string(attrs, "name").map_err(parse("name"))?,
        active: get_bool(attrs, "active").map_err(parse("active"))?,
        disabled: get_bool(attrs, "disabled").map_err(parse("disabled"))?,
        kind: get_string(attrs, "kind").map_err(parse("kind"))?,
        overview_ui: get_block(attrs, "overview_ui", map_to_overview_ui)
            .map_err(parse("overview_ui"))?,
        tags: get_string_list(attrs, "tags").map_err(parse("tags"))?,
        pricing_tags: get_string_list(attrs, "pricing_tags").map_err(parse("pricing_tags"))?,
        object_provider: get_block(attrs, "object_provider", map_to_product_provider)
            .map_err(parse("object_provider"))?,
        metadata: get_block(attrs, "metadata", map_to_plan_metadata).map_err(parse("metadata"))?,
        ..Default::default()
    })
}

fn plan_to_attributes(id: &ResourceId, plan: &GlobalCatalogPlan) -> ProviderResult<Attributes> {
    let mut attrs = Attributes::new();
    put_string(&mut attrs, "object_id", &plan.object_id);
    put_string(&mut attrs, "name", &plan.name);
    put_bool(&mut attrs, "active", plan.active);
    put_bool(&mut attrs, "disabled", plan.disabled);
    put_string(&mut attrs, "kind", &plan.kind);
    put_block(&mut attrs, "overview_ui", &plan.overview_ui, overview_ui_to_map)
        .map_err(to_map_error(id, "overview_ui"))?;
    put_string_list(&mut attrs, "tags", &plan.tags);
    put_string_list(&mut attrs, "pricing_tags", &plan.pricing_tags);
    put_block(
        &mut attrs,
        "object_provider",
        &plan.object_provider,
        product_provider_to_map,
    )
    .map_err(to_map_error(id, "object_provider"))?;
    put_block(&mut attrs, "metadata", &plan.metadata, plan_metadata_to_map)
        .map_err(to_map_error(id, "metadata"))?;
    put_string_list(&mut attrs, "geo_tags", &plan.geo_tags);
    put_string(&mut attrs, "url", &plan.url);
    Ok(attrs)
}

/// Patch object holding the desired value of each changed field
fn plan_patch(desired: GlobalCatalogPlan, fields: &[&str]) -> GlobalCatalogPlanPatch {
    let has = |field: &str| fields.contains(&field);
    GlobalCatalogPlanPatch {
        object_id: desired.object_id.filter(|_| has("object_id")),
        name: desired.name.filter(|_| has("name")),
        active: desired.active.filter(|_| has("active")),
        disabled: desired.disabled.filter(|_| has("disabled")),
        overview_ui: desired.overview_ui.filter(|_| has("overview_ui")),
        tags: desired.tags.filter(|_| has("tags")),
        pricing_tags: desired.pricing_tags.filter(|_| has("pricing_tags")),
        object_provider: desired.object_provider.filter(|_| has("object_provider")),
        metadata: desired.metadata.filter(|_| has("metadata")),
    }
}

fn split_id(id: &ResourceId, operation: &str, identifier: &str) -> ProviderResult<Vec<String>> {
    sep_id_parts(identifier, ID_SEPARATOR, 3)
        .map_err(|e| discriminated_error(id, operation, "sep-id-parts", e.to_string()))
}

// =============================================================================
// Operations
// =============================================================================

pub async fn create(client: &PartnerCenterSellClient, resource: &Resource) -> ProviderResult<State> {
    let id = &resource.id;
    let attrs = &resource.attributes;

    let product_id = required_string(id, "create", attrs, "product_id")?;
    let catalog_product_id = required_string(id, "create", attrs, "catalog_product_id")?;
    let env = env_of(attrs);
    let plan = plan_from_attributes(id, "create", attrs)?;

    let created = client
        .create_catalog_plan(&product_id, &catalog_product_id, env.as_deref(), &plan)
        .await
        .map_err(|e| api_error(id, "create", "create-catalog-plan", "CreateCatalogPlan", e))?;

    let plan_id = created.id.ok_or_else(|| {
        discriminated_error(
            id,
            "create",
            "create-catalog-plan",
            "CreateCatalogPlan returned no plan ID",
        )
    })?;
    let identifier = compose_id(&[&product_id, &catalog_product_id, &plan_id]);
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

    let plan = match client
        .get_catalog_plan(&parts[0], &parts[1], &parts[2], env.as_deref())
        .await
    {
        Ok(plan) => plan,
        Err(e) if e.is_not_found() => {
            log::debug!("{} {} not found", RESOURCE_TYPE, identifier);
            return Ok(State::not_found(id.clone()));
        }
        Err(e) => return Err(api_error(id, "read", "get-catalog-plan", "GetCatalogPlan", e)),
    };

    let mut attrs = plan_to_attributes(id, &plan)?;
    if let Some(env) = env {
        attrs.insert("env".to_string(), Value::String(env));
    }
    for (key, part) in ["product_id", "catalog_product_id", "catalog_plan_id"]
        .into_iter()
        .zip(&parts)
    {
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
        let desired = plan_from_attributes(id, "update", &to.attributes)?;
        let mut body = patch_body(id, &plan_patch(desired, &fields))?;
        as_patch(&mut body, &schema, &fields, &from.attributes, &to.attributes);

        client
            .update_catalog_plan(
                &parts[0],
                &parts[1],
                &parts[2],
                env_of(&to.attributes).as_deref(),
                &serde_json::Value::Object(body),
            )
            .await
            .map_err(|e| api_error(id, "update", "update-catalog-plan", "UpdateCatalogPlan", e))?;
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
        .delete_catalog_plan(&parts[0], &parts[1], &parts[2], env_of(known).as_deref())
        .await
    {
        Ok(()) => Ok(()),
        Err(e) if e.is_not_found() => {
            log::debug!("{} {} already deleted", RESOURCE_TYPE, identifier);
            Ok(())
        }
        Err(e) => Err(api_error(id, "delete", "delete-catalog-plan", "DeleteCatalogPlan", e)),
    }
}
