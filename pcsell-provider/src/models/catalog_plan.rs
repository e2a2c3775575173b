//! Global catalog plan objects

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A pricing plan attached to a catalog product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalCatalogPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview_ui: Option<GlobalCatalogOverviewUi>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_provider: Option<CatalogProductProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GlobalCatalogPlanMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing)]
    pub created: Option<String>,
    #[serde(skip_serializing)]
    pub updated: Option<String>,
}

/// Body of a catalog plan PATCH request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalCatalogPlanPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview_ui: Option<GlobalCatalogOverviewUi>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_provider: Option<CatalogProductProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GlobalCatalogPlanMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalCatalogOverviewUi {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<GlobalCatalogOverviewUiTranslatedContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalCatalogOverviewUiTranslatedContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
}

/// Contact details of the party providing the object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogProductProvider {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalCatalogPlanMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rc_compatible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui: Option<GlobalCatalogMetadataUi>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<GlobalCatalogMetadataService>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<GlobalCatalogMetadataPricing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<GlobalCatalogPlanMetadataPlan>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalCatalogMetadataUi {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strings: Option<GlobalCatalogMetadataUiStrings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<GlobalCatalogMetadataUiUrls>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_by_side_index: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalCatalogMetadataUiStrings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<GlobalCatalogMetadataUiStringsContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalCatalogMetadataUiStringsContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullets: Option<Vec<CatalogHighlightItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<CatalogProductMediaItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeddable_dashboard: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogHighlightItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_i18n: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_i18n: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogProductMediaItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_i18n: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalCatalogMetadataUiUrls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apidocs_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_details_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_create_page_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalCatalogMetadataService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rc_provisionable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iam_compatible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bindable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_updateable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_key_supported: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalCatalogMetadataPricing {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub pricing_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalCatalogPlanMetadataPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_internal_users: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bindable: Option<bool>,
}
