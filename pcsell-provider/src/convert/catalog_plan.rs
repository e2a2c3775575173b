//! Catalog plan conversions

use crate::models::catalog_plan::*;

use super::{
    get_block, get_blocks, get_bool, get_f64, get_string, get_string_map, put_block, put_blocks,
    put_bool, put_f64, put_string, put_string_map, Attributes, ConvertResult,
};

pub fn overview_ui_to_map(model: &GlobalCatalogOverviewUi) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_block(&mut map, "en", &model.en, overview_ui_translated_content_to_map)?;
    Ok(map)
}

pub fn overview_ui_translated_content_to_map(
    model: &GlobalCatalogOverviewUiTranslatedContent,
) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "display_name", &model.display_name);
    put_string(&mut map, "description", &model.description);
    put_string(&mut map, "long_description", &model.long_description);
    Ok(map)
}

pub fn product_provider_to_map(model: &CatalogProductProvider) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "name", &model.name);
    put_string(&mut map, "email", &model.email);
    Ok(map)
}

pub fn plan_metadata_to_map(model: &GlobalCatalogPlanMetadata) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_bool(&mut map, "rc_compatible", model.rc_compatible);
    put_block(&mut map, "ui", &model.ui, metadata_ui_to_map)?;
    put_block(&mut map, "service", &model.service, metadata_service_to_map)?;
    put_block(&mut map, "pricing", &model.pricing, metadata_pricing_to_map)?;
    put_block(&mut map, "plan", &model.plan, plan_metadata_plan_to_map)?;
    Ok(map)
}

pub fn metadata_ui_to_map(model: &GlobalCatalogMetadataUi) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_block(&mut map, "strings", &model.strings, metadata_ui_strings_to_map)?;
    put_block(&mut map, "urls", &model.urls, metadata_ui_urls_to_map)?;
    put_bool(&mut map, "hidden", model.hidden);
    put_f64(&mut map, "side_by_side_index", model.side_by_side_index);
    Ok(map)
}

pub fn metadata_ui_strings_to_map(
    model: &GlobalCatalogMetadataUiStrings,
) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_block(&mut map, "en", &model.en, metadata_ui_strings_content_to_map)?;
    Ok(map)
}

pub fn metadata_ui_strings_content_to_map(
    model: &GlobalCatalogMetadataUiStringsContent,
) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_blocks(&mut map, "bullets", &model.bullets, highlight_item_to_map)?;
    put_blocks(&mut map, "media", &model.media, media_item_to_map)?;
    put_string(&mut map, "embeddable_dashboard", &model.embeddable_dashboard);
    Ok(map)
}

pub fn highlight_item_to_map(model: &CatalogHighlightItem) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "description", &model.description);
    put_string_map(&mut map, "description_i18n", &model.description_i18n);
    put_string(&mut map, "title", &model.title);
    put_string_map(&mut map, "title_i18n", &model.title_i18n);
    Ok(map)
}

pub fn media_item_to_map(model: &CatalogProductMediaItem) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "caption", &model.caption);
    put_string_map(&mut map, "caption_i18n", &model.caption_i18n);
    put_string(&mut map, "thumbnail", &model.thumbnail);
    put_string(&mut map, "type", &model.media_type);
    put_string(&mut map, "url", &model.url);
    Ok(map)
}

pub fn metadata_ui_urls_to_map(model: &GlobalCatalogMetadataUiUrls) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "doc_url", &model.doc_url);
    put_string(&mut map, "apidocs_url", &model.apidocs_url);
    put_string(&mut map, "terms_url", &model.terms_url);
    put_string(&mut map, "instructions_url", &model.instructions_url);
    put_string(&mut map, "catalog_details_url", &model.catalog_details_url);
    put_string(&mut map, "custom_create_page_url", &model.custom_create_page_url);
    put_string(&mut map, "dashboard", &model.dashboard);
    Ok(map)
}

pub fn metadata_service_to_map(model: &GlobalCatalogMetadataService) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_bool(&mut map, "rc_provisionable", model.rc_provisionable);
    put_bool(&mut map, "iam_compatible", model.iam_compatible);
    put_bool(&mut map, "bindable", model.bindable);
    put_bool(&mut map, "plan_updateable", model.plan_updateable);
    put_bool(&mut map, "service_key_supported", model.service_key_supported);
    Ok(map)
}

pub fn metadata_pricing_to_map(model: &GlobalCatalogMetadataPricing) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_string(&mut map, "type", &model.pricing_type);
    put_string(&mut map, "origin", &model.origin);
    Ok(map)
}

pub fn plan_metadata_plan_to_map(model: &GlobalCatalogPlanMetadataPlan) -> ConvertResult<Attributes> {
    let mut map = Attributes::new();
    put_bool(&mut map, "allow_internal_users", model.allow_internal_users);
    put_bool(&mut map, "bindable", model.bindable);
    Ok(map)
}

pub fn map_to_product_provider(map: &Attributes) -> ConvertResult<CatalogProductProvider> {
    Ok(CatalogProductProvider {
        name: get_string(map, "name")?,
        email: get_string(map, "email")?,
    })
}

pub fn map_to_overview_ui(map: &Attributes) -> ConvertResult<GlobalCatalogOverviewUi> {
    Ok(GlobalCatalogOverviewUi {
        en: get_block(map, "en", map_to_overview_ui_translated_content)?,
    })
}

pub fn map_to_overview_ui_translated_content(
    map: &Attributes,
) -> ConvertResult<GlobalCatalogOverviewUiTranslatedContent> {
    Ok(GlobalCatalogOverviewUiTranslatedContent {
        display_name: get_string(map, "display_name")?,
        description: get_string(map, "description")?,
        long_description: get_string(map, "long_description")?,
    })
}

pub fn map_to_plan_metadata(map: &Attributes) -> ConvertResult<GlobalCatalogPlanMetadata> {
    Ok(GlobalCatalogPlanMetadata {
        rc_compatible: get_bool(map, "rc_compatible")?,
        ui: get_block(map, "ui", map_to_metadata_ui)?,
        service: get_block(map, "service", map_to_metadata_service)?,
        pricing: get_block(map, "pricing", map_to_metadata_pricing)?,
        plan: get_block(map, "plan", map_to_plan_metadata_plan)?,
    })
}

pub fn map_to_metadata_ui(map: &Attributes) -> ConvertResult<GlobalCatalogMetadataUi> {
    Ok(GlobalCatalogMetadataUi {
        strings: get_block(map, "strings", map_to_metadata_ui_strings)?,
        urls: get_block(map, "urls", map_to_metadata_ui_urls)?,
        hidden: get_bool(map, "hidden")?,
        side_by_side_index: get_f64(map, "side_by_side_index")?,
    })
}

pub fn map_to_metadata_ui_strings(map: &Attributes) -> ConvertResult<GlobalCatalogMetadataUiStrings> {
    Ok(GlobalCatalogMetadataUiStrings {
        en: get_block(map, "en", map_to_metadata_ui_strings_content)?,
    })
}

pub fn map_to_metadata_ui_strings_content(
    map: &Attributes,
) -> ConvertResult<GlobalCatalogMetadataUiStringsContent> {
    Ok(GlobalCatalogMetadataUiStringsContent {
        bullets: get_blocks(map, "bullets", map_to_highlight_item)?,
        media: get_blocks(map, "media", map_to_media_item)?,
        embeddable_dashboard: get_string(map, "embeddable_dashboard")?,
    })
}

pub fn map_to_highlight_item(map: &Attributes) -> ConvertResult<CatalogHighlightItem> {
    Ok(CatalogHighlightItem {
        description: get_string(map, "description")?,
        description_i18n: get_string_map(map, "description_i18n")?,
        title: get_string(map, "title")?,
        title_i18n: get_string_map(map, "title_i18n")?,
    })
}

pub fn map_to_media_item(map: &Attributes) -> ConvertResult<CatalogProductMediaItem> {
    Ok(CatalogProductMediaItem {
        caption: get_string(map, "caption")?,
        caption_i18n: get_string_map(map, "caption_i18n")?,
        thumbnail: get_string(map, "thumbnail")?,
        media_type: get_string(map, "type")?,
        url: get_string(map, "url")?,
    })
}

pub fn map_to_metadata_ui_urls(map: &Attributes) -> ConvertResult<GlobalCatalogMetadataUiUrls> {
    Ok(GlobalCatalogMetadataUiUrls {
        doc_url: get_string(map, "doc_url")?,
        apidocs_url: get_string(map, "apidocs_url")?,
        terms_url: get_string(map, "terms_url")?,
        instructions_url: get_string(map, "instructions_url")?,
        catalog_details_url: get_string(map, "catalog_details_url")?,
        custom_create_page_url: get_string(map, "custom_create_page_url")?,
        dashboard: get_string(map, "dashboard")?,
    })
}

pub fn map_to_metadata_service(map: &Attributes) -> ConvertResult<GlobalCatalogMetadataService> {
    Ok(GlobalCatalogMetadataService {
        rc_provisionable: get_bool(map, "rc_provisionable")?,
        iam_compatible: get_bool(map, "iam_compatible")?,
        bindable: get_bool(map, "bindable")?,
        plan_updateable: get_bool(map, "plan_updateable")?,
        service_key_supported: get_bool(map, "service_key_supported")?,
    })
}

pub fn map_to_metadata_pricing(map: &Attributes) -> ConvertResult<GlobalCatalogMetadataPricing> {
    Ok(GlobalCatalogMetadataPricing {
        pricing_type: get_string(map, "type")?,
        origin: get_string(map, "origin")?,
    })
}

pub fn map_to_plan_metadata_plan(map: &Attributes) -> ConvertResult<GlobalCatalogPlanMetadataPlan> {
    Ok(GlobalCatalogPlanMetadataPlan {
        allow_internal_users: get_bool(map, "allow_internal_users")?,
        bindable: get_bool(map, "bindable")?,
    })
}
