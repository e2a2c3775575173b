//! pcsell Partner Center Sell Provider
//!
//! Manages IBM Cloud Partner Center Sell onboarding objects through the
//! Partner Center Sell REST API.
//!
//! ## Module Structure
//!
//! - `resources` - Resource schemas and CRUD operations
//! - `provider` - PcsellProvider implementation
//! - `client` - Typed REST client
//! - `convert` - Attribute map <-> API object conversion
//! - `patch` - Merge-patch body construction
//! - `acctest` - Acceptance test harness

pub mod acctest;
pub mod auth;
pub mod client;
pub mod config;
pub mod convert;
pub mod models;
pub mod patch;
pub mod provider;
pub mod resources;
pub mod utils;

// Re-export main types
pub use client::{ApiError, PartnerCenterSellClient};
pub use config::ProviderConfig;
pub use provider::PcsellProvider;

use std::collections::HashMap;

use pcsell_core::provider::{BoxFuture, Provider, ProviderResult};
use pcsell_core::resource::{Resource, ResourceId, State, Value};

use resources::resource_types;

// =============================================================================
// Provider Trait Implementation
// =============================================================================

impl Provider for PcsellProvider {
    fn name(&self) -> &'static str {
        "pcsell"
    }

    fn resource_types(&self) -> Vec<Box<dyn pcsell_core::provider::ResourceType>> {
        resource_types()
    }

    fn read(
        &self,
        id: &ResourceId,
        identifier: &str,
        known: &HashMap<String, Value>,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let known = known.clone();
        Box::pin(async move { self.read_resource(&id, &identifier, &known).await })
    }

    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move { self.create_resource(resource).await })
    }

    fn update(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let from = from.clone();
        let to = to.clone();
        Box::pin(async move { self.update_resource(id, &identifier, from, to).await })
    }

    fn delete(
        &self,
        id: &ResourceId,
        identifier: &str,
        known: &HashMap<String, Value>,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let known = known.clone();
        Box::pin(async move { self.delete_resource(&id, &identifier, &known).await })
    }
}
