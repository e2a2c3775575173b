//! Partner Center Sell provider implementation
//!
//! Routes each operation to the resource module that owns the type.

use std::collections::HashMap;

use pcsell_core::provider::{ProviderError, ProviderResult};
use pcsell_core::resource::{Resource, ResourceId, State, Value};

use crate::client::PartnerCenterSellClient;
use crate::config::{ConfigError, ProviderConfig};
use crate::resources::{catalog_plan, iam_registration};

/// Partner Center Sell Provider
#[derive(Debug)]
pub struct PcsellProvider {
    client: PartnerCenterSellClient,
}

fn unknown_resource_type(resource_type: &str) -> ProviderError {
    ProviderError::new(format!("Unknown resource type: {}", resource_type))
}

impl PcsellProvider {
    pub fn new(client: PartnerCenterSellClient) -> Self {
        Self { client }
    }

    /// Create a provider from resolved settings
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let client = PartnerCenterSellClient::from_config(config)?;
        log::debug!("using Partner Center Sell API at {}", client.base_url());
        Ok(Self::new(client))
    }

    pub fn client(&self) -> &PartnerCenterSellClient {
        &self.client
    }

    pub async fn read_resource(
        &self,
        id: &ResourceId,
        identifier: &str,
        known: &HashMap<String, Value>,
    ) -> ProviderResult<State> {
        match id.resource_type.as_str() {
            catalog_plan::RESOURCE_TYPE => {
                catalog_plan::read(&self.client, id, identifier, known).await
            }
            iam_registration::RESOURCE_TYPE => {
                iam_registration::read(&self.client, id, identifier, known).await
            }
            other => Err(unknown_resource_type(other).for_resource(id.clone())),
        }
    }

    pub async fn create_resource(&self, resource: Resource) -> ProviderResult<State> {
        match resource.id.resource_type.as_str() {
            catalog_plan::RESOURCE_TYPE => catalog_plan::create(&self.client, &resource).await,
            iam_registration::RESOURCE_TYPE => {
                iam_registration::create(&self.client, &resource).await
            }
            other => Err(unknown_resource_type(other).for_resource(resource.id.clone())),
        }
    }

    pub async fn update_resource(
        &self,
        id: ResourceId,
        identifier: &str,
        from: State,
        to: Resource,
    ) -> ProviderResult<State> {
        match id.resource_type.as_str() {
            catalog_plan::RESOURCE_TYPE => {
                catalog_plan::update(&self.client, &id, identifier, &from, &to).await
            }
            iam_registration::RESOURCE_TYPE => {
                iam_registration::update(&self.client, &id, identifier, &from, &to).await
            }
            other => Err(unknown_resource_type(other).for_resource(id.clone())),
        }
    }

    pub async fn delete_resource(
        &self,
        id: &ResourceId,
        identifier: &str,
        known: &HashMap<String, Value>,
    ) -> ProviderResult<()> {
        match id.resource_type.as_str() {
            catalog_plan::RESOURCE_TYPE => {
                catalog_plan::delete(&self.client, id, identifier, known).await
            }
            iam_registration::RESOURCE_TYPE => {
                iam_registration::delete(&self.client, id, identifier, known).await
            }
            other => Err(unknown_resource_type(other).for_resource(id.clone())),
        }
    }
}
