//! State file structures

use std::collections::HashMap;

use pcsell_core::resource::{ResourceId, State, Value};
use serde::{Deserialize, Serialize};

/// Everything a configuration manages, as persisted by a backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFile {
    /// State file format version
    pub version: u32,
    /// Bumped on every write
    pub serial: u64,
    /// Fixed when the state is first created; a backend refuses to
    /// overwrite a state of another lineage
    pub lineage: String,
    /// Version of pcsell that last wrote this state
    pub pcsell_version: String,
    pub resources: Vec<ResourceState>,
}

impl StateFile {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            serial: 0,
            lineage: uuid::Uuid::new_v4().to_string(),
            pcsell_version: env!("CARGO_PKG_VERSION").to_string(),
            resources: Vec::new(),
        }
    }

    pub fn increment_serial(&mut self) {
        self.serial += 1;
        self.pcsell_version = env!("CARGO_PKG_VERSION").to_string();
    }

    pub fn find(&self, id: &ResourceId) -> Option<&ResourceState> {
        self.resources.iter().find(|r| r.matches(id))
    }

    /// Record a state returned by the provider, replacing any earlier record
    pub fn record(&mut self, state: &State, provider: &str) {
        let recorded = ResourceState::from_state(state, provider);
        match self.resources.iter_mut().find(|r| r.matches(&state.id)) {
            Some(existing) => *existing = recorded,
            None => self.resources.push(recorded),
        }
    }

    pub fn forget(&mut self, id: &ResourceId) -> Option<ResourceState> {
        let pos = self.resources.iter().position(|r| r.matches(id))?;
        Some(self.resources.remove(pos))
    }

    /// Recorded states keyed by resource ID
    pub fn states(&self) -> HashMap<ResourceId, State> {
        self.resources
            .iter()
            .map(|r| {
                let state = r.to_state();
                (state.id.clone(), state)
            })
            .collect()
    }

    /// Recorded states whose resources are not in `declared`
    pub fn orphans(&self, declared: &[ResourceId]) -> Vec<State> {
        self.resources
            .iter()
            .filter(|r| !declared.iter().any(|id| r.matches(id)))
            .map(ResourceState::to_state)
            .collect()
    }
}

impl Default for StateFile {
    fn default() -> Self {
        Self::new()
    }
}

/// One managed remote object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    /// e.g. "ibm_onboarding_catalog_plan"
    pub resource_type: String,
    /// Label of the resource block
    pub name: String,
    pub provider: String,
    /// Composite remote ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub attributes: HashMap<String, serde_json::Value>,
}

impl ResourceState {
    pub fn from_state(state: &State, provider: impl Into<String>) -> Self {
        Self {
            resource_type: state.id.resource_type.clone(),
            name: state.id.name.clone(),
            provider: provider.into(),
            identifier: state.identifier.clone(),
            attributes: state
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        }
    }

    pub fn id(&self) -> ResourceId {
        ResourceId::new(&self.resource_type, &self.name)
    }

    fn matches(&self, id: &ResourceId) -> bool {
        self.resource_type == id.resource_type && self.name == id.name
    }

    /// Rebuild the provider-facing state; JSON nulls are dropped
    pub fn to_state(&self) -> State {
        let attributes = self
            .attributes
            .iter()
            .filter_map(|(k, v)| Value::from_json(v).map(|v| (k.clone(), v)))
            .collect();
        let state = State::existing(self.id(), attributes);
        match &self.identifier {
            Some(identifier) => state.with_identifier(identifier.clone()),
            None => state,
        }
    }
}
