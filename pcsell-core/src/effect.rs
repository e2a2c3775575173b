//! Effect - Side effects expressed as values
//!
//! An Effect describes a single operation against the remote service.
//! Nothing happens until an Interpreter executes it.

use std::collections::HashMap;

use crate::resource::{Resource, ResourceId, State, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Create a new resource
    Create(Resource),
    /// Update an existing resource in place
    Update {
        id: ResourceId,
        from: State,
        to: Resource,
        /// Top-level attributes that differ
        changed: Vec<String>,
    },
    /// Delete a resource
    Delete {
        id: ResourceId,
        identifier: String,
        /// Configuration-only attributes needed to address the resource
        known: HashMap<String, Value>,
    },
    /// Bring an existing remote object under management
    Import { id: ResourceId, identifier: String },
}

impl Effect {
    pub fn resource_id(&self) -> &ResourceId {
        match self {
            Effect::Create(r) => &r.id,
            Effect::Update { id, .. } | Effect::Delete { id, .. } | Effect::Import { id, .. } => {
                id
            }
        }
    }

    /// Whether executing this Effect changes remote state
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Effect::Import { .. })
    }

    /// Plan marker used when rendering (`+`, `~`, `-`, `<=`)
    pub fn symbol(&self) -> &'static str {
        match self {
            Effect::Create(_) => "+",
            Effect::Update { .. } => "~",
            Effect::Delete { .. } => "-",
            Effect::Import { .. } => "<=",
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::Import { id, identifier } => {
                write!(f, "{} {} (id: {})", self.symbol(), id, identifier)
            }
            Effect::Delete { id, identifier, .. } => {
                write!(f, "{} {} (id: {})", self.symbol(), id, identifier)
            }
            _ => write!(f, "{} {}", self.symbol(), self.resource_id()),
        }
    }
}
