//! Request and response bodies of the Partner Center Sell API
//!
//! Every field is optional: the service omits what is unset and the
//! provider only sends what the configuration declares.

pub mod catalog_plan;
pub mod iam_registration;

use serde::Deserialize;

/// Error body returned by the service
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub errors: Vec<ServiceErrorItem>,
    pub trace: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceErrorItem {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl ServiceErrorBody {
    /// Messages of all reported errors, joined
    pub fn message(&self) -> Option<String> {
        let messages: Vec<&str> = self
            .errors
            .iter()
            .filter_map(|e| e.message.as_deref())
            .collect();
        if messages.is_empty() {
            None
        } else {
            Some(messages.join("; "))
        }
    }
}
