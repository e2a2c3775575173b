//! Provider settings from the environment and the `provider` block

use std::collections::HashMap;

use pcsell_core::resource::Value;

use crate::auth::Authenticator;

pub const DEFAULT_URL: &str = "https://product-lifecycle.cloud.ibm.com/openapi/v1";
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "No credentials configured: set IC_API_KEY, IBMCLOUD_API_KEY or IBMCLOUD_IAM_TOKEN, or api_key in the provider block"
    )]
    MissingCredentials,

    #[error("Unknown provider setting '{0}'")]
    UnknownSetting(String),

    #[error("Provider setting '{name}' must be a string")]
    InvalidSetting { name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    /// Base URL of the Partner Center Sell API
    pub url: String,
    pub api_key: Option<String>,
    /// Pre-issued bearer token; wins over `api_key`
    pub iam_token: Option<String>,
    pub iam_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            api_key: None,
            iam_token: None,
            iam_url: DEFAULT_IAM_URL.to_string(),
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self {
            url: get("PCSELL_URL").unwrap_or(defaults.url),
            api_key: get("IC_API_KEY").or_else(|| get("IBMCLOUD_API_KEY")),
            iam_token: get("IBMCLOUD_IAM_TOKEN"),
            iam_url: get("IBMCLOUD_IAM_URL").unwrap_or(defaults.iam_url),
        }
    }

    /// Apply settings from the configuration's `provider` block
    pub fn with_overrides(mut self, settings: &HashMap<String, Value>) -> Result<Self, ConfigError> {
        for (name, value) in settings {
            let value = value
                .as_str()
                .ok_or_else(|| ConfigError::InvalidSetting { name: name.clone() })?
                .to_string();
            match name.as_str() {
                "url" => self.url = value,
                "api_key" => self.api_key = Some(value),
                "iam_token" => self.iam_token = Some(value),
                "iam_url" => self.iam_url = value,
                other => return Err(ConfigError::UnknownSetting(other.to_string())),
            }
        }
        Ok(self)
    }

    pub fn authenticator(&self) -> Result<Authenticator, ConfigError> {
        if let Some(token) = &self.iam_token {
            return Ok(Authenticator::bearer(token.clone()));
        }
        match &self.api_key {
            Some(key) => Ok(Authenticator::iam_api_key(key.clone(), self.iam_url.clone())),
            None => Err(ConfigError::MissingCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ProviderConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ProviderConfig::default());
        assert_eq!(config.authenticator().unwrap_err(), ConfigError::MissingCredentials);
    }

    #[test]
    fn ic_api_key_wins_over_ibmcloud_api_key() {
        let config = ProviderConfig::from_lookup(lookup(&[
            ("IC_API_KEY", "first"),
            ("IBMCLOUD_API_KEY", "second"),
            ("PCSELL_URL", "http://localhost:8080"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("first"));
        assert_eq!(config.url, "http://localhost:8080");
        assert!(matches!(
            config.authenticator(),
            Ok(Authenticator::IamApiKey { .. })
        ));
    }

    #[test]
    fn token_is_preferred_over_api_key() {
        let config = ProviderConfig::from_lookup(lookup(&[
            ("IBMCLOUD_API_KEY", "key"),
            ("IBMCLOUD_IAM_TOKEN", "Bearer tok"),
        ]));
        match config.authenticator() {
            Ok(Authenticator::BearerToken(token)) => assert_eq!(token, "tok"),
            other => panic!("Expected bearer token, got {:?}", other),
        }
    }

    #[test]
    fn provider_block_overrides_environment() {
        let mut settings = HashMap::new();
        settings.insert(
            "url".to_string(),
            Value::String("https://test.example.com/v1".to_string()),
        );
        let config = ProviderConfig::default().with_overrides(&settings).unwrap();
        assert_eq!(config.url, "https://test.example.com/v1");

        settings.insert("region".to_string(), Value::String("us-south".to_string()));
        assert_eq!(
            ProviderConfig::default().with_overrides(&settings),
            Err(ConfigError::UnknownSetting("region".to_string()))
        );
    }

    #[test]
    fn non_string_setting_is_rejected() {
        let mut settings = HashMap::new();
        settings.insert("api_key".to_string(), Value::Bool(true));
        assert_eq!(
            ProviderConfig::default().with_overrides(&settings),
            Err(ConfigError::InvalidSetting {
                name: "api_key".to_string()
            })
        );
    }
}
