//! Bearer token sources for the Partner Center Sell API

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::client::ApiError;

/// Grant type for exchanging an API key at the IAM token endpoint
const APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Tokens closer than this to expiry are refreshed
const REFRESH_MARGIN_SECS: i64 = 60;

/// Issued IAM token with its expiry
#[derive(Debug, Clone)]
pub struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - now > Duration::seconds(REFRESH_MARGIN_SECS)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
    /// Expiry as seconds since the epoch
    expiration: Option<i64>,
}

impl TokenResponse {
    fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.expiration
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| self.expires_in.map(|secs| now + Duration::seconds(secs)))
            .unwrap_or(now)
    }
}

/// Where the bearer token for API calls comes from
pub enum Authenticator {
    /// Pre-issued token, used as is
    BearerToken(String),
    /// API key exchanged at the IAM token endpoint; the token is cached
    IamApiKey {
        api_key: String,
        iam_url: String,
        cached: Mutex<Option<CachedToken>>,
    },
}

// Credentials stay out of debug output
impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Authenticator::BearerToken(_) => f.write_str("BearerToken(..)"),
            Authenticator::IamApiKey { iam_url, .. } => f
                .debug_struct("IamApiKey")
                .field("iam_url", iam_url)
                .finish_non_exhaustive(),
        }
    }
}

impl Authenticator {
    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token
            .strip_prefix("Bearer ")
            .map(str::to_string)
            .unwrap_or(token);
        Authenticator::BearerToken(token)
    }

    pub fn iam_api_key(api_key: impl Into<String>, iam_url: impl Into<String>) -> Self {
        Authenticator::IamApiKey {
            api_key: api_key.into(),
            iam_url: iam_url.into().trim_end_matches('/').to_string(),
            cached: Mutex::new(None),
        }
    }

    /// Current access token, fetching a new one when needed
    pub async fn token(&self, http: &reqwest::Client) -> Result<String, ApiError> {
        match self {
            Authenticator::BearerToken(token) => Ok(token.clone()),
            Authenticator::IamApiKey {
                api_key,
                iam_url,
                cached,
            } => {
                let mut cached = cached.lock().await;
                let now = Utc::now();
                if let Some(token) = cached.as_ref()
                    && token.is_fresh(now)
                {
                    return Ok(token.access_token.clone());
                }

                log::debug!("requesting IAM token from {}", iam_url);
                let response = http
                    .post(format!("{}/identity/token", iam_url))
                    .header(reqwest::header::ACCEPT, "application/json")
                    .form(&[("grant_type", APIKEY_GRANT_TYPE), ("apikey", api_key.as_str())])
                    .send()
                    .await
                    .map_err(ApiError::transport)?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(ApiError::from_response(status.as_u16(), &body));
                }

                let token: TokenResponse = response.json().await.map_err(ApiError::transport)?;
                let fresh = CachedToken {
                    expires_at: token.expires_at(now),
                    access_token: token.access_token,
                };
                let access_token = fresh.access_token.clone();
                *cached = Some(fresh);
                Ok(access_token)
            }
        }
    }
}
