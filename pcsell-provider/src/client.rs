//! Partner Center Sell API client
//!
//! Thin typed wrapper over the catalog plan and IAM registration
//! endpoints. Every call carries an optional `env` query parameter.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::auth::Authenticator;
use crate::config::{ConfigError, ProviderConfig};
use crate::models::ServiceErrorBody;
use crate::models::catalog_plan::GlobalCatalogPlan;
use crate::models::iam_registration::IamServiceRegistration;

const MERGE_PATCH_CONTENT_TYPE: &str = "application/merge-patch+json";

/// Error returned by the API or the transport underneath it
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status, when a response was received
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        self.status == Some(StatusCode::NOT_FOUND.as_u16())
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        ApiError {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }

    /// Build from a non-success response body
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ServiceErrorBody>(body)
            .ok()
            .and_then(|b| b.message())
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .or_else(|| {
                StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "request failed".to_string());
        ApiError {
            status: Some(status),
            message: format!("{} (HTTP {})", detail, status),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct PartnerCenterSellClient {
    http: reqwest::Client,
    base_url: String,
    auth: Authenticator,
}

impl PartnerCenterSellClient {
    pub fn new(base_url: impl Into<String>, auth: Authenticator) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.url.clone(), config.authenticator()?))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =========================================================================
    // Catalog plans
    // =========================================================================

    pub async fn create_catalog_plan(
        &self,
        product_id: &str,
        catalog_product_id: &str,
        env: Option<&str>,
        plan: &GlobalCatalogPlan,
    ) -> ApiResult<GlobalCatalogPlan> {
        let path = format!(
            "/products/{}/catalog_products/{}/catalog_plans",
            product_id, catalog_product_id
        );
        let request = self.request(Method::POST, &path, env).await?.json(plan);
        self.execute(request).await
    }

    pub async fn get_catalog_plan(
        &self,
        product_id: &str,
        catalog_product_id: &str,
        catalog_plan_id: &str,
        env: Option<&str>,
    ) -> ApiResult<GlobalCatalogPlan> {
        let path = catalog_plan_path(product_id, catalog_product_id, catalog_plan_id);
        let request = self.request(Method::GET, &path, env).await?;
        self.execute(request).await
    }

    pub async fn update_catalog_plan(
        &self,
        product_id: &str,
        catalog_product_id: &str,
        catalog_plan_id: &str,
        env: Option<&str>,
        patch: &serde_json::Value,
    ) -> ApiResult<GlobalCatalogPlan> {
        let path = catalog_plan_path(product_id, catalog_product_id, catalog_plan_id);
        let request = self.merge_patch(&path, env, patch).await?;
        self.execute(request).await
    }

    pub async fn delete_catalog_plan(
        &self,
        product_id: &str,
        catalog_product_id: &str,
        catalog_plan_id: &str,
        env: Option<&str>,
    ) -> ApiResult<()> {
        let path = catalog_plan_path(product_id, catalog_product_id, catalog_plan_id);
        let request = self.request(Method::DELETE, &path, env).await?;
        self.execute_empty(request).await
    }

    // =========================================================================
    // IAM registrations
    // =========================================================================

    pub async fn create_iam_registration(
        &self,
        product_id: &str,
        env: Option<&str>,
        registration: &IamServiceRegistration,
    ) -> ApiResult<IamServiceRegistration> {
        let path = format!("/products/{}/iam_registration", product_id);
        let request = self
            .request(Method::POST, &path, env)
            .await?
            .json(registration);
        self.execute(request).await
    }

    pub async fn get_iam_registration(
        &self,
        product_id: &str,
        programmatic_name: &str,
        env: Option<&str>,
    ) -> ApiResult<IamServiceRegistration> {
        let path = iam_registration_path(product_id, programmatic_name);
        let request = self.request(Method::GET, &path, env).await?;
        self.execute(request).await
    }

    pub async fn update_iam_registration(
        &self,
        product_id: &str,
        programmatic_name: &str,
        env: Option<&str>,
        patch: &serde_json::Value,
    ) -> ApiResult<IamServiceRegistration> {
        let path = iam_registration_path(product_id, programmatic_name);
        let request = self.merge_patch(&path, env, patch).await?;
        self.execute(request).await
    }

    pub async fn delete_iam_registration(
        &self,
        product_id: &str,
        programmatic_name: &str,
        env: Option<&str>,
    ) -> ApiResult<()> {
        let path = iam_registration_path(product_id, programmatic_name);
        let request = self.request(Method::DELETE, &path, env).await?;
        self.execute_empty(request).await
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    async fn request(&self, method: Method, path: &str, env: Option<&str>) -> ApiResult<RequestBuilder> {
        let token = self.auth.token(&self.http).await?;
        let url = format!("{}{}", self.base_url, path);
        log::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json");
        if let Some(env) = env {
            request = request.query(&[("env", env)]);
        }
        Ok(request)
    }

    async fn merge_patch(
        &self,
        path: &str,
        env: Option<&str>,
        patch: &serde_json::Value,
    ) -> ApiResult<RequestBuilder> {
        let body = serde_json::to_vec(patch).map_err(|e| ApiError {
            status: None,
            message: format!("Failed to serialize patch: {}", e),
        })?;
        Ok(self
            .request(Method::PATCH, path, env)
            .await?
            .header(CONTENT_TYPE, MERGE_PATCH_CONTENT_TYPE)
            .body(body))
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await.map_err(ApiError::transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status.as_u16(), &body));
        }
        response.json::<T>().await.map_err(ApiError::transport)
    }

    async fn execute_empty(&self, request: RequestBuilder) -> ApiResult<()> {
        let response = request.send().await.map_err(ApiError::transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status.as_u16(), &body));
        }
        Ok(())
    }
}

fn catalog_plan_path(product_id: &str, catalog_product_id: &str, catalog_plan_id: &str) -> String {
    format!(
        "/products/{}/catalog_products/{}/catalog_plans/{}",
        product_id, catalog_product_id, catalog_plan_id
    )
}

fn iam_registration_path(product_id: &str, programmatic_name: &str) -> String {
    format!("/products/{}/iam_registration/{}", product_id, programmatic_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::PATCH;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> PartnerCenterSellClient {
        PartnerCenterSellClient::new(server.base_url(), Authenticator::bearer("token"))
    }

    #[test]
    fn service_error_messages_are_joined() {
        let err = ApiError::from_response(
            400,
            r#"{"errors":[{"code":"bad_request","message":"name is invalid"},{"message":"tags missing"}],"trace":"abc"}"#,
        );
        assert_eq!(err.status, Some(400));
        assert_eq!(err.message, "name is invalid; tags missing (HTTP 400)");
        assert!(!err.is_not_found());
    }

    #[test]
    fn empty_error_body_falls_back_to_reason() {
        let err = ApiError::from_response(404, "");
        assert!(err.is_not_found());
        assert_eq!(err.message, "Not Found (HTTP 404)");
    }

    #[tokio::test]
    async fn get_catalog_plan_sends_env_and_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/products/p1/catalog_products/c1/catalog_plans/plan1")
                    .query_param("env", "current")
                    .header("Authorization", "Bearer token");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({"id": "plan1", "name": "free-plan", "active": true}));
            })
            .await;

        let plan = client(&server)
            .get_catalog_plan("p1", "c1", "plan1", Some("current"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(plan.id.as_deref(), Some("plan1"));
        assert_eq!(plan.active, Some(true));
    }

    #[tokio::test]
    async fn update_uses_merge_patch_content_type() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/products/p1/iam_registration/pet-store")
                    .header("Content-Type", "application/merge-patch+json")
                    .json_body(json!({"enabled": false, "parent_ids": null}));
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({"name": "pet-store", "enabled": false}));
            })
            .await;

        let registration = client(&server)
            .update_iam_registration(
                "p1",
                "pet-store",
                None,
                &json!({"enabled": false, "parent_ids": null}),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(registration.enabled, Some(false));
    }

    #[tokio::test]
    async fn delete_reports_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE)
                    .path("/products/p1/catalog_products/c1/catalog_plans/gone");
                then.status(404)
                    .header("Content-Type", "application/json")
                    .json_body(json!({"errors": [{"message": "Catalog plan not found"}]}));
            })
            .await;

        let err = client(&server)
            .delete_catalog_plan("p1", "c1", "gone", None)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(err.message.starts_with("Catalog plan not found"));
    }
}
