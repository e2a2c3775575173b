//! The acceptance harness driven against a mock service
//!
//! DELETE flips a per-test flag so GET answers differ before and after
//! the destroy.

use std::sync::atomic::{AtomicBool, Ordering};

use httpmock::prelude::*;
use pcsell_provider::acctest::{
    IAM_REGISTRATION_ADDRESS, TestCase, TestStep, check_exists, check_resource_attr,
    iam_registration_config_basic,
};
use pcsell_provider::auth::Authenticator;
use pcsell_provider::{PartnerCenterSellClient, PcsellProvider};
use serde_json::json;

const PRODUCT_ID: &str = "f3e41b7c9e5a4b3f8d6c1a2e0b9d8c7a:o:7d4e8f2a-1b3c-4d5e-9f0a-2b4c6d8e0f1a";
const REGISTRATIONS_PATH: &str =
    "/products/f3e41b7c9e5a4b3f8d6c1a2e0b9d8c7a:o:7d4e8f2a-1b3c-4d5e-9f0a-2b4c6d8e0f1a/iam_registration";
const REGISTRATION_PATH: &str = "/products/f3e41b7c9e5a4b3f8d6c1a2e0b9d8c7a:o:7d4e8f2a-1b3c-4d5e-9f0a-2b4c6d8e0f1a/iam_registration/pet-store";

type Matcher = fn(&HttpMockRequest) -> bool;

struct DeleteFlag {
    /// Matches everything; records a DELETE
    mark: Matcher,
    live: Matcher,
    gone: Matcher,
}

macro_rules! delete_flag {
    () => {{
        static DELETED: AtomicBool = AtomicBool::new(false);
        fn mark(req: &HttpMockRequest) -> bool {
            if req.method == "DELETE" {
                DELETED.store(true, Ordering::SeqCst);
            }
            true
        }
        fn live(_: &HttpMockRequest) -> bool {
            !DELETED.load(Ordering::SeqCst)
        }
        fn gone(_: &HttpMockRequest) -> bool {
            DELETED.load(Ordering::SeqCst)
        }
        DeleteFlag { mark, live, gone }
    }};
}

fn provider(server: &MockServer) -> PcsellProvider {
    PcsellProvider::new(PartnerCenterSellClient::new(
        server.base_url(),
        Authenticator::bearer("test-token"),
    ))
}

fn identifier() -> String {
    format!("{}/pet-store", PRODUCT_ID)
}

fn registration_body(enabled: bool) -> serde_json::Value {
    json!({
        "name": "pet-store",
        "enabled": enabled,
        "display_name": {"default": "pet-store"}
    })
}

fn steps() -> Vec<TestStep> {
    vec![
        TestStep::config(
            iam_registration_config_basic(PRODUCT_ID, "pet-store"),
            vec![
                check_exists(IAM_REGISTRATION_ADDRESS, |_| Ok(())),
                check_resource_attr(IAM_REGISTRATION_ADDRESS, "product_id", PRODUCT_ID),
                check_resource_attr(IAM_REGISTRATION_ADDRESS, "enabled", "true"),
                check_resource_attr(IAM_REGISTRATION_ADDRESS, "display_name.0.default", "pet-store"),
            ],
        ),
        TestStep::import(IAM_REGISTRATION_ADDRESS, &[]),
    ]
}

async fn mock_create(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST).path(REGISTRATIONS_PATH);
            then.status(201)
                .header("Content-Type", "application/json")
                .json_body(json!({"name": "pet-store"}));
        })
        .await
}

async fn mock_delete<'a>(server: &'a MockServer, flag: &DeleteFlag) -> httpmock::Mock<'a> {
    let mark = flag.mark;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path(REGISTRATION_PATH).matches(mark);
            then.status(204);
        })
        .await
}

async fn mock_get<'a>(
    server: &'a MockServer,
    when_matches: Matcher,
    status: u16,
    body: serde_json::Value,
) -> httpmock::Mock<'a> {
    server
        .mock_async(|when, then| {
            when.method(GET).path(REGISTRATION_PATH).matches(when_matches);
            then.status(status)
                .header("Content-Type", "application/json")
                .json_body(body);
        })
        .await
}

#[tokio::test]
async fn test_case_applies_imports_and_destroys() {
    let server = MockServer::start_async().await;
    let flag = delete_flag!();
    let create = mock_create(&server).await;
    let delete = mock_delete(&server, &flag).await;
    let live = mock_get(&server, flag.live, 200, registration_body(true)).await;
    let gone = mock_get(
        &server,
        flag.gone,
        404,
        json!({"errors": [{"message": "not found"}]}),
    )
    .await;

    TestCase::new(steps()).run(provider(&server)).await.unwrap();

    create.assert_async().await;
    delete.assert_async().await;
    // read after create, refresh, import
    live.assert_hits_async(3).await;
    gone.assert_async().await;
}

#[tokio::test]
async fn drift_after_apply_fails_the_step_and_still_destroys() {
    let server = MockServer::start_async().await;
    let flag = delete_flag!();
    mock_create(&server).await;
    let delete = mock_delete(&server, &flag).await;
    mock_get(&server, flag.live, 200, registration_body(false)).await;
    let gone = mock_get(&server, flag.gone, 404, json!({})).await;

    let err = TestCase::new(steps())
        .run(provider(&server))
        .await
        .unwrap_err();

    assert!(
        err.starts_with("Step 1: After applying this step, the plan was not empty:"),
        "{}",
        err
    );
    assert!(err.contains(IAM_REGISTRATION_ADDRESS), "{}", err);
    delete.assert_async().await;
    gone.assert_hits_async(0).await;
}

#[tokio::test]
async fn surviving_registration_fails_the_destroy_check() {
    let server = MockServer::start_async().await;
    let flag = delete_flag!();
    mock_create(&server).await;
    let delete = mock_delete(&server, &flag).await;
    mock_get(&server, |_| true, 200, registration_body(true)).await;

    let err = TestCase::new(steps())
        .run(provider(&server))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        format!("onboarding_iam_registration still exists: {}", identifier())
    );
    delete.assert_async().await;

    let unchecked = TestCase {
        check_destroy: false,
        ..TestCase::new(steps())
    };
    unchecked.run(provider(&server)).await.unwrap();
}

#[tokio::test]
async fn failed_destroy_check_is_reported() {
    let server = MockServer::start_async().await;
    let flag = delete_flag!();
    mock_create(&server).await;
    mock_delete(&server, &flag).await;
    mock_get(&server, flag.live, 200, registration_body(true)).await;
    mock_get(
        &server,
        flag.gone,
        500,
        json!({"errors": [{"message": "backend unavailable"}]}),
    )
    .await;

    let err = TestCase::new(steps())
        .run(provider(&server))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        format!(
            "Error checking for onboarding_iam_registration ({}) has been destroyed: \
             [ibm_onboarding_iam_registration.onboarding_iam_registration_instance] \
             GetIamRegistration failed: backend unavailable (HTTP 500)",
            identifier()
        )
    );
}
