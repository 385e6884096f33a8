//! LicenseManagerClient tests
//!
//! Tests for:
//! - Success and failure result codes
//! - Retry on 5xx
//! - Status code mapping

use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ps_license::{
    AssignUserLicenseRequest, Config, Error, LicenseApi, LicenseManagerClient, LicenseResultCode,
    ReleaseUserLicenseRequest,
};

fn client_for(server: &MockServer) -> LicenseManagerClient {
    let config = Config::new(server.uri()).with_retry(3, Duration::from_millis(5));
    LicenseManagerClient::new(config).unwrap()
}

#[tokio::test]
async fn test_assign_success() {
    let server = MockServer::start().await;
    let tenant_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/v1/licenses/users/assign"))
        .and(body_json(serde_json::json!({
            "tenantId": tenant_id,
            "userId": user_id,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "resultCode": "success",
            "message": "assigned"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .assign_user_license(&AssignUserLicenseRequest::new(tenant_id, user_id))
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.message.as_deref(), Some("assigned"));
}

#[tokio::test]
async fn test_assign_failure_code_is_returned_not_raised() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/licenses/users/assign"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "resultCode": "noLicenseAvailable"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .assign_user_license(&AssignUserLicenseRequest::new(Uuid::new_v4(), Uuid::new_v4()))
        .await
        .unwrap();

    assert!(!response.is_success());
    assert_eq!(response.result_code, LicenseResultCode::NoLicenseAvailable);
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/licenses/users/release"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/licenses/users/release"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "resultCode": "success"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ReleaseUserLicenseRequest {
        tenant_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
    };
    let response = client_for(&server).release_user_license(&request).await.unwrap();

    assert!(response.is_success());
}

#[tokio::test]
async fn test_retries_exhausted_returns_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/licenses/users/assign"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(3)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .assign_user_license(&AssignUserLicenseRequest::new(Uuid::new_v4(), Uuid::new_v4()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Server(ref body) if body == "boom"));
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start().await;
    let tenant_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/v1/licenses/tenants/{}/summary", tenant_id)))
        .respond_with(ResponseTemplate::new(404).set_body_string("unknown tenant"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .tenant_license_summary(tenant_id)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_tenant_summary() {
    let server = MockServer::start().await;
    let tenant_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/v1/licenses/tenants/{}/summary", tenant_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"licenseType": "standard", "total": 10, "assigned": 4},
            {"licenseType": "viewer", "total": 50, "assigned": 50, "expiresAt": "2030-01-01T00:00:00Z"}
        ])))
        .mount(&server)
        .await;

    let summary = client_for(&server).tenant_license_summary(tenant_id).await.unwrap();

    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].available(), 6);
    assert_eq!(summary[1].available(), 0);
    assert!(summary[1].expires_at.is_some());
}
