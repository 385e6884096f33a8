//! Email and Tenant client tests against a mock HTTP server

use std::time::Duration;

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ps_platform::{
    EmailApi, HttpEmailClient, HttpTenantClient, InviteRequest, PlatformError, TenantApi,
    UserInvite,
};

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_send_user_invite_posts_batch() {
    let server = MockServer::start().await;
    let tenant = Uuid::new_v4();
    let id = Uuid::new_v4();
    let mut invite = UserInvite::new(tenant, &InviteRequest::new("Ann", "Lee", "ann@contoso.com"));
    invite.id = Some(id);

    Mock::given(method("POST"))
        .and(path("/v1/send/userinvite"))
        .and(body_json(json!({
            "invites": [{
                "inviteId": id,
                "tenantId": tenant,
                "email": "ann@contoso.com",
                "firstName": "Ann",
                "lastName": "Lee"
            }]
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpEmailClient::new(format!("{}/", server.uri()), TIMEOUT).unwrap();
    assert!(client.send_user_invite(&[invite]).await.unwrap());
}

#[tokio::test]
async fn test_rejected_email_returns_false() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/send/welcome"))
        .respond_with(ResponseTemplate::new(500).set_body_string("smtp down"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpEmailClient::new(server.uri(), TIMEOUT).unwrap();
    assert!(!client.send_welcome_email("ann@contoso.com", "Ann").await.unwrap());
}

#[tokio::test]
async fn test_unreachable_email_service_is_an_error() {
    let client = HttpEmailClient::new("http://127.0.0.1:9", TIMEOUT).unwrap();
    let err = client.send_welcome_email("ann@contoso.com", "Ann").await.unwrap_err();
    assert!(matches!(err, PlatformError::Http(_)));
}

#[tokio::test]
async fn test_allowed_domains_are_lower_cased() {
    let server = MockServer::start().await;
    let tenant = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/v1/tenants/{}/domains", tenant)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "domains": ["Contoso.COM", " ", "fabrikam.com"] })),
        )
        .mount(&server)
        .await;

    let client = HttpTenantClient::new(server.uri(), TIMEOUT).unwrap();
    let domains = client.allowed_domains(tenant).await.unwrap();
    assert_eq!(domains, vec!["contoso.com", "fabrikam.com"]);
}

#[tokio::test]
async fn test_tenant_status_mapping() {
    let server = MockServer::start().await;
    let missing = Uuid::new_v4();
    let broken = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/v1/tenants/{}/domains", missing)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/tenants/{}/domains", broken)))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = HttpTenantClient::new(server.uri(), TIMEOUT).unwrap();
    assert!(client.allowed_domains(missing).await.unwrap_err().is_not_found());
    assert!(matches!(
        client.allowed_domains(broken).await.unwrap_err(),
        PlatformError::Downstream { .. }
    ));
}
