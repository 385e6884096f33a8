//! HTTP surface tests driving the routers with `oneshot`

mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use common::{FakeEmailApi, FakeLicenseApi, FakeTenantApi, Harness, Reply};
use ps_platform::group::operations::{
    CreateGroupUseCase, DeleteGroupUseCase, GetGroupUseCase, ListGroupsUseCase, UpdateGroupUseCase,
};
use ps_platform::user::operations::{
    CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, LockUserUseCase,
    UpdateUserUseCase,
};
use ps_platform::user_invite::operations::{
    CreateUserInviteListUseCase, ListUserInvitesUseCase, ResendEmailInviteUseCase,
};
use ps_platform::user_invite::EmailClassifier;
use ps_platform::{
    groups_router, user_invites_router, users_router, GroupsState, UserInvitesState, UsersState,
};

fn app(h: &Harness) -> Router {
    let license = FakeLicenseApi::granting();
    let email = FakeEmailApi::new(Reply::Accepted);

    let users = UsersState {
        create: Arc::new(CreateUserUseCase::new(
            h.users.clone(),
            license.clone(),
            email.clone(),
            h.events.clone(),
        )),
        get: Arc::new(GetUserUseCase::new(h.users.clone())),
        update: Arc::new(UpdateUserUseCase::new(h.users.clone(), h.events.clone())),
        delete: Arc::new(DeleteUserUseCase::new(h.users.clone(), license, h.events.clone())),
        lock: Arc::new(LockUserUseCase::new(h.users.clone(), h.events.clone())),
        list: Arc::new(ListUsersUseCase::new(h.users.clone())),
    };
    let invites = UserInvitesState {
        create_list: Arc::new(CreateUserInviteListUseCase::new(
            h.invites.clone(),
            h.users.clone(),
            FakeTenantApi::new(&["contoso.com"]),
            email.clone(),
            EmailClassifier::new(["gmail.com"]),
        )),
        resend: Arc::new(ResendEmailInviteUseCase::new(h.invites.clone(), email)),
        list: Arc::new(ListUserInvitesUseCase::new(h.invites.clone())),
    };
    let groups = GroupsState {
        create: Arc::new(CreateGroupUseCase::new(h.groups.clone(), h.events.clone())),
        get: Arc::new(GetGroupUseCase::new(h.groups.clone())),
        update: Arc::new(UpdateGroupUseCase::new(h.groups.clone(), h.events.clone())),
        delete: Arc::new(DeleteGroupUseCase::new(
            h.groups.clone(),
            h.users.clone(),
            h.events.clone(),
        )),
        list: Arc::new(ListGroupsUseCase::new(h.groups.clone())),
    };

    Router::new()
        .nest("/api/users", users_router(users))
        .nest("/api/user-invites", user_invites_router(invites))
        .nest("/api/groups", groups_router(groups))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-principal-id", "admin-1");
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn new_user(tenant: Uuid, user_name: &str, email: &str) -> Value {
    json!({
        "tenantId": tenant,
        "firstName": "Ann",
        "lastName": "Lee",
        "email": email,
        "userName": user_name,
        "passwordHash": "hash",
        "passwordSalt": "salt"
    })
}

#[tokio::test]
async fn test_user_lifecycle_over_http() {
    let h = Harness::new();
    let app = app(&h);
    let tenant = Uuid::new_v4();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(new_user(tenant, "ann.lee", "ann@contoso.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("passwordHash").is_none());
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, Method::GET, &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["userName"], "ann.lee");

    let (status, listed) = send(&app, Method::GET, &format!("/api/users?tenantId={}", tenant), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, locked) = send(
        &app,
        Method::POST,
        &format!("/api/users/{}/lock", id),
        Some(json!({ "locked": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(locked["isLocked"], true);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/users/{}", id),
        Some(json!({ "firstName": "Bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validation_failures_are_listed() {
    let h = Harness::new();
    let app = app(&h);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(new_user(Uuid::nil(), "x", "nope")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    let fields: Vec<&str> = body["failures"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["tenantId", "email", "userName"]);
}

#[tokio::test]
async fn test_invite_batch_over_http() {
    let h = Harness::new();
    let app = app(&h);
    let tenant = Uuid::new_v4();

    let (status, results) = send(
        &app,
        Method::POST,
        &format!("/api/user-invites?tenantId={}", tenant),
        Some(json!([
            { "firstName": "Ann", "lastName": "Lee", "email": "ann@contoso.com" },
            { "firstName": "Bob", "lastName": "Ray", "email": "bob@gmail.com" }
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(results[0]["status"], "success");
    assert_eq!(results[1]["status"], "userEmailDomainFree");

    let (status, results) = send(
        &app,
        Method::POST,
        &format!("/api/user-invites/resend?tenantId={}", tenant),
        Some(json!([{ "email": "nobody@contoso.com" }])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(results[0]["status"], "userNotExist");

    let (_, listed) = send(&app, Method::GET, &format!("/api/user-invites?tenantId={}", tenant), None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_group_name_is_conflict() {
    let h = Harness::new();
    let app = app(&h);
    let tenant = Uuid::new_v4();
    let group = json!({ "tenantId": tenant, "name": "Admins" });

    let (status, created) = send(&app, Method::POST, "/api/groups", Some(group.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Admins");

    let (status, body) = send(&app, Method::POST, "/api/groups", Some(group)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");
}
