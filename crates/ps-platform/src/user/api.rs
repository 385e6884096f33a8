//! Users API
//!
//! REST endpoints for user management.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::api_common::{execution_context, TenantQuery};
use crate::shared::error::PlatformError;
use crate::user::entity::User;
use crate::user::operations::{
    CreateUserCommand, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase,
    LockUserUseCase, UpdateUserCommand, UpdateUserUseCase,
};

/// User as returned over HTTP. Has no password fields.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Option<Uuid>,
    pub tenant_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ldap_id: Option<String>,
    pub is_locked: bool,
    pub groups: BTreeSet<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_access_date: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            tenant_id: user.tenant_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            user_name: user.user_name,
            ldap_id: user.ldap_id,
            is_locked: user.is_locked,
            groups: user.groups,
            created_date: user.created_date,
            last_access_date: user.last_access_date,
        }
    }
}

/// Lock request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockUserRequest {
    pub locked: bool,
}

/// Users service state
#[derive(Clone)]
pub struct UsersState {
    pub create: Arc<CreateUserUseCase>,
    pub get: Arc<GetUserUseCase>,
    pub update: Arc<UpdateUserUseCase>,
    pub delete: Arc<DeleteUserUseCase>,
    pub lock: Arc<LockUserUseCase>,
    pub list: Arc<ListUsersUseCase>,
}

/// Create a new user
pub async fn create_user(
    State(state): State<UsersState>,
    headers: HeaderMap,
    Json(command): Json<CreateUserCommand>,
) -> Result<(StatusCode, Json<UserResponse>), PlatformError> {
    let user = state.create.execute(command, execution_context(&headers)).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// List users of a tenant
pub async fn list_users(
    State(state): State<UsersState>,
    Query(query): Query<TenantQuery>,
) -> Result<Json<Vec<UserResponse>>, PlatformError> {
    let users = state.list.execute(query.tenant_id).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get user by ID
pub async fn get_user(
    State(state): State<UsersState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, PlatformError> {
    let user = state.get.execute(id).await?;
    Ok(Json(user.into()))
}

/// Update user
pub async fn update_user(
    State(state): State<UsersState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(command): Json<UpdateUserCommand>,
) -> Result<Json<UserResponse>, PlatformError> {
    state
        .update
        .execute(id, command, execution_context(&headers))
        .await?
        .map(|user| Json(user.into()))
        .ok_or_else(|| PlatformError::not_found("User", id.to_string()))
}

/// Delete user
pub async fn delete_user(
    State(state): State<UsersState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, PlatformError> {
    state.delete.execute(id, execution_context(&headers)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lock or unlock a user
pub async fn lock_user(
    State(state): State<UsersState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<LockUserRequest>,
) -> Result<Json<UserResponse>, PlatformError> {
    let user = state
        .lock
        .execute(id, request.locked, execution_context(&headers))
        .await?;
    Ok(Json(user.into()))
}

/// Create users router
pub fn users_router(state: UsersState) -> Router {
    Router::new()
        .route("/", post(create_user).get(list_users))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{id}/lock", post(lock_user))
        .with_state(state)
}
