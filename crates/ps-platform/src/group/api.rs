//! Groups API

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::group::entity::Group;
use crate::group::operations::{
    CreateGroupCommand, CreateGroupUseCase, DeleteGroupUseCase, GetGroupUseCase,
    ListGroupsUseCase, UpdateGroupCommand, UpdateGroupUseCase,
};
use crate::shared::api_common::{execution_context, TenantQuery};
use crate::shared::error::PlatformError;

#[derive(Clone)]
pub struct GroupsState {
    pub create: Arc<CreateGroupUseCase>,
    pub get: Arc<GetGroupUseCase>,
    pub update: Arc<UpdateGroupUseCase>,
    pub delete: Arc<DeleteGroupUseCase>,
    pub list: Arc<ListGroupsUseCase>,
}

pub async fn create_group(
    State(state): State<GroupsState>,
    headers: HeaderMap,
    Json(command): Json<CreateGroupCommand>,
) -> Result<(StatusCode, Json<Group>), PlatformError> {
    let group = state.create.execute(command, execution_context(&headers)).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

pub async fn list_groups(
    State(state): State<GroupsState>,
    Query(query): Query<TenantQuery>,
) -> Result<Json<Vec<Group>>, PlatformError> {
    Ok(Json(state.list.execute(query.tenant_id).await?))
}

pub async fn get_group(
    State(state): State<GroupsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Group>, PlatformError> {
    Ok(Json(state.get.execute(id).await?))
}

pub async fn update_group(
    State(state): State<GroupsState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(command): Json<UpdateGroupCommand>,
) -> Result<Json<Group>, PlatformError> {
    let group = state
        .update
        .execute(id, command, execution_context(&headers))
        .await?;
    Ok(Json(group))
}

/// Delete a group and drop it from its members. Absent groups still return 204.
pub async fn delete_group(
    State(state): State<GroupsState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, PlatformError> {
    state.delete.execute(id, execution_context(&headers)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn groups_router(state: GroupsState) -> Router {
    Router::new()
        .route("/", post(create_group).get(list_groups))
        .route("/{id}", get(get_group).put(update_group).delete(delete_group))
        .with_state(state)
}
