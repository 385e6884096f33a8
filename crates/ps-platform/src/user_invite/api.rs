//! User Invites API

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::post,
    Json, Router,
};

use crate::shared::api_common::{execution_context, TenantQuery};
use crate::shared::error::PlatformError;
use crate::user_invite::entity::{InviteRequest, InviteResult, InviteStatus};
use crate::user_invite::operations::{
    CreateUserInviteListUseCase, ListUserInvitesUseCase, ResendEmailInviteUseCase,
};

#[derive(Clone)]
pub struct UserInvitesState {
    pub create_list: Arc<CreateUserInviteListUseCase>,
    pub resend: Arc<ResendEmailInviteUseCase>,
    pub list: Arc<ListUserInvitesUseCase>,
}

/// Submit a batch of invites. Every entry gets a status, so the request
/// succeeds even when individual invites are rejected.
pub async fn create_invites(
    State(state): State<UserInvitesState>,
    headers: HeaderMap,
    Query(query): Query<TenantQuery>,
    Json(requests): Json<Vec<InviteRequest>>,
) -> Result<Json<Vec<InviteResult>>, PlatformError> {
    let results = state
        .create_list
        .execute(requests, query.tenant_id, execution_context(&headers))
        .await?;
    Ok(Json(results))
}

pub async fn resend_invites(
    State(state): State<UserInvitesState>,
    headers: HeaderMap,
    Query(query): Query<TenantQuery>,
    Json(requests): Json<Vec<InviteRequest>>,
) -> Result<Json<Vec<InviteResult>>, PlatformError> {
    let results = state
        .resend
        .execute(requests, query.tenant_id, execution_context(&headers))
        .await?;
    Ok(Json(results))
}

/// Invites of a tenant, reported with `success` status
pub async fn list_invites(
    State(state): State<UserInvitesState>,
    Query(query): Query<TenantQuery>,
) -> Result<Json<Vec<InviteResult>>, PlatformError> {
    let invites = state.list.execute(query.tenant_id).await?;
    Ok(Json(
        invites
            .iter()
            .map(|invite| InviteResult::from_invite(invite, InviteStatus::Success))
            .collect(),
    ))
}

pub fn user_invites_router(state: UserInvitesState) -> Router {
    Router::new()
        .route("/", post(create_invites).get(list_invites))
        .route("/resend", post(resend_invites))
        .with_state(state)
}
