//! List User Invites Use Case

use std::sync::Arc;

use uuid::Uuid;

use crate::shared::repository::{Filter, Repository};
use crate::shared::validation::{IdValidator, Validator};
use crate::usecase::UseCaseError;
use crate::user_invite::entity::UserInvite;

pub struct ListUserInvitesUseCase {
    invite_repo: Arc<dyn Repository<UserInvite>>,
}

impl ListUserInvitesUseCase {
    pub fn new(invite_repo: Arc<dyn Repository<UserInvite>>) -> Self {
        Self { invite_repo }
    }

    pub async fn execute(&self, tenant_id: Uuid) -> Result<Vec<UserInvite>, UseCaseError> {
        IdValidator::for_field("tenantId")
            .validate(&tenant_id)
            .into_result("INVALID_TENANT_ID", "Tenant id is invalid")?;

        Ok(self
            .invite_repo
            .get_items(&Filter::eq_id("tenantId", tenant_id))
            .await?)
    }
}
