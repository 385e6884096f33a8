//! List Users Use Case

use std::sync::Arc;

use uuid::Uuid;

use crate::shared::repository::{Filter, Repository};
use crate::shared::validation::{IdValidator, Validator};
use crate::usecase::UseCaseError;
use crate::user::entity::User;

pub struct ListUsersUseCase {
    user_repo: Arc<dyn Repository<User>>,
}

impl ListUsersUseCase {
    pub fn new(user_repo: Arc<dyn Repository<User>>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, tenant_id: Uuid) -> Result<Vec<User>, UseCaseError> {
        IdValidator::for_field("tenantId")
            .validate(&tenant_id)
            .into_result("INVALID_TENANT_ID", "Tenant id is invalid")?;

        let users = self
            .user_repo
            .get_items(&Filter::eq_id("tenantId", tenant_id))
            .await?;
        Ok(users.into_iter().map(User::without_secrets).collect())
    }
}
