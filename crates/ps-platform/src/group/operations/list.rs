//! List Groups Use Case

use std::sync::Arc;

use uuid::Uuid;

use crate::group::entity::Group;
use crate::shared::repository::{Filter, Repository};
use crate::shared::validation::{IdValidator, Validator};
use crate::usecase::UseCaseError;

pub struct ListGroupsUseCase {
    group_repo: Arc<dyn Repository<Group>>,
}

impl ListGroupsUseCase {
    pub fn new(group_repo: Arc<dyn Repository<Group>>) -> Self {
        Self { group_repo }
    }

    pub async fn execute(&self, tenant_id: Uuid) -> Result<Vec<Group>, UseCaseError> {
        IdValidator::for_field("tenantId")
            .validate(&tenant_id)
            .into_result("INVALID_TENANT_ID", "Tenant id is invalid")?;

        Ok(self
            .group_repo
            .get_items(&Filter::eq_id("tenantId", tenant_id))
            .await?)
    }
}
