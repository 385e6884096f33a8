//! Get Group Use Case

use std::sync::Arc;

use uuid::Uuid;

use crate::group::entity::Group;
use crate::shared::repository::Repository;
use crate::shared::validation::{IdValidator, Validator};
use crate::usecase::UseCaseError;

pub struct GetGroupUseCase {
    group_repo: Arc<dyn Repository<Group>>,
}

impl GetGroupUseCase {
    pub fn new(group_repo: Arc<dyn Repository<Group>>) -> Self {
        Self { group_repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<Group, UseCaseError> {
        IdValidator::default()
            .validate(&id)
            .into_result("INVALID_GROUP_ID", "Group id is invalid")?;

        self.group_repo
            .get_item(id)
            .await?
            .ok_or_else(|| UseCaseError::not_found_entity("Group", id))
    }
}
