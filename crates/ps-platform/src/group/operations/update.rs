//! Update Group Use Case

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::details;
use crate::group::entity::Group;
use crate::group::validation::UpdateGroupValidator;
use crate::shared::repository::Repository;
use crate::shared::validation::{IdValidator, Validator};
use crate::usecase::{EventPublisher, ExecutionContext, UseCaseError};
use super::events::GroupUpdated;
use super::group_name_taken;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
}

pub struct UpdateGroupUseCase {
    group_repo: Arc<dyn Repository<Group>>,
    publisher: Arc<dyn EventPublisher>,
}

impl UpdateGroupUseCase {
    pub fn new(group_repo: Arc<dyn Repository<Group>>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { group_repo, publisher }
    }

    pub async fn execute(
        &self,
        id: Uuid,
        command: UpdateGroupCommand,
        ctx: ExecutionContext,
    ) -> Result<Group, UseCaseError> {
        let mut result = IdValidator::default().validate(&id);
        result.extend(UpdateGroupValidator.validate(&command));
        result.into_result("GROUP_VALIDATION_FAILED", "Group validation failed")?;

        let mut group = self
            .group_repo
            .get_item(id)
            .await?
            .ok_or_else(|| UseCaseError::not_found_entity("Group", id))?;

        if let Some(name) = command.name.as_deref().map(str::trim) {
            if !name.eq_ignore_ascii_case(&group.name)
                && group_name_taken(self.group_repo.as_ref(), group.tenant_id, name, Some(id)).await?
            {
                return Err(UseCaseError::business_rule_with_details(
                    "GROUP_NAME_EXISTS",
                    format!("A group named '{}' already exists", name),
                    details! { "name" => name },
                ));
            }
            group.name = name.to_string();
        }
        if let Some(description) = command.description {
            group.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(is_locked) = command.is_locked {
            group.is_locked = is_locked;
        }

        let group = self.group_repo.update_item(id, group).await?;

        info!(group_id = %id, "Group updated");
        self.publisher.publish_event(&GroupUpdated::new(&ctx, id, &group.name));

        Ok(group)
    }
}
