//! Create Group Use Case

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::details;
use crate::group::entity::Group;
use crate::group::validation::CreateGroupValidator;
use crate::shared::repository::Repository;
use crate::shared::validation::Validator;
use crate::usecase::{EventPublisher, ExecutionContext, UseCaseError};
use super::events::GroupCreated;
use super::group_name_taken;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupCommand {
    pub tenant_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub struct CreateGroupUseCase {
    group_repo: Arc<dyn Repository<Group>>,
    publisher: Arc<dyn EventPublisher>,
    validator: Arc<dyn Validator<CreateGroupCommand>>,
}

impl CreateGroupUseCase {
    pub fn new(group_repo: Arc<dyn Repository<Group>>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            group_repo,
            publisher,
            validator: Arc::new(CreateGroupValidator),
        }
    }

    pub async fn execute(
        &self,
        command: CreateGroupCommand,
        ctx: ExecutionContext,
    ) -> Result<Group, UseCaseError> {
        self.validator
            .validate(&command)
            .into_result("GROUP_VALIDATION_FAILED", "Group validation failed")?;

        let name = command.name.trim().to_string();
        if group_name_taken(self.group_repo.as_ref(), command.tenant_id, &name, None).await? {
            return Err(UseCaseError::business_rule_with_details(
                "GROUP_NAME_EXISTS",
                format!("A group named '{}' already exists", name),
                details! { "name" => &name, "tenantId" => command.tenant_id.to_string() },
            ));
        }

        let group = Group {
            id: None,
            tenant_id: command.tenant_id,
            name,
            description: command.description,
            is_locked: false,
            created_date: Some(Utc::now()),
        };
        let group = self.group_repo.create_item(group).await?;
        let group_id = group
            .id
            .ok_or_else(|| UseCaseError::infrastructure("Repository did not assign a group id"))?;

        info!(%group_id, tenant_id = %group.tenant_id, name = %group.name, "Group created");
        self.publisher
            .publish_event(&GroupCreated::new(&ctx, group_id, group.tenant_id, &group.name));

        Ok(group)
    }
}
