//! Delete Group Use Case

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::group::entity::Group;
use crate::shared::error::PlatformError;
use crate::shared::repository::{Filter, Repository};
use crate::shared::validation::{IdValidator, Validator};
use crate::usecase::{EventPublisher, ExecutionContext, UseCaseError};
use crate::user::entity::User;
use super::events::GroupDeleted;

/// Deletes a group and drops it from every member's `groups`.
/// Deleting an absent group succeeds.
pub struct DeleteGroupUseCase {
    group_repo: Arc<dyn Repository<Group>>,
    user_repo: Arc<dyn Repository<User>>,
    publisher: Arc<dyn EventPublisher>,
}

impl DeleteGroupUseCase {
    pub fn new(
        group_repo: Arc<dyn Repository<Group>>,
        user_repo: Arc<dyn Repository<User>>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            group_repo,
            user_repo,
            publisher,
        }
    }

    pub async fn execute(&self, id: Uuid, ctx: ExecutionContext) -> Result<(), UseCaseError> {
        IdValidator::default()
            .validate(&id)
            .into_result("INVALID_GROUP_ID", "Group id is invalid")?;

        match self.group_repo.delete_item(id).await {
            Ok(()) => {}
            Err(PlatformError::NotFound { .. }) => {
                debug!(group_id = %id, "Group already absent");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        let members = self
            .user_repo
            .get_items(&Filter::contains_id("groups", id))
            .await?;

        let mut removed = 0;
        for mut user in members {
            let Some(user_id) = user.id else { continue };
            user.groups.remove(&id);
            match self.user_repo.update_item(user_id, user).await {
                Ok(_) => removed += 1,
                Err(PlatformError::NotFound { .. }) => {
                    warn!(%user_id, group_id = %id, "Member deleted while removing group")
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!(group_id = %id, members_removed = removed, "Group deleted");
        self.publisher.publish_event(&GroupDeleted::new(&ctx, id, removed));
        Ok(())
    }
}
