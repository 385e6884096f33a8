//! Lock User Use Case

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::shared::repository::Repository;
use crate::shared::validation::{IdValidator, Validator};
use crate::usecase::{EventPublisher, ExecutionContext, UseCaseError};
use crate::user::entity::User;
use super::events::UserLockChanged;

pub struct LockUserUseCase {
    user_repo: Arc<dyn Repository<User>>,
    publisher: Arc<dyn EventPublisher>,
}

impl LockUserUseCase {
    pub fn new(user_repo: Arc<dyn Repository<User>>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { user_repo, publisher }
    }

    /// Set the lock flag. An unchanged flag is not written or published.
    pub async fn execute(
        &self,
        id: Uuid,
        locked: bool,
        ctx: ExecutionContext,
    ) -> Result<User, UseCaseError> {
        IdValidator::default()
            .validate(&id)
            .into_result("INVALID_USER_ID", "User id is invalid")?;

        let mut user = self
            .user_repo
            .get_item(id)
            .await?
            .ok_or_else(|| UseCaseError::not_found_entity("User", id))?;

        if user.is_locked == locked {
            return Ok(user.without_secrets());
        }

        user.is_locked = locked;
        let user = self.user_repo.update_item(id, user).await?;

        info!(user_id = %id, locked, "User lock changed");
        self.publisher.publish_event(&UserLockChanged::new(&ctx, id, locked, None));

        Ok(user.without_secrets())
    }
}
