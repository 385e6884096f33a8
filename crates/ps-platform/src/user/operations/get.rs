//! Get User Use Case

use std::sync::Arc;

use uuid::Uuid;

use crate::shared::repository::Repository;
use crate::shared::validation::{IdValidator, Validator};
use crate::usecase::UseCaseError;
use crate::user::entity::User;

pub struct GetUserUseCase {
    user_repo: Arc<dyn Repository<User>>,
}

impl GetUserUseCase {
    pub fn new(user_repo: Arc<dyn Repository<User>>) -> Self {
        Self { user_repo }
    }

    /// Fetch a user without password material.
    ///
    /// Fails with `NotFoundError` when absent.
    pub async fn execute(&self, id: Uuid) -> Result<User, UseCaseError> {
        IdValidator::default()
            .validate(&id)
            .into_result("INVALID_USER_ID", "User id is invalid")?;

        self.user_repo
            .get_item(id)
            .await?
            .map(User::without_secrets)
            .ok_or_else(|| UseCaseError::not_found_entity("User", id))
    }
}
