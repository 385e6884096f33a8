//! Delete User Use Case

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use ps_license::{LicenseApi, ReleaseUserLicenseRequest};

use crate::shared::error::PlatformError;
use crate::shared::repository::Repository;
use crate::shared::validation::{IdValidator, Validator};
use crate::usecase::{EventPublisher, ExecutionContext, UseCaseError};
use crate::user::entity::User;
use super::events::UserDeleted;

/// Deleting a user that does not exist succeeds without doing anything.
pub struct DeleteUserUseCase {
    user_repo: Arc<dyn Repository<User>>,
    license_api: Arc<dyn LicenseApi>,
    publisher: Arc<dyn EventPublisher>,
}

impl DeleteUserUseCase {
    pub fn new(
        user_repo: Arc<dyn Repository<User>>,
        license_api: Arc<dyn LicenseApi>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            user_repo,
            license_api,
            publisher,
        }
    }

    pub async fn execute(&self, id: Uuid, ctx: ExecutionContext) -> Result<(), UseCaseError> {
        IdValidator::default()
            .validate(&id)
            .into_result("INVALID_USER_ID", "User id is invalid")?;

        let existing = self.user_repo.get_item(id).await?;

        match self.user_repo.delete_item(id).await {
            Ok(()) => {}
            Err(PlatformError::NotFound { .. }) => {
                debug!(user_id = %id, "User already absent");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        info!(user_id = %id, "User deleted");
        self.publisher.publish_event(&UserDeleted::new(&ctx, id));

        if let Some(user) = existing {
            self.release_license(&user, id).await;
        }
        Ok(())
    }

    async fn release_license(&self, user: &User, user_id: Uuid) {
        let request = ReleaseUserLicenseRequest {
            tenant_id: user.tenant_id,
            user_id,
        };
        match self.license_api.release_user_license(&request).await {
            Ok(response) if response.is_success() => debug!(%user_id, "License released"),
            Ok(response) => warn!(%user_id, result_code = ?response.result_code, "License release refused"),
            Err(e) => warn!(%user_id, error = %e, "License release failed"),
        }
    }
}
