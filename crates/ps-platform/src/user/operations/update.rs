//! Update User Use Case

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::shared::error::PlatformError;
use crate::shared::repository::{Filter, Repository};
use crate::shared::validation::{IdValidator, ValidationResult, Validator};
use crate::usecase::{EventPublisher, ExecutionContext, UseCaseError};
use crate::user::entity::User;
use crate::user::validation::UpdateUserValidator;
use super::events::UserUpdated;

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// An empty string clears the LDAP id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ldap_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<BTreeSet<Uuid>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_access_date: Option<DateTime<Utc>>,
}

pub struct UpdateUserUseCase {
    user_repo: Arc<dyn Repository<User>>,
    publisher: Arc<dyn EventPublisher>,
    validator: Arc<dyn Validator<UpdateUserCommand>>,
}

impl UpdateUserUseCase {
    pub fn new(user_repo: Arc<dyn Repository<User>>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            user_repo,
            publisher,
            validator: Arc::new(UpdateUserValidator),
        }
    }

    pub fn with_validator(mut self, validator: Arc<dyn Validator<UpdateUserCommand>>) -> Self {
        self.validator = validator;
        self
    }

    /// Apply a partial update.
    ///
    /// Returns `Ok(None)` when the user does not exist, unlike
    /// [`GetUserUseCase`](super::GetUserUseCase) which fails.
    pub async fn execute(
        &self,
        id: Uuid,
        command: UpdateUserCommand,
        ctx: ExecutionContext,
    ) -> Result<Option<User>, UseCaseError> {
        let mut result = IdValidator::default().validate(&id);
        result.extend(self.validator.validate(&command));
        result.into_result("USER_VALIDATION_FAILED", "User validation failed")?;

        let Some(mut user) = self.user_repo.get_item(id).await? else {
            debug!(user_id = %id, "Update for missing user ignored");
            return Ok(None);
        };

        let ldap_id = command
            .ldap_id
            .as_deref()
            .map(str::trim)
            .map(|s| if s.is_empty() { None } else { Some(s.to_string()) });

        let mut result = ValidationResult::new();
        if let Some(email) = command.email.as_deref().filter(|e| *e != user.email) {
            if self.taken_by_other(id, "email", email).await? {
                result.add("email", format!("Email '{}' is already in use", email));
            }
        }
        if let Some(user_name) = command.user_name.as_deref().filter(|n| *n != user.user_name) {
            if self.taken_by_other(id, "userName", user_name).await? {
                result.add("userName", format!("User name '{}' is already in use", user_name));
            }
        }
        if let Some(Some(ldap)) = &ldap_id {
            if user.ldap_id.as_deref() != Some(ldap.as_str())
                && self.taken_by_other(id, "ldapId", ldap).await?
            {
                result.add("ldapId", format!("LDAP id '{}' is already in use", ldap));
            }
        }
        result.into_result("USER_VALIDATION_FAILED", "User validation failed")?;

        let mut changed = Vec::new();
        if let Some(first_name) = command.first_name {
            user.first_name = first_name.trim().to_string();
            changed.push("firstName");
        }
        if let Some(last_name) = command.last_name {
            user.last_name = last_name.trim().to_string();
            changed.push("lastName");
        }
        if let Some(email) = command.email {
            user.email = email;
            changed.push("email");
        }
        if let Some(user_name) = command.user_name {
            user.user_name = user_name;
            changed.push("userName");
        }
        if let Some(ldap_id) = ldap_id {
            user.ldap_id = ldap_id;
            changed.push("ldapId");
        }
        if let Some(groups) = command.groups {
            user.groups = groups;
            changed.push("groups");
        }
        if let Some(last_access_date) = command.last_access_date {
            user.last_access_date = Some(last_access_date);
            changed.push("lastAccessDate");
        }

        let user = match self.user_repo.update_item(id, user).await {
            Ok(user) => user,
            Err(PlatformError::NotFound { .. }) => {
                debug!(user_id = %id, "User deleted during update");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        info!(user_id = %id, changed = ?changed, "User updated");
        self.publisher.publish_event(&UserUpdated::new(
            &ctx,
            id,
            user.tenant_id,
            changed.into_iter().map(String::from).collect(),
        ));

        Ok(Some(user.without_secrets()))
    }

    async fn taken_by_other(&self, id: Uuid, field: &str, value: &str) -> Result<bool, UseCaseError> {
        let filter = Filter::and(vec![Filter::eq(field, value), Filter::ne_id("_id", id)]);
        Ok(self.user_repo.exists(&filter).await?)
    }
}
