//! Create User Use Case
//!
//! Validation failures are accumulated into one error. After the user is
//! stored a license is assigned; if that fails the user is kept but locked.
//! A failed lock is logged and the created user is still returned.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use ps_license::{AssignUserLicenseRequest, LicenseApi};

use crate::clients::EmailApi;
use crate::shared::repository::{Filter, Repository};
use crate::shared::validation::{has_text, Validator};
use crate::usecase::{EventPublisher, ExecutionContext, UseCaseError};
use crate::user::entity::User;
use crate::user::validation::CreateUserValidator;
use super::events::{UserCreated, UserLockChanged};

/// Command for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserCommand {
    pub tenant_id: Uuid,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    pub user_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ldap_id: Option<String>,

    pub password_hash: String,

    pub password_salt: String,

    #[serde(default)]
    pub groups: BTreeSet<Uuid>,
}

/// Use case for creating a new user.
pub struct CreateUserUseCase {
    user_repo: Arc<dyn Repository<User>>,
    license_api: Arc<dyn LicenseApi>,
    email_api: Arc<dyn EmailApi>,
    publisher: Arc<dyn EventPublisher>,
    validator: Arc<dyn Validator<CreateUserCommand>>,
    reserved_tenant_ids: HashSet<Uuid>,
}

impl CreateUserUseCase {
    pub fn new(
        user_repo: Arc<dyn Repository<User>>,
        license_api: Arc<dyn LicenseApi>,
        email_api: Arc<dyn EmailApi>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            user_repo,
            license_api,
            email_api,
            publisher,
            validator: Arc::new(CreateUserValidator),
            reserved_tenant_ids: HashSet::new(),
        }
    }

    pub fn with_validator(mut self, validator: Arc<dyn Validator<CreateUserCommand>>) -> Self {
        self.validator = validator;
        self
    }

    /// Built-in tenants that can never own users
    pub fn with_reserved_tenants(mut self, tenant_ids: impl IntoIterator<Item = Uuid>) -> Self {
        self.reserved_tenant_ids = tenant_ids.into_iter().collect();
        self
    }

    pub async fn execute(
        &self,
        command: CreateUserCommand,
        ctx: ExecutionContext,
    ) -> Result<User, UseCaseError> {
        let mut result = self.validator.validate(&command);

        if self.reserved_tenant_ids.contains(&command.tenant_id) {
            result.add("tenantId", "Users cannot be created in a built-in tenant");
        }

        // Uniqueness checks use exact matches
        if has_text(&command.email)
            && self.user_repo.exists(&Filter::eq("email", command.email.as_str())).await?
        {
            result.add("email", format!("Email '{}' is already in use", command.email));
        }
        if has_text(&command.user_name)
            && self.user_repo.exists(&Filter::eq("userName", command.user_name.as_str())).await?
        {
            result.add("userName", format!("User name '{}' is already in use", command.user_name));
        }
        let ldap_id = command.ldap_id.as_deref().map(str::trim).filter(|s| !s.is_empty());
        if let Some(ldap_id) = ldap_id {
            if self.user_repo.exists(&Filter::eq("ldapId", ldap_id)).await? {
                result.add("ldapId", format!("LDAP id '{}' is already in use", ldap_id));
            }
        }

        result.into_result("USER_VALIDATION_FAILED", "User validation failed")?;

        let user = User {
            id: None,
            tenant_id: command.tenant_id,
            first_name: command.first_name.trim().to_string(),
            last_name: command.last_name.trim().to_string(),
            email: command.email,
            user_name: command.user_name,
            ldap_id: ldap_id.map(String::from),
            password_hash: Some(command.password_hash),
            password_salt: Some(command.password_salt),
            is_locked: false,
            groups: command.groups,
            created_date: Some(Utc::now()),
            last_access_date: None,
        };

        let user = self.user_repo.create_item(user).await?;
        let user_id = user
            .id
            .ok_or_else(|| UseCaseError::infrastructure("Repository did not assign a user id"))?;

        info!(%user_id, tenant_id = %user.tenant_id, user_name = %user.user_name, "User created");
        self.publisher.publish_event(&UserCreated::new(&ctx, user_id, &user));

        let user = match self.assign_license(&user, user_id).await {
            Ok(()) => {
                self.send_welcome(&user).await;
                user
            }
            Err(reason) => {
                warn!(%user_id, %reason, "License assignment failed, locking user");
                match self.lock_user(&user, user_id, &ctx).await {
                    Ok(locked) => locked,
                    Err(e) => {
                        error!(%user_id, error = %e, "Failed to lock unlicensed user");
                        user
                    }
                }
            }
        };

        Ok(user.without_secrets())
    }

    async fn assign_license(&self, user: &User, user_id: Uuid) -> Result<(), String> {
        let request = AssignUserLicenseRequest::new(user.tenant_id, user_id);
        match self.license_api.assign_user_license(&request).await {
            Ok(response) if response.is_success() => {
                debug!(%user_id, "License assigned");
                Ok(())
            }
            Ok(response) => Err(format!(
                "{:?}: {}",
                response.result_code,
                response.message.unwrap_or_default()
            )),
            Err(e) => Err(e.to_string()),
        }
    }

    async fn lock_user(
        &self,
        created: &User,
        user_id: Uuid,
        ctx: &ExecutionContext,
    ) -> Result<User, UseCaseError> {
        let mut user = self
            .user_repo
            .get_item(user_id)
            .await?
            .unwrap_or_else(|| created.clone());
        user.is_locked = true;
        let user = self.user_repo.update_item(user_id, user).await?;

        self.publisher.publish_event(&UserLockChanged::new(
            ctx,
            user_id,
            true,
            Some("licenseAssignmentFailed"),
        ));
        Ok(user)
    }

    async fn send_welcome(&self, user: &User) {
        match self.email_api.send_welcome_email(&user.email, &user.first_name).await {
            Ok(true) => debug!(email = %user.email, "Welcome email sent"),
            Ok(false) => warn!(email = %user.email, "Welcome email was not accepted"),
            Err(e) => warn!(email = %user.email, error = %e, "Welcome email failed"),
        }
    }
}
