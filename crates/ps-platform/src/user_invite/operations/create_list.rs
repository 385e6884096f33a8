//! Create User Invite List Use Case
//!
//! Classifies a batch, reconciles the valid part against stored users and
//! invites, persists the survivors and emails them as one batch.
//!
//! Results come back in three runs: the reconciled valid invites in input
//! order, then format-invalid entries, then domain-rejected entries.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clients::{EmailApi, TenantApi};
use crate::shared::repository::{Filter, Repository};
use crate::shared::validation::{IdValidator, Validator};
use crate::usecase::{ExecutionContext, UseCaseError};
use crate::user::entity::User;
use crate::user_invite::classification::EmailClassifier;
use crate::user_invite::entity::{InviteRequest, InviteResult, InviteStatus, UserInvite};

pub struct CreateUserInviteListUseCase {
    invite_repo: Arc<dyn Repository<UserInvite>>,
    user_repo: Arc<dyn Repository<User>>,
    tenant_api: Arc<dyn TenantApi>,
    email_api: Arc<dyn EmailApi>,
    classifier: EmailClassifier,
}

impl CreateUserInviteListUseCase {
    pub fn new(
        invite_repo: Arc<dyn Repository<UserInvite>>,
        user_repo: Arc<dyn Repository<User>>,
        tenant_api: Arc<dyn TenantApi>,
        email_api: Arc<dyn EmailApi>,
        classifier: EmailClassifier,
    ) -> Self {
        Self {
            invite_repo,
            user_repo,
            tenant_api,
            email_api,
            classifier,
        }
    }

    pub async fn execute(
        &self,
        requests: Vec<InviteRequest>,
        tenant_id: Uuid,
        ctx: ExecutionContext,
    ) -> Result<Vec<InviteResult>, UseCaseError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }
        IdValidator::for_field("tenantId")
            .validate(&tenant_id)
            .into_result("INVALID_TENANT_ID", "Tenant id is invalid")?;

        let submitted = requests.len();
        let allowed_domains: HashSet<String> = self
            .tenant_api
            .allowed_domains(tenant_id)
            .await?
            .into_iter()
            .map(|d| d.to_lowercase())
            .collect();

        let batch = self.classifier.partition(requests, &allowed_domains);
        let mut results = self.reconcile(batch.valid, tenant_id).await?;

        results.extend(
            batch
                .format_invalid
                .iter()
                .map(|r| InviteResult::from_request(r, None, InviteStatus::UserEmailFormatInvalid)),
        );
        results.extend(
            batch
                .domain_invalid
                .iter()
                .map(|(r, status)| InviteResult::from_request(r, None, *status)),
        );

        info!(
            %tenant_id,
            submitted,
            invited = results.iter().filter(|r| r.status == InviteStatus::Success).count(),
            correlation_id = %ctx.correlation_id,
            "Invite batch processed"
        );
        Ok(results)
    }

    async fn reconcile(
        &self,
        valid: Vec<InviteRequest>,
        tenant_id: Uuid,
    ) -> Result<Vec<InviteResult>, UseCaseError> {
        if valid.is_empty() {
            return Ok(Vec::new());
        }

        let emails: Vec<String> = valid.iter().map(|r| r.email.clone()).collect();
        let existing = self.existing_emails(&emails).await?;

        let mut results = Vec::with_capacity(valid.len());
        let mut seen = HashSet::new();
        let mut persisted: Vec<(usize, UserInvite)> = Vec::new();

        for request in &valid {
            let key = request.email.to_lowercase();
            if existing.contains(&key) {
                results.push(InviteResult::from_request(
                    request,
                    Some(tenant_id),
                    InviteStatus::DuplicateUserEmail,
                ));
                continue;
            }
            if !seen.insert(key) {
                results.push(InviteResult::from_request(
                    request,
                    Some(tenant_id),
                    InviteStatus::DuplicateUserEntry,
                ));
                continue;
            }

            let invite = self
                .invite_repo
                .create_item(UserInvite::new(tenant_id, request))
                .await?;
            persisted.push((results.len(), invite.clone()));
            results.push(InviteResult::from_invite(&invite, InviteStatus::Success));
        }

        if persisted.is_empty() {
            return Ok(results);
        }

        let invites: Vec<UserInvite> = persisted.iter().map(|(_, invite)| invite.clone()).collect();
        if !self.email_api.send_user_invite(&invites).await? {
            warn!(%tenant_id, count = invites.len(), "Invite emails not sent, invites kept without invited date");
            return Ok(results);
        }

        let now = Utc::now();
        for (index, mut invite) in persisted {
            let Some(id) = invite.id else { continue };
            invite.last_invited_date = Some(now);
            let invite = self.invite_repo.update_item(id, invite).await?;
            results[index].last_invited_date = invite.last_invited_date;
        }

        Ok(results)
    }

    /// Lower-cased emails already used by a user or an invite
    async fn existing_emails(&self, emails: &[String]) -> Result<HashSet<String>, UseCaseError> {
        let filter = Filter::in_ignore_case("email", emails.iter().cloned());

        let mut existing: HashSet<String> = self
            .user_repo
            .get_items(&filter)
            .await?
            .into_iter()
            .map(|u| u.email.to_lowercase())
            .collect();
        existing.extend(
            self.invite_repo
                .get_items(&filter)
                .await?
                .into_iter()
                .map(|i| i.email.to_lowercase()),
        );

        Ok(existing)
    }
}
