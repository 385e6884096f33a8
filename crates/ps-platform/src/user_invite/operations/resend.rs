//! Resend Email Invite Use Case

use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clients::EmailApi;
use crate::shared::repository::{Filter, Repository};
use crate::shared::validation::{IdValidator, Validator};
use crate::usecase::{ExecutionContext, UseCaseError};
use crate::user_invite::entity::{InviteRequest, InviteResult, InviteStatus, UserInvite};

pub struct ResendEmailInviteUseCase {
    invite_repo: Arc<dyn Repository<UserInvite>>,
    email_api: Arc<dyn EmailApi>,
}

impl ResendEmailInviteUseCase {
    pub fn new(invite_repo: Arc<dyn Repository<UserInvite>>, email_api: Arc<dyn EmailApi>) -> Self {
        Self { invite_repo, email_api }
    }

    /// Resend invitations for existing invites, one result per request in
    /// input order. Emails without an invite report `UserNotExist`.
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

        let mut results = Vec::with_capacity(requests.len());
        let mut resend: IndexMap<Uuid, UserInvite> = IndexMap::new();

        for request in &requests {
            let found = self
                .invite_repo
                .get_items(&Filter::eq_ignore_case("email", request.email.as_str()))
                .await?;

            let Some(first) = found.first() else {
                results.push(InviteResult::from_request(request, None, InviteStatus::UserNotExist));
                continue;
            };

            let mut result = InviteResult::from_invite(first, InviteStatus::Success);
            result.tenant_id = Some(tenant_id);
            results.push(result);

            for mut invite in found {
                if let Some(id) = invite.id {
                    invite.tenant_id = tenant_id;
                    resend.entry(id).or_insert(invite);
                }
            }
        }

        if resend.is_empty() {
            return Ok(results);
        }

        let invites: Vec<UserInvite> = resend.values().cloned().collect();
        if !self.email_api.send_user_invite(&invites).await? {
            warn!(%tenant_id, count = invites.len(), "Invite emails not resent");
            return Ok(results);
        }

        let now = Utc::now();
        for (id, mut invite) in resend {
            invite.last_invited_date = Some(now);
            self.invite_repo.update_item(id, invite).await?;
        }
        for result in results.iter_mut().filter(|r| r.status == InviteStatus::Success) {
            result.last_invited_date = Some(now);
        }

        info!(
            %tenant_id,
            resent = invites.len(),
            correlation_id = %ctx.correlation_id,
            "Invites resent"
        );
        Ok(results)
    }
}
