//! Email service client

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::shared::error::Result;
use crate::user_invite::UserInvite;

#[async_trait]
pub trait EmailApi: Send + Sync {
    /// Send invitations for a whole batch.
    ///
    /// Returns one flag for the batch: `true` only when the service accepted
    /// every message.
    async fn send_user_invite(&self, invites: &[UserInvite]) -> Result<bool>;

    async fn send_welcome_email(&self, email: &str, first_name: &str) -> Result<bool>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InviteMessage<'a> {
    invite_id: Option<Uuid>,
    tenant_id: Uuid,
    email: &'a str,
    first_name: &'a str,
    last_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendUserInviteRequest<'a> {
    invites: Vec<InviteMessage<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendWelcomeRequest<'a> {
    email: &'a str,
    first_name: &'a str,
}

pub struct HttpEmailClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpEmailClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http_client: super::build_http_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<bool> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http_client.post(&url).json(body).send().await?;
        let status = response.status();

        if status.is_success() {
            debug!(%url, "Email request accepted");
            Ok(true)
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, status = %status, body = %body, "Email request rejected");
            Ok(false)
        }
    }
}

#[async_trait]
impl EmailApi for HttpEmailClient {
    async fn send_user_invite(&self, invites: &[UserInvite]) -> Result<bool> {
        let request = SendUserInviteRequest {
            invites: invites
                .iter()
                .map(|invite| InviteMessage {
                    invite_id: invite.id,
                    tenant_id: invite.tenant_id,
                    email: &invite.email,
                    first_name: &invite.first_name,
                    last_name: &invite.last_name,
                })
                .collect(),
        };
        self.post("/v1/send/userinvite", &request).await
    }

    async fn send_welcome_email(&self, email: &str, first_name: &str) -> Result<bool> {
        self.post("/v1/send/welcome", &SendWelcomeRequest { email, first_name }).await
    }
}
