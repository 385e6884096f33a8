//! Shared fakes and wiring for the integration tests

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

use ps_license::{
    AssignUserLicenseRequest, LicenseApi, LicenseResponse, LicenseResultCode, LicenseSummary,
    ReleaseUserLicenseRequest,
};
use ps_platform::user::operations::CreateUserCommand;
use ps_platform::usecase::InMemoryEventPublisher;
use ps_platform::{
    EmailApi, Filter, Group, InMemoryRepository, PlatformError, Repository, TenantApi, User,
    UserInvite,
};

/// What a fake returns for every call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reply {
    Accepted,
    Rejected,
    Fails,
}

pub struct FakeEmailApi {
    reply: Reply,
    pub invite_batches: Mutex<Vec<Vec<String>>>,
    pub welcomes: Mutex<Vec<String>>,
}

impl FakeEmailApi {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            invite_batches: Mutex::new(Vec::new()),
            welcomes: Mutex::new(Vec::new()),
        })
    }

    fn answer(&self) -> ps_platform::Result<bool> {
        match self.reply {
            Reply::Accepted => Ok(true),
            Reply::Rejected => Ok(false),
            Reply::Fails => Err(PlatformError::downstream("email service unavailable")),
        }
    }
}

#[async_trait]
impl EmailApi for FakeEmailApi {
    async fn send_user_invite(&self, invites: &[UserInvite]) -> ps_platform::Result<bool> {
        self.invite_batches
            .lock()
            .push(invites.iter().map(|i| i.email.clone()).collect());
        self.answer()
    }

    async fn send_welcome_email(&self, email: &str, _first_name: &str) -> ps_platform::Result<bool> {
        self.welcomes.lock().push(email.to_string());
        self.answer()
    }
}

pub struct FakeTenantApi {
    domains: Vec<String>,
}

impl FakeTenantApi {
    pub fn new(domains: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            domains: domains.iter().map(|d| d.to_string()).collect(),
        })
    }
}

#[async_trait]
impl TenantApi for FakeTenantApi {
    async fn allowed_domains(&self, _tenant_id: Uuid) -> ps_platform::Result<Vec<String>> {
        Ok(self.domains.clone())
    }
}

pub enum LicenseReply {
    Code(LicenseResultCode),
    Fails,
}

pub struct FakeLicenseApi {
    reply: LicenseReply,
    pub assigned: Mutex<Vec<Uuid>>,
    pub released: Mutex<Vec<Uuid>>,
}

impl FakeLicenseApi {
    pub fn new(reply: LicenseReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            assigned: Mutex::new(Vec::new()),
            released: Mutex::new(Vec::new()),
        })
    }

    pub fn granting() -> Arc<Self> {
        Self::new(LicenseReply::Code(LicenseResultCode::Success))
    }

    fn answer(&self) -> ps_license::Result<LicenseResponse> {
        match &self.reply {
            LicenseReply::Code(code) => Ok(LicenseResponse {
                result_code: *code,
                message: None,
            }),
            LicenseReply::Fails => Err(ps_license::Error::Server("license manager down".into())),
        }
    }
}

#[async_trait]
impl LicenseApi for FakeLicenseApi {
    async fn assign_user_license(
        &self,
        request: &AssignUserLicenseRequest,
    ) -> ps_license::Result<LicenseResponse> {
        self.assigned.lock().push(request.user_id);
        self.answer()
    }

    async fn release_user_license(
        &self,
        request: &ReleaseUserLicenseRequest,
    ) -> ps_license::Result<LicenseResponse> {
        self.released.lock().push(request.user_id);
        self.answer()
    }

    async fn tenant_license_summary(&self, _tenant_id: Uuid) -> ps_license::Result<Vec<LicenseSummary>> {
        Ok(Vec::new())
    }
}

/// In-memory user store whose updates always fail
pub struct FailingUpdates {
    pub inner: InMemoryRepository<User>,
}

impl FailingUpdates {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryRepository::new(),
        })
    }
}

#[async_trait]
impl Repository<User> for FailingUpdates {
    async fn get_item(&self, id: Uuid) -> ps_platform::Result<Option<User>> {
        self.inner.get_item(id).await
    }

    async fn get_items(&self, filter: &Filter) -> ps_platform::Result<Vec<User>> {
        self.inner.get_items(filter).await
    }

    async fn create_item(&self, item: User) -> ps_platform::Result<User> {
        self.inner.create_item(item).await
    }

    async fn update_item(&self, _id: Uuid, _item: User) -> ps_platform::Result<User> {
        Err(PlatformError::internal("storage unavailable"))
    }

    async fn delete_item(&self, id: Uuid) -> ps_platform::Result<()> {
        self.inner.delete_item(id).await
    }
}

/// Repositories and publisher shared by the use cases under test
pub struct Harness {
    pub users: Arc<InMemoryRepository<User>>,
    pub invites: Arc<InMemoryRepository<UserInvite>>,
    pub groups: Arc<InMemoryRepository<Group>>,
    pub events: Arc<InMemoryEventPublisher>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            users: Arc::new(InMemoryRepository::new()),
            invites: Arc::new(InMemoryRepository::new()),
            groups: Arc::new(InMemoryRepository::new()),
            events: Arc::new(InMemoryEventPublisher::new()),
        }
    }
}

pub fn create_command(tenant_id: Uuid, user_name: &str, email: &str) -> CreateUserCommand {
    CreateUserCommand {
        tenant_id,
        first_name: "Ann".into(),
        last_name: "Lee".into(),
        email: email.into(),
        user_name: user_name.into(),
        ldap_id: None,
        password_hash: "hash".into(),
        password_salt: "salt".into(),
        groups: BTreeSet::new(),
    }
}
