//! Principal Service Platform
//!
//! Users, groups and user invitations for a multi-tenant collaboration
//! platform:
//! - `shared` - errors, repositories, validation primitives
//! - `usecase` - use case errors, domain events, execution context, publishing
//! - `clients` - Email and Tenant service clients
//! - `user`, `user_invite`, `group` - aggregates with their operations and routers

pub mod shared;
pub mod usecase;
pub mod clients;
pub mod user;
pub mod user_invite;
pub mod group;

pub use shared::error::{PlatformError, Result};
pub use shared::repository::{Filter, HasId, Repository};
pub use shared::memory_repository::InMemoryRepository;
pub use shared::mongo_repository::MongoRepository;
pub use shared::validation::{IdValidator, ValidationFailure, ValidationResult, Validator};

pub use usecase::{
    DomainEvent, EventMetadata, EventPublisher, ExecutionContext, PublishedEvent, UseCaseError,
};

pub use clients::{EmailApi, HttpEmailClient, HttpTenantClient, TenantApi};

pub use user::{User, UsersState, users_router};
pub use user_invite::{InviteRequest, InviteResult, InviteStatus, UserInvite, UserInvitesState, user_invites_router};
pub use group::{Group, GroupsState, groups_router};
