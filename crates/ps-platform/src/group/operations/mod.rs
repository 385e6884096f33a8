//! Group Operations

pub mod events;
pub mod create;
pub mod get;
pub mod update;
pub mod delete;
pub mod list;

pub use events::*;
pub use create::{CreateGroupCommand, CreateGroupUseCase};
pub use get::GetGroupUseCase;
pub use update::{UpdateGroupCommand, UpdateGroupUseCase};
pub use delete::DeleteGroupUseCase;
pub use list::ListGroupsUseCase;

use uuid::Uuid;

use crate::group::entity::Group;
use crate::shared::repository::{Filter, Repository};
use crate::usecase::UseCaseError;

/// True when another group of the tenant already uses `name` (any case).
pub(crate) async fn group_name_taken(
    repo: &dyn Repository<Group>,
    tenant_id: Uuid,
    name: &str,
    excluding: Option<Uuid>,
) -> Result<bool, UseCaseError> {
    let mut filters = vec![
        Filter::eq_id("tenantId", tenant_id),
        Filter::eq_ignore_case("name", name.trim()),
    ];
    if let Some(id) = excluding {
        filters.push(Filter::ne_id("_id", id));
    }
    Ok(repo.exists(&Filter::and(filters)).await?)
}
