//! User Operations
//!
//! Use cases for user management.

pub mod events;
pub mod create;
pub mod get;
pub mod update;
pub mod delete;
pub mod lock;
pub mod list;

pub use events::*;
pub use create::{CreateUserCommand, CreateUserUseCase};
pub use get::GetUserUseCase;
pub use update::{UpdateUserCommand, UpdateUserUseCase};
pub use delete::DeleteUserUseCase;
pub use lock::LockUserUseCase;
pub use list::ListUsersUseCase;
