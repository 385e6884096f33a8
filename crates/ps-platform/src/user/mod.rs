//! User Aggregate
//!
//! Tenant users: creation with license assignment, lookup, update, lock
//! and delete.

pub mod entity;
pub mod validation;
pub mod api;
pub mod operations;

// Re-export main types
pub use entity::User;
pub use api::{UsersState, users_router};
