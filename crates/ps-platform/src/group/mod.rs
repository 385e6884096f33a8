//! Group Aggregate
//!
//! Named groups of users within a tenant. Users reference groups by id.

pub mod entity;
pub mod validation;
pub mod api;
pub mod operations;

pub use entity::Group;
pub use api::{GroupsState, groups_router};
