//! Shared infrastructure for all aggregates

pub mod api_common;
pub mod error;
pub mod indexes;
pub mod memory_repository;
pub mod mongo_repository;
pub mod repository;
pub mod validation;
