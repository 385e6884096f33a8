//! User Invite Aggregate
//!
//! Pending invitations: batch creation with email classification and
//! duplicate detection, resending, and listing.

pub mod entity;
pub mod classification;
pub mod api;
pub mod operations;

// Re-export main types
pub use entity::{InviteRequest, InviteResult, InviteStatus, UserInvite};
pub use classification::{Classification, EmailClassifier};
pub use api::{UserInvitesState, user_invites_router};
