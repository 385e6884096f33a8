//! User Invite Operations

pub mod create_list;
pub mod resend;
pub mod list;

pub use create_list::CreateUserInviteListUseCase;
pub use resend::ResendEmailInviteUseCase;
pub use list::ListUserInvitesUseCase;
