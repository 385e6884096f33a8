//! Clients for sibling services
//!
//! Each service is reached through a narrow async trait so use cases can be
//! exercised with fakes. The HTTP implementations map transport failures to
//! [`crate::PlatformError`].

pub mod email;
pub mod tenant;

pub use email::{EmailApi, HttpEmailClient};
pub use tenant::{HttpTenantClient, TenantApi};

use std::time::Duration;

pub(crate) fn build_http_client(timeout: Duration) -> crate::Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("principal-service/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
