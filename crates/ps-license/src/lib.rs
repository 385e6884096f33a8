//! # License Manager client
//!
//! Async client for the License Manager service: assigning and releasing
//! per-user licenses and reading a tenant's license pool.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ps_license::{AssignUserLicenseRequest, Config, LicenseApi, LicenseManagerClient};
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = LicenseManagerClient::new(Config::new("http://localhost:8081"))?;
//!
//!     let response = client
//!         .assign_user_license(&AssignUserLicenseRequest::new(Uuid::new_v4(), Uuid::new_v4()))
//!         .await?;
//!     println!("assigned: {}", response.is_success());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod model;

pub use client::{LicenseApi, LicenseManagerClient};
pub use config::Config;
pub use error::{Error, Result};
pub use model::{AssignUserLicenseRequest, LicenseResponse, LicenseResultCode, LicenseSummary, ReleaseUserLicenseRequest};
