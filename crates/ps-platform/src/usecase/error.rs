//! Use Case Errors
//!
//! Categorized error types for use case failures.
//! Errors are categorized by type to enable consistent HTTP status mapping.
//!
//! # Creating Errors with Details
//!
//! ```ignore
//! use ps_platform::{details, UseCaseError};
//!
//! UseCaseError::business_rule_with_details(
//!     "GROUP_NAME_EXISTS",
//!     "Group name already exists",
//!     details!{ "name" => name },
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::shared::error::PlatformError;
use crate::shared::validation::ValidationFailure;

/// Macro for creating error detail maps.
///
/// # Example
///
/// ```ignore
/// let details = details! {
///     "email" => "user@example.com",
///     "tenantId" => tenant_id.to_string()
/// };
/// ```
#[macro_export]
macro_rules! details {
    () => {
        std::collections::HashMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = std::collections::HashMap::new();
        $(
            map.insert($key.to_string(), serde_json::json!($value));
        )+
        map
    }};
}

/// Categorized error types for use case failures.
///
/// Each variant maps to a specific HTTP status code:
/// - `ValidationError` -> 400 Bad Request
/// - `BusinessRuleViolation` -> 409 Conflict
/// - `NotFoundError` -> 404 Not Found
/// - `DownstreamError` -> 502 Bad Gateway
/// - `InfrastructureError` -> 500 Internal Server Error
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UseCaseError {
    /// One or more input rules failed. Carries every failure, not just the first.
    ValidationError {
        code: String,
        message: String,
        #[serde(default)]
        failures: Vec<ValidationFailure>,
    },

    /// Business rule violation (entity in wrong state, constraint violated, etc.)
    BusinessRuleViolation {
        code: String,
        message: String,
        #[serde(default)]
        details: HashMap<String, serde_json::Value>,
    },

    /// Entity not found.
    NotFoundError {
        code: String,
        message: String,
        #[serde(default)]
        details: HashMap<String, serde_json::Value>,
    },

    /// A sibling service (Email, Tenant) failed at the transport level.
    DownstreamError {
        code: String,
        message: String,
    },

    /// Repository or other infrastructure failure.
    InfrastructureError {
        code: String,
        message: String,
    },
}

impl UseCaseError {
    /// Create a validation error with a single failure.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::ValidationError {
            code: "VALIDATION_FAILED".to_string(),
            message: message.clone(),
            failures: vec![ValidationFailure::new(field, message)],
        }
    }

    /// Create a validation error carrying every failed rule.
    pub fn validation_failed(
        code: impl Into<String>,
        message: impl Into<String>,
        failures: Vec<ValidationFailure>,
    ) -> Self {
        Self::ValidationError {
            code: code.into(),
            message: message.into(),
            failures,
        }
    }

    /// Create a business rule violation error.
    pub fn business_rule(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BusinessRuleViolation {
            code: code.into(),
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Create a business rule violation with details.
    pub fn business_rule_with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self::BusinessRuleViolation {
            code: code.into(),
            message: message.into(),
            details,
        }
    }

    /// Create a not found error.
    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFoundError {
            code: code.into(),
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Create a not found error for an entity id, e.g. `USER_NOT_FOUND`.
    pub fn not_found_entity(entity_type: &str, id: impl ToString) -> Self {
        let id = id.to_string();
        Self::NotFoundError {
            code: format!("{}_NOT_FOUND", entity_type.to_uppercase()),
            message: format!("{} with ID '{}' not found", entity_type, id),
            details: crate::details! { "entityType" => entity_type, "id" => id },
        }
    }

    pub fn downstream(message: impl Into<String>) -> Self {
        Self::DownstreamError {
            code: "DOWNSTREAM_FAILED".to_string(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::InfrastructureError {
            code: "INFRASTRUCTURE_FAILED".to_string(),
            message: message.into(),
        }
    }

    /// Get the error code.
    pub fn code(&self) -> &str {
        match self {
            Self::ValidationError { code, .. } => code,
            Self::BusinessRuleViolation { code, .. } => code,
            Self::NotFoundError { code, .. } => code,
            Self::DownstreamError { code, .. } => code,
            Self::InfrastructureError { code, .. } => code,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
            Self::BusinessRuleViolation { message, .. } => message,
            Self::NotFoundError { message, .. } => message,
            Self::DownstreamError { message, .. } => message,
            Self::InfrastructureError { message, .. } => message,
        }
    }

    /// Validation failures, empty for other categories.
    pub fn failures(&self) -> &[ValidationFailure] {
        match self {
            Self::ValidationError { failures, .. } => failures,
            _ => &[],
        }
    }

    /// Get the suggested HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::ValidationError { .. } => 400,
            Self::BusinessRuleViolation { .. } => 409,
            Self::NotFoundError { .. } => 404,
            Self::DownstreamError { .. } => 502,
            Self::InfrastructureError { .. } => 500,
        }
    }
}

impl std::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

impl std::error::Error for UseCaseError {}

impl From<PlatformError> for UseCaseError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::NotFound { entity_type, id } => {
                UseCaseError::not_found_entity(&entity_type, id)
            }
            PlatformError::Validation { message, failures } => {
                UseCaseError::validation_failed("VALIDATION_FAILED", message, failures)
            }
            PlatformError::Conflict { code, message } => UseCaseError::business_rule(code, message),
            err @ PlatformError::Duplicate { .. } => {
                UseCaseError::business_rule("DUPLICATE", err.to_string())
            }
            err @ (PlatformError::Http(_) | PlatformError::Downstream { .. }) => {
                UseCaseError::downstream(err.to_string())
            }
            err => UseCaseError::infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = UseCaseError::validation("email", "Email is required");
        assert_eq!(err.code(), "VALIDATION_FAILED");
        assert_eq!(err.message(), "Email is required");
        assert_eq!(err.failures().len(), 1);
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_not_found_entity() {
        let err = UseCaseError::not_found_entity("User", "abc");
        assert_eq!(err.code(), "USER_NOT_FOUND");
        assert_eq!(err.http_status_code(), 404);
        assert!(err.failures().is_empty());
    }

    #[test]
    fn test_platform_errors_are_categorized() {
        let err: UseCaseError = PlatformError::downstream("email down").into();
        assert_eq!(err.http_status_code(), 502);

        let err: UseCaseError = PlatformError::internal("disk full").into();
        assert!(matches!(err, UseCaseError::InfrastructureError { .. }));

        let err: UseCaseError = PlatformError::not_found("Group", "g-1").into();
        assert_eq!(err.code(), "GROUP_NOT_FOUND");

        let err: UseCaseError = PlatformError::duplicate("User", "email", "a@b.com").into();
        assert_eq!(err.http_status_code(), 409);
    }

    #[test]
    fn test_details_macro_multiple() {
        let details: HashMap<String, serde_json::Value> = details! {
            "name" => "Admins",
            "count" => 2,
        };
        assert_eq!(details.get("name"), Some(&serde_json::json!("Admins")));
        assert_eq!(details.get("count"), Some(&serde_json::json!(2)));

        let empty: HashMap<String, serde_json::Value> = details!();
        assert!(empty.is_empty());
    }
}
