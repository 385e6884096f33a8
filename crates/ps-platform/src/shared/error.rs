//! Platform Error Types

use thiserror::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response, Json},
};

use crate::shared::validation::ValidationFailure;
use crate::usecase::UseCaseError;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Duplicate entity: {entity_type} with {field}={value}")]
    Duplicate { entity_type: String, field: String, value: String },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        failures: Vec<ValidationFailure>,
    },

    #[error("Conflict: {message}")]
    Conflict { code: String, message: String },

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Downstream service error: {message}")]
    Downstream { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PlatformError {
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    pub fn duplicate(entity_type: impl Into<String>, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: entity_type.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            failures: Vec::new(),
        }
    }

    pub fn downstream(message: impl Into<String>) -> Self {
        Self::Downstream { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Error response body
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ValidationFailure>,
}

impl IntoResponse for PlatformError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            PlatformError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            PlatformError::Duplicate { .. } => (StatusCode::CONFLICT, "DUPLICATE"),
            PlatformError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            PlatformError::Conflict { .. } => (StatusCode::CONFLICT, "CONFLICT"),
            PlatformError::Http(_) | PlatformError::Downstream { .. } => {
                (StatusCode::BAD_GATEWAY, "DOWNSTREAM_ERROR")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let message = self.to_string();
        let failures = match self {
            PlatformError::Validation { failures, .. } => failures,
            _ => Vec::new(),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            failures,
        };

        (status, Json(body)).into_response()
    }
}

impl From<UseCaseError> for PlatformError {
    fn from(err: UseCaseError) -> Self {
        match err {
            UseCaseError::ValidationError { message, failures, .. } => {
                PlatformError::Validation { message, failures }
            }
            UseCaseError::BusinessRuleViolation { code, message, .. } => {
                PlatformError::Conflict { code, message }
            }
            UseCaseError::NotFoundError { message, details, .. } => {
                let entity_type = details
                    .get("entityType")
                    .and_then(|v| v.as_str())
                    .unwrap_or("Entity")
                    .to_string();
                let id = details
                    .get("id")
                    .and_then(|v| v.as_str())
                    .map(String::from)
                    .unwrap_or(message);
                PlatformError::NotFound { entity_type, id }
            }
            UseCaseError::DownstreamError { message, .. } => {
                PlatformError::Downstream { message }
            }
            UseCaseError::InfrastructureError { message, .. } => {
                PlatformError::Internal { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failures_survive_conversion() {
        let err = UseCaseError::validation_failed(
            "USER_VALIDATION_FAILED",
            "User validation failed",
            vec![
                ValidationFailure::new("email", "Email is already in use"),
                ValidationFailure::new("userName", "User name is already in use"),
            ],
        );

        match PlatformError::from(err) {
            PlatformError::Validation { failures, .. } => assert_eq!(failures.len(), 2),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_not_found_keeps_entity_and_id() {
        let err = UseCaseError::not_found_entity("User", "1234");
        match PlatformError::from(err) {
            PlatformError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "User");
                assert_eq!(id, "1234");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PlatformError::not_found("User", "x").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PlatformError::validation("bad").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PlatformError::downstream("email service down").into_response().status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            PlatformError::internal("boom").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
