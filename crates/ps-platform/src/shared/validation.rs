//! Validation primitives
//!
//! Validators are typed and injected per use case. A validator never stops
//! at the first problem: every failed rule is reported.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::usecase::UseCaseError;

/// A single failed rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    pub field: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub failures: Vec<ValidationFailure>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.failures.push(ValidationFailure::new(field, message));
    }

    /// Record a failure when `condition` is false.
    pub fn require(&mut self, condition: bool, field: &str, message: &str) {
        if !condition {
            self.add(field, message);
        }
    }

    pub fn extend(&mut self, other: ValidationResult) {
        self.failures.extend(other.failures);
    }

    /// Turn accumulated failures into a single validation error.
    pub fn into_result(self, code: &str, message: &str) -> Result<(), UseCaseError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(UseCaseError::validation_failed(code, message, self.failures))
        }
    }
}

/// Rule set for one input type
pub trait Validator<T>: Send + Sync {
    fn validate(&self, value: &T) -> ValidationResult;
}

/// Rejects the nil UUID
#[derive(Debug, Clone, Copy, Default)]
pub struct IdValidator {
    field: &'static str,
}

impl IdValidator {
    pub fn for_field(field: &'static str) -> Self {
        Self { field }
    }
}

impl Validator<Uuid> for IdValidator {
    fn validate(&self, value: &Uuid) -> ValidationResult {
        let field = if self.field.is_empty() { "id" } else { self.field };
        let mut result = ValidationResult::new();
        result.require(!value.is_nil(), field, "Id must not be empty");
        result
    }
}

/// True when the string has non-whitespace content
pub fn has_text(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_validator() {
        assert!(!IdValidator::default().validate(&Uuid::nil()).is_valid());
        assert!(IdValidator::default().validate(&Uuid::new_v4()).is_valid());

        let result = IdValidator::for_field("tenantId").validate(&Uuid::nil());
        assert_eq!(result.failures[0].field, "tenantId");
    }

    #[test]
    fn test_into_result_carries_every_failure() {
        let mut result = ValidationResult::new();
        result.add("email", "taken");
        result.require(false, "userName", "taken");
        result.require(true, "ldapId", "taken");

        match result.into_result("FAILED", "Failed") {
            Err(UseCaseError::ValidationError { failures, .. }) => assert_eq!(failures.len(), 2),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_has_text() {
        assert!(has_text(" a "));
        assert!(!has_text("   "));
    }
}
