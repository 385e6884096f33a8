//! User rule sets

use regex::Regex;

use crate::shared::validation::{has_text, ValidationResult, Validator};
use crate::user::operations::{CreateUserCommand, UpdateUserCommand};

const MAX_NAME_LENGTH: usize = 100;

/// Email pattern for single-user entry. Accepts quoted local parts.
pub fn email_pattern() -> &'static Regex {
    static PATTERN: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"^(?:"[^"\r\n]+"|[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*)@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$"#,
        )
        .unwrap()
    })
}

/// 3 to 64 characters: letters, digits and `. _ - @ +`
pub fn user_name_pattern() -> &'static Regex {
    static PATTERN: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9._@+-]{3,64}$").unwrap())
}

fn check_name(result: &mut ValidationResult, field: &str, label: &str, value: &str) {
    if !has_text(value) {
        result.add(field, format!("{} is required", label));
    } else if value.trim().chars().count() > MAX_NAME_LENGTH {
        result.add(field, format!("{} must be at most {} characters", label, MAX_NAME_LENGTH));
    }
}

fn check_email(result: &mut ValidationResult, email: &str) {
    if !has_text(email) {
        result.add("email", "Email is required");
    } else if !email_pattern().is_match(email) {
        result.add("email", "Email is not a valid address");
    }
}

fn check_user_name(result: &mut ValidationResult, user_name: &str) {
    if !has_text(user_name) {
        result.add("userName", "User name is required");
    } else if !user_name_pattern().is_match(user_name) {
        result.add(
            "userName",
            "User name must be 3-64 characters of letters, digits or . _ - @ +",
        );
    }
}

/// Structural rules for a new user
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateUserValidator;

impl Validator<CreateUserCommand> for CreateUserValidator {
    fn validate(&self, command: &CreateUserCommand) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require(!command.tenant_id.is_nil(), "tenantId", "Tenant id is required");
        check_name(&mut result, "firstName", "First name", &command.first_name);
        check_name(&mut result, "lastName", "Last name", &command.last_name);
        check_email(&mut result, &command.email);
        check_user_name(&mut result, &command.user_name);
        result.require(has_text(&command.password_hash), "passwordHash", "Password hash is required");
        result.require(has_text(&command.password_salt), "passwordSalt", "Password salt is required");

        result
    }
}

/// Structural rules for the fields an update supplies
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateUserValidator;

impl Validator<UpdateUserCommand> for UpdateUserValidator {
    fn validate(&self, command: &UpdateUserCommand) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(first_name) = &command.first_name {
            check_name(&mut result, "firstName", "First name", first_name);
        }
        if let Some(last_name) = &command.last_name {
            check_name(&mut result, "lastName", "Last name", last_name);
        }
        if let Some(email) = &command.email {
            check_email(&mut result, email);
        }
        if let Some(user_name) = &command.user_name {
            check_user_name(&mut result, user_name);
        }

        result
    }
}
