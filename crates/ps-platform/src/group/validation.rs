//! Group rule sets

use crate::group::operations::{CreateGroupCommand, UpdateGroupCommand};
use crate::shared::validation::{has_text, ValidationResult, Validator};

const MAX_GROUP_NAME_LENGTH: usize = 128;

fn check_name(result: &mut ValidationResult, name: &str) {
    if !has_text(name) {
        result.add("name", "Group name is required");
    } else if name.trim().chars().count() > MAX_GROUP_NAME_LENGTH {
        result.add(
            "name",
            format!("Group name must be at most {} characters", MAX_GROUP_NAME_LENGTH),
        );
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CreateGroupValidator;

impl Validator<CreateGroupCommand> for CreateGroupValidator {
    fn validate(&self, command: &CreateGroupCommand) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.require(!command.tenant_id.is_nil(), "tenantId", "Tenant id is required");
        check_name(&mut result, &command.name);
        result
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateGroupValidator;

impl Validator<UpdateGroupCommand> for UpdateGroupValidator {
    fn validate(&self, command: &UpdateGroupCommand) -> ValidationResult {
        let mut result = ValidationResult::new();
        if let Some(name) = &command.name {
            check_name(&mut result, name);
        }
        result
    }
}
