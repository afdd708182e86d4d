use super::types::{CreateUserOptions, UpdateUserOptions, UserError};
use crate::ordering::OrderError;
use std::sync::LazyLock;

/// Static regex for validating email addresses (compiled once on first use)
#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("EMAIL_REGEX is a valid regex literal")
});

/// Username must contain something other than whitespace.
pub fn validate_username(username: &str) -> Result<(), UserError> {
    if username.trim().is_empty() {
        return Err(UserError::ValidationError(
            "username cannot be empty".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), UserError> {
    if !EMAIL_REGEX.is_match(email) {
        return Err(UserError::ValidationError(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

pub(super) fn validate_create(options: &CreateUserOptions) -> Result<(), UserError> {
    validate_username(&options.username)?;
    validate_email(&options.email)?;
    if options.initials.as_deref().is_some_and(|i| i.trim().is_empty()) {
        return Err(UserError::ValidationError(
            "initials cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Checked before any write, so a bad request never half-applies.
pub(super) fn validate_update(options: &UpdateUserOptions) -> Result<(), UserError> {
    if let Some(username) = &options.username {
        validate_username(username)?;
    }
    if let Some(email) = &options.email {
        validate_email(email)?;
    }
    if options.initials.as_deref().is_some_and(|i| i.trim().is_empty()) {
        return Err(UserError::ValidationError(
            "initials cannot be empty".to_string(),
        ));
    }
    if let Some(target) = options.display_order.filter(|t| *t < 1) {
        return Err(OrderError::InvalidTarget(target).into());
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod validation_tests;
