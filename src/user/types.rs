//! User type definitions and error types.
use crate::db::DbError;
use crate::ordering::{MoveOutcome, OrderError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A roster member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub active: bool,
    pub skills: Vec<String>,
    pub show_on_site: bool,
    pub initials: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    /// Position in the roster; `None` when the user is not listed.
    pub display_order: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Options for creating a user
#[derive(Debug, Clone, Default)]
pub struct CreateUserOptions {
    pub username: String,
    pub email: String,
    pub skills: Vec<String>,
    pub show_on_site: bool,
    /// Defaults to `"X"`.
    pub initials: Option<String>,
    pub positions: Option<String>,
    pub img: Option<String>,
}

/// Options for updating a user.
///
/// `None` leaves a field untouched. For `positions` and `img` an empty string
/// clears the value.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserOptions {
    pub username: Option<String>,
    pub email: Option<String>,
    pub active: Option<bool>,
    pub skills: Option<Vec<String>>,
    pub show_on_site: Option<bool>,
    pub initials: Option<String>,
    pub positions: Option<String>,
    pub img: Option<String>,
    /// Target roster position, applied after the field patch.
    pub display_order: Option<i64>,
}

impl UpdateUserOptions {
    /// Whether any column other than `display_order` would be written.
    #[must_use]
    pub fn has_field_changes(&self) -> bool {
        self.username.is_some()
            || self.email.is_some()
            || self.active.is_some()
            || self.skills.is_some()
            || self.show_on_site.is_some()
            || self.initials.is_some()
            || self.positions.is_some()
            || self.img.is_some()
    }
}

/// Listing filter
#[derive(Debug, Clone, Copy, Default)]
pub struct ListUsersFilter {
    /// Only active (`Some(true)`) or inactive (`Some(false)`) users.
    pub active: Option<bool>,
}

/// Result of updating a user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserResult {
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moved: Option<MoveOutcome>,
}

/// Result of moving a user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveUserResult {
    pub user: User,
    pub outcome: MoveOutcome,
}

/// User-related errors
#[derive(Error, Debug)]
pub enum UserError {
    #[error("User {0} not found")]
    UserNotFound(i64),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("User {0} is already inactive")]
    AlreadyInactive(i64),
    #[error("User {0} is not inactive")]
    NotInactive(i64),
    #[error("Ordering error: {0}")]
    Order(OrderError),
    #[error("Database error: {0}")]
    Db(#[from] DbError),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<OrderError> for UserError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => UserError::UserNotFound(id),
            OrderError::Sqlite(e) => UserError::Db(DbError::Sqlite(e)),
            other => UserError::Order(other),
        }
    }
}

impl From<rusqlite::Error> for UserError {
    fn from(err: rusqlite::Error) -> Self {
        UserError::Db(DbError::Sqlite(err))
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
