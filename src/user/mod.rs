//! Roster management.
//!
//! Users live in the `users` table of the [`Database`](crate::db::Database);
//! their `display_order` is managed by [`crate::ordering`]:
//! - creation claims the earliest free position (retrying on conflict)
//! - updates may carry a target position, applied in the same transaction
//! - deactivation may release the position, reactivation reclaims one

mod crud;
mod row;
mod types;
mod validation;

pub use crud::{
    compact_orders, create_user, deactivate_user, get_user, list_users, move_user,
    reactivate_user, update_user,
};
pub use types::{
    CreateUserOptions, ListUsersFilter, MoveUserResult, UpdateUserOptions, UpdateUserResult, User,
    UserError,
};
pub use validation::{validate_email, validate_username};
