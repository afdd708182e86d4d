//! User read operations (get, list).
use super::super::row::{fetch_user, user_from_row, USER_COLUMNS};
use super::super::types::{ListUsersFilter, User, UserError};
use crate::db::Database;
use rusqlite::params;

/// Get a user by ID
pub async fn get_user(db: &Database, id: i64) -> Result<User, UserError> {
    db.run(move |conn| fetch_user(conn, id)?.ok_or(UserError::UserNotFound(id)))
        .await
}

/// List users in roster order; users without a position come last.
pub async fn list_users(db: &Database, filter: ListUsersFilter) -> Result<Vec<User>, UserError> {
    db.run(move |conn| {
        let order_by = "ORDER BY display_order IS NULL, display_order ASC, id ASC";
        let users = match filter.active {
            Some(active) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {USER_COLUMNS} FROM users WHERE active = ?1 {order_by}"
                ))?;
                let rows = stmt.query_map(params![active], user_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt =
                    conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users {order_by}"))?;
                let rows = stmt.query_map([], user_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(users)
    })
    .await
}
