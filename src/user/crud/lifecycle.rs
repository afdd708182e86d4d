//! User deactivate and reactivate operations.
use super::super::row::fetch_user;
use super::super::types::{User, UserError};
use crate::db::{Database, USERS_ORDER};
use crate::ordering::{create_with_order, OrderingPolicy};
use crate::utils::now_iso;
use rusqlite::{params, Connection};
use tracing::info;

/// Explain why a conditional status update touched no row.
fn unchanged_reason(conn: &Connection, id: i64, wanted_active: bool) -> UserError {
    match fetch_user(conn, id) {
        Ok(Some(_)) if wanted_active => UserError::NotInactive(id),
        Ok(Some(_)) => UserError::AlreadyInactive(id),
        Ok(None) => UserError::UserNotFound(id),
        Err(e) => e.into(),
    }
}

/// Mark a user inactive.
///
/// With `policy.clear_on_deactivate` the user's roster position is released
/// too, leaving a gap the next created user will fill.
pub async fn deactivate_user(
    db: &Database,
    policy: OrderingPolicy,
    id: i64,
) -> Result<User, UserError> {
    let user = db
        .run(move |conn| {
            let updated = conn.execute(
                "UPDATE users SET active = 0, updated_at = ?1, \
                 display_order = CASE WHEN ?2 THEN NULL ELSE display_order END \
                 WHERE id = ?3 AND active = 1",
                params![now_iso(), policy.clear_on_deactivate, id],
            )?;
            if updated == 0 {
                return Err(unchanged_reason(conn, id, false));
            }
            fetch_user(conn, id)?.ok_or(UserError::UserNotFound(id))
        })
        .await?;
    info!(id, released = policy.clear_on_deactivate, "Deactivated user");
    Ok(user)
}

/// Mark an inactive user active again.
///
/// A user whose position was released gets the earliest free one back, with
/// the same conflict retry as creation.
pub async fn reactivate_user(
    db: &Database,
    policy: OrderingPolicy,
    id: i64,
) -> Result<User, UserError> {
    let user = db
        .run(move |conn| {
            let now = now_iso();
            let updated = create_with_order(conn, USERS_ORDER, policy.max_attempts, |tx, slot| {
                tx.execute(
                    "UPDATE users SET active = 1, updated_at = ?1, \
                     display_order = COALESCE(display_order, ?2) \
                     WHERE id = ?3 AND active = 0",
                    params![now, slot, id],
                )
            })?;
            if updated == 0 {
                return Err(unchanged_reason(conn, id, true));
            }
            fetch_user(conn, id)?.ok_or(UserError::UserNotFound(id))
        })
        .await?;
    info!(id, display_order = ?user.display_order, "Reactivated user");
    Ok(user)
}
