//! Roster position operations.
use super::super::row::fetch_user;
use super::super::types::{MoveUserResult, UserError};
use crate::db::{Database, USERS_ORDER};
use crate::ordering::{compact, move_entity, OrderedStore, OrderingPolicy};
use rusqlite::TransactionBehavior;
use tracing::info;

/// Move a user to roster position `target` (clamped to the last position).
pub async fn move_user(
    db: &Database,
    policy: OrderingPolicy,
    id: i64,
    target: i64,
) -> Result<MoveUserResult, UserError> {
    db.run(move |conn| {
        let outcome = move_entity(conn, USERS_ORDER, id, target, policy.park_offset)?;
        let user = fetch_user(conn, id)?.ok_or(UserError::UserNotFound(id))?;
        Ok(MoveUserResult { user, outcome })
    })
    .await
}

/// Renumber roster positions to `1..=k`. Returns how many users moved.
pub async fn compact_orders(db: &Database, policy: OrderingPolicy) -> Result<u32, UserError> {
    let changed = db
        .run(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let changed = compact(&OrderedStore::new(&tx, USERS_ORDER), policy.park_offset)?;
            tx.commit()?;
            Ok::<_, UserError>(changed)
        })
        .await?;
    info!(changed, "Compacted roster positions");
    Ok(changed)
}
