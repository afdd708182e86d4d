//! User update operation.
use super::super::row::{fetch_user, write_fields};
use super::super::types::{UpdateUserOptions, UpdateUserResult, User, UserError};
use super::super::validation::validate_update;
use crate::db::{Database, USERS_ORDER};
use crate::ordering::{move_to, OrderedStore, OrderingPolicy};
use crate::utils::now_iso;
use rusqlite::TransactionBehavior;
use tracing::info;

/// Apply `options` to `user`. Returns whether anything changed.
fn apply_patch(user: &mut User, options: UpdateUserOptions) -> bool {
    let before = user.clone();
    if let Some(username) = options.username {
        user.username = username.trim().to_string();
    }
    if let Some(email) = options.email {
        user.email = email.trim().to_string();
    }
    if let Some(active) = options.active {
        user.active = active;
    }
    if let Some(skills) = options.skills {
        user.skills = skills;
    }
    if let Some(show_on_site) = options.show_on_site {
        user.show_on_site = show_on_site;
    }
    if let Some(initials) = options.initials {
        user.initials = initials;
    }
    if let Some(positions) = options.positions {
        user.positions = (!positions.is_empty()).then_some(positions);
    }
    if let Some(img) = options.img {
        user.img = (!img.is_empty()).then_some(img);
    }
    *user != before
}

/// Update an existing user.
///
/// The field patch and the optional move to `options.display_order` share a
/// single transaction: either both land or neither does.
pub async fn update_user(
    db: &Database,
    policy: OrderingPolicy,
    id: i64,
    options: UpdateUserOptions,
) -> Result<UpdateUserResult, UserError> {
    validate_update(&options)?;

    let result = db
        .run(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let mut user = fetch_user(&tx, id)?.ok_or(UserError::UserNotFound(id))?;

            let target = options.display_order;
            if options.has_field_changes() && apply_patch(&mut user, options) {
                user.updated_at = now_iso();
                write_fields(&tx, &user)?;
            }

            let moved = match target {
                Some(target) => Some(move_to(
                    &OrderedStore::new(&tx, USERS_ORDER),
                    id,
                    target,
                    policy.park_offset,
                )?),
                None => None,
            };

            tx.commit()?;
            let user = fetch_user(conn, id)?.ok_or(UserError::UserNotFound(id))?;
            Ok::<_, UserError>(UpdateUserResult { user, moved })
        })
        .await?;

    info!(id, moved = ?result.moved.map(|m| m.to), "Updated user");
    Ok(result)
}
