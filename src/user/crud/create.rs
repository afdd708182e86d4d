use super::super::row::fetch_user;
use super::super::types::{CreateUserOptions, User, UserError};
use super::super::validation::validate_create;
use crate::db::{Database, USERS_ORDER};
use crate::ordering::{create_with_order, OrderingPolicy};
use crate::utils::now_iso;
use rusqlite::params;
use tracing::info;

/// Create a new user at the earliest free roster position.
pub async fn create_user(
    db: &Database,
    policy: OrderingPolicy,
    options: CreateUserOptions,
) -> Result<User, UserError> {
    validate_create(&options)?;
    let skills = serde_json::to_string(&options.skills)?;
    let initials = options.initials.unwrap_or_else(|| "X".to_string());

    let user = db
        .run(move |conn| {
            let now = now_iso();
            let id = create_with_order(conn, USERS_ORDER, policy.max_attempts, |tx, slot| {
                tx.execute(
                    "INSERT INTO users (username, email, active, skills, show_on_site, initials, \
                     positions, img, display_order, created_at, updated_at) \
                     VALUES (?1, ?2, 1, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
                    params![
                        options.username.trim(),
                        options.email.trim(),
                        skills,
                        options.show_on_site,
                        initials,
                        options.positions,
                        options.img,
                        slot,
                        now,
                    ],
                )?;
                Ok(tx.last_insert_rowid())
            })?;
            fetch_user(conn, id)?.ok_or(UserError::UserNotFound(id))
        })
        .await?;

    info!(
        id = user.id,
        display_order = ?user.display_order,
        "Created user: {}",
        user.username
    );
    Ok(user)
}
