//! Mapping between `users` rows and [`User`].
use super::types::User;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(super) const USER_COLUMNS: &str = "id, username, email, active, skills, show_on_site, \
     initials, positions, img, display_order, created_at, updated_at";

pub(super) fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let skills: String = row.get(4)?;
    let skills = serde_json::from_str(&skills)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        active: row.get(3)?,
        skills,
        show_on_site: row.get(5)?,
        initials: row.get(6)?,
        positions: row.get(7)?,
        img: row.get(8)?,
        display_order: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

/// Works on a plain connection or, through deref, a transaction.
pub(super) fn fetch_user(conn: &Connection, id: i64) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        params![id],
        user_from_row,
    )
    .optional()
}

/// Write every patchable column of `user` back (not `display_order`).
pub(super) fn write_fields(conn: &Connection, user: &User) -> Result<(), super::UserError> {
    let skills = serde_json::to_string(&user.skills)?;
    conn.execute(
        "UPDATE users SET username = ?1, email = ?2, active = ?3, skills = ?4, \
         show_on_site = ?5, initials = ?6, positions = ?7, img = ?8, updated_at = ?9 \
         WHERE id = ?10",
        params![
            user.username,
            user.email,
            user.active,
            skills,
            user.show_on_site,
            user.initials,
            user.positions,
            user.img,
            user.updated_at,
            user.id,
        ],
    )?;
    Ok(())
}
