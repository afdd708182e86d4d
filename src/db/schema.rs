use crate::ordering::OrderedTable;
use rusqlite::Connection;

/// The roster's ordered set: `users.display_order`.
pub const USERS_ORDER: OrderedTable = OrderedTable::new("users", "id", "display_order");

/// Create tables if missing. Safe to call on every start.
pub fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;

        CREATE TABLE IF NOT EXISTS users (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          username TEXT NOT NULL,
          email TEXT NOT NULL,
          active INTEGER NOT NULL DEFAULT 1,
          skills TEXT NOT NULL DEFAULT '[]',
          show_on_site INTEGER NOT NULL DEFAULT 0,
          initials TEXT NOT NULL DEFAULT 'X',
          positions TEXT,
          img TEXT,
          display_order INTEGER UNIQUE,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_users_active ON users(active);
        ",
    )
}
