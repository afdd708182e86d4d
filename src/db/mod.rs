//! SQLite database handle.
//!
//! A [`Database`] only remembers where the file lives. Every unit of work
//! opens its own connection on tokio's blocking pool, so requests never share
//! connection or ordering state in memory; all coordination between them goes
//! through SQLite's locking and constraints.
mod schema;

pub use schema::{migrate, USERS_ORDER};

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default time a connection waits on a locked database.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Database task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    busy_timeout: Duration,
}

impl Database {
    /// Open (creating if needed) the database file and apply the schema.
    pub async fn open(path: impl Into<PathBuf>, busy_timeout: Duration) -> Result<Self, DbError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let db = Self { path, busy_timeout };
        db.run(|conn| migrate(conn).map_err(DbError::from)).await?;
        debug!("Opened database at {}", db.path.display());
        Ok(db)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fresh connection with the configured busy timeout.
    pub fn connect(&self) -> Result<Connection, DbError> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }

    /// Run `f` on a fresh connection without blocking the async executor.
    pub async fn run<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Connection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<DbError> + Send + 'static,
    {
        let db = self.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = db.connect()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| E::from(DbError::Join(e)))?
    }
}

#[cfg(test)]
#[path = "../db_tests.rs"]
mod db_tests;
