//! Common test utilities
#![allow(dead_code)] // Not every integration test uses every helper

use aja_daemon::db::{Database, DEFAULT_BUSY_TIMEOUT_MS};
use aja_daemon::ordering::OrderingPolicy;
use aja_daemon::user::{create_user, list_users, CreateUserOptions, ListUsersFilter, User};
use std::time::Duration;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Open a fresh database inside `dir`
pub async fn open_test_db(dir: &TempDir) -> Database {
    Database::open(
        dir.path().join("aja.db"),
        Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
    )
    .await
    .expect("Failed to open test database")
}

/// Minimal valid create options for `name`
pub fn user_options(name: &str) -> CreateUserOptions {
    CreateUserOptions {
        username: name.to_string(),
        email: format!("{name}@example.com"),
        ..Default::default()
    }
}

/// Create users named `names` in sequence
pub async fn seed_users(db: &Database, names: &[&str]) -> Vec<User> {
    let mut users = Vec::with_capacity(names.len());
    for name in names {
        let user = create_user(db, OrderingPolicy::default(), user_options(name))
            .await
            .expect("Failed to seed user");
        users.push(user);
    }
    users
}

/// Usernames in display order (placed users only)
pub async fn roster(db: &Database) -> Vec<String> {
    list_users(db, ListUsersFilter::default())
        .await
        .expect("Failed to list users")
        .into_iter()
        .filter(|u| u.display_order.is_some())
        .map(|u| u.username)
        .collect()
}

/// All non-null display orders, sorted
pub async fn occupied_orders(db: &Database) -> Vec<i64> {
    let mut orders: Vec<i64> = list_users(db, ListUsersFilter::default())
        .await
        .expect("Failed to list users")
        .into_iter()
        .filter_map(|u| u.display_order)
        .collect();
    orders.sort_unstable();
    orders
}
