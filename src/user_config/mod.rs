//! User-level configuration loaded from `~/.aja/config.toml`.
//!
//! The file is optional; missing sections and fields fall back to their
//! `Default` values.
mod loader;
pub use loader::{load_user_config, load_user_config_from};
use crate::db::DEFAULT_BUSY_TIMEOUT_MS;
use crate::ordering::OrderingPolicy;
use crate::utils::get_aja_path;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum UserConfigError {
    #[error("Failed to read user config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse user config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}
/// Database settings (`[database]` table in the TOML file).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database file; `~/.aja/aja.db` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// How long a connection waits on a locked database.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}
impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}
impl DatabaseConfig {
    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}
/// Top-level user configuration, deserialized from `~/.aja/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub ordering: OrderingPolicy,
}
/// Resolve the canonical path for the user config file.
#[must_use]
pub fn user_config_path() -> PathBuf {
    get_aja_path().join("config.toml")
}
#[cfg(test)]
#[path = "../user_config_tests.rs"]
mod user_config_tests;
