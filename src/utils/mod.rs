use std::path::PathBuf;

/// The name of the per-user aja folder (under the home directory)
pub const AJA_FOLDER: &str = ".aja";

/// Default database file name inside the aja folder
pub const DATABASE_FILE: &str = "aja.db";

/// `~/.aja`, or `./.aja` when no home directory is known.
#[must_use]
pub fn get_aja_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(AJA_FOLDER)
}

/// Default database location: `~/.aja/aja.db`
#[must_use]
pub fn default_database_path() -> PathBuf {
    get_aja_path().join(DATABASE_FILE)
}

/// Get current timestamp in ISO 8601 format
#[must_use]
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Format a path for display, replacing home directory with ~/
#[must_use]
pub fn format_display_path(path: &str) -> String {
    replace_homedir::replace_homedir(path, "~")
}

#[cfg(test)]
#[path = "../utils_tests.rs"]
mod utils_tests;
