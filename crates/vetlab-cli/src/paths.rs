//! VetLab user-directory resolution.
//!
//! When `VETLAB_HOME` is set, it replaces **all** platform-native user
//! directories (config and data).
//!
//! Priority for the history database:
//!   1. `VETLAB_DB_PATH` env var (if set and non-empty)
//!   2. `VETLAB_HOME/vetlab.db`
//!   3. `dirs::data_local_dir()/vetlab/vetlab.db`

use std::path::PathBuf;

const DB_FILE: &str = "vetlab.db";
const CONFIG_FILE: &str = "config.toml";

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Return the `VETLAB_HOME` path when set and non-empty, otherwise the
/// platform-native `dirs_fallback`.
fn resolve_user_path(dirs_fallback: Option<PathBuf>) -> Option<PathBuf> {
    non_empty_env("VETLAB_HOME")
        .map(PathBuf::from)
        .or(dirs_fallback)
}

/// Base directory for user configuration (`config.toml`).
pub fn user_dir() -> Option<PathBuf> {
    resolve_user_path(dirs::config_dir().map(|d| d.join("vetlab")))
}

/// Base directory for data files. Identical to [`user_dir`] when
/// `VETLAB_HOME` is set.
pub fn user_data_dir() -> Option<PathBuf> {
    resolve_user_path(dirs::data_local_dir().map(|d| d.join("vetlab")))
}

pub fn config_path() -> Option<PathBuf> {
    user_dir().map(|d| d.join(CONFIG_FILE))
}

/// Path of the `SQLite` file holding the history blob.
pub fn db_path() -> Option<PathBuf> {
    if let Some(p) = non_empty_env("VETLAB_DB_PATH") {
        return Some(PathBuf::from(p));
    }
    user_data_dir().map(|d| d.join(DB_FILE))
}
