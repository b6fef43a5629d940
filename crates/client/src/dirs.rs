//! Platform-specific directory utilities

use std::path::PathBuf;

/// Get the platform-specific log directory for Meal Max
///
/// - macOS: `~/Library/Caches/meal-max/logs`
/// - Linux: `~/.cache/meal-max/logs` (or `$XDG_CACHE_HOME/meal-max/logs`)
/// - Windows: `%LOCALAPPDATA%\meal-max\cache\logs`
/// - Fallback: `/tmp/meal-max/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "meal-max")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/meal-max"))
        .join("logs")
}
