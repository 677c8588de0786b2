//! Cross-platform path resolution.
//!
//! This module provides functions for finding the directories where
//! Node packages are installed and where configuration lives.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Environment variable listing extra package directories.
pub const NODE_PATH_ENV: &str = "NODE_PATH";

/// Returns the `node_modules` directories searched for packages, nearest first.
///
/// Follows Node's module lookup: `start` and each of its ancestors contribute
/// `<dir>/node_modules`, skipping ancestors that are themselves named
/// `node_modules`. The entries of `NODE_PATH` are appended last.
///
/// A relative `start` is resolved against the current directory first, so
/// `.` walks the same ancestors as the current directory itself.
///
/// Directories are returned whether or not they exist.
pub fn node_modules_dirs(start: &Path) -> Vec<PathBuf> {
    let start = std::path::absolute(start).unwrap_or_else(|_| start.to_path_buf());

    let mut dirs: Vec<PathBuf> = start
        .ancestors()
        .filter(|dir| dir.file_name() != Some(OsStr::new("node_modules")))
        .map(|dir| dir.join("node_modules"))
        .collect();

    dirs.extend(node_path_dirs(env::var_os(NODE_PATH_ENV).as_deref()));
    dirs
}

/// Splits a `NODE_PATH` value using the platform path separator.
///
/// Empty entries are dropped.
pub fn node_path_dirs(value: Option<&OsStr>) -> Vec<PathBuf> {
    match value {
        Some(value) => env::split_paths(value)
            .filter(|p| !p.as_os_str().is_empty())
            .collect(),
        None => Vec::new(),
    }
}

/// Returns the configuration directory for wiki-versions.
///
/// Platform-specific locations:
/// - Linux: `~/.config/wiki-versions/`
/// - macOS: `~/Library/Application Support/wiki-versions/`
/// - Windows: `%APPDATA%\wiki-versions\`
///
/// Falls back to `./wiki-versions/` if no config directory can be determined.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wiki-versions")
}
