//! Path utilities for trade-chat.
//!
//! All data lives under `~/.trade-chat/`:
//! - `~/.trade-chat/storage.json` - persisted client values (portfolio id)

use std::path::{Path, PathBuf};

/// Returns the trade-chat home directory (`~/.trade-chat/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".trade-chat")
}

/// Returns the default storage file path (`~/.trade-chat/storage.json`).
pub fn default_storage() -> PathBuf {
    home_dir().join("storage.json")
}

/// Ensures the parent directory of `path` exists.
pub fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
