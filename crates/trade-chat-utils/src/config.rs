//! Environment-driven configuration helpers
//!
//! Crates build their own typed configs on top of these; this module only
//! knows how to read raw values.

use std::str::FromStr;

/// Load a `.env` file from the current directory or its parents, if any.
///
/// Returns the path that was loaded.
pub fn load_dotenv() -> Option<std::path::PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!("Failed to load .env: {e}");
            None
        }
    }
}

/// Read a non-empty environment variable
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse an environment variable.
///
/// `None` when the variable is unset or empty, `Some(Err(..))` when it is set
/// but does not parse.
pub fn env_parse<T: FromStr>(key: &str) -> Option<Result<T, T::Err>> {
    env_string(key).map(|v| v.parse())
}

/// Read a boolean flag; accepts `1/0`, `true/false`, `yes/no`, `on/off`
pub fn env_flag(key: &str) -> Option<bool> {
    env_string(key).and_then(|v| parse_flag(&v))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
