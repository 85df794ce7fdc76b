//! Client-side persistence
//!
//! A tiny string key/value store, used for exactly one value: the portfolio
//! identifier under the `portfolioId` key.

use crate::error::{ChatError, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, warn};
use trade_chat_utils::paths;

/// Key the portfolio identifier is stored under
pub const PORTFOLIO_KEY: &str = "portfolioId";

/// Validated portfolio (account) identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortfolioId(String);

impl PortfolioId {
    /// Trim and validate raw user input
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ChatError::InvalidPortfolioId(
                "portfolio ID must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortfolioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// String key/value storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Returns whether the key existed
    fn remove(&self, key: &str) -> Result<bool>;
}

/// Store kept in memory only
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|e| ChatError::Other(format!("Lock error: {e}")))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .map_err(|e| ChatError::Other(format!("Lock error: {e}")))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        Ok(self
            .values
            .write()
            .map_err(|e| ChatError::Other(format!("Lock error: {e}")))?
            .remove(key)
            .is_some())
    }
}

/// Store backed by a JSON object on disk.
///
/// The file is created on first write; a missing file reads as empty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        let value: Value = serde_json::from_str(&raw).map_err(|e| {
            ChatError::Decode(format!("{} is not valid JSON: {e}", self.path.display()))
        })?;
        match value {
            Value::Object(map) => Ok(map),
            other => Err(ChatError::Decode(format!(
                "{} does not hold a JSON object (found {other})",
                self.path.display()
            ))),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        paths::ensure_parent(&self.path)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(map)?)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "Storage written");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self
            .lock
            .read()
            .map_err(|e| ChatError::Other(format!("Lock error: {e}")))?;
        Ok(self.read_map()?.get(key).and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self
            .lock
            .write()
            .map_err(|e| ChatError::Other(format!("Lock error: {e}")))?;
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(ChatError::Decode(reason)) => {
                warn!(path = %self.path.display(), %reason, "Storage unreadable, overwriting");
                Map::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let _guard = self
            .lock
            .write()
            .map_err(|e| ChatError::Other(format!("Lock error: {e}")))?;
        let mut map = self.read_map()?;
        if map.remove(key).is_none() {
            return Ok(false);
        }
        self.write_map(&map)?;
        Ok(true)
    }
}

/// Reads and writes the portfolio identifier
pub struct PortfolioStore {
    store: Box<dyn KeyValueStore>,
}

impl PortfolioStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// In-memory store, nothing survives the process
    pub fn ephemeral() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// File-backed store
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(FileStore::new(path)))
    }

    /// Stored identifier; blank stored values count as absent
    pub fn load(&self) -> Result<Option<PortfolioId>> {
        Ok(self
            .store
            .get(PORTFOLIO_KEY)?
            .and_then(|raw| PortfolioId::parse(&raw).ok()))
    }

    pub fn save(&self, id: &PortfolioId) -> Result<()> {
        self.store.set(PORTFOLIO_KEY, id.as_str())?;
        debug!(portfolio_id = %id, "Portfolio ID saved");
        Ok(())
    }

    /// Remove the stored identifier
    pub fn forget(&self) -> Result<bool> {
        self.store.remove(PORTFOLIO_KEY)
    }
}
