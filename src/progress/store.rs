//! Progress persistence.
//!
//! Stores are string key-value maps. Each skill's completed set is saved under
//! `<namespace>_<skill>` as a JSON array of step indices.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default key namespace.
pub const DEFAULT_NAMESPACE: &str = "completedSteps";

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or writing progress.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed store contents.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No platform data directory to put the default store in.
    #[error("Could not determine data directory")]
    NoDataDir,
}

/// Persistence key for a skill.
pub fn progress_key(namespace: &str, skill: &str) -> String {
    format!("{namespace}_{skill}")
}

/// A string key-value store.
pub trait ProgressStore {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// JSON-file store. Every write rewrites the whole file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing or unreadable file is treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::load(&path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "Ignoring unreadable progress file");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    /// Default store path: `<data_dir>/trailmap/progress.json`.
    pub fn default_path() -> StoreResult<PathBuf> {
        let data = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(data.join("trailmap").join("progress.json"))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> StoreResult<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(path)?;
        let entries = serde_json::from_str(&content)?;
        Ok(entries)
    }

    /// Write all entries to disk.
    pub fn flush(&self) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(&self.entries)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl ProgressStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
