//! Durable key-value storage for the editing workspace.
//!
//! The workspace is four independent JSON entries: the current
//! configuration, the courts list, the events list and the history stack.
//! Each entry is read and written whole.

use crate::constants::{CONFIG_KEY, COURTS_KEY, EVENTS_KEY, HISTORY_KEY};
use crate::error::StorageError;
use crate::models::{default_courts, Court, Event, SiteConfiguration};
use crate::services::history::History;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A blob store addressed by string keys.
pub trait BlobStore {
    /// Reads the blob stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the entry exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replaces the blob stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the write fails or exceeds the quota.
    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Deletes the entry under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if an existing entry cannot be removed.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the entries.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read(&path).map(Some).map_err(|e| io_error(key, e))
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(key, e))?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value).map_err(|e| io_error(key, e))?;
        fs::rename(&temp_path, &path).map_err(|e| io_error(key, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| io_error(key, e))?;
        }
        Ok(())
    }
}

/// In-memory store with an optional total byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Creates an unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes once the stored bytes would exceed `quota`.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Total bytes currently stored.
    #[must_use]
    pub fn used(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let replaced = self.entries.get(key).map_or(0, Vec::len);
            let available = quota.saturating_sub(self.used() - replaced);
            if value.len() > available {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed: value.len(),
                    available,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Everything the editor keeps in durable storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    /// Current configuration
    pub config: SiteConfiguration,
    /// Courts list
    pub courts: Vec<Court>,
    /// Events list
    pub events: Vec<Event>,
    /// Undo stack
    pub history: History,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            config: SiteConfiguration::default(),
            courts: default_courts(),
            events: Vec::new(),
            history: History::new(),
        }
    }
}

/// Reads one entry, falling back to `default` when it is missing or corrupt.
fn load_entry<T: DeserializeOwned>(
    store: &impl BlobStore,
    key: &str,
    default: impl FnOnce() -> T,
) -> Result<T, StorageError> {
    let Some(bytes) = store.get(key)? else {
        return Ok(default());
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(key, error = %e, "discarding unreadable stored entry");
            Ok(default())
        }
    }
}

fn to_json<T: Serialize>(key: &str, value: &T) -> Result<Vec<u8>, StorageError> {
    serde_json::to_vec(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })
}

impl Workspace {
    /// Loads all four entries from `store`.
    ///
    /// Missing entries take their defaults. Entries that fail to parse are
    /// logged and replaced by defaults; they are overwritten on the next save.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] only when the store itself cannot be read.
    pub fn load(store: &impl BlobStore) -> Result<Self, StorageError> {
        let workspace = Self {
            config: load_entry(store, CONFIG_KEY, SiteConfiguration::default)?,
            courts: load_entry(store, COURTS_KEY, default_courts)?,
            events: load_entry(store, EVENTS_KEY, Vec::new)?,
            history: load_entry(store, HISTORY_KEY, History::new)?.bounded(),
        };
        info!(
            sections = workspace.config.sections.len(),
            history = workspace.history.len(),
            "workspace loaded"
        );
        Ok(workspace)
    }

    /// Writes the configuration and history entries.
    ///
    /// These are the two entries every edit touches.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`] hit.
    pub fn save_editing_state(&self, store: &mut impl BlobStore) -> Result<(), StorageError> {
        store.put(CONFIG_KEY, &to_json(CONFIG_KEY, &self.config)?)?;
        store.put(HISTORY_KEY, &to_json(HISTORY_KEY, &self.history)?)
    }

    /// Writes all four entries.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`] hit.
    pub fn save(&self, store: &mut impl BlobStore) -> Result<(), StorageError> {
        self.save_editing_state(store)?;
        store.put(COURTS_KEY, &to_json(COURTS_KEY, &self.courts)?)?;
        store.put(EVENTS_KEY, &to_json(EVENTS_KEY, &self.events)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_roundtrip_and_remove() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("data"));

        assert_eq!(store.get("courts").unwrap(), None);
        store.put("courts", b"[]").unwrap();
        assert_eq!(store.get("courts").unwrap().unwrap(), b"[]");
        assert!(store.dir().join("courts.json").exists());
        assert!(!store.dir().join("courts.json.tmp").exists());

        store.remove("courts").unwrap();
        store.remove("courts").unwrap();
        assert_eq!(store.get("courts").unwrap(), None);
    }

    #[test]
    fn test_memory_store_quota() {
        let mut store = MemoryStore::with_quota(10);
        store.put("a", b"123456").unwrap();
        // Replacing an entry only counts the difference.
        store.put("a", b"12345678").unwrap();

        let err = store.put("b", b"12345").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                needed: 5,
                available: 2,
                ..
            }
        ));
        assert_eq!(store.get("b").unwrap(), None);
        assert_eq!(store.used(), 8);
    }

    #[test]
    fn test_load_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        let workspace = Workspace::load(&store).unwrap();
        assert_eq!(workspace, Workspace::default());
        assert_eq!(workspace.courts.len(), 3);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut workspace = Workspace::default();
        workspace.config.site_name = "Club Norte".to_string();
        workspace.history.push(SiteConfiguration::default());
        workspace.events.push(Event {
            id: "ev-1".to_string(),
            title: "Torneo de verano".to_string(),
            date: "2026-07-01".to_string(),
            description: String::new(),
        });
        workspace.save(&mut store).unwrap();

        assert_eq!(Workspace::load(&store).unwrap(), workspace);
    }

    #[test]
    fn test_corrupt_entry_replaced_by_default() {
        let mut store = MemoryStore::new();
        store.put(CONFIG_KEY, b"{not json").unwrap();
        store.put(EVENTS_KEY, b"42").unwrap();

        let workspace = Workspace::load(&store).unwrap();
        assert_eq!(workspace.config, SiteConfiguration::default());
        assert!(workspace.events.is_empty());
    }
}
