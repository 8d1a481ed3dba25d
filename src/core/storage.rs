//! # Key-Value Storage
//!
//! A small `localStorage`-style store: string keys mapping to string values.
//!
//! ```text
//! KeyValueStore (trait)
//! ├── FileStore    // <data_dir>/storage.json, atomic rename on write
//! └── MemoryStore  // HashMap behind a Mutex (tests, --ephemeral)
//! ```
//!
//! The whole map lives in a single JSON object on disk. Every write rewrites
//! the file via `.tmp` + `rename()` so a crash never leaves a half-written map.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};

/// Name of the storage file inside the data directory.
pub const STORAGE_FILE: &str = "storage.json";

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Serialize(serde_json::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage I/O error: {e}"),
            StorageError::Serialize(e) => write!(f, "storage serialize error: {e}"),
            StorageError::Parse(e) => write!(f, "storage parse error: {e}"),
        }
    }
}

impl std::error::Error for StorageError {}

// ============================================================================
// Trait
// ============================================================================

/// String-keyed, string-valued storage with synchronous reads and writes.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` when absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// ============================================================================
// File-backed store
// ============================================================================

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Opens (or prepares) the store at `<dir>/storage.json`, creating `dir` if needed.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir).map_err(StorageError::Io)?;
        let path = dir.join(STORAGE_FILE);
        debug!("File store at {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let json = fs::read_to_string(&self.path).map_err(StorageError::Io)?;
        if json.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&json).map_err(StorageError::Parse)
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        atomic_write_json(&self.path, map)
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StorageError::Parse(e)) => {
                // An unreadable map would otherwise block every write forever.
                warn!("Replacing unreadable storage file {}: {}", self.path.display(), e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), StorageError> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data).map_err(StorageError::Serialize)?;
    fs::write(&tmp_path, json).map_err(StorageError::Io)?;
    fs::rename(&tmp_path, path).map_err(StorageError::Io)?;
    Ok(())
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A single insert cannot leave the map half-updated.
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("k").unwrap(), None);

        store.set_item("k", "v1").unwrap();
        store.set_item("k", "v2").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.get_item("other").unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get_item("currentDraft").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            store.set_item("darkMode", "true").unwrap();
            store.set_item("other", "x").unwrap();
        }
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get_item("darkMode").unwrap().as_deref(), Some("true"));
        assert_eq!(store.get_item("other").unwrap().as_deref(), Some("x"));
        // No leftover temp file after the rename
        assert!(!dir.path().join("storage.tmp").exists());
    }

    #[test]
    fn test_file_store_creates_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        store.set_item("k", "v").unwrap();
        assert!(nested.join(STORAGE_FILE).exists());
    }

    #[test]
    fn test_file_store_set_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();
        store.set_item("a", "3").unwrap();
        assert_eq!(store.get_item("a").unwrap().as_deref(), Some("3"));
        assert_eq!(store.get_item("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_file_store_unreadable_map_errors_on_read_but_write_recovers() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STORAGE_FILE), "{not json").unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(matches!(store.get_item("k"), Err(StorageError::Parse(_))));

        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
