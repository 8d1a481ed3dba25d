//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::io;
use std::sync::Arc;

use crate::core::session::DraftSession;
use crate::core::storage::{KeyValueStore, MemoryStore, StorageError};

/// A store whose every call fails, for exercising error paths.
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Io(io::Error::other("storage unavailable")))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(io::Error::other("quota exceeded")))
    }
}

/// Creates an uninitialized session over a fresh in-memory store.
/// The store handle is returned so tests can inspect what was persisted.
pub fn test_session() -> (Arc<MemoryStore>, DraftSession) {
    let kv = Arc::new(MemoryStore::new());
    let session = DraftSession::new(kv.clone(), false);
    (kv, session)
}
