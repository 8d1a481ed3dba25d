//! # Draft Persistence
//!
//! The draft payload and the store that reads/writes it under the
//! `currentDraft` key.
//!
//! ```json
//! { "id": "1718000000000", "paragraphs": ["Hello", ""], "lastModified": 1718000123456 }
//! ```
//!
//! Field order is fixed by the struct, so two saves of unchanged content
//! differ only in `lastModified`.

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::storage::{KeyValueStore, StorageError};

/// Storage key for the single persisted draft slot.
pub const DRAFT_KEY: &str = "currentDraft";

/// A saved draft: identifier, ordered paragraphs, and save time (Unix ms).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: String,
    pub paragraphs: Vec<String>,
    pub last_modified: i64,
}

/// Result of reading the draft slot.
#[derive(Debug, PartialEq)]
pub enum DraftLoad {
    /// Nothing stored yet (first run).
    Missing,
    Loaded(Draft),
    /// Something is stored but it isn't a draft. Carries the parse error text.
    Corrupt(String),
}

/// Generate a time-based draft ID (current Unix time in milliseconds).
pub fn new_draft_id() -> String {
    now_millis().to_string()
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parse a stored payload, validating its shape.
///
/// An empty `paragraphs` array is accepted and normalized to a single empty
/// paragraph so the at-least-one invariant holds after load.
pub fn parse_draft(raw: &str) -> DraftLoad {
    match serde_json::from_str::<Draft>(raw) {
        Ok(mut draft) => {
            if draft.paragraphs.is_empty() {
                warn!("Stored draft {} has no paragraphs, normalizing", draft.id);
                draft.paragraphs.push(String::new());
            }
            DraftLoad::Loaded(draft)
        }
        Err(e) => DraftLoad::Corrupt(e.to_string()),
    }
}

/// Reads and writes the `currentDraft` slot of a [`KeyValueStore`].
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
}

impl DraftStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<DraftLoad, StorageError> {
        let Some(raw) = self.store.get_item(DRAFT_KEY)? else {
            debug!("No stored draft");
            return Ok(DraftLoad::Missing);
        };
        let outcome = parse_draft(&raw);
        match &outcome {
            DraftLoad::Loaded(draft) => info!(
                "Loaded draft {} ({} paragraphs)",
                draft.id,
                draft.paragraphs.len()
            ),
            DraftLoad::Corrupt(reason) => warn!("Stored draft is unreadable: {}", reason),
            DraftLoad::Missing => {}
        }
        Ok(outcome)
    }

    /// Overwrite the draft slot unconditionally.
    pub fn save(&self, draft: &Draft) -> Result<(), StorageError> {
        let json = serde_json::to_string(draft).map_err(StorageError::Serialize)?;
        self.store.set_item(DRAFT_KEY, &json)?;
        debug!("Draft saved: {} ({} bytes)", draft.id, json.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;

    fn store() -> (Arc<MemoryStore>, DraftStore) {
        let kv = Arc::new(MemoryStore::new());
        let drafts = DraftStore::new(kv.clone());
        (kv, drafts)
    }

    #[test]
    fn test_serializes_with_camel_case_keys_in_order() {
        let draft = Draft {
            id: "42".to_string(),
            paragraphs: vec!["Hello".to_string(), String::new()],
            last_modified: 7,
        };
        let json = serde_json::to_string(&draft).unwrap();
        assert_eq!(json, r#"{"id":"42","paragraphs":["Hello",""],"lastModified":7}"#);
    }

    #[test]
    fn test_load_missing() {
        let (_, drafts) = store();
        assert_eq!(drafts.load().unwrap(), DraftLoad::Missing);
    }

    #[test]
    fn test_save_overwrites_single_slot() {
        let (kv, drafts) = store();
        let mut draft = Draft {
            id: "1".to_string(),
            paragraphs: vec!["a".to_string()],
            last_modified: 1,
        };
        drafts.save(&draft).unwrap();
        draft.paragraphs = vec!["b".to_string(), "c".to_string()];
        drafts.save(&draft).unwrap();

        assert_eq!(drafts.load().unwrap(), DraftLoad::Loaded(draft));
        let raw = kv.get_item(DRAFT_KEY).unwrap().unwrap();
        assert!(raw.contains(r#""paragraphs":["b","c"]"#));
    }

    #[test]
    fn test_parse_invalid_json_is_corrupt() {
        assert!(matches!(parse_draft("{oops"), DraftLoad::Corrupt(_)));
    }

    #[test]
    fn test_parse_wrong_shape_is_corrupt() {
        assert!(matches!(
            parse_draft(r#"{"id":"1","paragraphs":"not a list","lastModified":1}"#),
            DraftLoad::Corrupt(_)
        ));
        assert!(matches!(
            parse_draft(r#"{"paragraphs":["x"],"lastModified":1}"#),
            DraftLoad::Corrupt(_)
        ));
        assert!(matches!(parse_draft("[1,2,3]"), DraftLoad::Corrupt(_)));
    }

    #[test]
    fn test_parse_empty_paragraphs_normalizes() {
        let outcome = parse_draft(r#"{"id":"9","paragraphs":[],"lastModified":3}"#);
        match outcome {
            DraftLoad::Loaded(draft) => {
                assert_eq!(draft.id, "9");
                assert_eq!(draft.paragraphs, vec![String::new()]);
            }
            other => panic!("Expected Loaded, got {:?}", other),
        }
    }

    #[test]
    fn test_new_draft_id_is_numeric_millis() {
        let before = now_millis();
        let id = new_draft_id();
        let parsed: i64 = id.parse().unwrap();
        assert!(parsed >= before);
    }
}
