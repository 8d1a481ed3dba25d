use std::sync::Arc;

use drafter::core::action::Action;
use drafter::core::draft::DRAFT_KEY;
use drafter::core::session::DraftSession;
use drafter::core::settings::DARK_MODE_KEY;
use drafter::core::storage::{FileStore, KeyValueStore, STORAGE_FILE};

// ============================================================================
// Helper Functions
// ============================================================================

/// Opens an initialized session over `storage.json` in `dir`.
fn open(dir: &std::path::Path) -> DraftSession {
    let store = FileStore::open(dir).expect("open file store");
    let mut session = DraftSession::new(Arc::new(store), false);
    session.initialize().expect("initialize session");
    session
}

fn read_storage(dir: &std::path::Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(dir.join(STORAGE_FILE)).expect("read storage file");
    serde_json::from_str(&raw).expect("storage file is JSON")
}

// ============================================================================
// Draft persistence
// ============================================================================

#[test]
fn test_write_append_save_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let mut session = open(dir.path());
    assert_eq!(session.app.paragraphs(), &[String::new()]);
    session.edit_paragraph(0, "Hello".to_string()).unwrap();
    let index = session.append_paragraph();
    session.edit_paragraph(index, "World".to_string()).unwrap();
    session.save().unwrap();
    let saved_id = session.app.draft_id.clone();
    drop(session);

    let reopened = open(dir.path());
    assert_eq!(
        reopened.app.paragraphs(),
        &["Hello".to_string(), "World".to_string()]
    );
    assert_eq!(reopened.app.draft_id, saved_id);
    assert!(!reopened.app.dirty);
}

#[test]
fn test_unsaved_edits_are_lost_on_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let mut session = open(dir.path());
    session.edit_paragraph(0, "first".to_string()).unwrap();
    session.save().unwrap();
    session.edit_paragraph(0, "second".to_string()).unwrap();
    drop(session);

    let reopened = open(dir.path());
    assert_eq!(reopened.app.paragraphs(), &["first".to_string()]);
}

#[test]
fn test_on_disk_layout() {
    let dir = tempfile::tempdir().unwrap();

    let mut session = open(dir.path());
    session.edit_paragraph(0, "Line one\nLine two".to_string()).unwrap();
    session.save().unwrap();
    session.toggle_theme().unwrap();

    let storage = read_storage(dir.path());
    let draft_raw = storage[DRAFT_KEY].as_str().expect("draft stored as a string");
    let draft: serde_json::Value = serde_json::from_str(draft_raw).unwrap();

    assert_eq!(draft["id"], serde_json::json!(session.app.draft_id));
    assert_eq!(draft["paragraphs"], serde_json::json!(["Line one\nLine two"]));
    assert!(draft["lastModified"].as_i64().unwrap() > 0);
    assert_eq!(storage[DARK_MODE_KEY], serde_json::json!("true"));
}

#[test]
fn test_corrupt_draft_starts_fresh_and_is_replaced_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    store.set_item(DRAFT_KEY, "{not json").unwrap();

    let mut session = open(dir.path());
    assert_eq!(session.app.paragraphs(), &[String::new()]);
    assert!(session.app.status_message.contains("unreadable"));

    session.edit_paragraph(0, "recovered".to_string()).unwrap();
    session.save().unwrap();

    let reopened = open(dir.path());
    assert_eq!(reopened.app.paragraphs(), &["recovered".to_string()]);
}

#[test]
fn test_externally_written_draft_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    store
        .set_item(
            DRAFT_KEY,
            r#"{"id":"42","paragraphs":["a","","c"],"lastModified":1700000000000}"#,
        )
        .unwrap();

    let session = open(dir.path());
    assert_eq!(session.app.draft_id, "42");
    assert_eq!(
        session.app.paragraphs(),
        &["a".to_string(), String::new(), "c".to_string()]
    );
}

// ============================================================================
// Theme persistence
// ============================================================================

#[test]
fn test_theme_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let mut session = open(dir.path());
    assert!(session.toggle_theme().unwrap());
    drop(session);

    let mut reopened = open(dir.path());
    assert!(reopened.theme().dark);

    reopened.dispatch(Action::ToggleTheme).unwrap();
    drop(reopened);
    assert!(!open(dir.path()).theme().dark);
}

#[test]
fn test_theme_and_draft_are_independent() {
    let dir = tempfile::tempdir().unwrap();

    let mut session = open(dir.path());
    session.toggle_theme().unwrap();
    drop(session);

    let storage = read_storage(dir.path());
    assert!(storage.get(DRAFT_KEY).is_none());

    let reopened = open(dir.path());
    assert!(reopened.theme().dark);
    assert_eq!(reopened.app.paragraphs(), &[String::new()]);
}
