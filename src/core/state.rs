//! # Application State
//!
//! Core drafting state. Domain logic only, no TUI types. Presentation state
//! (focus, cursors, scroll) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── paragraphs: Vec<String>             // never empty
//! ├── draft_id: String                    // time-based, replaced on reload
//! ├── theme: ThemeContext                 // light/dark flag
//! ├── dirty: bool                         // edited since last save/load
//! ├── status_message: String              // status bar text
//! └── notification: Option<Notification>  // toast after save
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::fmt;
use std::time::Instant;

use crate::core::draft::{Draft, new_draft_id};
use crate::core::settings::ThemeContext;

pub const SAVED_TITLE: &str = "Draft saved successfully";
pub const SAVED_DESCRIPTION: &str = "Your changes have been saved to local storage.";

/// Title/description pair shown by the notification surface.
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            created_at: Instant::now(),
        }
    }

    pub fn saved() -> Self {
        Self::new(SAVED_TITLE, SAVED_DESCRIPTION)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for IndexOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "paragraph index {} out of range (draft has {})",
            self.index, self.len
        )
    }
}

impl std::error::Error for IndexOutOfRange {}

pub struct App {
    paragraphs: Vec<String>,
    pub draft_id: String,
    pub theme: ThemeContext,
    pub dirty: bool,
    pub status_message: String,
    pub notification: Option<Notification>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Fresh session: one empty paragraph and a new time-based id.
    pub fn new() -> Self {
        Self {
            paragraphs: vec![String::new()],
            draft_id: new_draft_id(),
            theme: ThemeContext::default(),
            dirty: false,
            status_message: String::from("New draft"),
            notification: None,
        }
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    pub fn paragraph(&self, index: usize) -> Option<&str> {
        self.paragraphs.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// Replace paragraph `index` with `text`. Other paragraphs are untouched.
    pub fn edit_paragraph(&mut self, index: usize, text: String) -> Result<(), IndexOutOfRange> {
        let len = self.paragraphs.len();
        let slot = self
            .paragraphs
            .get_mut(index)
            .ok_or(IndexOutOfRange { index, len })?;
        if *slot != text {
            *slot = text;
            self.dirty = true;
        }
        Ok(())
    }

    /// Append one empty paragraph and return its index.
    pub fn append_paragraph(&mut self) -> usize {
        self.paragraphs.push(String::new());
        self.dirty = true;
        self.paragraphs.len() - 1
    }

    /// Snapshot the current content as a draft stamped with `last_modified`.
    pub fn to_draft(&self, last_modified: i64) -> Draft {
        Draft {
            id: self.draft_id.clone(),
            paragraphs: self.paragraphs.clone(),
            last_modified,
        }
    }

    /// Replace paragraphs and id wholesale with a loaded draft.
    pub fn replace_with(&mut self, draft: Draft) {
        self.draft_id = draft.id;
        self.paragraphs = draft.paragraphs;
        if self.paragraphs.is_empty() {
            self.paragraphs.push(String::new());
        }
        self.dirty = false;
    }
}

/// Display identity for a paragraph: `"{draft_id}-{index}"`.
pub fn paragraph_key(draft_id: &str, index: usize) -> String {
    format!("{}-{}", draft_id, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_new_defaults() {
        let app = App::new();
        assert_eq!(app.paragraphs(), &[String::new()]);
        assert!(!app.draft_id.is_empty());
        assert!(!app.theme.dark);
        assert!(!app.dirty);
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_edit_paragraph_replaces_only_target() {
        let mut app = App::new();
        app.append_paragraph();
        app.append_paragraph();
        app.edit_paragraph(0, "a".to_string()).unwrap();
        app.edit_paragraph(2, "c".to_string()).unwrap();

        app.edit_paragraph(1, "b".to_string()).unwrap();
        assert_eq!(app.paragraphs(), &["a", "b", "c"]);
        assert!(app.dirty);
    }

    #[test]
    fn test_edit_paragraph_out_of_range() {
        let mut app = App::new();
        let err = app.edit_paragraph(1, "x".to_string()).unwrap_err();
        assert_eq!(err, IndexOutOfRange { index: 1, len: 1 });
        assert_eq!(app.paragraphs(), &[""]);
        assert!(!app.dirty);
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_edit_with_same_text_stays_clean() {
        let mut app = App::new();
        app.edit_paragraph(0, String::new()).unwrap();
        assert!(!app.dirty);
    }

    #[test]
    fn test_append_paragraph() {
        let mut app = App::new();
        app.edit_paragraph(0, "Hello".to_string()).unwrap();
        let idx = app.append_paragraph();
        assert_eq!(idx, 1);
        assert_eq!(app.len(), 2);
        assert_eq!(app.paragraph(1), Some(""));
    }

    #[test]
    fn test_replace_with_loaded_draft() {
        let mut app = App::new();
        app.edit_paragraph(0, "scratch".to_string()).unwrap();
        app.replace_with(Draft {
            id: "123".to_string(),
            paragraphs: vec!["x".to_string(), "y".to_string()],
            last_modified: 5,
        });
        assert_eq!(app.draft_id, "123");
        assert_eq!(app.paragraphs(), &["x", "y"]);
        assert!(!app.dirty);
    }

    #[test]
    fn test_to_draft_snapshot() {
        let mut app = App::new();
        app.edit_paragraph(0, "Hi".to_string()).unwrap();
        let draft = app.to_draft(99);
        assert_eq!(draft.id, app.draft_id);
        assert_eq!(draft.paragraphs, vec!["Hi".to_string()]);
        assert_eq!(draft.last_modified, 99);
    }

    #[test]
    fn test_paragraph_key() {
        assert_eq!(paragraph_key("171", 0), "171-0");
        assert_eq!(paragraph_key("171", 12), "171-12");
    }
}
