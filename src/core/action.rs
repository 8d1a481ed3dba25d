//! # Actions
//!
//! Everything that can happen to a draft becomes an `Action`.
//! User types in a paragraph? That's `Action::EditParagraph { index, text }`.
//! User presses Ctrl+S? That's `Action::SaveDraft`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing any I/O the caller must perform.
//! No storage access here. The session controller runs the effects.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, warn};

use crate::core::draft::{Draft, now_millis};
use crate::core::state::{App, Notification};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    EditParagraph { index: usize, text: String },
    AppendParagraph,
    SaveDraft,
    ToggleTheme,
    /// Replace in-memory content with a draft read from storage.
    LoadDraft(Draft),
    DismissNotification,
    Quit,
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Write this payload to the draft slot.
    PersistDraft(Draft),
    /// Write the (already toggled) theme flag.
    PersistTheme(bool),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::EditParagraph { index, text } => {
            if let Err(e) = app.edit_paragraph(index, text) {
                warn!("Ignoring edit: {}", e);
                app.status_message = e.to_string();
            }
            Effect::None
        }
        Action::AppendParagraph => {
            let index = app.append_paragraph();
            app.status_message = format!("Paragraph {} added", index + 1);
            Effect::None
        }
        Action::SaveDraft => Effect::PersistDraft(app.to_draft(now_millis())),
        Action::ToggleTheme => {
            app.theme = app.theme.toggled();
            app.status_message = format!("Theme: {}", app.theme.label());
            Effect::PersistTheme(app.theme.dark)
        }
        Action::LoadDraft(draft) => {
            app.status_message = format!("Loaded draft ({} paragraphs)", draft.paragraphs.len());
            app.replace_with(draft);
            Effect::None
        }
        Action::DismissNotification => {
            app.notification = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Record a successful save: clear the dirty flag and raise the toast.
pub fn mark_saved(app: &mut App) {
    app.dirty = false;
    app.status_message = String::from("Saved");
    app.notification = Some(Notification::saved());
}
