//! # Draft Session
//!
//! The controller that owns the [`App`] state and the two persistence
//! services. All mutations go through [`DraftSession::dispatch`], which runs
//! the pure reducer and then executes the storage effects it asks for.
//!
//! ```text
//!            dispatch(action)
//!                  │
//!                  ▼
//!   App ──► update() ──► Effect ──┬── PersistDraft ──► DraftStore ──┐
//!                                 └── PersistTheme ──► Settings ────┤
//!                                                                   ▼
//!                                                   Arc<dyn KeyValueStore>
//! ```
//!
//! Nothing is persisted implicitly: edits and appends stay in memory until
//! `save()`.

use std::fmt;
use std::sync::Arc;

use log::{info, warn};

use crate::core::action::{Action, Effect, mark_saved, update};
use crate::core::draft::{DraftLoad, DraftStore};
use crate::core::settings::{SettingsService, ThemeContext};
use crate::core::state::{App, IndexOutOfRange};
use crate::core::storage::{KeyValueStore, StorageError};

#[derive(Debug)]
pub enum SessionError {
    IndexOutOfRange(IndexOutOfRange),
    Storage(StorageError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::IndexOutOfRange(e) => write!(f, "{e}"),
            SessionError::Storage(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<StorageError> for SessionError {
    fn from(e: StorageError) -> Self {
        SessionError::Storage(e)
    }
}

impl From<IndexOutOfRange> for SessionError {
    fn from(e: IndexOutOfRange) -> Self {
        SessionError::IndexOutOfRange(e)
    }
}

pub struct DraftSession {
    pub app: App,
    drafts: DraftStore,
    settings: SettingsService,
}

impl DraftSession {
    /// Fresh in-memory session over `store`. Call [`initialize`](Self::initialize)
    /// to pick up persisted state.
    pub fn new(store: Arc<dyn KeyValueStore>, default_dark: bool) -> Self {
        let mut app = App::new();
        app.theme = ThemeContext::new(default_dark);
        Self {
            app,
            drafts: DraftStore::new(store.clone()),
            settings: SettingsService::new(store, default_dark),
        }
    }

    /// Load the stored draft (if any) and the theme flag.
    ///
    /// A corrupt draft leaves the default state in place and reports it in
    /// the status bar. Storage read failures are returned after the theme has
    /// been applied as far as possible.
    pub fn initialize(&mut self) -> Result<(), SessionError> {
        let theme = self.settings.load_theme();
        let draft = self.drafts.load();

        match theme {
            Ok(theme) => self.app.theme = theme,
            Err(e) => warn!("Failed to read theme: {}", e),
        }

        match draft? {
            DraftLoad::Loaded(draft) => {
                self.dispatch(Action::LoadDraft(draft))?;
            }
            DraftLoad::Missing => {
                info!("Starting new draft {}", self.app.draft_id);
            }
            DraftLoad::Corrupt(reason) => {
                warn!("Discarding unreadable stored draft: {}", reason);
                self.app.status_message =
                    String::from("Stored draft was unreadable; started a new one");
            }
        }
        Ok(())
    }

    /// Run an action through the reducer and execute its storage effect.
    ///
    /// Returns `Effect::Quit` when the action asks the session to end;
    /// every other effect is consumed here and reported as `Effect::None`.
    pub fn dispatch(&mut self, action: Action) -> Result<Effect, SessionError> {
        match update(&mut self.app, action) {
            Effect::PersistDraft(draft) => {
                if let Err(e) = self.drafts.save(&draft) {
                    warn!("Failed to save draft: {}", e);
                    self.app.status_message = format!("Save failed: {}", e);
                    return Err(e.into());
                }
                info!("Draft {} saved ({} paragraphs)", draft.id, draft.paragraphs.len());
                mark_saved(&mut self.app);
                Ok(Effect::None)
            }
            Effect::PersistTheme(dark) => {
                if let Err(e) = self.settings.save_theme(ThemeContext::new(dark)) {
                    warn!("Failed to save theme: {}", e);
                    self.app.status_message = format!("Theme not saved: {}", e);
                    return Err(e.into());
                }
                Ok(Effect::None)
            }
            effect => Ok(effect),
        }
    }

    pub fn edit_paragraph(&mut self, index: usize, text: String) -> Result<(), SessionError> {
        // Checked here too so callers get the error, not only a status message.
        let len = self.app.len();
        if index >= len {
            return Err(IndexOutOfRange { index, len }.into());
        }
        self.dispatch(Action::EditParagraph { index, text })?;
        Ok(())
    }

    pub fn append_paragraph(&mut self) -> usize {
        update(&mut self.app, Action::AppendParagraph);
        self.app.len() - 1
    }

    pub fn dismiss_notification(&mut self) {
        update(&mut self.app, Action::DismissNotification);
    }

    pub fn save(&mut self) -> Result<(), SessionError> {
        self.dispatch(Action::SaveDraft)?;
        Ok(())
    }

    /// Flip the theme flag and persist it. Returns the new flag.
    pub fn toggle_theme(&mut self) -> Result<bool, SessionError> {
        self.dispatch(Action::ToggleTheme)?;
        Ok(self.app.theme.dark)
    }

    pub fn theme(&self) -> ThemeContext {
        self.app.theme
    }
}
