//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into session calls.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The loop redraws only after an event or a toast expiry. While a toast is
//! on screen the poll timeout drops to 100ms so it disappears on time;
//! otherwise the loop sleeps up to 500ms between polls.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

pub mod component;
pub mod components;
pub mod event;
pub mod theme;
pub mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect};
use crate::core::config::ResolvedConfig;
use crate::core::session::DraftSession;
use crate::core::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
use crate::tui::component::EventHandler;
use crate::tui::components::toast::is_expired;
use crate::tui::components::{CellEvent, EditorState, ParagraphCell, PreviewState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::Palette;

const IDLE_POLL: Duration = Duration::from_millis(500);
const TOAST_POLL: Duration = Duration::from_millis(100);

/// TUI-specific presentation state (not part of the draft)
pub struct TuiState {
    // Persistent component states
    pub editor: EditorState,
    pub preview: PreviewState,
    pub show_preview: bool,
    // Props handed to the editor each frame
    pub first_placeholder: String,
    pub placeholder: String,
}

impl TuiState {
    pub fn new(first_placeholder: String, placeholder: String, show_preview: bool) -> Self {
        Self {
            editor: EditorState::new(),
            preview: PreviewState::new(),
            show_preview,
            first_placeholder,
            placeholder,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            config.first_placeholder.clone(),
            config.placeholder.clone(),
            config.show_preview,
        )
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is pushed unconditionally; terminals without it ignore it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the key-value store the config asks for.
pub fn build_store(config: &ResolvedConfig) -> Result<Arc<dyn KeyValueStore>, StorageError> {
    match &config.data_dir {
        Some(dir) => {
            let store = FileStore::open(dir)?;
            info!("Using storage file {}", store.path().display());
            Ok(Arc::new(store))
        }
        None => {
            info!("Using in-memory storage; nothing will be persisted");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Create and initialize the session. Storage problems degrade to an
/// in-memory store or a fresh draft and are reported in the status bar.
pub fn open_session(config: &ResolvedConfig) -> DraftSession {
    let (store, fallback) = match build_store(config) {
        Ok(store) => (store, false),
        Err(e) => {
            warn!("Storage unavailable, falling back to memory: {}", e);
            (Arc::new(MemoryStore::new()) as Arc<dyn KeyValueStore>, true)
        }
    };

    let mut session = DraftSession::new(store, config.default_dark);
    if let Err(e) = session.initialize() {
        warn!("Failed to load stored draft: {}", e);
        session.app.status_message = format!("Could not load draft: {}", e);
    }
    if fallback {
        session.app.status_message = String::from("Storage unavailable; changes will not persist");
    }
    session
}

/// Apply one input event. Returns `true` when the app should quit.
pub fn handle_event(session: &mut DraftSession, tui: &mut TuiState, event: TuiEvent) -> bool {
    tui.editor.sync(&session.app.draft_id, session.app.len());

    match event {
        TuiEvent::Resize => {}
        TuiEvent::ForceQuit => {
            return matches!(session.dispatch(Action::Quit), Ok(Effect::Quit));
        }
        TuiEvent::Save => {
            if let Err(e) = session.save() {
                debug!("Save reported to user: {}", e);
            }
        }
        TuiEvent::AppendParagraph => {
            let index = session.append_paragraph();
            tui.editor.sync(&session.app.draft_id, session.app.len());
            tui.editor.focus_at_start(index);
        }
        TuiEvent::ToggleTheme => {
            if let Err(e) = session.toggle_theme() {
                debug!("Theme toggle kept in memory only: {}", e);
            }
        }
        TuiEvent::TogglePreview => {
            tui.show_preview = !tui.show_preview;
            session.app.status_message = format!(
                "Preview {}",
                if tui.show_preview { "shown" } else { "hidden" }
            );
        }
        TuiEvent::FocusNext => tui.editor.focus_next(),
        TuiEvent::FocusPrev => tui.editor.focus_prev(),
        TuiEvent::Escape => session.dismiss_notification(),
        TuiEvent::MouseClick(col, row) => {
            if let Some(index) = tui.editor.hit_test(col, row) {
                tui.editor.focused = index;
            }
        }
        TuiEvent::PreviewScrollUp | TuiEvent::PreviewScrollDown => {
            tui.preview.handle_event(&event);
        }
        other => route_to_focused_cell(session, tui, &other),
    }
    false
}

fn route_to_focused_cell(session: &mut DraftSession, tui: &mut TuiState, event: &TuiEvent) {
    let index = tui.editor.focused;
    let Some(value) = session.app.paragraph(index).map(str::to_owned) else {
        return;
    };
    let Some(cursor) = tui.editor.focused_cursor() else {
        return;
    };

    // Palette only matters for rendering; event handling ignores it.
    let cell_event = ParagraphCell::new(&value, cursor, Palette::for_theme(session.theme()))
        .handle_event(event);

    match cell_event {
        Some(CellEvent::Changed(text)) => {
            if let Err(e) = session.edit_paragraph(index, text) {
                warn!("Edit rejected: {}", e);
            }
        }
        Some(CellEvent::ExitUp) if index > 0 => {
            let previous = session.app.paragraph(index - 1).unwrap_or_default();
            tui.editor.focus_at_end(index - 1, previous);
        }
        Some(CellEvent::ExitDown) => tui.editor.focus_at_start(index + 1),
        _ => {}
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut session = open_session(&config);
    let mut tui = TuiState::from_config(&config);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true;

    loop {
        if let Some(notification) = &session.app.notification
            && is_expired(notification, Instant::now())
        {
            session.dismiss_notification();
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &session.app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if session.app.notification.is_some() {
            TOAST_POLL
        } else {
            IDLE_POLL
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain everything pending before the next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut session, &mut tui, event) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    if session.app.dirty {
        info!("Quitting with unsaved changes in draft {}", session.app.draft_id);
    }

    ratatui::restore();
    Ok(())
}
