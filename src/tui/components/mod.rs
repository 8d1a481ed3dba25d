//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: app name, theme, unsaved marker, status
//! - `Toast`: save notification
//!
//! ### Stateful Components (persistent state + transient wrapper)
//!
//! - `ParagraphCell` + `CursorState`: one editable paragraph
//! - `EditorPane` + `EditorState`: the stack of cells and focus
//! - `Preview` + `PreviewState`: read-only rendering with scrolling
//!
//! The persistent half lives in `TuiState`; the wrapper is built each frame
//! with borrowed state and props, renders, and is dropped.
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as props, never by reaching into the
//! session. The theme is passed the same way, as a `Palette` built from the
//! session's `ThemeContext`:
//!
//! ```rust,ignore
//! let palette = Palette::for_theme(app.theme);
//! Preview::new(app.paragraphs(), &mut tui.preview, palette).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (top status bar)
//! ├── editor_pane.rs    (stack of paragraph cells)
//! ├── paragraph_cell/   (one editable paragraph: cursor, wrapping)
//! ├── preview.rs        (read-only rendering)
//! └── toast.rs          (notification surface)
//! ```

pub mod editor_pane;
pub mod paragraph_cell;
pub mod preview;
mod title_bar;
pub mod toast;

pub use editor_pane::{EditorPane, EditorState};
pub use paragraph_cell::{CellEvent, ParagraphCell};
pub use preview::{Preview, PreviewState};
pub use title_bar::TitleBar;
pub use toast::Toast;
