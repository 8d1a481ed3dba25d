//! # ParagraphCell Component
//!
//! One editable paragraph: a bordered multi-line text area bound to a single
//! string owned by the session.
//!
//! ## Responsibilities
//!
//! - Display the bound value, or the placeholder hint when it is empty
//! - Handle editing (insert, newline, paste, backspace, delete)
//! - Handle cursor movement (arrows, Home/End, word jumps)
//! - Report the full new value on every change, no debouncing
//!
//! ## State Management
//!
//! The cell keeps no content. The value is a prop; an edit produces
//! `CellEvent::Changed(new_value)` and the parent feeds it to the session.
//! The only state is the cursor (`CursorState`), which the parent keeps per
//! paragraph and lends to the transient `ParagraphCell` each frame.

mod cursor;
mod text_wrap;

pub use cursor::CursorState;

use ratatui::Frame;
use ratatui::layout::{Margin, Position, Rect};
use ratatui::text::Line;
use ratatui::widgets::{
    Block, BorderType, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

use text_wrap::{
    MAX_VISIBLE_ROWS, VERTICAL_OVERHEAD, inner_width, layout_rows, next_char_boundary,
    next_word_boundary, prev_char_boundary, prev_word_boundary, row_count,
};

/// High-level events emitted by a ParagraphCell
#[derive(Debug, Clone, PartialEq)]
pub enum CellEvent {
    /// The value changed; carries the complete new text.
    Changed(String),
    /// Cursor moved within the cell.
    CursorMoved,
    /// Up pressed on the first row.
    ExitUp,
    /// Down pressed on the last row.
    ExitDown,
}

/// Height of a cell showing `value` at `width` columns, including borders.
///
/// Grows with the content from `min_rows` up to `MAX_VISIBLE_ROWS`, after
/// which the cell scrolls internally.
pub fn cell_height(value: &str, width: u16, min_rows: u16) -> u16 {
    let rows = row_count(value, inner_width(width));
    rows.clamp(min_rows.min(MAX_VISIBLE_ROWS), MAX_VISIBLE_ROWS) + VERTICAL_OVERHEAD
}

/// Transient render/edit wrapper around one paragraph.
///
/// # Props
///
/// - `value`: the paragraph text (from the session)
/// - `placeholder`: hint shown while `value` is empty
/// - `title`: label on the top border
/// - `focused`: draws the focus border and places the terminal cursor
/// - `palette`: colors derived from the theme context
///
/// # State
///
/// - `cursor`: borrowed per-paragraph cursor state
pub struct ParagraphCell<'a> {
    pub value: &'a str,
    pub placeholder: &'a str,
    pub title: String,
    pub focused: bool,
    pub palette: Palette,
    cursor: &'a mut CursorState,
}

impl<'a> ParagraphCell<'a> {
    pub fn new(value: &'a str, cursor: &'a mut CursorState, palette: Palette) -> Self {
        cursor.clamp(value);
        Self {
            value,
            placeholder: "",
            title: String::new(),
            focused: false,
            palette,
            cursor,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn visible_lines(&self, width: u16) -> Vec<Line<'a>> {
        let value = self.value;
        layout_rows(value, inner_width(width))
            .into_iter()
            .skip(self.cursor.scroll_offset as usize)
            .take(MAX_VISIBLE_ROWS as usize)
            .map(|row| Line::raw(&value[row.start..row.end]))
            .collect()
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        let total_rows = row_count(self.value, inner_width(area.width));
        if total_rows <= MAX_VISIBLE_ROWS {
            return;
        }

        // content_length is the max scroll position, not the row count
        let mut scrollbar_state = ScrollbarState::default()
            .content_length((total_rows - MAX_VISIBLE_ROWS) as usize)
            .position(self.cursor.scroll_offset as usize);

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }

    /// Splice `insert` over `range` and report the new value.
    fn replace(&mut self, range: std::ops::Range<usize>, insert: &str) -> CellEvent {
        let mut next = String::with_capacity(self.value.len() + insert.len());
        next.push_str(&self.value[..range.start]);
        next.push_str(insert);
        next.push_str(&self.value[range.end..]);
        self.cursor.pos = range.start + insert.len();
        CellEvent::Changed(next)
    }

    fn move_to(&mut self, pos: usize) -> Option<CellEvent> {
        (self.cursor.pos != pos).then(|| {
            self.cursor.pos = pos;
            CellEvent::CursorMoved
        })
    }
}

impl Component for ParagraphCell<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.last_content_width = area.width;
        self.cursor.update_scroll_offset(self.value, area.width);

        let border_style = self.palette.border_style(self.focused);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::styled(self.title.clone(), border_style))
            .padding(Padding::horizontal(1));

        let paragraph = if self.value.is_empty() {
            Paragraph::new(Line::styled(self.placeholder, self.palette.placeholder_style()))
        } else {
            Paragraph::new(self.visible_lines(area.width))
        };

        frame.render_widget(paragraph.block(block).style(self.palette.base()), area);
        self.render_scrollbar(frame, area);

        // Cells clipped by the pane edge may not have room for the cursor
        let (x, y) = self.cursor.screen_pos(self.value, area);
        if self.focused && area.inner(Margin::new(1, 1)).contains(Position { x, y }) {
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for ParagraphCell<'_> {
    type Event = CellEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let pos = self.cursor.pos;
        let value = self.value;
        match event {
            TuiEvent::InputChar(c) => {
                let mut buf = [0u8; 4];
                Some(self.replace(pos..pos, c.encode_utf8(&mut buf)))
            }
            TuiEvent::Paste(text) => {
                // Terminals deliver pasted line breaks as CR or CRLF
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                Some(self.replace(pos..pos, &text))
            }
            TuiEvent::Backspace => {
                (pos > 0).then(|| self.replace(prev_char_boundary(value, pos)..pos, ""))
            }
            TuiEvent::Delete => {
                (pos < value.len()).then(|| self.replace(pos..next_char_boundary(value, pos), ""))
            }
            TuiEvent::CursorLeft if pos > 0 => self.move_to(prev_char_boundary(value, pos)),
            TuiEvent::CursorRight if pos < value.len() => {
                self.move_to(next_char_boundary(value, pos))
            }
            TuiEvent::WordLeft => self.move_to(prev_word_boundary(value, pos)),
            TuiEvent::WordRight => self.move_to(next_word_boundary(value, pos)),
            TuiEvent::CursorHome => {
                let line_start = value[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
                self.move_to(line_start)
            }
            TuiEvent::CursorEnd => {
                let line_end = value[pos..]
                    .find('\n')
                    .map(|i| pos + i)
                    .unwrap_or(value.len());
                self.move_to(line_end)
            }
            TuiEvent::CursorUp => Some(if self.cursor.move_vertically(value, -1) {
                CellEvent::CursorMoved
            } else {
                CellEvent::ExitUp
            }),
            TuiEvent::CursorDown => Some(if self.cursor.move_vertically(value, 1) {
                CellEvent::CursorMoved
            } else {
                CellEvent::ExitDown
            }),
            _ => None,
        }
    }
}
