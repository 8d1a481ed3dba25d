//! # EditorPane Component
//!
//! Stacks one `ParagraphCell` per paragraph and tracks which one has focus.
//!
//! ## Architecture
//!
//! `EditorPane` is a transient component (created each frame) that wraps
//! `&'a mut EditorState` (persistent state) and the paragraph list (props).
//!
//! The pane scrolls by whole cells: `first_visible` is the topmost drawn
//! paragraph, adjusted every render so the focused cell is on screen. Each
//! drawn cell's rectangle is cached for mouse hit testing.
//!
//! Per-paragraph cursor state is keyed by `"{draft_id}-{index}"`. When a
//! different draft is loaded the keys change and the cursors reset.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};

use crate::core::state::paragraph_key;
use crate::tui::component::Component;
use crate::tui::components::paragraph_cell::{CursorState, ParagraphCell, cell_height};
use crate::tui::theme::Palette;

/// Focus, cursor, and layout state for the editor pane.
/// Must be persisted in the parent TuiState.
pub struct EditorState {
    /// One cursor per paragraph, index-aligned with the draft
    pub cursors: Vec<CursorState>,
    /// Display key each cursor was created for
    keys: Vec<String>,
    pub focused: usize,
    pub first_visible: usize,
    /// Rectangles of the cells drawn in the last frame
    pub cell_rects: Vec<(usize, Rect)>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            cursors: Vec::new(),
            keys: Vec::new(),
            focused: 0,
            first_visible: 0,
            cell_rects: Vec::new(),
        }
    }

    /// Align per-paragraph state with the current draft.
    ///
    /// Cursors whose display key no longer matches are reset; extra ones are dropped.
    pub fn sync(&mut self, draft_id: &str, len: usize) {
        self.cursors.truncate(len);
        self.keys.truncate(len);
        for index in 0..len {
            let key = paragraph_key(draft_id, index);
            match self.keys.get(index) {
                Some(existing) if *existing == key => {}
                Some(_) => {
                    self.keys[index] = key;
                    self.cursors[index] = CursorState::new();
                }
                None => {
                    self.keys.push(key);
                    self.cursors.push(CursorState::new());
                }
            }
        }
        let last = len.saturating_sub(1);
        self.focused = self.focused.min(last);
        self.first_visible = self.first_visible.min(last);
    }

    pub fn focused_cursor(&mut self) -> Option<&mut CursorState> {
        self.cursors.get_mut(self.focused)
    }

    /// Focus `index`, placing its cursor at the end of `text`.
    pub fn focus_at_end(&mut self, index: usize, text: &str) {
        if let Some(cursor) = self.cursors.get_mut(index) {
            cursor.pos = text.len();
            self.focused = index;
        }
    }

    /// Focus `index`, placing its cursor at the start.
    pub fn focus_at_start(&mut self, index: usize) {
        if let Some(cursor) = self.cursors.get_mut(index) {
            cursor.pos = 0;
            self.focused = index;
        }
    }

    /// Focus the next paragraph, wrapping to the first. Keeps its cursor.
    pub fn focus_next(&mut self) {
        if !self.cursors.is_empty() {
            self.focused = (self.focused + 1) % self.cursors.len();
        }
    }

    /// Focus the previous paragraph, wrapping to the last. Keeps its cursor.
    pub fn focus_prev(&mut self) {
        if !self.cursors.is_empty() {
            self.focused = self
                .focused
                .checked_sub(1)
                .unwrap_or(self.cursors.len() - 1);
        }
    }

    /// Paragraph index drawn at screen position (`col`, `row`) in the last frame.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<usize> {
        self.cell_rects
            .iter()
            .find(|(_, rect)| rect.contains(Position { x: col, y: row }))
            .map(|(index, _)| *index)
    }

    /// Move `first_visible` so the focused cell fits in `viewport_height`.
    fn scroll_to_focused(&mut self, heights: &[u16], gap: u16, viewport_height: u16) {
        if self.focused < self.first_visible {
            self.first_visible = self.focused;
            return;
        }
        let gap = gap as usize;
        // Rows from the top of `first_visible` to the bottom of `focused`
        let mut span: usize = heights[self.first_visible..=self.focused]
            .iter()
            .map(|&h| h as usize + gap)
            .sum::<usize>()
            - gap;
        while self.first_visible < self.focused && span > viewport_height as usize {
            span -= heights[self.first_visible] as usize + gap;
            self.first_visible += 1;
        }
    }
}

/// Transient render wrapper for the paragraph stack.
pub struct EditorPane<'a> {
    paragraphs: &'a [String],
    first_placeholder: &'a str,
    placeholder: &'a str,
    palette: Palette,
    min_rows: u16,
    gap: u16,
    state: &'a mut EditorState,
}

impl<'a> EditorPane<'a> {
    pub fn new(
        paragraphs: &'a [String],
        state: &'a mut EditorState,
        palette: Palette,
        placeholders: (&'a str, &'a str),
    ) -> Self {
        Self {
            paragraphs,
            first_placeholder: placeholders.0,
            placeholder: placeholders.1,
            palette,
            min_rows: 3,
            gap: 1,
            state,
        }
    }

    /// Minimum text rows per cell and blank rows between cells.
    pub fn density(mut self, min_rows: u16, gap: u16) -> Self {
        self.min_rows = min_rows;
        self.gap = gap;
        self
    }
}

impl Component for EditorPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            ratatui::widgets::Block::default().style(self.palette.base()),
            area,
        );
        self.state.cell_rects.clear();
        if self.paragraphs.is_empty() || area.height == 0 {
            return;
        }

        let heights: Vec<u16> = self
            .paragraphs
            .iter()
            .map(|p| cell_height(p, area.width, self.min_rows))
            .collect();
        self.state.scroll_to_focused(&heights, self.gap, area.height);

        let bottom = area.bottom();
        let mut y = area.y;
        for index in self.state.first_visible..self.paragraphs.len() {
            if y >= bottom {
                break;
            }
            let height = heights[index].min(bottom - y);
            let rect = Rect::new(area.x, y, area.width, height);
            let placeholder = if index == 0 {
                self.first_placeholder
            } else {
                self.placeholder
            };
            let focused = index == self.state.focused;

            let cursor = &mut self.state.cursors[index];
            ParagraphCell::new(&self.paragraphs[index], cursor, self.palette)
                .placeholder(placeholder)
                .title(format!(" ¶ {} ", index + 1))
                .focused(focused)
                .render(frame, rect);

            self.state.cell_rects.push((index, rect));
            y = y.saturating_add(height + self.gap);
        }
    }
}
