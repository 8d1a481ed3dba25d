//! Cursor position tracking and navigation for a paragraph cell.
//!
//! `CursorState` owns the cursor byte offset, internal scroll offset, and the
//! width used at the last render. The paragraph text itself is owned by the
//! session, so every method takes `text: &str` explicitly.

use ratatui::layout::Rect;

use super::text_wrap::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, MAX_VISIBLE_ROWS, column_of, inner_width, layout_rows,
    offset_at_column, row_of,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorState {
    /// Byte offset into the paragraph (0..=text.len())
    pub pos: usize,
    /// First visible row when the paragraph is taller than the cell
    pub scroll_offset: u16,
    /// Cell width from the last render (used for vertical movement)
    pub last_content_width: u16,
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_content_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Cursor at the end of `text` (used when focusing a cell).
    pub fn at_end(text: &str) -> Self {
        Self {
            pos: text.len(),
            ..Self::new()
        }
    }

    /// Pull `pos` back inside `text` and onto a char boundary.
    ///
    /// The paragraph can change underneath the cursor (reload, edits from
    /// elsewhere), so this runs before every use.
    pub fn clamp(&mut self, text: &str) {
        let mut pos = self.pos.min(text.len());
        while !text.is_char_boundary(pos) {
            pos -= 1;
        }
        self.pos = pos;
    }

    /// Move one display row up (`-1`) or down (`1`), keeping the column.
    ///
    /// Returns `false` when already on the first/last row, so the caller can
    /// move focus to the neighbouring paragraph instead.
    pub fn move_vertically(&mut self, text: &str, direction: i16) -> bool {
        let width = inner_width(self.last_content_width);
        let rows = layout_rows(text, width);
        let current = row_of(&rows, self.pos);

        let target = if direction < 0 {
            if current == 0 {
                return false;
            }
            current - 1
        } else {
            if current + 1 >= rows.len() {
                return false;
            }
            current + 1
        };

        let column = column_of(text, rows[current], self.pos);
        self.pos = offset_at_column(text, rows[target], column);
        true
    }

    /// Row (0-based) the cursor is on at `content_width`.
    pub fn current_row(&self, text: &str, content_width: u16) -> u16 {
        let rows = layout_rows(text, inner_width(content_width));
        row_of(&rows, self.pos) as u16
    }

    /// Keep the cursor row within the visible window of the cell.
    pub fn update_scroll_offset(&mut self, text: &str, content_width: u16) {
        let rows = layout_rows(text, inner_width(content_width));
        if rows.len() as u16 <= MAX_VISIBLE_ROWS {
            self.scroll_offset = 0;
            return;
        }

        let cursor_row = row_of(&rows, self.pos) as u16;
        if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if cursor_row >= self.scroll_offset + MAX_VISIBLE_ROWS {
            self.scroll_offset = cursor_row + 1 - MAX_VISIBLE_ROWS;
        }
        let max_offset = rows.len() as u16 - MAX_VISIBLE_ROWS;
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    /// Screen position (column, row) of the cursor inside a cell drawn at `area`.
    pub fn screen_pos(&self, text: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        let rows = layout_rows(text, width);
        let row = row_of(&rows, self.pos);
        let column = column_of(text, rows[row], self.pos).min(width.saturating_sub(1));
        let visible_row = (row as u16).saturating_sub(self.scroll_offset);

        (
            area.x + CONTENT_OFFSET_X + column,
            area.y + CONTENT_OFFSET_Y + visible_row,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(pos: usize, width: u16) -> CursorState {
        CursorState {
            pos,
            scroll_offset: 0,
            last_content_width: width,
        }
    }

    #[test]
    fn clamp_pulls_back_inside_text() {
        let mut c = cursor(50, 80);
        c.clamp("abc");
        assert_eq!(c.pos, 3);
    }

    #[test]
    fn clamp_lands_on_char_boundary() {
        // 'é' occupies bytes 3..5
        let mut c = cursor(4, 80);
        c.clamp("café");
        assert_eq!(c.pos, 3);
    }

    #[test]
    fn move_down_keeps_column() {
        let text = "abcdef\nabcdef";
        let mut c = cursor(3, 80);
        assert!(c.move_vertically(text, 1));
        assert_eq!(c.pos, 10);
    }

    #[test]
    fn move_up_clamps_to_shorter_row() {
        let text = "ab\nabcdef";
        let mut c = cursor(text.len(), 80);
        assert!(c.move_vertically(text, -1));
        assert_eq!(c.pos, 2);
    }

    #[test]
    fn move_at_edges_reports_false() {
        let text = "one\ntwo";
        let mut c = cursor(0, 80);
        assert!(!c.move_vertically(text, -1));
        c.pos = text.len();
        assert!(!c.move_vertically(text, 1));
    }

    #[test]
    fn move_across_wrapped_rows() {
        // Width 9 leaves 5 text columns after borders and padding
        let text = "aaaaabbbbb";
        let mut c = cursor(7, 9);
        assert!(c.move_vertically(text, -1));
        assert_eq!(c.pos, 2);
    }

    #[test]
    fn scroll_follows_cursor_past_visible_rows() {
        let text = (0..12).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut c = cursor(text.len(), 80);
        c.update_scroll_offset(&text, 80);
        assert_eq!(c.scroll_offset, 12 - MAX_VISIBLE_ROWS);

        c.pos = 0;
        c.update_scroll_offset(&text, 80);
        assert_eq!(c.scroll_offset, 0);
    }

    #[test]
    fn screen_pos_accounts_for_border_and_padding() {
        let area = Rect::new(10, 5, 40, 5);
        let c = cursor(3, 40);
        assert_eq!(c.screen_pos("abc", area), (10 + 2 + 3, 5 + 1));
    }

    #[test]
    fn screen_pos_after_newline_is_next_row_start() {
        let area = Rect::new(0, 0, 40, 5);
        let c = cursor(4, 40);
        assert_eq!(c.screen_pos("abc\n", area), (2, 2));
    }
}
