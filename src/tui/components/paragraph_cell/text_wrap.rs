//! Row layout and character navigation for a paragraph cell.
//!
//! Stateless helpers with no dependency on `ParagraphCell` or `CursorState`.
//! A wrapped row is tracked as a byte range into the paragraph so the cursor
//! can be mapped to screen coordinates without re-deriving offsets from
//! wrapped copies.

use unicode_width::UnicodeWidthStr;

/// Border (2) + horizontal padding (2) consumed by the cell block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Rows shown before the cell starts scrolling internally
pub(super) const MAX_VISIBLE_ROWS: u16 = 8;
/// Offset from the cell's left edge to the first text column (border + padding)
pub(super) const CONTENT_OFFSET_X: u16 = 2;
/// Offset from the cell's top edge to the first text row (border)
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

/// One wrapped display row: `text[start..end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Row {
    pub start: usize,
    pub end: usize,
}

pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Inner text width for a cell `content_width` columns wide. 0 if too narrow.
pub(super) fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Split `text` into display rows at `width` columns.
///
/// Every logical line (separated by `\n`) yields at least one row, so a
/// trailing newline produces a final empty row. Always returns at least one row.
pub(super) fn layout_rows(text: &str, width: u16) -> Vec<Row> {
    if width == 0 {
        return vec![Row {
            start: 0,
            end: text.len(),
        }];
    }

    let options = wrap_options(width);
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        if line.is_empty() {
            rows.push(Row {
                start: line_start,
                end: line_start,
            });
        } else {
            let mut offset = 0;
            for segment in textwrap::wrap(line, &options) {
                let local = line[offset..]
                    .find(segment.as_ref())
                    .map(|i| offset + i)
                    .unwrap_or(offset);
                let end = (local + segment.len()).min(line.len());
                rows.push(Row {
                    start: line_start + local,
                    end: line_start + end,
                });
                offset = end;
            }
        }
        line_start += line.len() + 1;
    }

    rows
}

/// Number of display rows for `text` at `width` columns.
pub(super) fn row_count(text: &str, width: u16) -> u16 {
    layout_rows(text, width).len() as u16
}

/// Index of the row holding byte offset `pos`.
///
/// At a wrap point the cursor belongs to the row that starts there.
pub(super) fn row_of(rows: &[Row], pos: usize) -> usize {
    rows.iter()
        .rposition(|row| row.start <= pos)
        .unwrap_or(0)
}

/// Display width of `text[row.start..pos]`, the cursor's column in its row.
pub(super) fn column_of(text: &str, row: Row, pos: usize) -> u16 {
    let end = pos.max(row.start).min(text.len());
    text[row.start..end].width() as u16
}

/// Byte offset in `row` whose display column is closest to `column` without passing it.
pub(super) fn offset_at_column(text: &str, row: Row, column: u16) -> usize {
    let mut width = 0usize;
    for (i, c) in text[row.start..row.end].char_indices() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > column as usize {
            return row.start + i;
        }
        width += w;
    }
    row.end
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Start of the word before `pos` (readline `backward-word`).
pub(super) fn prev_word_boundary(text: &str, pos: usize) -> usize {
    let mut chars = text[..pos].char_indices().rev().peekable();

    while chars.next_if(|&(_, c)| !is_word_char(c)).is_some() {}

    let mut boundary = 0;
    while let Some(&(i, c)) = chars.peek() {
        if !is_word_char(c) {
            boundary = i + c.len_utf8();
            break;
        }
        boundary = i;
        chars.next();
    }
    boundary
}

/// End of the word after `pos` (readline `forward-word`).
pub(super) fn next_word_boundary(text: &str, pos: usize) -> usize {
    let mut chars = text[pos..].char_indices().peekable();

    while chars.next_if(|&(_, c)| !is_word_char(c)).is_some() {}
    while chars.next_if(|&(_, c)| is_word_char(c)).is_some() {}

    chars.peek().map(|&(i, _)| pos + i).unwrap_or(text.len())
}
