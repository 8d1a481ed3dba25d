//! # Preview Component
//!
//! Read-only rendering of the draft: one wrapped paragraph per element with
//! a blank row between them. Empty paragraphs show an `Empty paragraph`
//! marker in the placeholder style.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PreviewState` lives in `TuiState`
//! - `Preview` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

pub const EMPTY_MARKER: &str = "Empty paragraph";

/// Tallest preview canvas; content below it is not shown.
const MAX_CANVAS_HEIGHT: usize = u16::MAX as usize;

#[derive(Default)]
pub struct PreviewState {
    pub scroll_state: ScrollViewState,
    /// Content height from the last render (for scroll clamping)
    pub content_height: u16,
    pub viewport_height: u16,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the offset inside the content after it shrinks.
    fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for PreviewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::PreviewScrollUp => self.scroll_state.scroll_page_up(),
            TuiEvent::PreviewScrollDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        self.clamp_scroll();
        Some(())
    }
}

fn paragraph_widget<'a>(text: &'a str, palette: &Palette) -> Paragraph<'a> {
    let paragraph = if text.is_empty() {
        Paragraph::new(Line::styled(EMPTY_MARKER, palette.placeholder_style()))
    } else {
        Paragraph::new(text).style(palette.base())
    };
    paragraph.wrap(Wrap { trim: false })
}

pub struct Preview<'a> {
    paragraphs: &'a [String],
    palette: Palette,
    state: &'a mut PreviewState,
}

impl<'a> Preview<'a> {
    pub fn new(paragraphs: &'a [String], state: &'a mut PreviewState, palette: Palette) -> Self {
        Self {
            paragraphs,
            palette,
            state,
        }
    }
}

impl Component for Preview<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.palette.border_style(false))
            .title(Line::styled(" Preview ", self.palette.border_style(false)))
            .padding(Padding::horizontal(1))
            .style(self.palette.base());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width < 2 || inner.height == 0 {
            return;
        }

        // One column reserved for the scrollbar
        let content_width = inner.width - 1;

        // ScrollView coordinates are u16; layout stops once the canvas is full
        let mut placed: Vec<(Paragraph, Rect)> = Vec::new();
        let mut y = 0usize;
        for text in self.paragraphs {
            if y >= MAX_CANVAS_HEIGHT {
                break;
            }
            let widget = paragraph_widget(text, &self.palette);
            let height = widget.line_count(content_width).min(MAX_CANVAS_HEIGHT - y);
            placed.push((widget, Rect::new(0, y as u16, content_width, height as u16)));
            y = y.saturating_add(height + 1);
        }
        let total_height = y.saturating_sub(1).min(MAX_CANVAS_HEIGHT) as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for (widget, rect) in placed {
            scroll_view.render_widget(widget, rect);
        }

        self.state.content_height = total_height;
        self.state.viewport_height = inner.height;
        self.state.clamp_scroll();
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}
