//! # TitleBar Component
//!
//! Top status bar: app name, theme, unsaved marker, and status message.
//!
//! Stateless: every field is a prop set by the parent each frame.
//!
//! ```text
//! Text Editor | Light | ● unsaved | Paragraph 2 added
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub struct TitleBar {
    pub theme_label: &'static str,
    pub dirty: bool,
    pub status_message: String,
    pub palette: Palette,
}

impl TitleBar {
    pub fn new(theme_label: &'static str, dirty: bool, status_message: String, palette: Palette) -> Self {
        Self {
            theme_label,
            dirty,
            status_message,
            palette,
        }
    }

    fn spans(&self) -> Vec<Span<'_>> {
        let separator = Span::styled(" | ", Style::default().fg(self.palette.placeholder));
        let mut spans = vec![
            Span::styled(
                "Text Editor",
                Style::default()
                    .fg(self.palette.text)
                    .add_modifier(Modifier::BOLD),
            ),
            separator.clone(),
            Span::raw(self.theme_label),
        ];
        if self.dirty {
            spans.push(separator.clone());
            spans.push(Span::styled("● unsaved", Style::default().fg(self.palette.focus)));
        }
        if !self.status_message.is_empty() {
            spans.push(separator);
            spans.push(Span::raw(self.status_message.as_str()));
        }
        spans
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(self.spans()).style(self.palette.base());
        frame.render_widget(line, area);
    }
}
