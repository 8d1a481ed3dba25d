//! # Toast Component
//!
//! Notification surface: a small bordered box in the top-right corner
//! showing a title and description. The parent decides when it expires.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::core::state::Notification;
use crate::tui::component::Component;
use crate::tui::theme::Palette;

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

const TOAST_WIDTH: u16 = 52;
const TOAST_HEIGHT: u16 = 4;

pub fn is_expired(notification: &Notification, now: Instant) -> bool {
    now.duration_since(notification.created_at) >= TOAST_DURATION
}

pub struct Toast<'a> {
    notification: &'a Notification,
    palette: Palette,
}

impl<'a> Toast<'a> {
    pub fn new(notification: &'a Notification, palette: Palette) -> Self {
        Self {
            notification,
            palette,
        }
    }

    /// Top-right placement inside `area`, shrunk to fit small terminals.
    pub fn placement(area: Rect) -> Rect {
        let width = TOAST_WIDTH.min(area.width);
        let height = TOAST_HEIGHT.min(area.height);
        Rect::new(area.right().saturating_sub(width), area.y, width, height)
    }
}

impl Component for Toast<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rect = Self::placement(area);
        frame.render_widget(Clear, rect);

        let text = Text::from(vec![
            Line::styled(
                self.notification.title.as_str(),
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                self.notification.description.as_str(),
                Style::default().fg(self.palette.text),
            ),
        ]);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.palette.accent))
            .padding(Padding::horizontal(1));

        let widget = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(self.palette.toast_bg));
        frame.render_widget(widget, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_placement_top_right() {
        let rect = Toast::placement(Rect::new(0, 0, 100, 30));
        assert_eq!(rect, Rect::new(48, 0, 52, 4));

        let narrow = Toast::placement(Rect::new(0, 0, 30, 2));
        assert_eq!(narrow, Rect::new(0, 0, 30, 2));
    }

    #[test]
    fn test_expiry() {
        let note = Notification::saved();
        assert!(!is_expired(&note, note.created_at));
        assert!(is_expired(&note, note.created_at + TOAST_DURATION));
    }

    #[test]
    fn test_render_shows_title_and_description() {
        let backend = TestBackend::new(80, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let note = Notification::saved();
        terminal
            .draw(|f| Toast::new(&note, Palette::LIGHT).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Draft saved successfully"));
        assert!(text.contains("Your changes have been saved"));
    }
}
