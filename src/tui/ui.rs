use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Block;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{EditorPane, Preview, TitleBar, Toast};
use crate::tui::theme::Palette;

pub const HELP_TEXT: &str =
    " ^S Save  ^N Add Paragraph  ^T Theme  ^P Preview  Tab Next  ^Q Quit";

/// Terminal width at which the preview moves beside the editor.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 100;
/// Below this body height a stacked preview is hidden.
const STACKED_PREVIEW_MIN_HEIGHT: u16 = 16;

/// Presentation density picked from the terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    Comfortable,
    Compact,
}

impl Density {
    pub fn for_size(width: u16, height: u16) -> Self {
        if width < 60 || height < 20 {
            Density::Compact
        } else {
            Density::Comfortable
        }
    }

    /// Minimum text rows per paragraph cell.
    pub fn min_rows(self) -> u16 {
        match self {
            Density::Comfortable => 3,
            Density::Compact => 1,
        }
    }

    /// Blank rows between paragraph cells.
    pub fn gap(self) -> u16 {
        match self {
            Density::Comfortable => 1,
            Density::Compact => 0,
        }
    }
}

/// Split the body into the editor area and, if shown, the preview area.
pub fn split_body(body: Rect, show_preview: bool) -> (Rect, Option<Rect>) {
    use Constraint::Percentage;

    if !show_preview {
        return (body, None);
    }
    if body.width >= SIDE_BY_SIDE_MIN_WIDTH {
        let [editor, preview] = Layout::horizontal([Percentage(60), Percentage(40)])
            .spacing(1)
            .areas(body);
        return (editor, Some(preview));
    }
    if body.height < STACKED_PREVIEW_MIN_HEIGHT {
        return (body, None);
    }
    let [editor, preview] = Layout::vertical([Percentage(60), Percentage(40)]).areas(body);
    (editor, Some(preview))
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let area = frame.area();
    let palette = Palette::for_theme(app.theme);
    let density = Density::for_size(area.width, area.height);
    frame.render_widget(Block::default().style(palette.base()), area);

    let [title_area, body_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(area);

    TitleBar::new(
        app.theme.label(),
        app.dirty,
        app.status_message.clone(),
        palette,
    )
    .render(frame, title_area);

    tui.editor.sync(&app.draft_id, app.len());
    let (editor_area, preview_area) = split_body(body_area, tui.show_preview);

    EditorPane::new(
        app.paragraphs(),
        &mut tui.editor,
        palette,
        (&tui.first_placeholder, &tui.placeholder),
    )
    .density(density.min_rows(), density.gap())
    .render(frame, editor_area);

    if let Some(preview_area) = preview_area {
        Preview::new(app.paragraphs(), &mut tui.preview, palette).render(frame, preview_area);
    }

    frame.render_widget(
        Line::styled(HELP_TEXT, Style::default().fg(palette.placeholder)),
        help_area,
    );

    if let Some(notification) = &app.notification {
        Toast::new(notification, palette).render(frame, body_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{DEFAULT_FIRST_PLACEHOLDER, DEFAULT_PLACEHOLDER};
    use crate::core::state::Notification;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn test_tui(show_preview: bool) -> TuiState {
        TuiState::new(
            DEFAULT_FIRST_PLACEHOLDER.to_string(),
            DEFAULT_PLACEHOLDER.to_string(),
            show_preview,
        )
    }

    fn draw(app: &App, tui: &mut TuiState, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_density_for_size() {
        assert_eq!(Density::for_size(120, 40), Density::Comfortable);
        assert_eq!(Density::for_size(50, 40), Density::Compact);
        assert_eq!(Density::for_size(120, 15), Density::Compact);
        assert_eq!(Density::Compact.min_rows(), 1);
        assert_eq!(Density::Comfortable.gap(), 1);
    }

    #[test]
    fn test_split_body_layouts() {
        let wide = Rect::new(0, 1, 120, 30);
        let (editor, preview) = split_body(wide, true);
        let preview = preview.unwrap();
        assert_eq!(editor.y, preview.y);
        assert!(preview.x > editor.x);

        let narrow = Rect::new(0, 1, 80, 30);
        let (editor, preview) = split_body(narrow, true);
        assert!(preview.unwrap().y > editor.y);

        let short = Rect::new(0, 1, 80, 10);
        assert_eq!(split_body(short, true), (short, None));
        assert_eq!(split_body(wide, false), (wide, None));
    }

    #[test]
    fn test_draw_fresh_session() {
        let app = App::new();
        let mut tui = test_tui(true);
        let text = draw(&app, &mut tui, 120, 30);
        assert!(text.contains("Text Editor"));
        assert!(text.contains(DEFAULT_FIRST_PLACEHOLDER));
        assert!(text.contains("Preview"));
        assert!(text.contains("Empty paragraph"));
        assert!(text.contains("^S Save"));
    }

    #[test]
    fn test_draw_hides_preview_when_toggled_off() {
        let app = App::new();
        let mut tui = test_tui(false);
        let text = draw(&app, &mut tui, 120, 30);
        assert!(!text.contains("Empty paragraph"));
    }

    #[test]
    fn test_draw_paragraphs_and_toast() {
        let mut app = App::new();
        app.edit_paragraph(0, "Hello".to_string()).unwrap();
        app.append_paragraph();
        app.notification = Some(Notification::saved());
        let mut tui = test_tui(true);

        let text = draw(&app, &mut tui, 120, 30);
        assert!(text.contains("Hello"));
        assert!(text.contains(DEFAULT_PLACEHOLDER));
        assert!(text.contains("Draft saved successfully"));
        assert_eq!(tui.editor.cursors.len(), 2);
    }

    #[test]
    fn test_draw_tiny_terminal_does_not_panic() {
        let app = App::new();
        let mut tui = test_tui(true);
        draw(&app, &mut tui, 10, 3);
        draw(&app, &mut tui, 1, 1);
    }
}
