//! Colors for the light and dark themes.
//!
//! Components never read the theme flag themselves. The parent builds a
//! [`Palette`] from the session's `ThemeContext` once per frame and passes it
//! down as a prop.

use ratatui::style::{Color, Modifier, Style};

use crate::core::settings::ThemeContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub placeholder: Color,
    pub border: Color,
    pub focus: Color,
    pub accent: Color,
    pub toast_bg: Color,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: Color::Rgb(249, 250, 251),
        text: Color::Rgb(31, 41, 55),
        placeholder: Color::Rgb(156, 163, 175),
        border: Color::Rgb(209, 213, 219),
        focus: Color::Rgb(37, 99, 235),
        accent: Color::Rgb(22, 163, 74),
        toast_bg: Color::Rgb(255, 255, 255),
    };

    pub const DARK: Palette = Palette {
        background: Color::Rgb(17, 24, 39),
        text: Color::Rgb(209, 213, 219),
        placeholder: Color::Rgb(107, 114, 128),
        border: Color::Rgb(55, 65, 81),
        focus: Color::Rgb(96, 165, 250),
        accent: Color::Rgb(74, 222, 128),
        toast_bg: Color::Rgb(31, 41, 55),
    };

    pub fn for_theme(theme: ThemeContext) -> Self {
        if theme.dark { Self::DARK } else { Self::LIGHT }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn placeholder_style(&self) -> Style {
        Style::default()
            .fg(self.placeholder)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focus)
        } else {
            Style::default().fg(self.border)
        }
    }
}
