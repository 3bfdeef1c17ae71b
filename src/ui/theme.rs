//! Shared colors.

use once_cell::sync::Lazy;
use ratatui::style::{Color, Modifier, Style};

/// Color theme for the application.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Borders of focused widgets and headings.
    pub accent: Color,
    /// Secondary text.
    pub muted: Color,
    /// Section headers on the help screen, warnings and `<em>` matches.
    pub warning: Color,
    /// Errors and the hidden marker.
    pub error: Color,
    /// Informational toasts.
    pub info: Color,
    /// Header bar background.
    pub header_bg: Color,
    /// Selected source marker and confirm keys.
    pub selected: Color,
    /// Tag chip text.
    pub chip_fg: Color,
    /// Tag chip background.
    pub chip_bg: Color,
    /// Background of a tag that is not confirmed yet.
    pub pending_bg: Color,
    /// Background of the highlighted row or suggestion.
    pub highlight_bg: Color,
    /// Author label on result rows.
    pub author: Color,
    /// Hint card descriptions.
    pub description: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            muted: Color::DarkGray,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Blue,
            header_bg: Color::Blue,
            selected: Color::Green,
            chip_fg: Color::White,
            chip_bg: Color::Blue,
            pending_bg: Color::Gray,
            highlight_bg: Color::DarkGray,
            author: Color::Magenta,
            description: Color::Gray,
        }
    }
}

impl Theme {
    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// A confirmed tag.
    pub fn chip(&self) -> Style {
        Style::default().fg(self.chip_fg).bg(self.chip_bg)
    }

    /// A tag still waiting for the backend.
    pub fn pending_chip(&self) -> Style {
        Style::default().fg(self.muted).bg(self.pending_bg)
    }

    /// The highlighted row of a list.
    pub fn highlight(&self) -> Style {
        Style::default().bg(self.highlight_bg)
    }
}

static THEME: Lazy<Theme> = Lazy::new(Theme::default);

/// The active theme.
pub fn theme() -> &'static Theme {
    &THEME
}
