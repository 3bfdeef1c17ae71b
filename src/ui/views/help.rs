//! Help screen listing the key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::events::{get_keybindings_grouped, KeyContext, Keybinding};
use crate::logging;
use crate::ui::theme::theme;

/// Actions returned by the help view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpAction {
    Close,
}

/// Scrollable key binding reference.
pub struct HelpView {
    grouped_bindings: Vec<(KeyContext, Vec<Keybinding>)>,
    scroll: usize,
    total_lines: usize,
}

impl HelpView {
    pub fn new() -> Self {
        let grouped_bindings = get_keybindings_grouped();
        // header + blank per section, one per binding, blank after, plus footer
        let total_lines = grouped_bindings
            .iter()
            .map(|(_, b)| b.len() + 3)
            .sum::<usize>()
            + 2;

        Self {
            grouped_bindings,
            scroll: 0,
            total_lines,
        }
    }

    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<HelpAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('?'), _) | (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => {
                Some(HelpAction::Close)
            }
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.scroll = (self.scroll + 1).min(self.total_lines.saturating_sub(1));
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let block = Block::default()
            .title(" Help - Keyboard Shortcuts ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));

        let paragraph = Paragraph::new(self.build_content_lines())
            .block(block)
            .scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, area);
    }

    fn build_content_lines(&self) -> Vec<Line<'static>> {
        let t = theme();
        let mut lines = Vec::with_capacity(self.total_lines);

        for (context, bindings) in &self.grouped_bindings {
            lines.push(Line::from(Span::styled(
                format!("── {} ──", context.display()),
                Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::raw(""));
            for binding in bindings {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:>14}", binding.key), Style::default().fg(t.accent)),
                    Span::raw("  "),
                    Span::raw(binding.description),
                ]));
            }
            lines.push(Line::raw(""));
        }

        if let Some(dir) = logging::log_directory() {
            lines.push(Line::styled(
                format!("Logs: {}", dir.display()),
                t.muted(),
            ));
        }
        lines
    }
}

impl Default for HelpView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_keys() {
        let mut view = HelpView::new();
        for code in [KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('?')] {
            assert_eq!(
                view.handle_input(KeyEvent::new(code, KeyModifiers::NONE)),
                Some(HelpAction::Close)
            );
        }
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut view = HelpView::new();
        let up = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(view.handle_input(up), None);
        assert_eq!(view.scroll, 0);

        let down = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        for _ in 0..500 {
            view.handle_input(down);
        }
        assert_eq!(view.scroll, view.total_lines - 1);

        view.reset_scroll();
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_content_lists_every_binding() {
        let view = HelpView::new();
        let lines = view.build_content_lines();
        let bindings: usize = view.grouped_bindings.iter().map(|(_, b)| b.len()).sum();
        assert!(lines.len() >= bindings);
    }
}
