//! Single-line text input used for the search query.
//!
//! The cursor is a character index, so multi-byte input edits cleanly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::theme;

/// What a key press did to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// The text changed.
    Changed,
    /// Enter was pressed.
    Submit(String),
    /// Esc was pressed.
    Cancel,
}

/// A text input with a cursor.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Cursor position, in characters.
    cursor: usize,
    placeholder: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text shown while the input is empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value and move the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn len_chars(&self) -> usize {
        self.value.chars().count()
    }

    /// Handle a key press.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<InputAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => Some(InputAction::Submit(self.value.clone())),
            (KeyCode::Esc, _) => Some(InputAction::Cancel),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.value.is_empty() {
                    return None;
                }
                self.value.clear();
                self.cursor = 0;
                Some(InputAction::Changed)
            }
            (KeyCode::Char('a'), KeyModifiers::CONTROL) | (KeyCode::Home, _) => {
                self.cursor = 0;
                None
            }
            (KeyCode::Char('e'), KeyModifiers::CONTROL) | (KeyCode::End, _) => {
                self.cursor = self.len_chars();
                None
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                Some(InputAction::Changed)
            }
            (KeyCode::Backspace, _) if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                Some(InputAction::Changed)
            }
            (KeyCode::Delete, _) if self.cursor < self.len_chars() => {
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                Some(InputAction::Changed)
            }
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.len_chars());
                None
            }
            _ => None,
        }
    }

    /// Draw the input. The terminal cursor is placed only when `focused`.
    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str, focused: bool) {
        let t = theme();
        let border = if focused {
            Style::default().fg(t.warning)
        } else {
            t.muted()
        };
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(border);

        let paragraph = if self.value.is_empty() && !focused {
            Paragraph::new(self.placeholder.as_str()).style(t.muted())
        } else {
            Paragraph::new(self.value.as_str())
        };
        frame.render_widget(paragraph.block(block), area);

        if focused {
            let x = area.x + 1 + self.cursor as u16;
            frame.set_cursor_position(Position::new(
                x.min(area.right().saturating_sub(2)),
                area.y + 1,
            ));
        }
    }
}
