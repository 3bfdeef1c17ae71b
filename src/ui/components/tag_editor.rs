//! Chip-based tag editor with autosuggest.
//!
//! Shows the tags of one hit as chips followed by a free-text buffer. A comma
//! in the buffer commits the text before it, Enter commits the whole buffer,
//! and Backspace on an empty buffer drops the last chip. Left/Right pick a
//! chip and Delete removes the picked one. Suggestions come from the tag
//! catalog and match by case-insensitive prefix.
//!
//! The editor keeps its own copy of the tag list. Every change to it is
//! reported as a [`TagAction`] so the host can send the matching request.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::ui::theme::theme;

/// Placeholder shown while the buffer is empty.
const PLACEHOLDER: &str = "type here to add tags";

/// Maximum suggestion rows drawn under the input.
const MAX_SUGGESTIONS: usize = 6;

/// A change the host should apply to the edited hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagAction {
    /// A tag was appended.
    Add(String),
    /// A tag was removed.
    Remove(String),
    /// The editor was closed.
    Close,
}

/// Tag editor state.
#[derive(Debug, Default)]
pub struct TagEditor {
    /// Hit being edited.
    file_id: Option<String>,
    /// Tags in display order. No duplicates are ever added through the editor.
    tags: Vec<String>,
    /// Free-text buffer.
    input_value: String,
    /// Current suggestions for the buffer.
    suggestions: Vec<String>,
    /// Tag catalog the suggestions are drawn from.
    candidates: Vec<String>,
    /// Keyboard-highlighted suggestion.
    highlighted: Option<usize>,
    /// Chip picked with Left/Right, the target of Delete.
    focused_chip: Option<usize>,
    visible: bool,
}

impl TagEditor {
    /// Create a hidden, empty editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the editor for a hit.
    pub fn open(&mut self, file_id: impl Into<String>, tags: Vec<String>, candidates: Vec<String>) {
        self.file_id = Some(file_id.into());
        self.tags = tags;
        self.candidates = candidates;
        self.input_value.clear();
        self.suggestions.clear();
        self.highlighted = None;
        self.focused_chip = None;
        self.visible = true;
    }

    /// Hide the editor without committing anything.
    pub fn close(&mut self) {
        self.visible = false;
        self.file_id = None;
        self.input_value.clear();
        self.suggestions.clear();
        self.highlighted = None;
        self.focused_chip = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The hit being edited, if open.
    pub fn file_id(&self) -> Option<&str> {
        self.file_id.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Index of the chip picked with Left/Right.
    pub fn focused_chip(&self) -> Option<usize> {
        self.focused_chip
    }

    /// Replace the tag list, e.g. with the backend's canonical one.
    pub fn sync_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
        self.clamp_focused_chip();
    }

    /// Append `candidate` unless it is empty or already present.
    ///
    /// An empty candidate leaves the buffer alone. Otherwise the buffer is
    /// cleared, whether or not the tag was new.
    pub fn add_tag(&mut self, candidate: &str) -> Option<TagAction> {
        if candidate.is_empty() {
            return None;
        }

        let added = if self.tags.iter().any(|t| t == candidate) {
            None
        } else {
            self.tags.push(candidate.to_string());
            Some(TagAction::Add(candidate.to_string()))
        };
        self.set_input(String::new());
        added
    }

    /// Remove every tag equal to `name`.
    pub fn remove_tag(&mut self, name: &str) -> Option<TagAction> {
        if self.tags.is_empty() {
            return None;
        }

        let before = self.tags.len();
        self.tags.retain(|t| t != name);
        (self.tags.len() != before).then(|| TagAction::Remove(name.to_string()))
    }

    /// Remove the last tag.
    pub fn remove_last_tag(&mut self) -> Option<TagAction> {
        self.tags.pop().map(TagAction::Remove)
    }

    /// Replace the buffer with `raw`, committing the first comma-separated
    /// segment when there is one.
    ///
    /// Only this path lowercases: a segment committed through a comma is
    /// trimmed and lowercased, Enter and blur commit the buffer verbatim.
    pub fn on_change(&mut self, raw: &str) -> Option<TagAction> {
        self.set_input(raw.to_string());

        let segments: Vec<String> = raw.split(',').map(|t| t.trim().to_lowercase()).collect();
        if segments.len() > 1 && !segments[0].is_empty() {
            return self.add_tag(&segments[0]);
        }
        None
    }

    /// Commit the buffer, as when focus leaves the input.
    pub fn blur(&mut self) -> Option<TagAction> {
        let value = self.input_value.clone();
        self.add_tag(&value)
    }

    /// Catalog entries whose lowercase form starts with the trimmed,
    /// lowercased `value`. Blank input suggests nothing.
    pub fn get_suggestions(&self, value: &str) -> Vec<String> {
        let needle = value.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.candidates
            .iter()
            .filter(|c| c.to_lowercase().starts_with(&needle))
            .cloned()
            .collect()
    }

    /// Commit a suggestion.
    pub fn select_suggestion(&mut self, suggestion: &str) -> Option<TagAction> {
        let suggestion = suggestion.to_string();
        self.add_tag(&suggestion)
    }

    fn set_input(&mut self, value: String) {
        self.suggestions = self.get_suggestions(&value);
        self.input_value = value;
        self.highlighted = None;
        self.focused_chip = None;
    }

    /// Pick the chip left of the current one, starting from the last.
    fn focus_previous_chip(&mut self) {
        if self.tags.is_empty() {
            return;
        }
        self.focused_chip = Some(match self.focused_chip {
            None => self.tags.len() - 1,
            Some(i) => i.saturating_sub(1),
        });
    }

    /// Pick the chip to the right. Moving past the last one returns to the
    /// buffer.
    fn focus_next_chip(&mut self) {
        self.focused_chip = match self.focused_chip {
            Some(i) if i + 1 < self.tags.len() => Some(i + 1),
            _ => None,
        };
    }

    /// Remove the picked chip and keep a neighbour picked.
    fn remove_focused_chip(&mut self) -> Option<TagAction> {
        let name = self.tags.get(self.focused_chip?)?.clone();
        let action = self.remove_tag(&name);
        self.clamp_focused_chip();
        action
    }

    fn clamp_focused_chip(&mut self) {
        self.focused_chip = match self.focused_chip {
            Some(_) if self.tags.is_empty() => None,
            Some(i) => Some(i.min(self.tags.len() - 1)),
            None => None,
        };
    }

    fn move_highlight(&mut self, down: bool) {
        if self.suggestions.is_empty() {
            self.highlighted = None;
            return;
        }
        let last = self.suggestions.len() - 1;
        self.highlighted = match (self.highlighted, down) {
            (None, true) => Some(0),
            (None, false) => Some(last),
            (Some(i), true) => Some((i + 1).min(last)),
            (Some(0), false) => None,
            (Some(i), false) => Some(i - 1),
        };
    }

    /// Handle a key press. Returns the changes to apply, in order.
    pub fn handle_input(&mut self, key: KeyEvent) -> Vec<TagAction> {
        if !self.visible {
            return Vec::new();
        }

        let action = match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                let committed = self.blur();
                self.close();
                return committed.into_iter().chain([TagAction::Close]).collect();
            }
            (KeyCode::Enter, _) => match self.highlighted {
                Some(i) => match self.suggestions.get(i).cloned() {
                    Some(suggestion) => self.select_suggestion(&suggestion),
                    None => None,
                },
                None => {
                    let value = self.input_value.clone();
                    self.add_tag(&value)
                }
            },
            (KeyCode::Left, _) if self.input_value.is_empty() => {
                self.focus_previous_chip();
                None
            }
            (KeyCode::Right, _) if self.focused_chip.is_some() => {
                self.focus_next_chip();
                None
            }
            (KeyCode::Delete, _) => self.remove_focused_chip(),
            (KeyCode::Backspace, _) if self.focused_chip.is_some() => self.remove_focused_chip(),
            (KeyCode::Backspace, _) => {
                if self.input_value.is_empty() {
                    self.remove_last_tag()
                } else {
                    let mut value = self.input_value.clone();
                    value.pop();
                    self.on_change(&value)
                }
            }
            (KeyCode::Down, _) => {
                self.move_highlight(true);
                None
            }
            (KeyCode::Up, _) => {
                self.move_highlight(false);
                None
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let value = format!("{}{}", self.input_value, c);
                self.on_change(&value)
            }
            _ => None,
        };

        action.into_iter().collect()
    }

    /// Render the editor as a centered dialog.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let width = 64u16.min(area.width.saturating_sub(4));
        let height = 16u16.min(area.height.saturating_sub(4));
        let dialog = centered_rect(width, height, area);

        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Edit Tags ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme().accent));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // chips + input
                Constraint::Length(MAX_SUGGESTIONS as u16),
                Constraint::Length(1), // help
            ])
            .split(inner);

        self.render_chips(frame, chunks[0]);
        self.render_suggestions(frame, chunks[1]);
        self.render_help(frame, chunks[2]);
    }

    fn render_chips(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let mut spans: Vec<Span> = Vec::new();
        for (i, tag) in self.tags.iter().enumerate() {
            let style = if self.focused_chip == Some(i) {
                t.chip().add_modifier(Modifier::REVERSED)
            } else {
                t.chip()
            };
            spans.push(Span::styled(format!(" {} ", tag), style));
            spans.push(Span::raw(" "));
        }

        if self.input_value.is_empty() {
            spans.push(Span::styled(PLACEHOLDER, t.muted()));
        } else {
            spans.push(Span::raw(self.input_value.as_str()));
        }
        spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));

        let paragraph = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn render_suggestions(&self, frame: &mut Frame, area: Rect) {
        if self.suggestions.is_empty() {
            return;
        }

        let items: Vec<ListItem> = self
            .suggestions
            .iter()
            .take(MAX_SUGGESTIONS)
            .map(|s| ListItem::new(s.as_str()))
            .collect();

        let list = List::new(items)
            .highlight_style(theme().highlight().add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(self.highlighted);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let confirm = Style::default().fg(t.selected);
        let navigate = Style::default().fg(t.warning);
        let help = Line::from(vec![
            Span::styled("Enter", confirm),
            Span::raw(": add  "),
            Span::styled(",", confirm),
            Span::raw(": add  "),
            Span::styled("Up/Down", navigate),
            Span::raw(": suggestions  "),
            Span::styled("Left/Right", navigate),
            Span::raw(": pick tag  "),
            Span::styled("Del", navigate),
            Span::raw(": remove  "),
            Span::styled("Esc", Style::default().fg(t.error)),
            Span::raw(": close"),
        ]);
        frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), area);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
