//! The shell around the page: header, search input, side menu, status bar
//! and the refine-search panel.
//!
//! Everything here draws from [`LayoutProps`] only.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::api::Source;
use crate::state::LayoutProps;
use crate::ui::components::{Spinner, TextInput};
use crate::ui::theme::theme;

const SIDE_MENU_WIDTH: u16 = 28;

/// Draw the shell and return the area left for the page.
pub fn render_shell(
    frame: &mut Frame,
    area: Rect,
    props: &LayoutProps<'_>,
    input: &TextInput,
    input_focused: bool,
    spinner: &Spinner,
) -> Rect {
    let input_height = if props.show_search_input { 3 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(input_height),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, rows[0], props, spinner);
    if props.show_search_input {
        input.render(frame, rows[1], "Search", input_focused);
    }
    render_status(frame, rows[3], props);

    if !props.is_side_menu_open {
        return rows[2];
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDE_MENU_WIDTH), Constraint::Min(1)])
        .split(rows[2]);
    render_side_menu(frame, columns[0], props);
    columns[1]
}

fn render_header(frame: &mut Frame, area: Rect, props: &LayoutProps<'_>, spinner: &Spinner) {
    let t = theme();
    let style = Style::default().bg(t.header_bg).add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(format!(" Ambar {} ", props.mode), style),
        Span::styled(format!("| {} ", props.header), style),
    ];
    if props.fetching {
        spans.push(Span::styled(format!("{} searching ", spinner.frame()), style));
    }

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(t.header_bg));
    frame.render_widget(header, area);
}

fn render_status(frame: &mut Frame, area: Rect, props: &LayoutProps<'_>) {
    let t = theme();
    let selected = props.sources.iter().filter(|s| s.selected).count();
    let line = Line::from(vec![
        Span::styled(format!(" {} ", props.location), t.title()),
        Span::styled(
            format!(" sources {}/{} ", selected, props.sources.len()),
            t.muted(),
        ),
        Span::styled(" ? help  m menu  r refine  q quit", t.muted()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_side_menu(frame: &mut Frame, area: Rect, props: &LayoutProps<'_>) {
    let t = theme();
    let block = Block::default().title(" Sources ").borders(Borders::ALL);

    if props.sources.is_empty() {
        let empty = Paragraph::new("No sources").style(t.muted()).block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = props.sources.iter().map(source_item).collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn source_item(source: &Source) -> ListItem<'static> {
    let t = theme();
    let (mark, style) = if source.selected {
        ("[x] ", Style::default().fg(t.selected))
    } else {
        ("[ ] ", t.muted())
    };
    ListItem::new(Line::from(vec![
        Span::styled(mark, style),
        Span::raw(source.id.clone()),
    ]))
}

/// What the refine-search panel asks the host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefineAction {
    /// Flip one source's selection.
    ToggleSource(String),
    /// Search only this source.
    SearchBySource(String),
    Close,
}

/// Cursor over the source list in the refine-search panel.
#[derive(Debug, Default)]
pub struct RefinePanel {
    cursor: usize,
}

impl RefinePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn handle_input(&mut self, key: KeyEvent, sources: &[Source]) -> Option<RefineAction> {
        let current = sources.get(self.cursor).map(|s| s.id.clone());
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('r'), KeyModifiers::NONE) => {
                Some(RefineAction::Close)
            }
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                if self.cursor + 1 < sources.len() {
                    self.cursor += 1;
                }
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            (KeyCode::Char(' '), _) => current.map(RefineAction::ToggleSource),
            (KeyCode::Enter, _) => current.map(RefineAction::SearchBySource),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, props: &LayoutProps<'_>) {
        let t = theme();
        let width = 44u16.min(area.width.saturating_sub(4));
        let height = (props.sources.len() as u16 + 4).min(area.height.saturating_sub(2));
        let dialog = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Refine search ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));

        let items: Vec<ListItem> = props.sources.iter().map(source_item).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        if !props.sources.is_empty() {
            state.select(Some(self.cursor.min(props.sources.len() - 1)));
        }
        frame.render_stateful_widget(list, dialog, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources() -> Vec<Source> {
        vec![Source::new("docs"), Source::new("mail")]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_refine_navigation_and_toggle() {
        let mut panel = RefinePanel::new();
        let sources = sources();

        assert_eq!(
            panel.handle_input(key(KeyCode::Char(' ')), &sources),
            Some(RefineAction::ToggleSource("docs".to_string()))
        );

        panel.handle_input(key(KeyCode::Char('j')), &sources);
        panel.handle_input(key(KeyCode::Char('j')), &sources);
        assert_eq!(panel.cursor(), 1);

        assert_eq!(
            panel.handle_input(key(KeyCode::Enter), &sources),
            Some(RefineAction::SearchBySource("mail".to_string()))
        );
    }

    #[test]
    fn test_refine_close() {
        let mut panel = RefinePanel::new();
        assert_eq!(
            panel.handle_input(key(KeyCode::Esc), &[]),
            Some(RefineAction::Close)
        );
        assert_eq!(
            panel.handle_input(key(KeyCode::Char('r')), &[]),
            Some(RefineAction::Close)
        );
    }

    #[test]
    fn test_refine_empty_sources() {
        let mut panel = RefinePanel::new();
        assert_eq!(panel.handle_input(key(KeyCode::Enter), &[]), None);
        panel.handle_input(key(KeyCode::Char('j')), &[]);
        assert_eq!(panel.cursor(), 0);
    }
}
