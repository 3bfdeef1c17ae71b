//! Search result list.
//!
//! [`ResultList::project`] turns the hit map and the active query into what
//! should be on screen: one row per hit, or a hint card when there is nothing
//! to show. [`ResultsView`] keeps the selection and draws the projection.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::api::Hit;
use crate::state::HitMap;
use crate::ui::theme::theme;

/// Title of the card shown when a query matched nothing.
pub const NOTHING_FOUND_TITLE: &str = "Nothing found";

/// Title of the card shown before any query was entered.
pub const SEARCH_TIPS_TITLE: &str = "Few tips for search";

/// One hit, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRow {
    pub file_id: String,
    pub title: String,
    pub source_id: String,
    pub author: Option<String>,
    /// Tag names with their pending flag.
    pub tags: Vec<(String, bool)>,
    /// Highlight fragments, once loaded.
    pub excerpt: Option<Vec<String>>,
    pub is_hidden: bool,
    pub fetching: bool,
}

impl From<&Hit> for HitRow {
    fn from(hit: &Hit) -> Self {
        Self {
            file_id: hit.file_id.clone(),
            title: hit.title().to_string(),
            source_id: hit.meta.source_id.clone(),
            author: hit.content.author.clone(),
            tags: hit
                .tags
                .iter()
                .map(|t| (t.name.clone(), t.is_fetching))
                .collect(),
            excerpt: hit.content.highlight.as_ref().map(|h| h.text.clone()),
            is_hidden: hit.is_hidden,
            fetching: hit.fetching,
        }
    }
}

/// What the result area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultList {
    /// Hits in result order.
    Rows(Vec<HitRow>),
    /// The query matched nothing.
    NothingFound { query: String },
    /// No query yet.
    SearchTips,
}

impl ResultList {
    /// Project the current result set.
    pub fn project(hits: Option<&HitMap>, search_query: &str) -> Self {
        match hits {
            Some(hits) if !hits.is_empty() => {
                ResultList::Rows(hits.iter().map(|hit| HitRow::from(hit.as_ref())).collect())
            }
            _ if !search_query.is_empty() => ResultList::NothingFound {
                query: search_query.to_string(),
            },
            _ => ResultList::SearchTips,
        }
    }

    /// Hint card title, for the non-row variants.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            ResultList::Rows(_) => None,
            ResultList::NothingFound { .. } => Some(NOTHING_FOUND_TITLE),
            ResultList::SearchTips => Some(SEARCH_TIPS_TITLE),
        }
    }

    /// Hint card body, for the non-row variants.
    pub fn description(&self) -> Option<String> {
        match self {
            ResultList::Rows(_) => None,
            ResultList::NothingFound { query } => Some(format!(
                "Your search - {} - did not match any documents",
                query
            )),
            ResultList::SearchTips => Some(
                "Just type your query in search input above and hit \"Enter\"".to_string(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ResultList::Rows(rows) => rows.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Selection over the result rows.
#[derive(Debug, Default)]
pub struct ResultsView {
    selected: usize,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Move down, stopping at the last row.
    pub fn select_next(&mut self, len: usize) {
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    /// Move up, stopping at the first row.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection inside `len` rows.
    pub fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Draw `list` into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, list: &ResultList, total: Option<u64>) {
        match list {
            ResultList::Rows(rows) => self.render_rows(frame, area, rows, total),
            _ => render_hint(frame, area, list),
        }
    }

    fn render_rows(&self, frame: &mut Frame, area: Rect, rows: &[HitRow], total: Option<u64>) {
        let title = match total {
            Some(total) => format!(" Results ({} of {}) ", rows.len(), total),
            None => format!(" Results ({}) ", rows.len()),
        };
        let block = Block::default().title(title).borders(Borders::ALL);

        let items: Vec<ListItem> = rows.iter().map(row_item).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(theme().highlight())
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.selected.min(rows.len().saturating_sub(1))));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

fn row_item(row: &HitRow) -> ListItem<'static> {
    let t = theme();
    let mut title_style = Style::default().add_modifier(Modifier::BOLD);
    if row.is_hidden {
        title_style = title_style.fg(t.muted).add_modifier(Modifier::CROSSED_OUT);
    }

    let mut header = vec![Span::styled(row.title.clone(), title_style)];
    if row.is_hidden {
        header.push(Span::styled("  [hidden]", Style::default().fg(t.error)));
    }

    let mut meta = vec![Span::styled(
        format!("source: {}", row.source_id),
        Style::default().fg(t.accent),
    )];
    if let Some(author) = &row.author {
        meta.push(Span::raw("  "));
        meta.push(Span::styled(
            format!("author: {}", author),
            Style::default().fg(t.author),
        ));
    }
    for (name, pending) in &row.tags {
        meta.push(Span::raw(" "));
        let style = if *pending {
            t.pending_chip()
        } else {
            t.chip()
        };
        let label = if *pending {
            format!(" {}… ", name)
        } else {
            format!(" {} ", name)
        };
        meta.push(Span::styled(label, style));
    }

    let mut lines = vec![Line::from(header), Line::from(meta)];
    if row.fetching {
        lines.push(Line::styled(
            "  loading preview...",
            t.muted(),
        ));
    } else if let Some(excerpt) = &row.excerpt {
        lines.extend(excerpt.iter().map(|fragment| emphasize(fragment)));
    }
    lines.push(Line::raw(""));

    ListItem::new(lines)
}

/// Render a highlight fragment, turning `<em>` runs into bold text.
fn emphasize(fragment: &str) -> Line<'static> {
    let em = Style::default()
        .fg(theme().warning)
        .add_modifier(Modifier::BOLD);
    let mut spans = vec![Span::raw("  ")];
    let mut rest = fragment;

    while let Some(start) = rest.find("<em>") {
        if start > 0 {
            spans.push(Span::raw(rest[..start].to_string()));
        }
        let after = &rest[start + 4..];
        match after.find("</em>") {
            Some(end) => {
                spans.push(Span::styled(after[..end].to_string(), em));
                rest = &after[end + 5..];
            }
            None => {
                spans.push(Span::styled(after.to_string(), em));
                rest = "";
            }
        }
    }
    if !rest.is_empty() {
        spans.push(Span::raw(rest.to_string()));
    }

    Line::from(spans)
}

fn render_hint(frame: &mut Frame, area: Rect, list: &ResultList) {
    let title = list.title().unwrap_or_default();
    let description = list.description().unwrap_or_default();

    let text = vec![
        Line::raw(""),
        Line::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::styled(description, Style::default().fg(theme().description)),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
