//! Main application state and update logic.
//!
//! The App follows The Elm Architecture: [`App::update`] and
//! [`App::handle_api_message`] change state, [`App::view`] draws it. All
//! network work leaves through [`App::take_requests`] and comes back as
//! [`ApiMessage`]s, so the App itself never needs a runtime.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tracing::{debug, error, info, trace, warn};

use crate::api::Hit;
use crate::config::Settings;
use crate::error::AppError;
use crate::events::Event;
use crate::state::{Facet, LayoutAction, LayoutProps, Location, Store};
use crate::tasks::{ApiMessage, ApiRequest};
use crate::ui::{
    render_shell, HelpAction, HelpView, InputAction, NotificationManager, RefineAction,
    RefinePanel, ResultList, ResultsView, Spinner, TagAction, TagEditor, TextInput,
};
use crate::ui::theme::theme;

/// Which widget receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The result list.
    #[default]
    Results,
    /// The search input in the header.
    SearchInput,
    /// The tag editor dialog.
    TagEditor,
    /// The refine-search panel.
    RefineSearch,
}

/// The main application struct that holds all state.
pub struct App {
    store: Store,
    settings: Settings,
    focus: Focus,
    should_quit: bool,
    results: ResultsView,
    search_input: TextInput,
    tag_editor: TagEditor,
    refine: RefinePanel,
    help: HelpView,
    notifications: NotificationManager,
    spinner: Spinner,
    /// Message of a critical error, shown until dismissed.
    error_dialog: Option<String>,
}

impl App {
    /// Create the app and queue the initial catalog loads. A non-empty
    /// `initial_query` is searched right away.
    pub fn new(settings: Settings, initial_query: Option<&str>) -> Self {
        debug!(?settings, "Creating application");

        let mut store = Store::new(settings.mode, settings.page_size);
        store.bootstrap();

        let mut app = Self {
            store,
            settings,
            focus: Focus::SearchInput,
            should_quit: false,
            results: ResultsView::new(),
            search_input: TextInput::new().with_placeholder("Type a query and press Enter"),
            tag_editor: TagEditor::new(),
            refine: RefinePanel::new(),
            help: HelpView::new(),
            notifications: NotificationManager::new(),
            spinner: Spinner::new(),
            error_dialog: None,
        };

        if let Some(query) = initial_query.filter(|q| !q.is_empty()) {
            app.submit_search(query);
        }
        app
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    pub fn tag_editor(&self) -> &TagEditor {
        &self.tag_editor
    }

    pub fn is_error_dialog_visible(&self) -> bool {
        self.error_dialog.is_some()
    }

    /// Requests queued since the last call, for the main loop to spawn.
    pub fn take_requests(&mut self) -> Vec<ApiRequest> {
        self.store.take_requests()
    }

    /// Show an error to the user. Critical errors open a dialog, the rest
    /// become toasts.
    pub fn handle_error(&mut self, error: &AppError) {
        if error.is_critical() {
            error!(error = %error, "Critical error");
            self.error_dialog = Some(error.user_message());
        } else {
            warn!(error = %error, "Request failed");
            self.notifications.error(error.user_message());
        }
    }

    /// Apply the outcome of a background request.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        let tags_changed = match &message {
            ApiMessage::TagAdded {
                file_id,
                result: Ok(_),
                ..
            }
            | ApiMessage::TagRemoved {
                file_id,
                result: Ok(_),
                ..
            } => Some(file_id.clone()),
            _ => None,
        };
        let search_done = matches!(message, ApiMessage::SearchCompleted { .. });

        if let Some(error) = self.store.apply(message) {
            self.handle_error(&error);
        }

        if let Some(file_id) = tags_changed {
            self.sync_tag_editor(&file_id);
        }
        if search_done {
            self.results.clamp(self.store.search_page().hits.len());
            self.preview_selected();
        }
    }

    /// Process one terminal event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                self.handle_key_event(key);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {
                self.notifications.tick();
                self.spinner.tick(self.store.global().fetching);
            }
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            info!("Quit requested");
            self.should_quit = true;
            return;
        }

        if self.error_dialog.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.error_dialog = None;
            }
            return;
        }

        if self.store.global().location == Location::Help {
            if self.help.handle_input(key) == Some(HelpAction::Close) {
                self.change_location(Location::Search);
            }
            return;
        }

        match self.focus {
            Focus::SearchInput => self.handle_search_input(key),
            Focus::TagEditor => self.handle_tag_editor(key),
            Focus::RefineSearch => self.handle_refine(key),
            Focus::Results => self.handle_results(key),
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) {
        match self.search_input.handle_input(key) {
            Some(InputAction::Changed) => {
                let query = self.search_input.value().to_string();
                self.store.set_query(&query);
            }
            Some(InputAction::Submit(query)) => self.submit_search(&query),
            Some(InputAction::Cancel) => self.focus = Focus::Results,
            None => {}
        }
    }

    fn handle_tag_editor(&mut self, key: KeyEvent) {
        let Some(file_id) = self.tag_editor.file_id().map(str::to_string) else {
            self.focus = Focus::Results;
            return;
        };

        for action in self.tag_editor.handle_input(key) {
            match action {
                TagAction::Add(tag) => self.store.add_tag_to_file(&file_id, &tag),
                TagAction::Remove(tag) => self.store.remove_tag_from_file(&file_id, &tag),
                TagAction::Close => self.focus = Focus::Results,
            }
        }
    }

    fn handle_refine(&mut self, key: KeyEvent) {
        let sources = self.store.global().sources.clone();
        match self.refine.handle_input(key, &sources) {
            Some(RefineAction::ToggleSource(id)) => {
                self.store
                    .dispatch_layout(LayoutAction::ToggleSourceSelected(id));
            }
            Some(RefineAction::SearchBySource(id)) => {
                self.close_refine();
                self.store.perform_search_by_source(&id);
                self.after_facet_search();
            }
            Some(RefineAction::Close) => self.close_refine(),
            None => {}
        }
    }

    /// Switch screens and retitle the header.
    fn change_location(&mut self, location: Location) {
        self.store
            .dispatch_layout(LayoutAction::ChangeLocation(location));
        self.store
            .dispatch_layout(LayoutAction::SetHeader(location.title().to_string()));
    }

    fn close_refine(&mut self) {
        if self.store.global().is_refine_search_modal_open {
            self.store
                .dispatch_layout(LayoutAction::ToggleRefineSearchModal);
        }
        self.focus = Focus::Results;
    }

    fn handle_results(&mut self, key: KeyEvent) {
        if key.modifiers != KeyModifiers::NONE && key.modifiers != KeyModifiers::SHIFT {
            return;
        }

        let len = self.store.search_page().hits.len();
        match key.code {
            KeyCode::Char('q') => {
                info!("Quit requested");
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.help.reset_scroll();
                self.change_location(Location::Help);
            }
            KeyCode::Char('/') => self.focus = Focus::SearchInput,
            KeyCode::Char('m') => self.store.dispatch_layout(LayoutAction::ToggleSideMenu),
            KeyCode::Char('r') => {
                self.store
                    .dispatch_layout(LayoutAction::ToggleRefineSearchModal);
                self.focus = Focus::RefineSearch;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.results.select_next(len);
                self.preview_selected();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.results.select_previous();
                self.preview_selected();
            }
            KeyCode::Char('p') => {
                if let Some(hit) = self.selected_hit() {
                    let query = self.store.search_page().search_query.clone();
                    self.store.load_highlight(&hit.file_id, &query);
                }
            }
            KeyCode::Char('t') => self.open_tag_editor(),
            KeyCode::Char('x') => {
                if let Some(hit) = self.selected_hit() {
                    if hit.is_hidden {
                        self.store.show_file(&hit.file_id);
                    } else {
                        self.store.hide_file(&hit.file_id);
                    }
                }
            }
            KeyCode::Char('a') => {
                self.search_selected_by(Facet::Author, |hit| hit.content.author.clone())
            }
            KeyCode::Char('s') => {
                self.search_selected_by(Facet::Source, |hit| Some(hit.meta.source_id.clone()))
            }
            KeyCode::Char('f') => {
                self.search_selected_by(Facet::Path, |hit| Some(hit.meta.full_name.clone()))
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.search_selected_by(Facet::Tag, |hit| {
                    hit.tags.get(index).map(|t| t.name.clone())
                });
            }
            _ => {}
        }
    }

    fn selected_hit(&self) -> Option<Arc<Hit>> {
        self.store
            .search_page()
            .hits
            .get_index(self.results.selected())
            .cloned()
    }

    /// Run a facet search using a value taken from the selected hit.
    fn search_selected_by<F>(&mut self, facet: Facet, value: F)
    where
        F: FnOnce(&Hit) -> Option<String>,
    {
        let Some(hit) = self.selected_hit() else {
            return;
        };
        let Some(value) = value(&hit).filter(|v| !v.is_empty()) else {
            self.notifications
                .warning(format!("This file has no {} to search by", facet.keyword()));
            return;
        };

        match facet {
            Facet::Author => self.store.perform_search_by_author(&value),
            Facet::Source => self.store.perform_search_by_source(&value),
            Facet::Path => self.store.perform_search_by_path_to_file(&value),
            Facet::Tag => self.store.perform_search_by_tag(&value),
        }
        self.after_facet_search();
    }

    fn after_facet_search(&mut self) {
        let query = self.store.global().query.clone();
        self.search_input.set_value(query);
        self.results.reset();
    }

    fn submit_search(&mut self, query: &str) {
        self.search_input.set_value(query);
        self.store.set_query(query);
        self.store.perform_search(0, query);
        self.results.reset();
        self.focus = Focus::Results;
    }

    fn open_tag_editor(&mut self) {
        let Some(hit) = self.selected_hit() else {
            return;
        };
        let tags = hit.tag_names().into_iter().map(str::to_string).collect();
        let catalog = self.store.search_page().tags.clone();
        self.tag_editor.open(hit.file_id.clone(), tags, catalog);
        self.focus = Focus::TagEditor;
    }

    /// Keep the open editor in step with the backend's canonical tags.
    fn sync_tag_editor(&mut self, file_id: &str) {
        if self.tag_editor.file_id() != Some(file_id) {
            return;
        }
        if let Some(hit) = self.store.search_page().hits.get(file_id) {
            let tags = hit.tag_names().into_iter().map(str::to_string).collect();
            self.tag_editor.sync_tags(tags);
        }
    }

    /// Load the preview of the selected hit when previews are automatic.
    fn preview_selected(&mut self) {
        if !self.settings.show_file_preview {
            return;
        }
        if let Some(hit) = self.selected_hit() {
            if hit.content.highlight.is_none() && !hit.fetching {
                let query = self.store.search_page().search_query.clone();
                self.store.load_highlight(&hit.file_id, &query);
            }
        }
    }

    /// Render the application.
    pub fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        let global = self.store.global();
        let props = LayoutProps::from_state(global);

        let content = render_shell(
            frame,
            area,
            &props,
            &self.search_input,
            self.focus == Focus::SearchInput,
            &self.spinner,
        );

        if global.location == Location::Help {
            self.help.render(frame, content);
        } else {
            let page = self.store.search_page();
            let list = ResultList::project(Some(&page.hits), &page.search_query);
            self.results.render(frame, content, &list, page.total);
        }

        if props.is_refine_search_modal_open {
            self.refine.render(frame, area, &props);
        }
        self.tag_editor.render(frame, area);
        self.notifications.render(frame, area);

        if let Some(message) = &self.error_dialog {
            render_error_dialog(frame, area, message);
        }
    }
}

fn render_error_dialog(frame: &mut Frame, area: Rect, message: &str) {
    let width = 60u16.min(area.width.saturating_sub(4));
    let height = 7u16.min(area.height);
    let dialog = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, dialog);

    let text = format!("{}\n\nPress Enter or Esc to dismiss", message);
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme().error)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, dialog);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{HitTag, SearchResult, Source};
    use crate::config::ConfigError;

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn code(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.update(key(c));
        }
    }

    fn sample_hits() -> Vec<Hit> {
        let mut first = Hit::new("h1").with_tags(["draft", "final"]);
        first.meta.full_name = "/docs/q3 report.pdf".to_string();
        first.meta.source_id = "docs".to_string();
        first.content.author = Some("Jane Doe".to_string());

        let mut second = Hit::new("h2");
        second.meta.source_id = "mail".to_string();
        vec![first, second]
    }

    /// An app with a completed search for "budget" and the queue drained.
    fn app_with_results() -> App {
        let mut app = App::new(Settings::default(), Some("budget"));
        app.take_requests();
        app.handle_api_message(ApiMessage::SearchCompleted {
            query: "budget".to_string(),
            page: 0,
            result: Ok(SearchResult {
                hits: sample_hits(),
                total: Some(2),
                took: Some(3),
            }),
        });
        app
    }

    fn last_search(requests: &[ApiRequest]) -> Option<&str> {
        requests.iter().rev().find_map(|r| match r {
            ApiRequest::Search { query, .. } => Some(query.as_str()),
            _ => None,
        })
    }

    #[test]
    fn test_new_queues_catalog_loads() {
        let mut app = App::new(Settings::default(), None);
        assert_eq!(app.focus(), Focus::SearchInput);
        assert_eq!(
            app.take_requests(),
            vec![ApiRequest::FetchTags, ApiRequest::FetchSources]
        );
    }

    #[test]
    fn test_initial_query_searches() {
        let mut app = App::new(Settings::default(), Some("budget"));
        let requests = app.take_requests();
        assert_eq!(last_search(&requests), Some("budget"));
        assert_eq!(app.focus(), Focus::Results);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_with_results();
        app.update(key('q'));
        assert!(app.should_quit());

        let mut app = app_with_results();
        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
    }

    #[test]
    fn test_q_types_into_search_input() {
        let mut app = App::new(Settings::default(), None);
        type_str(&mut app, "quarterly");
        assert!(!app.should_quit());
        assert_eq!(app.store().global().query, "quarterly");
    }

    #[test]
    fn test_enter_in_search_input_performs_search() {
        let mut app = app_with_results();
        app.update(key('/'));
        assert_eq!(app.focus(), Focus::SearchInput);

        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('u'),
            KeyModifiers::CONTROL,
        )));
        type_str(&mut app, "invoice");
        app.update(code(KeyCode::Enter));

        assert_eq!(app.focus(), Focus::Results);
        assert_eq!(app.store().search_page().search_query, "invoice");
        assert!(app.store().global().fetching);
        assert_eq!(
            app.take_requests(),
            vec![ApiRequest::Search {
                query: "invoice".to_string(),
                page: 0,
                size: 20,
                sources: Vec::new(),
            }]
        );
    }

    #[test]
    fn test_hide_and_show_selected_file() {
        let mut app = app_with_results();
        app.update(key('x'));
        assert!(app.store().search_page().hits.get("h1").unwrap().is_hidden);

        app.update(key('x'));
        assert!(!app.store().search_page().hits.get("h1").unwrap().is_hidden);
        assert_eq!(
            app.take_requests(),
            vec![
                ApiRequest::HideFile {
                    file_id: "h1".to_string()
                },
                ApiRequest::ShowFile {
                    file_id: "h1".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_navigation_targets_second_hit() {
        let mut app = app_with_results();
        app.update(key('j'));
        app.update(key('j'));
        app.update(key('p'));
        assert_eq!(
            app.take_requests(),
            vec![ApiRequest::LoadHighlight {
                file_id: "h2".to_string(),
                query: "budget".to_string()
            }]
        );
        assert!(app.store().search_page().hits.get("h2").unwrap().fetching);
    }

    #[test]
    fn test_tag_editor_adds_and_syncs() {
        let mut app = app_with_results();
        app.update(key('t'));
        assert_eq!(app.focus(), Focus::TagEditor);
        assert_eq!(app.tag_editor().tags(), ["draft", "final"]);

        type_str(&mut app, "Urgent,");
        assert_eq!(
            app.take_requests(),
            vec![ApiRequest::AddTag {
                file_id: "h1".to_string(),
                tag: "urgent".to_string()
            }]
        );
        let tags = &app.store().search_page().hits.get("h1").unwrap().tags;
        assert_eq!(tags.last(), Some(&HitTag::pending("urgent")));

        app.handle_api_message(ApiMessage::TagAdded {
            file_id: "h1".to_string(),
            tag: "urgent".to_string(),
            result: Ok(vec!["draft".to_string(), "urgent".to_string()]),
        });
        assert_eq!(app.tag_editor().tags(), ["draft", "urgent"]);

        app.update(code(KeyCode::Esc));
        assert_eq!(app.focus(), Focus::Results);
        assert!(!app.tag_editor().is_visible());
    }

    #[test]
    fn test_tag_editor_backspace_removes_tag() {
        let mut app = app_with_results();
        app.update(key('t'));
        app.update(code(KeyCode::Backspace));
        assert_eq!(
            app.take_requests(),
            vec![ApiRequest::RemoveTag {
                file_id: "h1".to_string(),
                tag: "final".to_string()
            }]
        );
        assert_eq!(
            app.store().search_page().hits.get("h1").unwrap().tag_names(),
            vec!["draft"]
        );
    }

    #[test]
    fn test_tag_editor_delete_removes_picked_middle_tag() {
        let mut app = app_with_results();
        app.update(key('t'));
        type_str(&mut app, "review,");
        app.handle_api_message(ApiMessage::TagAdded {
            file_id: "h1".to_string(),
            tag: "review".to_string(),
            result: Ok(vec![
                "draft".to_string(),
                "final".to_string(),
                "review".to_string(),
            ]),
        });
        app.take_requests();
        assert_eq!(app.tag_editor().tags(), ["draft", "final", "review"]);

        app.update(code(KeyCode::Left));
        app.update(code(KeyCode::Left));
        app.update(code(KeyCode::Delete));

        assert_eq!(
            app.take_requests(),
            vec![ApiRequest::RemoveTag {
                file_id: "h1".to_string(),
                tag: "final".to_string()
            }]
        );
        assert_eq!(app.tag_editor().tags(), ["draft", "review"]);
        assert_eq!(
            app.store().search_page().hits.get("h1").unwrap().tag_names(),
            vec!["draft", "review"]
        );
    }

    #[test]
    fn test_search_by_author() {
        let mut app = app_with_results();
        app.update(key('a'));
        assert_eq!(
            last_search(&app.take_requests()),
            Some("budget author:Jane?Doe")
        );
    }

    #[test]
    fn test_search_by_nth_tag() {
        let mut app = app_with_results();
        app.update(key('2'));
        assert_eq!(last_search(&app.take_requests()), Some("budget tags:final"));
        assert_eq!(app.store().global().query, "budget tags:final");
    }

    #[test]
    fn test_search_by_missing_author_notifies() {
        let mut app = app_with_results();
        app.update(key('j'));
        app.update(key('a'));
        assert!(app.take_requests().is_empty());
        assert_eq!(app.notifications().len(), 1);
    }

    #[test]
    fn test_failed_request_shows_toast() {
        let mut app = app_with_results();
        app.update(key('x'));
        app.handle_api_message(ApiMessage::FileHidden {
            file_id: "h1".to_string(),
            result: Err("Ambar server error: boom".to_string()),
        });
        assert_eq!(app.notifications().len(), 1);
        assert!(!app.is_error_dialog_visible());
        assert!(app.store().search_page().hits.get("h1").unwrap().is_hidden);
    }

    #[test]
    fn test_critical_error_opens_dialog() {
        let mut app = app_with_results();
        app.handle_error(&AppError::Config(ConfigError::NoConfigDir));
        assert!(app.is_error_dialog_visible());

        app.update(key('q'));
        assert!(!app.should_quit());
        app.update(code(KeyCode::Enter));
        assert!(!app.is_error_dialog_visible());
    }

    #[test]
    fn test_help_toggle() {
        let mut app = app_with_results();
        app.update(key('?'));
        assert_eq!(app.store().global().location, Location::Help);
        assert!(!app.store().global().show_search_input);

        assert_eq!(app.store().global().header, "Help");

        app.update(code(KeyCode::Esc));
        assert_eq!(app.store().global().location, Location::Search);
        assert!(app.store().global().show_search_input);
        assert_eq!(app.store().global().header, "Search");
    }

    #[test]
    fn test_side_menu_toggle() {
        let mut app = app_with_results();
        app.update(key('m'));
        assert!(app.store().global().is_side_menu_open);
        app.update(key('m'));
        assert!(!app.store().global().is_side_menu_open);
    }

    #[test]
    fn test_refine_panel_search_by_source() {
        let mut app = app_with_results();
        app.handle_api_message(ApiMessage::SourcesFetched(Ok(vec![
            Source::new("docs"),
            Source::new("mail"),
        ])));

        app.update(key('r'));
        assert_eq!(app.focus(), Focus::RefineSearch);
        assert!(app.store().global().is_refine_search_modal_open);

        app.update(key('j'));
        app.update(code(KeyCode::Enter));

        assert_eq!(app.focus(), Focus::Results);
        assert!(!app.store().global().is_refine_search_modal_open);
        let selected: Vec<bool> = app.store().global().sources.iter().map(|s| s.selected).collect();
        assert_eq!(selected, vec![false, true]);
        assert_eq!(last_search(&app.take_requests()), Some("budget source:mail"));
    }

    #[test]
    fn test_deselected_source_limits_next_search() {
        let mut app = app_with_results();
        app.handle_api_message(ApiMessage::SourcesFetched(Ok(vec![
            Source::new("docs"),
            Source::new("mail"),
        ])));

        app.update(key('r'));
        app.update(key(' '));
        app.update(code(KeyCode::Esc));
        assert_eq!(app.focus(), Focus::Results);

        app.update(key('/'));
        app.update(code(KeyCode::Enter));

        let searches: Vec<ApiRequest> = app
            .take_requests()
            .into_iter()
            .filter(|r| matches!(r, ApiRequest::Search { .. }))
            .collect();
        assert_eq!(
            searches.last(),
            Some(&ApiRequest::Search {
                query: "budget".to_string(),
                page: 0,
                size: 20,
                sources: vec!["mail".to_string()],
            })
        );
    }

    #[test]
    fn test_automatic_preview() {
        let settings = Settings {
            show_file_preview: true,
            ..Settings::default()
        };
        let mut app = App::new(settings, Some("budget"));
        app.take_requests();
        app.handle_api_message(ApiMessage::SearchCompleted {
            query: "budget".to_string(),
            page: 0,
            result: Ok(SearchResult {
                hits: sample_hits(),
                ..SearchResult::default()
            }),
        });

        assert_eq!(
            app.take_requests(),
            vec![ApiRequest::LoadHighlight {
                file_id: "h1".to_string(),
                query: "budget".to_string()
            }]
        );
    }

    #[test]
    fn test_tick_keeps_fresh_toasts() {
        let mut app = app_with_results();
        app.handle_error(&AppError::request("loadHighlight", "boom"));
        app.update(Event::Tick);
        assert_eq!(app.notifications().len(), 1);
    }
}
