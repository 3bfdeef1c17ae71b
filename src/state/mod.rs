//! Application state and the actions that change it.
//!
//! [`Store`] owns the global UI state and the search page state. All changes
//! go through pure reducers that build a new state value from the old one;
//! the store only swaps the result in. Network work is queued as
//! [`ApiRequest`]s for the main loop to spawn, and completions come back
//! through [`Store::apply`].

mod hits;
pub mod layout;
pub mod query;
pub mod search_card;
mod search_page;

use tracing::{debug, info};

use crate::config::AppMode;
use crate::error::AppError;
use crate::tasks::{ApiMessage, ApiRequest};

pub use hits::HitMap;
pub use layout::{GlobalState, LayoutAction, LayoutProps, Location};
pub use query::Facet;
pub use search_card::CardAction;
pub use search_page::SearchPageState;

/// The owned application state aggregate.
#[derive(Debug)]
pub struct Store {
    global: GlobalState,
    search: SearchPageState,
    pending: Vec<ApiRequest>,
    page_size: u32,
}

impl Store {
    /// Create a store for the given backend edition and page size.
    pub fn new(mode: AppMode, page_size: u32) -> Self {
        Self {
            global: GlobalState::new(mode),
            search: SearchPageState::default(),
            pending: Vec::new(),
            page_size,
        }
    }

    /// Global UI state.
    pub fn global(&self) -> &GlobalState {
        &self.global
    }

    /// Search page state.
    pub fn search_page(&self) -> &SearchPageState {
        &self.search
    }

    /// Apply a card action to the search page state.
    pub fn dispatch(&mut self, action: CardAction) {
        self.search = search_card::reduce(&self.search, &action);
    }

    /// Apply a layout action to the global state.
    pub fn dispatch_layout(&mut self, action: LayoutAction) {
        self.global = layout::reduce(&self.global, &action);
    }

    /// Queue a request for the main loop.
    pub fn request(&mut self, request: ApiRequest) {
        self.pending.push(request);
    }

    /// Drain queued requests, in the order they were issued.
    pub fn take_requests(&mut self) -> Vec<ApiRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Requests queued but not yet taken.
    pub fn pending_requests(&self) -> &[ApiRequest] {
        &self.pending
    }

    /// Load the tag catalog and the source list.
    pub fn bootstrap(&mut self) {
        self.request(ApiRequest::FetchTags);
        self.request(ApiRequest::FetchSources);
    }

    /// Set the query shown in the search input.
    pub fn set_query(&mut self, query: &str) {
        self.dispatch_layout(LayoutAction::SetQuery(query.to_string()));
    }

    /// Start a search. The result set replaces the current one when it
    /// arrives.
    pub fn perform_search(&mut self, page: u32, query: &str) {
        info!(query = %query, page, "Performing search");
        self.search.search_query = query.to_string();
        self.search.fetching = true;
        self.dispatch_layout(LayoutAction::SetFetching(true));
        let sources = self.source_scope(query);
        self.request(ApiRequest::Search {
            query: query.to_string(),
            page,
            size: self.page_size,
            sources,
        });
    }

    /// Selected source ids when the selection narrows the search.
    ///
    /// Empty when every source is selected, when none is, or when `query`
    /// already names a source itself.
    fn source_scope(&self, query: &str) -> Vec<String> {
        if Facet::Source.is_present(query) {
            return Vec::new();
        }
        let sources = &self.global.sources;
        let selected: Vec<String> = sources
            .iter()
            .filter(|s| s.selected)
            .map(|s| s.id.clone())
            .collect();
        if selected.is_empty() || selected.len() == sources.len() {
            return Vec::new();
        }
        selected
    }

    /// Apply a completed request. Returns the error to surface, if any.
    pub fn apply(&mut self, message: ApiMessage) -> Option<AppError> {
        match message {
            ApiMessage::SearchCompleted {
                query,
                page,
                result,
            } => self.on_search_completed(query, page, result),
            ApiMessage::HighlightLoaded { file_id, result } => {
                self.on_highlight_loaded(file_id, result)
            }
            ApiMessage::TagAdded {
                file_id,
                tag,
                result,
            } => self.on_tag_added(file_id, tag, result),
            ApiMessage::TagRemoved {
                file_id, result, ..
            } => self.on_tag_removed(file_id, result),
            ApiMessage::FileHidden { file_id, result } => {
                self.on_visibility_changed("hideFile", file_id, result)
            }
            ApiMessage::FileShown { file_id, result } => {
                self.on_visibility_changed("showFile", file_id, result)
            }
            ApiMessage::TagsFetched(result) => match result {
                Ok(tags) => {
                    debug!(count = tags.len(), "Tag catalog loaded");
                    self.search.tags = tags;
                    None
                }
                Err(e) => Some(AppError::request("loadTags", e)),
            },
            ApiMessage::SourcesFetched(result) => match result {
                Ok(sources) => {
                    self.dispatch_layout(LayoutAction::SetSources(sources));
                    None
                }
                Err(e) => Some(AppError::request("loadSources", e)),
            },
        }
    }

    fn on_search_completed(
        &mut self,
        query: String,
        page: u32,
        result: Result<crate::api::SearchResult, String>,
    ) -> Option<AppError> {
        if query != self.search.search_query {
            debug!(stale = %query, current = %self.search.search_query, "Ignoring stale search result");
            return None;
        }

        self.search.fetching = false;
        self.dispatch_layout(LayoutAction::SetFetching(false));

        match result {
            Ok(result) => {
                self.search.total = result.total;
                self.search.hits = HitMap::from_hits(result.into_hits());
                info!(page, hits = self.search.hits.len(), "Search completed");
                None
            }
            Err(e) => {
                tracing::error!(query = %query, error = %e, "performSearch failed");
                Some(AppError::request("performSearch", e))
            }
        }
    }
}
