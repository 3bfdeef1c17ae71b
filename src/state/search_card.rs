//! Search-card actions: highlight loading, tagging and hiding of single hits.
//!
//! Every operation follows the same three steps. It dispatches an optimistic
//! [`CardAction`] right away, queues one [`ApiRequest`], and when the matching
//! [`ApiMessage`] arrives either confirms/reconciles the record or surfaces
//! the error. Failed requests do not roll the optimistic change back.

use tracing::{debug, error, info, warn};

use super::query::Facet;
use super::search_page::SearchPageState;
use super::{LayoutAction, Store};
use crate::api::{ContentHighlight, HiddenMark, Hit, HitTag};
use crate::error::AppError;
use crate::tasks::ApiRequest;

/// State transitions on a single hit record.
#[derive(Debug, Clone, PartialEq)]
pub enum CardAction {
    /// Set or clear the highlight-loading flag.
    StartStopHighlightLoading { file_id: String, fetching: bool },
    /// Store a fetched highlight.
    SetContentHighlight {
        file_id: String,
        highlight: ContentHighlight,
    },
    /// Append an unconfirmed tag.
    AddTag { file_id: String, tag: String },
    /// Drop a tag by name.
    RemoveTag { file_id: String, tag: String },
    /// Clear the pending flag of a tag.
    MarkTagAsCreated { file_id: String, tag: String },
    /// Replace the tag list with the backend's canonical list.
    SetTags { file_id: String, tags: Vec<String> },
    /// Set the hidden flag and marker together.
    ToggleIsHiddenFile { file_id: String, value: bool },
}

impl CardAction {
    /// The record this action targets.
    pub fn file_id(&self) -> &str {
        match self {
            CardAction::StartStopHighlightLoading { file_id, .. }
            | CardAction::SetContentHighlight { file_id, .. }
            | CardAction::AddTag { file_id, .. }
            | CardAction::RemoveTag { file_id, .. }
            | CardAction::MarkTagAsCreated { file_id, .. }
            | CardAction::SetTags { file_id, .. }
            | CardAction::ToggleIsHiddenFile { file_id, .. } => file_id,
        }
    }
}

/// Apply a card action, producing the next search page state.
///
/// The target record is rebuilt and swapped in whole. An action for a file
/// that is not in the current result set leaves the state as it was.
pub fn reduce(state: &SearchPageState, action: &CardAction) -> SearchPageState {
    let file_id = action.file_id();
    let Some(hits) = state.hits.with_updated(file_id, |old| apply(old, action)) else {
        debug!(file_id, "Card action for unknown hit ignored");
        return state.clone();
    };

    SearchPageState {
        hits,
        ..state.clone()
    }
}

fn apply(old: &Hit, action: &CardAction) -> Hit {
    let mut hit = old.clone();
    match action {
        CardAction::StartStopHighlightLoading { fetching, .. } => hit.fetching = *fetching,
        CardAction::SetContentHighlight { highlight, .. } => {
            hit.content.highlight = Some(highlight.clone())
        }
        CardAction::AddTag { tag, .. } => hit.tags.push(HitTag::pending(tag.as_str())),
        CardAction::RemoveTag { tag, .. } => hit.tags.retain(|t| &t.name != tag),
        CardAction::MarkTagAsCreated { tag, .. } => {
            for t in hit.tags.iter_mut().filter(|t| &t.name == tag) {
                t.is_fetching = false;
            }
        }
        CardAction::SetTags { tags, .. } => {
            hit.tags = tags.iter().map(|t| HitTag::confirmed(t.as_str())).collect()
        }
        CardAction::ToggleIsHiddenFile { value, .. } => {
            hit.is_hidden = *value;
            hit.hidden_mark = value.then(HiddenMark::default);
        }
    }
    hit
}

impl Store {
    /// Start loading the highlight of `file_id` for `query`.
    pub fn load_highlight(&mut self, file_id: &str, query: &str) {
        if !self.has_hit(file_id, "loadHighlight") {
            return;
        }
        self.dispatch(CardAction::StartStopHighlightLoading {
            file_id: file_id.to_string(),
            fetching: true,
        });
        self.request(ApiRequest::LoadHighlight {
            file_id: file_id.to_string(),
            query: query.to_string(),
        });
    }

    /// Add `tag` to `file_id`, showing it as pending until confirmed.
    pub fn add_tag_to_file(&mut self, file_id: &str, tag: &str) {
        if !self.has_hit(file_id, "addTagToFile") {
            return;
        }
        self.dispatch(CardAction::AddTag {
            file_id: file_id.to_string(),
            tag: tag.to_string(),
        });
        self.request(ApiRequest::AddTag {
            file_id: file_id.to_string(),
            tag: tag.to_string(),
        });
    }

    /// Remove `tag` from `file_id`.
    pub fn remove_tag_from_file(&mut self, file_id: &str, tag: &str) {
        if !self.has_hit(file_id, "removeTagFromFile") {
            return;
        }
        self.dispatch(CardAction::RemoveTag {
            file_id: file_id.to_string(),
            tag: tag.to_string(),
        });
        self.request(ApiRequest::RemoveTag {
            file_id: file_id.to_string(),
            tag: tag.to_string(),
        });
    }

    /// Hide `file_id` from search results.
    pub fn hide_file(&mut self, file_id: &str) {
        if !self.has_hit(file_id, "hideFile") {
            return;
        }
        self.dispatch(CardAction::ToggleIsHiddenFile {
            file_id: file_id.to_string(),
            value: true,
        });
        self.request(ApiRequest::HideFile {
            file_id: file_id.to_string(),
        });
    }

    /// Make `file_id` visible again.
    pub fn show_file(&mut self, file_id: &str) {
        if !self.has_hit(file_id, "showFile") {
            return;
        }
        self.dispatch(CardAction::ToggleIsHiddenFile {
            file_id: file_id.to_string(),
            value: false,
        });
        self.request(ApiRequest::ShowFile {
            file_id: file_id.to_string(),
        });
    }

    /// Restrict the search to one source.
    pub fn perform_search_by_source(&mut self, source_id: &str) {
        self.dispatch_layout(LayoutAction::SelectOnlySource(source_id.to_string()));
        self.perform_search_by(Facet::Source, source_id);
    }

    /// Restrict the search to one author.
    pub fn perform_search_by_author(&mut self, author: &str) {
        self.perform_search_by(Facet::Author, author);
    }

    /// Restrict the search to one file path.
    pub fn perform_search_by_path_to_file(&mut self, path: &str) {
        self.perform_search_by(Facet::Path, path);
    }

    /// Restrict the search to one tag.
    pub fn perform_search_by_tag(&mut self, tag: &str) {
        self.perform_search_by(Facet::Tag, tag);
    }

    fn perform_search_by(&mut self, facet: Facet, value: &str) {
        let query = facet.rewrite(&self.search_page().search_query, value);
        info!(facet = facet.keyword(), query = %query, "Searching by facet");
        self.set_query(&query);
        self.perform_search(0, &query);
    }

    pub(super) fn on_highlight_loaded(
        &mut self,
        file_id: String,
        result: Result<ContentHighlight, String>,
    ) -> Option<AppError> {
        match result {
            Ok(highlight) => {
                self.dispatch(CardAction::SetContentHighlight {
                    file_id: file_id.clone(),
                    highlight,
                });
                self.dispatch(CardAction::StartStopHighlightLoading {
                    file_id,
                    fetching: false,
                });
                None
            }
            Err(e) => {
                self.dispatch(CardAction::StartStopHighlightLoading {
                    file_id: file_id.clone(),
                    fetching: false,
                });
                Some(request_failed("loadHighlight", &file_id, e))
            }
        }
    }

    pub(super) fn on_tag_added(
        &mut self,
        file_id: String,
        tag: String,
        result: Result<Vec<String>, String>,
    ) -> Option<AppError> {
        match result {
            Ok(tags) => {
                self.dispatch(CardAction::MarkTagAsCreated {
                    file_id: file_id.clone(),
                    tag,
                });
                self.dispatch(CardAction::SetTags { file_id, tags });
                None
            }
            Err(e) => Some(request_failed("addTagToFile", &file_id, e)),
        }
    }

    pub(super) fn on_tag_removed(
        &mut self,
        file_id: String,
        result: Result<Vec<String>, String>,
    ) -> Option<AppError> {
        match result {
            Ok(tags) => {
                self.dispatch(CardAction::SetTags { file_id, tags });
                None
            }
            Err(e) => Some(request_failed("removeTagFromFile", &file_id, e)),
        }
    }

    pub(super) fn on_visibility_changed(
        &mut self,
        context: &'static str,
        file_id: String,
        result: Result<(), String>,
    ) -> Option<AppError> {
        result
            .err()
            .map(|e| request_failed(context, &file_id, e))
    }

    fn has_hit(&self, file_id: &str, context: &'static str) -> bool {
        let found = self.search_page().hits.contains(file_id);
        if !found {
            warn!(file_id, context, "No hit with this id in the current result set");
        }
        found
    }
}

/// Log a failed card request and wrap it for the error surface.
fn request_failed(context: &'static str, file_id: &str, message: String) -> AppError {
    error!(file_id, error = %message, "{} failed", context);
    AppError::request(context, message)
}
