//! Search page state: the current result set and the query that produced it.

use super::hits::HitMap;

/// State owned by the search page.
#[derive(Debug, Clone, Default)]
pub struct SearchPageState {
    /// Hits of the current result set, keyed by file id.
    pub hits: HitMap,
    /// The query the current (or in-flight) result set belongs to.
    pub search_query: String,
    /// True while a search request is in flight.
    pub fetching: bool,
    /// Total matches reported by the backend for the current query.
    pub total: Option<u64>,
    /// Known tag names, offered as suggestions by the tag editor.
    pub tags: Vec<String>,
}
