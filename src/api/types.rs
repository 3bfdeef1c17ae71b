//! Ambar web API request and response types.
//!
//! Field names follow the backend's snake_case JSON. Client-only flags
//! (`fetching`, `is_hidden`, `HitTag::is_fetching`) are never read from the
//! wire.

use serde::{Deserialize, Deserializer, Serialize};

/// Result of `GET /api/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    /// Matching documents, in relevance order.
    #[serde(default)]
    pub hits: Vec<Hit>,
    /// Total number of matches, when the backend reports it.
    #[serde(default)]
    pub total: Option<u64>,
    /// Backend search time in milliseconds.
    #[serde(default)]
    pub took: Option<u64>,
}

impl SearchResult {
    /// Convert wire hits into client records, deriving `is_hidden`.
    pub fn into_hits(self) -> Vec<Hit> {
        self.hits
            .into_iter()
            .map(|mut hit| {
                hit.is_hidden = hit.hidden_mark.is_some();
                hit
            })
            .collect()
    }
}

/// One retrieved document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hit {
    /// Content hash identifying the file.
    pub file_id: String,
    /// File metadata.
    #[serde(default)]
    pub meta: HitMeta,
    /// Extracted content information.
    #[serde(default)]
    pub content: HitContent,
    /// Tags in display order.
    #[serde(default, deserialize_with = "deserialize_hit_tags")]
    pub tags: Vec<HitTag>,
    /// True while a highlight fetch is in flight.
    #[serde(skip)]
    pub fetching: bool,
    /// Whether the file is hidden from search.
    #[serde(skip)]
    pub is_hidden: bool,
    /// Present iff the file is hidden.
    #[serde(default)]
    pub hidden_mark: Option<HiddenMark>,
}

impl Hit {
    /// A bare record, mostly useful for building state by hand.
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            meta: HitMeta::default(),
            content: HitContent::default(),
            tags: Vec::new(),
            fetching: false,
            is_hidden: false,
            hidden_mark: None,
        }
    }

    /// Builder-style setter for the tag list.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(HitTag::confirmed).collect();
        self
    }

    /// Tag names in display order.
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }

    /// The best display title for the file.
    pub fn title(&self) -> &str {
        if !self.meta.full_name.is_empty() {
            &self.meta.full_name
        } else if !self.meta.short_name.is_empty() {
            &self.meta.short_name
        } else {
            &self.file_id
        }
    }
}

/// File metadata attached to a hit.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HitMeta {
    /// Full path of the file within its source.
    #[serde(default)]
    pub full_name: String,
    /// File name only.
    #[serde(default)]
    pub short_name: String,
    /// File extension, including the dot.
    #[serde(default)]
    pub extension: Option<String>,
    /// Identifier of the crawler source.
    #[serde(default)]
    pub source_id: String,
    /// Last modification time as reported by the crawler.
    #[serde(default)]
    pub updated_datetime: Option<String>,
}

/// Content information attached to a hit.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HitContent {
    /// Document author, when extracted.
    #[serde(default)]
    pub author: Option<String>,
    /// File size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Rendered excerpt; absent until fetched.
    #[serde(default)]
    pub highlight: Option<ContentHighlight>,
}

/// A rendered excerpt of the document around the query terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentHighlight {
    /// Excerpt fragments in document order.
    #[serde(default)]
    pub text: Vec<String>,
}

/// Marker present on hidden files. Carries no data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenMark {}

/// A tag on a hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitTag {
    /// Tag name.
    pub name: String,
    /// True until the backend confirms the tag.
    pub is_fetching: bool,
}

impl HitTag {
    /// A tag the backend already knows about.
    pub fn confirmed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_fetching: false,
        }
    }

    /// A tag added locally and not yet confirmed.
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_fetching: true,
        }
    }
}

/// Tags arrive either as bare names or as objects with a `name` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TagEntry {
    Name(String),
    Object { name: String },
}

impl From<TagEntry> for String {
    fn from(entry: TagEntry) -> Self {
        match entry {
            TagEntry::Name(name) | TagEntry::Object { name } => name,
        }
    }
}

fn deserialize_tag_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    // The backend sends `null` for files that were never tagged.
    let entries = Option::<Vec<TagEntry>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries.into_iter().map(String::from).collect())
}

fn deserialize_hit_tags<'de, D>(deserializer: D) -> Result<Vec<HitTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = deserialize_tag_names(deserializer)?;
    Ok(names.into_iter().map(HitTag::confirmed).collect())
}

/// Body of a successful tag add/remove: the canonical tag list of the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagsResponse {
    /// Canonical tag names.
    #[serde(default, deserialize_with = "deserialize_tag_names")]
    pub tags: Vec<String>,
}

/// Body of `GET /api/search/{file_id}/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HighlightResponse {
    #[serde(default)]
    highlight: Option<ContentHighlight>,
    #[serde(default)]
    content: Option<HighlightContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct HighlightContent {
    #[serde(default)]
    highlight: Option<ContentHighlight>,
}

impl HighlightResponse {
    /// The excerpt, wherever the backend put it. Missing means empty.
    pub fn into_highlight(self) -> ContentHighlight {
        self.highlight
            .or_else(|| self.content.and_then(|c| c.highlight))
            .unwrap_or_default()
    }
}

/// An entry of the tag catalog returned by `GET /api/tags`.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct CatalogTag(#[serde(deserialize_with = "deserialize_catalog_name")] pub String);

fn deserialize_catalog_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TagEntry::deserialize(deserializer).map(String::from)
}

/// A crawler source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Source {
    /// Source identifier, as used in `source:` clauses.
    pub id: String,
    /// Human readable description.
    #[serde(default)]
    pub description: String,
    /// Whether the source is selected in the refine-search panel.
    #[serde(skip_deserializing, default = "default_true")]
    pub selected: bool,
}

fn default_true() -> bool {
    true
}

impl Source {
    /// A selected source with no description.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            selected: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_from_api_json() {
        let json = r#"{
            "file_id": "abc123",
            "meta": {"full_name": "/docs/report.pdf", "short_name": "report.pdf", "source_id": "docs"},
            "content": {"author": "Jane Doe", "size": 1024},
            "tags": [{"name": "draft", "type": "manual"}, "final"],
            "hidden_mark": {}
        }"#;

        let result: SearchResult =
            serde_json::from_str(&format!(r#"{{"hits": [{}]}}"#, json)).unwrap();
        let hits = result.into_hits();
        let hit = &hits[0];

        assert_eq!(hit.file_id, "abc123");
        assert_eq!(hit.title(), "/docs/report.pdf");
        assert_eq!(hit.content.author.as_deref(), Some("Jane Doe"));
        assert_eq!(hit.tag_names(), vec!["draft", "final"]);
        assert!(hit.tags.iter().all(|t| !t.is_fetching));
        assert!(hit.is_hidden);
        assert!(!hit.fetching);
        assert!(hit.content.highlight.is_none());
    }

    #[test]
    fn test_hit_without_hidden_mark() {
        let result: SearchResult =
            serde_json::from_str(r#"{"hits": [{"file_id": "x", "hidden_mark": null}]}"#).unwrap();
        let hits = result.into_hits();
        assert!(!hits[0].is_hidden);
        assert!(hits[0].hidden_mark.is_none());
        assert!(hits[0].tags.is_empty());
    }

    #[test]
    fn test_hit_with_null_tags() {
        let result: SearchResult =
            serde_json::from_str(r#"{"hits": [{"file_id": "x", "tags": null}]}"#).unwrap();
        assert!(result.into_hits()[0].tags.is_empty());

        let resp: TagsResponse = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        assert!(resp.tags.is_empty());
    }

    #[test]
    fn test_title_falls_back_to_file_id() {
        let hit = Hit::new("deadbeef");
        assert_eq!(hit.title(), "deadbeef");
    }

    #[test]
    fn test_tags_response_mixed_entries() {
        let resp: TagsResponse =
            serde_json::from_str(r#"{"tags": ["draft", {"name": "final"}]}"#).unwrap();
        assert_eq!(resp.tags, vec!["draft", "final"]);
    }

    #[test]
    fn test_highlight_response_top_level() {
        let resp: HighlightResponse =
            serde_json::from_str(r#"{"highlight": {"text": ["a <em>b</em>"]}}"#).unwrap();
        assert_eq!(resp.into_highlight().text, vec!["a <em>b</em>"]);
    }

    #[test]
    fn test_highlight_response_nested_in_content() {
        let resp: HighlightResponse =
            serde_json::from_str(r#"{"content": {"highlight": {"text": ["x"]}}}"#).unwrap();
        assert_eq!(resp.into_highlight().text, vec!["x"]);
    }

    #[test]
    fn test_highlight_response_empty() {
        let resp: HighlightResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.into_highlight().text.is_empty());
    }

    #[test]
    fn test_catalog_tags() {
        let tags: Vec<CatalogTag> =
            serde_json::from_str(r#"["csharp", {"name": "basic", "hits_count": 3}]"#).unwrap();
        let names: Vec<String> = tags.into_iter().map(|t| t.0).collect();
        assert_eq!(names, vec!["csharp", "basic"]);
    }

    #[test]
    fn test_source_defaults_to_selected() {
        let source: Source = serde_json::from_str(r#"{"id": "docs"}"#).unwrap();
        assert!(source.selected);
        assert_eq!(source, Source::new("docs"));
    }
}
