//! Facet clauses in search queries.
//!
//! A facet clause is a `name:value` token. Searching "by" a facet drops every
//! clause of that facet from the current query and appends a fresh one.

use once_cell::sync::Lazy;
use regex::Regex;

/// Character substituted for whitespace in facet values.
const WILDCARD: &str = "?";

static SOURCE_CLAUSE: Lazy<Regex> = Lazy::new(|| facet_regex("source"));
static AUTHOR_CLAUSE: Lazy<Regex> = Lazy::new(|| facet_regex("author"));
static FILENAME_CLAUSE: Lazy<Regex> = Lazy::new(|| facet_regex("filename"));
static TAGS_CLAUSE: Lazy<Regex> = Lazy::new(|| facet_regex("tags"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").expect("valid regex"));

fn facet_regex(name: &str) -> Regex {
    Regex::new(&format!(r"(?im)(^|\s){}:\S*", name)).expect("valid facet regex")
}

/// A structured query clause type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    /// Crawler source id.
    Source,
    /// Document author.
    Author,
    /// Path of the file.
    Path,
    /// Tag name.
    Tag,
}

impl Facet {
    /// The clause keyword understood by the backend.
    pub fn keyword(&self) -> &'static str {
        match self {
            Facet::Source => "source",
            Facet::Author => "author",
            Facet::Path => "filename",
            Facet::Tag => "tags",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Facet::Source => &SOURCE_CLAUSE,
            Facet::Author => &AUTHOR_CLAUSE,
            Facet::Path => &FILENAME_CLAUSE,
            Facet::Tag => &TAGS_CLAUSE,
        }
    }

    /// Whether `query` already has a clause of this facet.
    pub fn is_present(&self, query: &str) -> bool {
        self.pattern().is_match(query)
    }

    /// Remove every clause of this facet from `query`.
    pub fn strip(&self, query: &str) -> String {
        self.pattern().replace_all(query, "").into_owned()
    }

    /// Replace any clause of this facet in `query` with `facet:value`.
    ///
    /// Whitespace inside `value` becomes the single-character wildcard so the
    /// clause stays one token.
    pub fn rewrite(&self, query: &str, value: &str) -> String {
        let stripped = self.strip(query);
        let value = sanitize_value(value);
        format!("{} {}:{}", stripped, self.keyword(), value)
    }
}

/// Replace each whitespace character with the wildcard placeholder.
pub fn sanitize_value(value: &str) -> String {
    WHITESPACE.replace_all(value, WILDCARD).into_owned()
}
