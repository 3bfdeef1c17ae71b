//! Ambar web API client implementation.
//!
//! One method per backend call. Each call applies the shared default request
//! settings, accepts only the status codes that endpoint treats as success,
//! and turns everything else into an [`ApiError`].

use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::types::{
    CatalogTag, ContentHighlight, HighlightResponse, SearchResult, Source, TagsResponse,
};
use crate::config::Profile;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The Ambar web API client.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct AmbarClient {
    client: Client,
    base_url: String,
    auth: Auth,
}

impl AmbarClient {
    /// Create a client for a profile, reading its token from the keyring.
    #[instrument(skip(profile), fields(profile_name = %profile.name))]
    pub fn from_profile(profile: &Profile) -> Result<Self> {
        let auth = Auth::from_keyring(&profile.name, &profile.email);
        Self::with_auth(&profile.url, auth)
    }

    /// Create a client with explicit credentials.
    pub fn with_auth(base_url: &str, auth: Auth) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .default_headers(auth.default_headers())
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
            auth,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether requests carry a token.
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Run a search starting at `page`, limited to `sources` when any are
    /// given.
    #[instrument(skip(self, sources), fields(query = %query, sources = sources.len()))]
    pub async fn search(
        &self,
        query: &str,
        sources: &[String],
        page: u32,
        size: u32,
    ) -> Result<SearchResult> {
        let url = self.search_url(&scoped_query(query, sources), page, size);
        let response = self.send(Method::GET, &url).await?;
        let result: SearchResult = parse_json(response, &[StatusCode::OK], &url).await?;
        debug!("Search returned {} hits", result.hits.len());
        Ok(result)
    }

    /// Fetch the content highlight of one file for a query.
    #[instrument(skip(self), fields(file_id = %file_id))]
    pub async fn load_highlight(&self, file_id: &str, query: &str) -> Result<ContentHighlight> {
        let url = self.highlight_url(file_id, query);
        let response = self.send(Method::GET, &url).await?;
        let body: HighlightResponse = parse_json(response, &[StatusCode::OK], &url).await?;
        Ok(body.into_highlight())
    }

    /// Tag a file. Returns the file's canonical tag list.
    #[instrument(skip(self), fields(file_id = %file_id, tag = %tag))]
    pub async fn add_tag(&self, file_id: &str, tag: &str) -> Result<Vec<String>> {
        let url = self.tag_url(file_id, tag);
        let response = self.send(Method::POST, &url).await?;
        let body: TagsResponse =
            parse_json(response, &[StatusCode::OK, StatusCode::CREATED], &url).await?;
        Ok(body.tags)
    }

    /// Remove a tag from a file. Returns the file's canonical tag list.
    #[instrument(skip(self), fields(file_id = %file_id, tag = %tag))]
    pub async fn remove_tag(&self, file_id: &str, tag: &str) -> Result<Vec<String>> {
        let url = self.tag_url(file_id, tag);
        let response = self.send(Method::DELETE, &url).await?;
        let body: TagsResponse = parse_json(response, &[StatusCode::OK], &url).await?;
        Ok(body.tags)
    }

    /// Hide a file from search results.
    #[instrument(skip(self), fields(file_id = %file_id))]
    pub async fn hide_file(&self, file_id: &str) -> Result<()> {
        let url = format!("{}/api/files/hide/{}", self.base_url, urlencoding::encode(file_id));
        let response = self.send(Method::PUT, &url).await?;
        expect_status(response, &[StatusCode::OK], &url).await
    }

    /// Make a hidden file visible again.
    #[instrument(skip(self), fields(file_id = %file_id))]
    pub async fn unhide_file(&self, file_id: &str) -> Result<()> {
        let url = format!("{}/api/files/unhide/{}", self.base_url, urlencoding::encode(file_id));
        let response = self.send(Method::PUT, &url).await?;
        expect_status(response, &[StatusCode::OK], &url).await
    }

    /// Fetch the catalog of known tag names, used for autosuggest.
    #[instrument(skip(self))]
    pub async fn get_tags(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.send(Method::GET, &url).await?;
        let tags: Vec<CatalogTag> = parse_json(response, &[StatusCode::OK], &url).await?;
        Ok(tags.into_iter().map(|t| t.0).collect())
    }

    /// Fetch the configured crawler sources.
    #[instrument(skip(self))]
    pub async fn get_sources(&self) -> Result<Vec<Source>> {
        let url = format!("{}/api/sources", self.base_url);
        let response = self.send(Method::GET, &url).await?;
        parse_json(response, &[StatusCode::OK], &url).await
    }

    fn search_url(&self, query: &str, page: u32, size: u32) -> String {
        format!(
            "{}/api/search?query={}&page={}&size={}",
            self.base_url,
            urlencoding::encode(query),
            page,
            size
        )
    }

    fn highlight_url(&self, file_id: &str, query: &str) -> String {
        format!(
            "{}/api/search/{}/?query={}",
            self.base_url,
            urlencoding::encode(file_id),
            urlencoding::encode(query)
        )
    }

    fn tag_url(&self, file_id: &str, tag: &str) -> String {
        format!(
            "{}/api/tags/{}/{}",
            self.base_url,
            urlencoding::encode(file_id),
            urlencoding::encode(tag)
        )
    }

    async fn send(&self, method: Method, url: &str) -> Result<Response> {
        debug!(%method, url, "Sending request");
        Ok(self.client.request(method, url).send().await?)
    }
}

/// Parse the body as JSON when the status is one of `accepted`.
async fn parse_json<T: DeserializeOwned>(
    response: Response,
    accepted: &[StatusCode],
    url: &str,
) -> Result<T> {
    let status = response.status();
    if !accepted.contains(&status) {
        return Err(error_from_response(response, url).await);
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
}

/// Succeed when the status is one of `accepted`, ignoring the body.
async fn expect_status(response: Response, accepted: &[StatusCode], url: &str) -> Result<()> {
    if accepted.contains(&response.status()) {
        Ok(())
    } else {
        Err(error_from_response(response, url).await)
    }
}

async fn error_from_response(response: Response, url: &str) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    debug!("Error response body: {}", body);
    ApiError::from_status(status, &error_context(url, &body))
}

/// Prefer the backend's own message over the bare URL.
fn error_context(url: &str, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("message")
                .or_else(|| json.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| url.to_string())
}

/// Append one `source:` clause listing `sources`, comma separated.
fn scoped_query(query: &str, sources: &[String]) -> String {
    if sources.is_empty() {
        query.to_string()
    } else {
        format!("{} source:{}", query, sources.join(","))
    }
}

/// Remove trailing slashes from the base URL.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AmbarClient {
        AmbarClient::with_auth("http://localhost:8080/", Auth::anonymous()).unwrap()
    }

    #[test]
    fn test_normalize_base_url_removes_trailing_slash() {
        assert_eq!(normalize_base_url("https://ambar.local///"), "https://ambar.local");
    }

    #[test]
    fn test_normalize_base_url_preserves_path() {
        assert_eq!(
            normalize_base_url("https://company.com/ambar/"),
            "https://company.com/ambar"
        );
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = client().search_url("author:jane report", 0, 20);
        assert_eq!(
            url,
            "http://localhost:8080/api/search?query=author%3Ajane%20report&page=0&size=20"
        );
    }

    #[test]
    fn test_scoped_query() {
        assert_eq!(scoped_query("budget", &[]), "budget");
        assert_eq!(
            scoped_query("budget", &["docs".to_string(), "mail".to_string()]),
            "budget source:docs,mail"
        );
    }

    #[test]
    fn test_highlight_url() {
        let url = client().highlight_url("abc", "q");
        assert_eq!(url, "http://localhost:8080/api/search/abc/?query=q");
    }

    #[test]
    fn test_tag_url_encodes_tag() {
        let url = client().tag_url("abc", "to do");
        assert_eq!(url, "http://localhost:8080/api/tags/abc/to%20do");
    }

    #[test]
    fn test_error_context_prefers_backend_message() {
        assert_eq!(
            error_context("http://x/api", r#"{"message": "File not found"}"#),
            "File not found"
        );
        assert_eq!(error_context("http://x/api", "not json"), "http://x/api");
    }

    #[test]
    fn test_client_is_anonymous() {
        assert!(!client().is_authenticated());
        assert_eq!(client().base_url(), "http://localhost:8080");
    }
}
