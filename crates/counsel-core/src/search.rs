use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::SearchConfig;

/// A normalized web-search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// Errors that can occur during search provider operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Missing API key. Set SERPAPI_KEY or COUNSEL_SEARCH_API_KEY.")]
    MissingApiKey,

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited. Try again later.")]
    RateLimited,

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Network(err.to_string())
    }
}

/// Search provider client (SerpAPI-compatible).
///
/// Converts a free-text query into a bounded list of normalized results.
pub struct SearchClient {
    api_key: String,
    base_url: String,
    engine: String,
    max_results: usize,
    client: Client,
}

impl SearchClient {
    /// Creates a new search client with the given API key and defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        let config = SearchConfig::default();
        Self {
            api_key: api_key.into(),
            base_url: config.base_url,
            engine: config.engine,
            max_results: config.max_results,
            client: Client::new(),
        }
    }

    /// Creates a search client from configuration.
    ///
    /// The search provider rejects keyless requests outright, so a missing
    /// key fails here rather than on the wire.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        let api_key = config.api_key_or_env().ok_or(SearchError::MissingApiKey)?;
        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            engine: config.engine.clone(),
            max_results: config.max_results,
            client: Client::new(),
        })
    }

    /// Sets the API base URL (for testing or proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the maximum number of results kept per query.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Searches the web for the given query.
    ///
    /// Returns at most `max_results` normalized results, in provider order.
    /// A payload without an `organic_results` field yields zero results, not
    /// an error. Callers must guard against blank queries; this method is
    /// never invoked with one.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        debug!(%query, "sending search request");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("engine", self.engine.as_str()),
                ("q", query),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == 429 {
            return Err(SearchError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        Ok(parse_organic_results(&payload, self.max_results))
    }
}

/// Extracts up to `limit` entries from the provider's `organic_results`
/// field. A missing or malformed field means zero results.
fn parse_organic_results(payload: &serde_json::Value, limit: usize) -> Vec<SearchResult> {
    let Some(entries) = payload.get("organic_results").and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    entries
        .iter()
        .take(limit)
        .map(|entry| SearchResult {
            title: string_field(entry, "title"),
            snippet: string_field(entry, "snippet"),
            url: string_field(entry, "link"),
        })
        .collect()
}

fn string_field(entry: &serde_json::Value, key: &str) -> String {
    entry
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_organic_results_is_empty() {
        let payload = json!({ "search_metadata": { "status": "Success" } });
        assert!(parse_organic_results(&payload, 3).is_empty());
    }

    #[test]
    fn test_parse_takes_first_three() {
        let payload = json!({
            "organic_results": [
                { "title": "a", "snippet": "1", "link": "https://a" },
                { "title": "b", "snippet": "2", "link": "https://b" },
                { "title": "c", "snippet": "3", "link": "https://c" },
                { "title": "d", "snippet": "4", "link": "https://d" },
            ]
        });
        let results = parse_organic_results(&payload, 3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "a");
        assert_eq!(results[2].url, "https://c");
    }

    #[test]
    fn test_parse_tolerates_missing_entry_fields() {
        let payload = json!({
            "organic_results": [
                { "title": "only title" },
            ]
        });
        let results = parse_organic_results(&payload, 3);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "only title");
        assert!(results[0].snippet.is_empty());
        assert!(results[0].url.is_empty());
    }

    #[test]
    fn test_parse_non_array_results_is_empty() {
        let payload = json!({ "organic_results": "unexpected" });
        assert!(parse_organic_results(&payload, 3).is_empty());
    }
}
