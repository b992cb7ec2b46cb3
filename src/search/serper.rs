//! Serper search API client.
//!
//! Implements the [`SearchProvider`] trait against Serper's search endpoint
//! (`{base}/search`), authenticated with an `X-API-KEY` header.

use super::{SearchProvider, SearchResults, SearchSettings};

/// Client for the Serper search API.
#[derive(Clone)]
pub struct SerperClient {
    http: reqwest::Client,
    settings: SearchSettings,
}

impl std::fmt::Debug for SerperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerperClient")
            .field("settings", &self.settings)
            .finish()
    }
}

impl SerperClient {
    /// Create a new Serper client with the given settings.
    #[must_use]
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }
}

#[async_trait::async_trait]
impl SearchProvider for SerperClient {
    async fn search(&self, query: &str) -> anyhow::Result<SearchResults> {
        let url = search_url(&self.settings.base_url);

        let resp = self
            .http
            .post(&url)
            .header("X-API-KEY", &self.settings.api_key)
            .json(&serde_json::json!({ "q": query }))
            .send()
            .await?
            .error_for_status()?;

        let payload: serde_json::Value = resp.json().await?;
        Ok(SearchResults::new(payload))
    }
}

/// Build the search URL from a base URL.
#[must_use]
fn search_url(base_url: &str) -> String {
    format!("{}/search", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url() {
        assert_eq!(
            search_url("https://google.serper.dev"),
            "https://google.serper.dev/search"
        );
    }

    #[test]
    fn test_search_url_trailing_slash() {
        assert_eq!(
            search_url("https://google.serper.dev/"),
            "https://google.serper.dev/search"
        );
    }
}
