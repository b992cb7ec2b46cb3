//! Web search provider trait and implementations.
//!
//! The search step runs only when the intent classifier decides the
//! utterance needs live data. Results are opaque to this service: whatever
//! JSON the provider returns is handed to the summarizer verbatim, never
//! interpreted field by field.

pub mod serper;

pub use serper::SerperClient;

/// Search API connection settings.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Base URL for the search API (e.g., `https://google.serper.dev`).
    pub base_url: String,
    /// API key sent in the `X-API-KEY` header.
    pub api_key: String,
}

/// Raw search payload, passed through to the summarizer as-is.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SearchResults(serde_json::Value);

impl SearchResults {
    /// Wrap a provider response body.
    #[must_use]
    pub fn new(payload: serde_json::Value) -> Self {
        Self(payload)
    }

    /// Whether the provider answered with JSON `null`, i.e. no results.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Compact JSON rendering, as embedded in the summarization prompt.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        self.0.to_string()
    }
}

/// Trait for web search providers.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a search for `query` and return the provider's raw payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the upstream answers with a
    /// non-success status.
    async fn search(&self, query: &str) -> anyhow::Result<SearchResults>;
}
