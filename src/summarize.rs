//! Search result summarization.
//!
//! The second LLM round trip, reached only on the live-data path: the
//! original utterance plus the raw search payload go to the model under a
//! fixed summarization instruction, and the reply becomes the assistant's
//! answer.

use std::sync::Arc;

use tracing::warn;

use crate::llm::{LlmClient, LlmReply};
use crate::search::SearchResults;

/// Fixed instruction for the summarization round trip.
const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that summarizes web search results based on user intent.";

/// Canned text substituted when the summarization call fails.
const FALLBACK: &str = "Sorry, I couldn't summarize the information.";

/// Summarizer wrapping the LLM client with the summarization instruction.
pub struct Summarizer {
    llm: Arc<dyn LlmClient>,
}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer").finish_non_exhaustive()
    }
}

impl Summarizer {
    /// Create a summarizer over an LLM client.
    #[must_use]
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Summarize `results` in the context of the user's utterance.
    ///
    /// Never fails: an upstream error degrades to canned fallback text.
    pub async fn summarize(&self, utterance: &str, results: &SearchResults) -> LlmReply {
        let user_message = build_user_message(utterance, results);

        match self.llm.complete(SYSTEM_PROMPT, &user_message).await {
            Ok(text) => LlmReply::Answered(text),
            Err(e) => {
                warn!(error = %e, "summarization call failed, substituting fallback");
                LlmReply::Degraded {
                    fallback: FALLBACK.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Build the summarization user message: the quoted utterance followed by
/// the search payload serialized verbatim.
fn build_user_message(utterance: &str, results: &SearchResults) -> String {
    format!(
        "The user asked: \"{}\". Based on that, summarize these web search results: {}",
        utterance,
        results.to_json_string()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoClient;

    #[async_trait::async_trait]
    impl LlmClient for EchoClient {
        async fn complete(&self, _system: &str, user: &str) -> anyhow::Result<String> {
            Ok(user.to_string())
        }
    }

    struct FailingClient;

    #[async_trait::async_trait]
    impl LlmClient for FailingClient {
        async fn complete(&self, _system: &str, _user: &str) -> anyhow::Result<String> {
            Err(anyhow::anyhow!("timeout"))
        }
    }

    #[test]
    fn test_user_message_embeds_query_and_payload() {
        let results = SearchResults::new(serde_json::json!({ "organic": [] }));
        let message = build_user_message("weather in Paris", &results);
        assert_eq!(
            message,
            r#"The user asked: "weather in Paris". Based on that, summarize these web search results: {"organic":[]}"#
        );
    }

    #[tokio::test]
    async fn test_summarize_answered() {
        let summarizer = Summarizer::new(Arc::new(EchoClient));
        let results = SearchResults::new(serde_json::json!({ "organic": [] }));

        let reply = summarizer.summarize("weather in Paris", &results).await;
        assert!(!reply.is_degraded());
        assert!(reply.text().starts_with("The user asked:"));
    }

    #[tokio::test]
    async fn test_summarize_degrades_on_upstream_failure() {
        let summarizer = Summarizer::new(Arc::new(FailingClient));
        let results = SearchResults::new(serde_json::json!({}));

        let reply = summarizer.summarize("weather in Paris", &results).await;
        assert!(reply.is_degraded());
        assert_eq!(reply.text(), "Sorry, I couldn't summarize the information.");
    }
}
