//! Speech processing pipeline.
//!
//! The orchestrator drives one utterance through the full pipeline:
//!
//! 1. Resolve the conversation thread (look up, or create a new one)
//! 2. Record the user message
//! 3. Classify intent with the LLM
//! 4. Either search the web and summarize, or use the intent reply directly
//! 5. Record the assistant message and persist the thread
//!
//! Upstream LLM and search failures degrade to canned text and the request
//! still succeeds; only an unknown thread id or a store failure aborts it.
//!
//! # Example
//!
//! ```rust,ignore
//! use speechbridge::orchestrator::Orchestrator;
//!
//! let orchestrator = Orchestrator::new(store, llm, search);
//! let processed = orchestrator.process_speech("what's the weather?", None).await?;
//! println!("{} -> {}", processed.thread_id, processed.answer.text());
//! ```

use std::sync::Arc;

use uuid::Uuid;

use crate::error::RelayError;
use crate::intent::{IntentClassifier, IntentDecision, IntentStrategy};
use crate::llm::{LlmClient, LlmReply, Message};
use crate::search::SearchProvider;
use crate::session::ThreadStore;
use crate::summarize::Summarizer;

/// Canned text substituted when the web search fails or returns nothing.
const SEARCH_FALLBACK: &str = "Sorry, I couldn't find any relevant information from the web.";

/// Result of a fully processed utterance.
#[derive(Debug, Clone)]
pub struct ProcessedSpeech {
    /// Thread the exchange was recorded under.
    pub thread_id: String,
    /// The assistant's answer.
    pub answer: LlmReply,
}

/// Pipeline driver wiring the thread store, the LLM steps, and web search.
pub struct Orchestrator {
    store: Arc<dyn ThreadStore>,
    classifier: IntentClassifier,
    search: Arc<dyn SearchProvider>,
    summarizer: Summarizer,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Create an orchestrator with the default keyword intent strategy.
    #[must_use]
    pub fn new(
        store: Arc<dyn ThreadStore>,
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchProvider>,
    ) -> Self {
        Self {
            store,
            classifier: IntentClassifier::new(Arc::clone(&llm)),
            search,
            summarizer: Summarizer::new(llm),
        }
    }

    /// Create an orchestrator with a custom intent strategy.
    #[must_use]
    pub fn with_strategy(
        store: Arc<dyn ThreadStore>,
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchProvider>,
        strategy: Box<dyn IntentStrategy>,
    ) -> Self {
        Self {
            store,
            classifier: IntentClassifier::with_strategy(Arc::clone(&llm), strategy),
            search,
            summarizer: Summarizer::new(llm),
        }
    }

    /// Process one utterance and record the exchange in its thread.
    ///
    /// An empty `supplied_thread_id` counts as absent and starts a new
    /// thread. A non-empty id that the store does not know fails with
    /// [`RelayError::UnknownThread`] before anything is recorded.
    pub async fn process_speech(
        &self,
        utterance: &str,
        supplied_thread_id: Option<&str>,
    ) -> Result<ProcessedSpeech, RelayError> {
        let request_id = Uuid::new_v4().to_string();

        let supplied = supplied_thread_id.filter(|id| !id.is_empty());
        let (thread_id, mut history) = match supplied {
            Some(id) => {
                let Some(history) = self.store.get(id).await? else {
                    tracing::debug!(
                        request_id = %request_id,
                        thread_id = %id,
                        "Rejecting unknown thread id"
                    );
                    return Err(RelayError::UnknownThread(id.to_string()));
                };
                (id.to_string(), history)
            }
            None => {
                let id = self.store.create().await?;
                tracing::info!(
                    request_id = %request_id,
                    thread_id = %id,
                    "New thread created"
                );
                (id, Vec::new())
            }
        };

        tracing::info!(
            request_id = %request_id,
            thread_id = %thread_id,
            utterance_length = utterance.len(),
            history_length = history.len(),
            "Processing speech"
        );

        history.push(Message::user(utterance));

        let intent = self.classifier.classify(utterance).await;
        tracing::debug!(
            request_id = %request_id,
            decision = ?intent.decision,
            degraded = intent.reply.is_degraded(),
            "Intent classified"
        );

        let answer = match intent.decision {
            IntentDecision::NeedsLiveData => {
                self.search_and_summarize(&request_id, utterance).await
            }
            IntentDecision::GeneralAnswer => intent.reply,
        };

        history.push(Message::assistant(answer.text()));
        self.store.set(&thread_id, history).await?;

        tracing::info!(
            request_id = %request_id,
            thread_id = %thread_id,
            degraded = answer.is_degraded(),
            "Speech processed"
        );

        Ok(ProcessedSpeech { thread_id, answer })
    }

    /// The live-data branch: web search, then summarization.
    ///
    /// A failed search, or a `null` payload from a successful one,
    /// short-circuits to the web fallback without calling the summarizer.
    async fn search_and_summarize(&self, request_id: &str, utterance: &str) -> LlmReply {
        match self.search.search(utterance).await {
            Ok(results) if results.is_null() => {
                tracing::warn!(request_id = %request_id, "Web search returned no results");
                LlmReply::Degraded {
                    fallback: SEARCH_FALLBACK.to_string(),
                    reason: "search returned no results".to_string(),
                }
            }
            Ok(results) => {
                tracing::debug!(request_id = %request_id, "Search succeeded, summarizing");
                self.summarizer.summarize(utterance, &results).await
            }
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "Web search failed");
                LlmReply::Degraded {
                    fallback: SEARCH_FALLBACK.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }
}
