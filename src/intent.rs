//! Intent classification.
//!
//! The first LLM round trip: the raw utterance goes to the model under a
//! fixed instruction asking whether the user wants real-time data. The reply
//! text then drives the routing decision through a pluggable
//! [`IntentStrategy`], so the keyword heuristic can be swapped for a
//! structured classifier without touching the request pipeline.

use std::sync::Arc;

use tracing::warn;

use crate::llm::{LlmClient, LlmReply};

/// Fixed instruction for the intent round trip.
const SYSTEM_PROMPT: &str = "You are a helpful assistant that helps understand if the user is asking for real-time data such as weather, news, or other time-sensitive information.";

/// Canned text substituted when the intent call fails.
const FALLBACK: &str = "Sorry, I couldn't process your request.";

/// Marker phrases whose presence routes the request to web search.
const LIVE_DATA_MARKERS: [&str; 4] = ["real-time data", "current", "weather", "forecast"];

/// Routing decision derived from the intent reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentDecision {
    /// The utterance asks for live data; search the web and summarize.
    NeedsLiveData,
    /// The intent reply itself is the answer.
    GeneralAnswer,
}

/// Result of the intent step: the model's reply plus the routing decision.
#[derive(Debug, Clone)]
pub struct IntentOutcome {
    /// What the model said (or the fallback, if the call failed).
    pub reply: LlmReply,
    /// Where the pipeline goes next.
    pub decision: IntentDecision,
}

/// Strategy for deriving a routing decision from intent reply text.
pub trait IntentStrategy: Send + Sync {
    /// Decide the route for a reply.
    fn decide(&self, reply_text: &str) -> IntentDecision;
}

/// Default strategy: case-insensitive substring scan of the reply text.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordStrategy;

impl IntentStrategy for KeywordStrategy {
    fn decide(&self, reply_text: &str) -> IntentDecision {
        let lower = reply_text.to_lowercase();
        if LIVE_DATA_MARKERS.iter().any(|marker| lower.contains(marker)) {
            IntentDecision::NeedsLiveData
        } else {
            IntentDecision::GeneralAnswer
        }
    }
}

/// Classifier wrapping the LLM client with the intent instruction.
pub struct IntentClassifier {
    llm: Arc<dyn LlmClient>,
    strategy: Box<dyn IntentStrategy>,
}

impl std::fmt::Debug for IntentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentClassifier").finish_non_exhaustive()
    }
}

impl IntentClassifier {
    /// Create a classifier with the default [`KeywordStrategy`].
    #[must_use]
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self::with_strategy(llm, Box::new(KeywordStrategy))
    }

    /// Create a classifier with a custom routing strategy.
    #[must_use]
    pub fn with_strategy(llm: Arc<dyn LlmClient>, strategy: Box<dyn IntentStrategy>) -> Self {
        Self { llm, strategy }
    }

    /// Run the intent round trip for an utterance.
    ///
    /// Never fails: an upstream error degrades to canned fallback text. The
    /// strategy sees whatever text the reply carries, fallback included.
    pub async fn classify(&self, utterance: &str) -> IntentOutcome {
        let reply = match self.llm.complete(SYSTEM_PROMPT, utterance).await {
            Ok(text) => LlmReply::Answered(text),
            Err(e) => {
                warn!(error = %e, "intent call failed, substituting fallback");
                LlmReply::Degraded {
                    fallback: FALLBACK.to_string(),
                    reason: e.to_string(),
                }
            }
        };

        let decision = self.strategy.decide(reply.text());
        IntentOutcome { reply, decision }
    }
}
