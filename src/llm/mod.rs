//! LLM client trait and implementations.
//!
//! This module provides the abstraction for talking to an `OpenAI`-compatible
//! chat model, plus the conversation message types shared with the session
//! store.
//!
//! # Overview
//!
//! The [`LlmClient`] trait defines the single-shot completion interface that
//! all LLM implementations must support. The intent classifier and the
//! summarizer both build on top of it; the [`ChatCompletionsClient`] is the
//! production implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use speechbridge::llm::{ChatCompletionsClient, LlmSettings};
//!
//! let settings = LlmSettings {
//!     base_url: "https://api.openai.com".to_string(),
//!     api_key: "sk-...".to_string(),
//!     model: "gpt-4-turbo".to_string(),
//! };
//! let client = ChatCompletionsClient::new(settings);
//! ```

pub mod chat_completions;

pub use chat_completions::ChatCompletionsClient;

/// LLM connection and model settings.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// Base URL for the LLM API (e.g., `https://api.openai.com`).
    pub base_url: String,
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Model identifier (e.g., `gpt-4-turbo`).
    pub model: String,
}

/// A message in a conversation thread.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    /// Role of the message author.
    pub role: MessageRole,
    /// Text content of the message.
    pub content: String,
}

impl Message {
    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System prompt.
    System,
    /// User message.
    User,
    /// Assistant response.
    Assistant,
}

/// Outcome of an LLM-backed step.
///
/// Distinguishes a genuine model answer from the canned text substituted when
/// the upstream call failed. The wire response flattens both to plain text;
/// callers that care (logs, tests) match on the variant instead of comparing
/// strings against known fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmReply {
    /// The model produced this text.
    Answered(String),
    /// The upstream call failed and canned text was substituted.
    Degraded {
        /// The canned text returned to the caller.
        fallback: String,
        /// Short description of the failure, for logging only.
        reason: String,
    },
}

impl LlmReply {
    /// The user-facing text, however it was produced.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Answered(text) => text,
            Self::Degraded { fallback, .. } => fallback,
        }
    }

    /// Consume the reply, yielding the user-facing text.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Answered(text) => text,
            Self::Degraded { fallback, .. } => fallback,
        }
    }

    /// Whether this reply carries fallback text rather than model output.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Trait for single-shot LLM completion clients.
///
/// Implementations send one system instruction and one user message and
/// return the model's text reply. No streaming, no tool calls.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Request a completion for `user_text` under `system_prompt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the upstream answers with a
    /// non-success status, or the response body has no message content.
    async fn complete(&self, system_prompt: &str, user_text: &str) -> anyhow::Result<String>;
}
