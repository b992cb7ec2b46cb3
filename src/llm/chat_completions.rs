//! OpenAI Chat Completions API client.
//!
//! This module implements the [`LlmClient`] trait against the Chat
//! Completions endpoint (`/v1/chat/completions`), non-streaming.

use anyhow::anyhow;

use super::{LlmClient, LlmSettings};

/// Client for the OpenAI Chat Completions API.
///
/// Sends a two-message conversation (system + user) and returns the first
/// choice's message content.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    http: reqwest::Client,
    settings: LlmSettings,
}

impl std::fmt::Debug for ChatCompletionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsClient")
            .field("settings", &self.settings)
            .finish()
    }
}

impl ChatCompletionsClient {
    /// Create a new Chat Completions client with the given settings.
    #[must_use]
    pub fn new(settings: LlmSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for ChatCompletionsClient {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> anyhow::Result<String> {
        let url = chat_url(&self.settings.base_url);

        let body = serde_json::json!({
            "model": self.settings.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_text },
            ],
        });

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let v: serde_json::Value = resp.json().await?;
        extract_content(&v).ok_or_else(|| anyhow!("completion response had no message content"))
    }
}

/// Build the chat completions URL from a base URL.
#[must_use]
fn chat_url(base_url: &str) -> String {
    format!("{}/v1/chat/completions", base_url.trim_end_matches('/'))
}

/// Pull the first choice's message content out of a completion response.
fn extract_content(v: &serde_json::Value) -> Option<String> {
    v["choices"][0]["message"]["content"]
        .as_str()
        .map(ToString::to_string)
}
