//! Speechbridge
//!
//! A thin HTTP relay that turns a transcribed utterance into a conversational
//! answer. One LLM round trip classifies whether the utterance asks for live
//! data; if so, a web search plus a second LLM round trip produce the answer,
//! otherwise the first reply is the answer. Every exchange is recorded in a
//! conversation thread keyed by an opaque token the caller passes back in.
//!
//! # Architecture
//!
//! - **Server**: Axum-based HTTP server with one processing endpoint
//! - **Orchestrator**: per-request pipeline over the LLM, search, and store seams
//! - **Session**: injected thread store, in-memory by default
//!
//! # Modules
//!
//! - [`llm`]: LLM client trait and implementations
//! - [`search`]: web search provider trait and implementations
//! - [`intent`]: intent classification and routing strategy
//! - [`summarize`]: search result summarization
//! - [`session`]: conversation thread storage
//! - [`orchestrator`]: the per-request pipeline

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::map_err_ignore)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod error;
pub mod intent;
pub mod llm;
pub mod orchestrator;
pub mod search;
pub mod server;
pub mod session;
pub mod summarize;
pub mod telemetry;

use std::sync::Arc;

use orchestrator::Orchestrator;
use session::ThreadStore;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Pipeline driver for speech processing.
    pub orchestrator: Arc<Orchestrator>,
    /// Conversation thread store.
    pub threads: Arc<dyn ThreadStore>,
}
