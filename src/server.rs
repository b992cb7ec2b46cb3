use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::config::AppConfig;
use crate::error::RelayError;
use crate::llm::{ChatCompletionsClient, LlmSettings};
use crate::orchestrator::Orchestrator;
use crate::search::{SearchSettings, SerperClient};
use crate::session::{MemoryThreadStore, ThreadStore};

/// Start the Axum server with the provided configuration.
pub async fn start_server(
    config: Arc<AppConfig>,
    llm_settings: LlmSettings,
    search_settings: SearchSettings,
) -> anyhow::Result<()> {
    info!(
        name: "llm.config.loaded",
        base_url = %llm_settings.base_url,
        model = %llm_settings.model,
        "LLM configuration loaded"
    );
    info!(
        name: "search.config.loaded",
        base_url = %search_settings.base_url,
        "Search configuration loaded"
    );

    let store: Arc<dyn ThreadStore> = Arc::new(MemoryThreadStore::new());
    let llm = Arc::new(ChatCompletionsClient::new(llm_settings));
    let search = Arc::new(SerperClient::new(search_settings));
    let orchestrator = Arc::new(Orchestrator::new(Arc::clone(&store), llm, search));

    let state = AppState {
        orchestrator,
        threads: store,
    };

    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/process-speech", post(api_process_speech))
        .route("/api/threads/{id}/messages", get(api_get_messages))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// API Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Request body for speech processing.
#[derive(Debug, Deserialize)]
struct ProcessSpeechRequest {
    /// Transcribed utterance to process.
    #[serde(rename = "speechText")]
    speech_text: String,
    /// Optional thread id from an earlier response (empty counts as absent).
    #[serde(rename = "threadIdbyUser", default)]
    thread_id_by_user: Option<String>,
}

/// Response from speech processing.
#[derive(Debug, Serialize)]
struct ProcessSpeechResponse {
    /// Thread the exchange was recorded under.
    #[serde(rename = "threadId")]
    thread_id: String,
    /// The assistant's answer.
    response: String,
}

/// POST /api/process-speech - Run one utterance through the pipeline.
async fn api_process_speech(
    State(state): State<AppState>,
    Json(req): Json<ProcessSpeechRequest>,
) -> Result<Json<ProcessSpeechResponse>, RelayError> {
    tracing::info!(
        utterance_length = req.speech_text.len(),
        thread_id = ?req.thread_id_by_user,
        "Received process-speech request"
    );

    let processed = state
        .orchestrator
        .process_speech(&req.speech_text, req.thread_id_by_user.as_deref())
        .await?;

    Ok(Json(ProcessSpeechResponse {
        thread_id: processed.thread_id,
        response: processed.answer.into_text(),
    }))
}

/// Message DTO for API responses.
#[derive(Debug, Serialize)]
struct MessageDto {
    role: String,
    content: String,
}

/// GET /api/threads/:id/messages - Get a thread's messages.
async fn api_get_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MessageDto>>, StatusCode> {
    match state.threads.get(&id).await {
        Ok(Some(messages)) => {
            let messages: Vec<MessageDto> = messages
                .iter()
                .map(|m| MessageDto {
                    role: format!("{:?}", m.role).to_lowercase(),
                    content: m.content.clone(),
                })
                .collect();
            Ok(Json(messages))
        }
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load thread messages");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
