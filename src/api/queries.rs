//! One-shot query endpoints
//!
//! "Ask me anything" text completion and text embeddings. Neither keeps any
//! state between calls.

use crate::api::utils::validate_prompt;
use crate::error::AppError;
use crate::state::RouterState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Request for a one-shot answer
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Question forwarded verbatim to the model
    pub prompt: String,
}

/// One-shot answer
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Model answer
    pub response: String,
}

/// Request for an embedding
#[derive(Debug, Deserialize)]
pub struct EmbedRequest {
    /// Text to embed
    pub text: String,
}

/// Embedding vector
#[derive(Debug, Serialize)]
pub struct EmbedResponse {
    /// Vector components
    pub embedding: Vec<f32>,
    /// Number of components
    pub dimensions: usize,
}

/// POST /api/ask - Answer a single question
pub async fn ask(
    State(state): State<RouterState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    validate_prompt("Prompt", &request.prompt, state.max_prompt_length)?;

    info!(prompt_len = request.prompt.len(), "Question received");
    let response = state.gemini.generate_text(&request.prompt).await?;
    info!(response_len = response.len(), "Answer received");

    Ok(Json(AskResponse { response }))
}

/// POST /api/embed - Embedding of a piece of text
pub async fn embed(
    State(state): State<RouterState>,
    Json(request): Json<EmbedRequest>,
) -> Result<Json<EmbedResponse>, AppError> {
    validate_prompt("Text", &request.text, state.max_prompt_length)?;

    let embedding = state.gemini.embed_text(&request.text).await?;
    info!(dimensions = embedding.len(), "Embedding generated");

    Ok(Json(EmbedResponse {
        dimensions: embedding.len(),
        embedding,
    }))
}
