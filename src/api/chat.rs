//! Chat API endpoints
//!
//! Multi-turn chat backed by the session store. The page keeps the session
//! id and sends it back with every request; a missing id starts a new
//! session.

use crate::api::utils::validate_prompt;
use crate::error::AppError;
use crate::gemini::ChatMessage;
use crate::session::SessionId;
use crate::state::RouterState;
use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Query string identifying a session
#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    /// Session id kept by the page
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// Session id kept by the page (a new session is started if absent)
    #[serde(default)]
    pub session_id: Option<String>,
    /// Message content
    pub message: String,
}

/// A transcript entry as shown by the page
#[derive(Debug, Serialize, PartialEq)]
pub struct MessageView {
    /// Display role ("user" or "assistant")
    pub role: &'static str,
    /// Message text
    pub text: String,
    /// Unix timestamp when the message was recorded
    pub created_at: i64,
}

impl From<&ChatMessage> for MessageView {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.display_role(),
            text: message.text.clone(),
            created_at: message.created_at,
        }
    }
}

/// Transcript of a session
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// Session the transcript belongs to
    pub session_id: SessionId,
    /// Messages, oldest first
    pub history: Vec<MessageView>,
}

/// Reply to a chat message
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    /// Session the message was recorded in
    pub session_id: SessionId,
    /// The model's answer
    pub reply: String,
    /// Full transcript after the exchange
    pub history: Vec<MessageView>,
}

/// Result of clearing a session
#[derive(Debug, Serialize)]
pub struct ClearSessionResponse {
    /// Whether a session existed and was removed
    pub cleared: bool,
}

fn views(history: &[ChatMessage]) -> Vec<MessageView> {
    history.iter().map(MessageView::from).collect()
}

/// GET /api/chat/history - Transcript of the session (created if absent)
pub async fn get_history(
    State(state): State<RouterState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let (session_id, session) = state
        .sessions
        .get_or_create(query.session_id.as_deref())
        .await;

    let chat = session.chat.lock().await;

    Ok(Json(HistoryResponse {
        session_id,
        history: views(chat.history()),
    }))
}

/// POST /api/chat/messages - Send a message and return the reply
///
/// The session is locked for the duration of the model call, so messages
/// within one session are answered in order.
pub async fn send_message(
    State(state): State<RouterState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    validate_prompt("Message", &request.message, state.max_prompt_length)?;

    let (session_id, session) = state
        .sessions
        .get_or_create(request.session_id.as_deref())
        .await;

    info!(
        session_id = %session_id,
        message_len = request.message.len(),
        "Chat message received"
    );

    let mut chat = session.chat.lock().await;
    let reply = chat
        .send_message(&state.gemini, &request.message)
        .await
        .map_err(|e| {
            tracing::error!(session_id = %session_id, error = %e, "Chat message failed");
            e
        })?;
    session.touch();

    info!(
        session_id = %session_id,
        response_len = reply.len(),
        turns = chat.history().len(),
        "Chat reply received"
    );

    Ok(Json(SendMessageResponse {
        session_id,
        reply,
        history: views(chat.history()),
    }))
}

/// DELETE /api/chat/session - Forget a session's transcript
pub async fn clear_session(
    State(state): State<RouterState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<ClearSessionResponse>, AppError> {
    let session_id = query
        .session_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("session_id is required".to_string()))?;

    let cleared = state.sessions.clear(&session_id).await;
    Ok(Json(ClearSessionResponse { cleared }))
}
