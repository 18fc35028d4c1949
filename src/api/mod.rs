//! API module
//!
//! Contains HTTP request handlers, one module per interaction mode

pub mod caption;
pub mod chat;
pub mod handlers;
pub mod queries;
pub mod utils;

use crate::services::images::MAX_IMAGE_BYTES;
use crate::state::RouterState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

/// Slack on top of the image limit for multipart framing and the prompt field
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the application routes (without middleware)
pub fn routes(state: RouterState) -> Router {
    Router::new()
        // Page shell
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health_check))
        .route("/api/menu", get(handlers::menu))
        // ChatBot
        .route("/api/chat/history", get(chat::get_history))
        .route("/api/chat/messages", post(chat::send_message))
        .route("/api/chat/session", axum::routing::delete(chat::clear_session))
        // Image Captioning
        .route(
            "/api/caption",
            post(caption::caption_image)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + MULTIPART_OVERHEAD)),
        )
        // Embed text / Ask me anything
        .route("/api/embed", post(queries::embed))
        .route("/api/ask", post(queries::ask))
        .with_state(state)
}
