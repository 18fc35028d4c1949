// Application state shared by all handlers
// Holds the model client, the chat session store and input limits

use crate::config::Config;
use crate::gemini::{GeminiClient, GeminiError};
use crate::session::SessionStore;
use std::sync::Arc;
use std::time::Duration;

/// Main application state
pub struct AppState {
    /// Client for the remote model (shared connection pool)
    pub gemini: GeminiClient,
    /// Per-user chat transcripts
    pub sessions: Arc<SessionStore>,
    /// Maximum prompt length in characters
    pub max_prompt_length: usize,
}

/// State handle passed to every axum handler
pub type RouterState = Arc<AppState>;

impl AppState {
    /// Create application state from explicit parts
    pub fn new(gemini: GeminiClient, sessions: Arc<SessionStore>, max_prompt_length: usize) -> Self {
        Self {
            gemini,
            sessions,
            max_prompt_length,
        }
    }

    /// Build application state from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, GeminiError> {
        let gemini = GeminiClient::new(&config.gemini)?;
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(
            config.session.ttl_secs,
        )));
        Ok(Self::new(gemini, sessions, config.max_prompt_length))
    }
}
