//! Gemini-specific error types
//!
//! Errors that can occur while talking to the remote model (transport,
//! HTTP status, safety blocks, malformed responses).

use thiserror::Error;

/// Errors that can occur during a Gemini API call
#[derive(Error, Debug)]
pub enum GeminiError {
    /// No credential configured
    #[error("API key is empty")]
    EmptyApiKey,

    /// The HTTP request could not be sent or the body could not be read
    ///
    /// The request URL is stripped before the error is stored.
    #[error("Failed to send HTTP request to Gemini API: {0}")]
    Transport(reqwest::Error),

    /// The API answered 429
    #[error("Gemini API rate limit exceeded (HTTP 429): {0}")]
    RateLimited(String),

    /// The API answered with a non-success status
    #[error("Gemini API returned error status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw error body
        body: String,
    },

    /// The prompt or the answer was blocked by the safety filters
    #[error("Gemini API blocked the prompt: {0}")]
    Blocked(String),

    /// The response body was not the JSON we expected
    #[error("Failed to parse JSON response from Gemini API: {reason} - Response body: {body}")]
    InvalidResponse {
        /// Parser error
        reason: String,
        /// Raw response body
        body: String,
    },

    /// The response carried no candidates
    #[error("Gemini API response contains no candidates")]
    NoCandidates,

    /// The first candidate carried no text
    #[error("Gemini API response text is empty")]
    EmptyText,

    /// The embedding response carried no values
    #[error("Gemini API returned an empty embedding")]
    EmptyEmbedding,
}

impl From<reqwest::Error> for GeminiError {
    fn from(err: reqwest::Error) -> Self {
        GeminiError::Transport(err.without_url())
    }
}

impl GeminiError {
    /// Whether the error is the remote side throttling us
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GeminiError::RateLimited(_))
    }
}
