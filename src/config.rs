//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults. A `.env` file in the working directory is loaded
//! first, so values there behave like exported variables.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the Gemini API credential
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Default Gemini API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for text, chat and image captioning
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default embedding model
pub const DEFAULT_EMBEDDING_MODEL: &str = "embedding-001";

/// Errors raised while loading configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The API credential is missing or blank
    #[error("{0} not found. Please set it in your environment or .env file.")]
    MissingApiKey(&'static str),

    /// A variable is set but cannot be parsed
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// Raw value found in the environment
        value: String,
    },
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Remote model configuration
    pub gemini: GeminiConfig,
    /// Chat session configuration
    pub session: SessionConfig,
    /// Maximum prompt length in characters
    pub max_prompt_length: usize,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Remote model configuration
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Model used for text, chat and vision requests
    pub model: String,
    /// Model used for embeddings
    pub embedding_model: String,
    /// API base URL (overridable for testing)
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Chat session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Idle time after which a chat session is discarded
    pub ttl_secs: u64,
    /// How often expired sessions are swept
    pub sweep_interval_secs: u64,
}

// The API key must never end up in logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("embedding_model", &self.embedding_model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server", &self.server)
            .field("gemini", &self.gemini)
            .field("session", &self.session)
            .field("max_prompt_length", &self.max_prompt_length)
            .finish()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            sweep_interval_secs: 60,
        }
    }
}

impl GeminiConfig {
    /// Configuration pointing at the public API with default models
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: 60,
        }
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load `.env` (if present) and then read configuration from the environment
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_env()
    }

    /// Read configuration from environment variables with defaults
    ///
    /// # Errors
    /// * `ConfigError::MissingApiKey` if `GOOGLE_API_KEY` is unset or blank
    /// * `ConfigError::InvalidValue` if a numeric variable does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_VAR))?;

        let defaults = GeminiConfig::new(api_key);
        let session_defaults = SessionConfig::default();

        Ok(Self {
            server: ServerConfig {
                port: parse_var("PORT", 8501)?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            gemini: GeminiConfig {
                model: env::var("GEMINI_MODEL").unwrap_or(defaults.model.clone()),
                embedding_model: env::var("GEMINI_EMBEDDING_MODEL")
                    .unwrap_or(defaults.embedding_model.clone()),
                base_url: env::var("GEMINI_API_BASE_URL").unwrap_or(defaults.base_url.clone()),
                timeout_secs: parse_var("GEMINI_TIMEOUT_SECS", defaults.timeout_secs)?,
                api_key: defaults.api_key,
            },
            session: SessionConfig {
                ttl_secs: parse_var("SESSION_TTL_SECS", session_defaults.ttl_secs)?,
                sweep_interval_secs: session_defaults.sweep_interval_secs,
            },
            max_prompt_length: parse_var("MAX_PROMPT_LENGTH", 10_000)?,
        })
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}
