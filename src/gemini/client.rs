//! Gemini API client
//!
//! Direct HTTP client for the Gemini REST API. One shared `reqwest::Client`
//! backs every call (connection pooling). Exposes the four request/response
//! operations the UI needs: text completion, image + text completion,
//! embeddings, and the raw multi-turn call used by chat sessions.

use crate::config::GeminiConfig;
use crate::gemini::error::GeminiError;
use crate::gemini::types::{
    Content, EmbedContentRequest, EmbedContentResponse, GenerateContentRequest,
    GenerateContentResponse, Part, Role, TaskType,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use serde::{de::DeserializeOwned, Serialize};

/// Finish reason reported when a candidate was cut by the safety filters
const SAFETY_FINISH_REASON: &str = "SAFETY";

/// Header carrying the credential, so it never appears in a request URL
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Anything that can turn a list of content turns into a text answer
///
/// Chat sessions are generic over this so they can be driven without the
/// network.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Send the full list of turns and return the model's text answer
    async fn generate_content(&self, contents: Vec<Content>) -> Result<String, GeminiError>;
}

/// Client for the Gemini REST API
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    embedding_model: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client from configuration
    ///
    /// # Errors
    /// * `GeminiError::EmptyApiKey` if the key is blank
    /// * `GeminiError::Transport` if the HTTP client cannot be built
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        if config.api_key.trim().is_empty() {
            return Err(GeminiError::EmptyApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: model_path(&config.model).to_string(),
            embedding_model: model_path(&config.embedding_model).to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Name of the text/vision model (without the `models/` prefix)
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Name of the embedding model (without the `models/` prefix)
    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    /// Plain text completion
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GeminiError> {
        self.generate_content(vec![Content::user_text(prompt)]).await
    }

    /// Image + text completion
    ///
    /// # Arguments
    /// * `prompt` - Instruction sent alongside the image
    /// * `mime_type` - MIME type of `image` (e.g. "image/png")
    /// * `image` - Raw image bytes, sent base64-encoded inline
    pub async fn generate_with_image(
        &self,
        prompt: &str,
        mime_type: &str,
        image: &[u8],
    ) -> Result<String, GeminiError> {
        let content = Content {
            role: Some(Role::User),
            parts: vec![
                Part::text(prompt),
                Part::inline(mime_type, BASE64_STANDARD.encode(image)),
            ],
        };

        tracing::debug!(
            model = %self.model,
            mime_type = %mime_type,
            image_bytes = image.len(),
            "Requesting image caption"
        );

        self.generate_content(vec![content]).await
    }

    /// Retrieve an embedding for a document
    pub async fn embed_text(&self, text: &str) -> Result<Vec<f32>, GeminiError> {
        let url = self.endpoint(&self.embedding_model, "embedContent");
        let request = EmbedContentRequest {
            model: format!("models/{}", self.embedding_model),
            content: Content {
                role: None,
                parts: vec![Part::text(text)],
            },
            task_type: TaskType::RetrievalDocument,
        };

        tracing::debug!(
            model = %self.embedding_model,
            text_len = text.len(),
            "Calling Gemini embedContent"
        );

        let parsed: EmbedContentResponse = self.post_json(&url, &request).await?;
        let values = parsed.embedding.values;
        if values.is_empty() {
            return Err(GeminiError::EmptyEmbedding);
        }

        tracing::debug!(dimensions = values.len(), "Received embedding");
        Ok(values)
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, GeminiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status_code,
                error_body = %error_body,
                "Gemini API returned error status"
            );

            if status_code == 429 {
                return Err(GeminiError::RateLimited(error_body));
            }
            return Err(GeminiError::Status {
                status: status_code,
                body: error_body,
            });
        }

        let response_body = response.text().await?;
        serde_json::from_str(&response_body).map_err(|e| GeminiError::InvalidResponse {
            reason: e.to_string(),
            body: response_body,
        })
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_content(&self, contents: Vec<Content>) -> Result<String, GeminiError> {
        let url = self.endpoint(&self.model, "generateContent");
        let turns = contents.len();
        let request = GenerateContentRequest { contents };

        tracing::debug!(model = %self.model, turns = turns, "Calling Gemini generateContent");

        let parsed: GenerateContentResponse = self.post_json(&url, &request).await?;
        let text = extract_text(parsed)?;

        tracing::debug!(
            response_len = text.len(),
            "Successfully received response from Gemini API"
        );
        Ok(text)
    }
}

/// Strip an optional `models/` prefix from a model name
pub fn model_path(name: &str) -> &str {
    name.strip_prefix("models/").unwrap_or(name)
}

/// Pull the answer text out of a `generateContent` response
fn extract_text(parsed: GenerateContentResponse) -> Result<String, GeminiError> {
    if let Some(reason) = parsed
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_ref())
    {
        return Err(GeminiError::Blocked(reason.clone()));
    }

    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or(GeminiError::NoCandidates)?;

    let text = candidate.content.map(|c| c.text()).unwrap_or_default();
    if text.is_empty() {
        if candidate.finish_reason.as_deref() == Some(SAFETY_FINISH_REASON) {
            return Err(GeminiError::Blocked(SAFETY_FINISH_REASON.to_string()));
        }
        return Err(GeminiError::EmptyText);
    }

    Ok(text)
}
