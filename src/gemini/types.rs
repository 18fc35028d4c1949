//! Gemini API wire types
//!
//! Structs that mirror the Gemini REST JSON format for `generateContent`
//! and `embedContent`. The API speaks camelCase.

use serde::{Deserialize, Serialize};

/// Role of the author of a content turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message from the user
    User,
    /// Message from the model
    Model,
}

impl Role {
    /// Convert the role to its wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// A single turn of content, used for both requests and responses
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Content {
    /// Author of this turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Ordered parts of the turn
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn holding a single text part
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some(Role::User),
            parts: vec![Part::text(text)],
        }
    }

    /// A model turn holding a single text part
    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: Some(Role::Model),
            parts: vec![Part::text(text)],
        }
    }

    /// Concatenated text of all text parts
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .concat()
    }
}

/// A single part of content: either text or inline binary data
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline binary payload (images)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
}

impl Part {
    /// Text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// Inline data part from already base64-encoded bytes
    pub fn inline(mime_type: impl Into<String>, data_base64: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(Blob {
                mime_type: mime_type.into(),
                data: data_base64.into(),
            }),
        }
    }
}

/// Base64-encoded bytes with their MIME type
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// MIME type, e.g. "image/png"
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

/// Request body for `generateContent`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation so far, ending with the new user turn
    pub contents: Vec<Content>,
}

/// Top-level `generateContent` response
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// List of candidate responses from the model
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Feedback about the prompt (e.g., if it was blocked)
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// A single candidate response from the model
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Content of this candidate; absent when generation was stopped early
    #[serde(default)]
    pub content: Option<Content>,
    /// Why the model stopped generating
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Feedback about the prompt
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Reason the prompt was blocked (if applicable)
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Intended downstream use of an embedding
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    /// Text will be stored and searched over
    RetrievalDocument,
}

/// Request body for `embedContent`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EmbedContentRequest {
    /// Fully qualified model name ("models/...")
    pub model: String,
    /// Content to embed
    pub content: Content,
    /// Intended use of the embedding
    pub task_type: TaskType,
}

/// Response body for `embedContent`
#[derive(Deserialize, Debug)]
pub struct EmbedContentResponse {
    /// The embedding
    pub embedding: ContentEmbedding,
}

/// An embedding vector
#[derive(Deserialize, Debug)]
pub struct ContentEmbedding {
    /// Vector components
    #[serde(default)]
    pub values: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some(Role::User),
                parts: vec![Part::text("describe"), Part::inline("image/png", "AAAA")],
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        {"text": "describe"},
                        {"inlineData": {"mimeType": "image/png", "data": "AAAA"}}
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_embed_request_task_type() {
        let request = EmbedContentRequest {
            model: "models/embedding-001".to_string(),
            content: Content {
                role: None,
                parts: vec![Part::text("hello")],
            },
            task_type: TaskType::RetrievalDocument,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["taskType"], "RETRIEVAL_DOCUMENT");
        assert!(value["content"].get("role").is_none());
    }

    #[test]
    fn test_response_with_blocked_candidate() {
        let body = r#"{
            "candidates": [{"finishReason": "SAFETY"}],
            "promptFeedback": {"blockReason": "SAFETY"}
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.candidates[0].content.is_none());
        assert_eq!(parsed.candidates[0].finish_reason.as_deref(), Some("SAFETY"));
        assert_eq!(
            parsed.prompt_feedback.unwrap().block_reason.as_deref(),
            Some("SAFETY")
        );
    }

    #[test]
    fn test_content_text_concatenates_text_parts() {
        let content = Content {
            role: Some(Role::Model),
            parts: vec![
                Part::text("Hello, "),
                Part::inline("image/png", "AAAA"),
                Part::text("world"),
            ],
        };
        assert_eq!(content.text(), "Hello, world");
    }
}
