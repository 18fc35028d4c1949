//! Multi-turn chat session
//!
//! Keeps the transcript of a conversation and replays it to the model on
//! every send, so the model sees the full context.

use crate::gemini::client::GenerativeModel;
use crate::gemini::error::GeminiError;
use crate::gemini::types::{Content, Role};
use chrono::Utc;
use serde::Serialize;

/// A single message in a chat transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    /// Author of the message
    pub role: Role,
    /// Text of the message
    pub text: String,
    /// When the message was recorded (Unix timestamp)
    pub created_at: i64,
}

impl ChatMessage {
    /// Create a new message stamped with the current time
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            created_at: Utc::now().timestamp(),
        }
    }

    /// Role label shown in the page ("model" is shown as "assistant")
    pub fn display_role(&self) -> &'static str {
        translate_role(self.role.as_str())
    }

    fn to_content(&self) -> Content {
        match self.role {
            Role::User => Content::user_text(&self.text),
            Role::Model => Content::model_text(&self.text),
        }
    }
}

/// Map a model-side role name to the label the chat view uses
pub fn translate_role(role: &str) -> &str {
    if role == "model" {
        "assistant"
    } else {
        role
    }
}

/// An ordered chat transcript
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    history: Vec<ChatMessage>,
}

impl ChatSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript so far, oldest first
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Send a user message and record the exchange
    ///
    /// The full transcript plus the new message is sent to the model. The
    /// user message and the reply are appended only when the call succeeds,
    /// so a failed send leaves the transcript untouched.
    pub async fn send_message<M>(&mut self, model: &M, text: &str) -> Result<String, GeminiError>
    where
        M: GenerativeModel + ?Sized,
    {
        let mut contents: Vec<Content> = self.history.iter().map(ChatMessage::to_content).collect();
        contents.push(Content::user_text(text));

        let reply = model.generate_content(contents).await?;

        self.history.push(ChatMessage::new(Role::User, text));
        self.history.push(ChatMessage::new(Role::Model, reply.clone()));

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Echoes the turn count, or fails when told to
    struct FakeModel {
        fail: bool,
        seen: Mutex<Vec<Vec<Content>>>,
    }

    impl FakeModel {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerativeModel for FakeModel {
        async fn generate_content(&self, contents: Vec<Content>) -> Result<String, GeminiError> {
            let turns = contents.len();
            self.seen.lock().unwrap().push(contents);
            if self.fail {
                Err(GeminiError::NoCandidates)
            } else {
                Ok(format!("reply to {} turns", turns))
            }
        }
    }

    #[tokio::test]
    async fn test_send_appends_user_and_model_messages() {
        let model = FakeModel::new(false);
        let mut session = ChatSession::new();

        let reply = session.send_message(&model, "Hello").await.unwrap();

        assert_eq!(reply, "reply to 1 turns");
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0].role, Role::User);
        assert_eq!(session.history()[0].text, "Hello");
        assert_eq!(session.history()[1].role, Role::Model);
        assert_eq!(session.history()[1].text, "reply to 1 turns");
    }

    #[tokio::test]
    async fn test_second_send_replays_history() {
        let model = FakeModel::new(false);
        let mut session = ChatSession::new();

        session.send_message(&model, "first").await.unwrap();
        session.send_message(&model, "second").await.unwrap();

        let seen = model.seen.lock().unwrap();
        let last = seen.last().unwrap();
        assert_eq!(last.len(), 3);
        assert_eq!(last[0], Content::user_text("first"));
        assert_eq!(last[1], Content::model_text("reply to 1 turns"));
        assert_eq!(last[2], Content::user_text("second"));
        assert_eq!(session.history().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_send_leaves_history_unchanged() {
        let ok = FakeModel::new(false);
        let failing = FakeModel::new(true);
        let mut session = ChatSession::new();
        session.send_message(&ok, "first").await.unwrap();

        let result = session.send_message(&failing, "second").await;

        assert!(result.is_err());
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_translate_role() {
        assert_eq!(translate_role("model"), "assistant");
        assert_eq!(translate_role("user"), "user");
        assert_eq!(ChatMessage::new(Role::Model, "x").display_role(), "assistant");
    }
}
