//! Chat message types and the provider trait every backend implements.

use crate::error::LLMError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of the author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single message in a chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Requested shape of the model output.
///
/// Providers that support JSON-schema constrained decoding forward `schema`
/// as-is; the others fall back to plain JSON-object mode, so `description`
/// should also be mirrored in the prompt by callers that rely on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredOutputFormat {
    /// Name of the schema
    pub name: String,
    /// Human-readable description of the expected output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON schema of the expected output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<serde_json::Value>,
    /// Whether the provider should reject non-conforming output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// Usage metadata for a chat response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A completed chat answer.
pub trait ChatResponse: fmt::Debug + fmt::Display + Send + Sync {
    /// Text content of the first choice, if the model produced any
    fn text(&self) -> Option<String>;

    /// Token accounting, when the provider reports it
    fn usage(&self) -> Option<Usage> {
        None
    }
}

/// Trait for providers that answer chat conversations.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Sends a conversation and waits for the full answer.
    ///
    /// # Arguments
    ///
    /// * `messages` - Conversation history, system message first
    /// * `json_schema` - Optional structured-output request
    async fn chat(
        &self,
        messages: &[ChatMessage],
        json_schema: Option<StructuredOutputFormat>,
    ) -> Result<Box<dyn ChatResponse>, LLMError>;
}
