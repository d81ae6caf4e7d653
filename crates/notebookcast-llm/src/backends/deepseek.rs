//! DeepSeek API client.
//!
//! DeepSeek exposes an OpenAI-compatible API, so this is a thin wrapper over
//! [`OpenAICompatibleProvider`]. It accepts `json_object` response mode but
//! not JSON-schema constrained decoding.

use crate::chat::{ChatMessage, ChatProvider, ChatResponse, StructuredOutputFormat};
use crate::providers::openai_compatible::{
    ClientOptions, OpenAICompatibleProvider, OpenAIProviderConfig,
};
use crate::{LLMProvider, builder::LLMBuilder, error::LLMError};
use async_trait::async_trait;
use std::sync::Arc;

/// DeepSeek configuration for the OpenAI-compatible provider
struct DeepSeekConfig;

impl OpenAIProviderConfig for DeepSeekConfig {
    const PROVIDER_NAME: &'static str = "DeepSeek";
    const DEFAULT_BASE_URL: &'static str = "https://api.deepseek.com/v1/";
    const DEFAULT_MODEL: &'static str = "deepseek-chat";
    const SUPPORTS_STRUCTURED_OUTPUT: bool = false;
}

/// Client for DeepSeek API
pub struct DeepSeek {
    provider: OpenAICompatibleProvider<DeepSeekConfig>,
}

impl DeepSeek {
    pub fn new(api_key: impl Into<String>, options: ClientOptions) -> Self {
        Self {
            provider: OpenAICompatibleProvider::new(api_key, options),
        }
    }

    pub fn model(&self) -> &str {
        &self.provider.model
    }

    pub fn base_url(&self) -> &str {
        &self.provider.base_url
    }
}

#[async_trait]
impl ChatProvider for DeepSeek {
    /// Sends a chat request to DeepSeek's API.
    async fn chat(
        &self,
        messages: &[ChatMessage],
        json_schema: Option<StructuredOutputFormat>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        self.provider.chat(messages, json_schema).await
    }
}

impl LLMProvider for DeepSeek {}

impl LLMBuilder<DeepSeek> {
    pub fn build(self) -> Result<Arc<DeepSeek>, LLMError> {
        let (api_key, options) = self.into_parts("DeepSeek")?;
        Ok(Arc::new(DeepSeek::new(api_key, options)))
    }
}
