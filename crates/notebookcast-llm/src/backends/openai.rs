//! OpenAI API client.
//!
//! Useful as an alternative script generator, and against any self-hosted
//! server that mimics the OpenAI API when paired with a custom base URL.

use crate::chat::{ChatMessage, ChatProvider, ChatResponse, StructuredOutputFormat};
use crate::providers::openai_compatible::{
    ClientOptions, OpenAICompatibleProvider, OpenAIProviderConfig,
};
use crate::{LLMProvider, builder::LLMBuilder, error::LLMError};
use async_trait::async_trait;
use std::sync::Arc;

struct OpenAIConfig;

impl OpenAIProviderConfig for OpenAIConfig {
    const PROVIDER_NAME: &'static str = "OpenAI";
    const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1/";
    const DEFAULT_MODEL: &'static str = "gpt-4.1-mini";
    const SUPPORTS_STRUCTURED_OUTPUT: bool = true;
}

/// Client for OpenAI API
pub struct OpenAI {
    provider: OpenAICompatibleProvider<OpenAIConfig>,
}

impl OpenAI {
    pub fn new(api_key: impl Into<String>, options: ClientOptions) -> Self {
        Self {
            provider: OpenAICompatibleProvider::new(api_key, options),
        }
    }

    pub fn model(&self) -> &str {
        &self.provider.model
    }
}

#[async_trait]
impl ChatProvider for OpenAI {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        json_schema: Option<StructuredOutputFormat>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        self.provider.chat(messages, json_schema).await
    }
}

impl LLMProvider for OpenAI {}

impl LLMBuilder<OpenAI> {
    pub fn build(self) -> Result<Arc<OpenAI>, LLMError> {
        let (api_key, options) = self.into_parts("OpenAI")?;
        Ok(Arc::new(OpenAI::new(api_key, options)))
    }
}
