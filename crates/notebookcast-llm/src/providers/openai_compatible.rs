//! Generic client for providers exposing the OpenAI `chat/completions` API.
//!
//! Vendors differ only in their constants (name, base URL, default model,
//! structured-output support), which they declare through
//! [`OpenAIProviderConfig`].

use crate::chat::{ChatMessage, ChatProvider, ChatResponse, StructuredOutputFormat, Usage};
use crate::error::LLMError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

/// Per-vendor constants for the OpenAI-compatible provider.
pub trait OpenAIProviderConfig: Send + Sync {
    const PROVIDER_NAME: &'static str;
    const DEFAULT_BASE_URL: &'static str;
    const DEFAULT_MODEL: &'static str;
    /// Whether `response_format: json_schema` is accepted; otherwise a
    /// requested schema degrades to `json_object`.
    const SUPPORTS_STRUCTURED_OUTPUT: bool;
}

/// Request settings shared by every OpenAI-compatible backend.
///
/// Unset fields fall back to the vendor defaults, or are left out of the
/// request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientOptions {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_seconds: Option<u64>,
    pub top_p: Option<f32>,
}

/// OpenAI-compatible chat client.
pub struct OpenAICompatibleProvider<T: OpenAIProviderConfig> {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub options: ClientOptions,
    client: Client,
    _config: PhantomData<T>,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<OpenAIResponseFormat>,
    stream: bool,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OpenAIResponseFormat {
    JsonObject,
    JsonSchema { json_schema: StructuredOutputFormat },
}

/// Raw `chat/completions` answer.
#[derive(Deserialize, Debug)]
pub struct OpenAIChatResponse {
    pub choices: Vec<OpenAIChatChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
pub struct OpenAIChatChoice {
    pub message: OpenAIChatMsg,
}

#[derive(Deserialize, Debug)]
pub struct OpenAIChatMsg {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse for OpenAIChatResponse {
    fn text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.clone())
    }

    fn usage(&self) -> Option<Usage> {
        self.usage.clone()
    }
}

impl fmt::Display for OpenAIChatResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text().unwrap_or_default())
    }
}

impl<T: OpenAIProviderConfig> OpenAICompatibleProvider<T> {
    pub fn new(api_key: impl Into<String>, options: ClientOptions) -> Self {
        let mut builder = Client::builder();
        if let Some(seconds) = options.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().unwrap_or_else(|err| {
            log::warn!(
                "{}: falling back to default HTTP client: {}",
                T::PROVIDER_NAME,
                err
            );
            Client::new()
        });

        Self {
            api_key: api_key.into(),
            base_url: normalize_base_url(
                options.base_url.as_deref().unwrap_or(T::DEFAULT_BASE_URL),
            ),
            model: options
                .model
                .clone()
                .unwrap_or_else(|| T::DEFAULT_MODEL.to_string()),
            options,
            client,
            _config: PhantomData,
        }
    }

    fn response_format(
        json_schema: Option<StructuredOutputFormat>,
    ) -> Option<OpenAIResponseFormat> {
        json_schema.map(|format| {
            if T::SUPPORTS_STRUCTURED_OUTPUT && format.schema.is_some() {
                OpenAIResponseFormat::JsonSchema {
                    json_schema: format,
                }
            } else {
                OpenAIResponseFormat::JsonObject
            }
        })
    }
}

#[async_trait]
impl<T: OpenAIProviderConfig> ChatProvider for OpenAICompatibleProvider<T> {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        json_schema: Option<StructuredOutputFormat>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        if self.api_key.is_empty() {
            return Err(LLMError::AuthError(format!(
                "Missing {} API key",
                T::PROVIDER_NAME
            )));
        }

        let body = OpenAIChatRequest {
            model: &self.model,
            messages,
            max_tokens: self.options.max_tokens,
            temperature: self.options.temperature,
            top_p: self.options.top_p,
            response_format: Self::response_format(json_schema),
            stream: false,
        };

        let url = format!("{}chat/completions", self.base_url);
        log::debug!(
            "{} request: model={} messages={}",
            T::PROVIDER_NAME,
            self.model,
            messages.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LLMError::AuthError(format!(
                    "{} rejected credentials ({}): {}",
                    T::PROVIDER_NAME,
                    status,
                    error_body
                )),
                _ => LLMError::ProviderError(format!(
                    "{} API returned {}: {}",
                    T::PROVIDER_NAME,
                    status,
                    error_body
                )),
            });
        }

        let raw = response.text().await?;
        let parsed: OpenAIChatResponse =
            serde_json::from_str(&raw).map_err(|e| LLMError::ResponseFormatError {
                message: format!("Failed to decode {} response: {}", T::PROVIDER_NAME, e),
                raw_response: raw.clone(),
            })?;

        if let Some(usage) = &parsed.usage {
            log::debug!(
                "{} usage: prompt={} completion={} total={}",
                T::PROVIDER_NAME,
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        Ok(Box::new(parsed))
    }
}

fn normalize_base_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}
