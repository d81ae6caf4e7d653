//! Builder for configuring and instantiating LLM providers.

use crate::providers::openai_compatible::ClientOptions;
use crate::{LLMProvider, error::LLMError};
use std::marker::PhantomData;

/// Supported LLM backend providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LLMBackend {
    /// DeepSeek API provider
    DeepSeek,
    /// OpenAI API provider
    OpenAI,
}

/// Parses a backend name, case-insensitively.
///
/// ```
/// use std::str::FromStr;
/// use notebookcast_llm::builder::LLMBackend;
///
/// let backend = LLMBackend::from_str("DeepSeek").unwrap();
/// assert_eq!(backend, LLMBackend::DeepSeek);
///
/// let err = LLMBackend::from_str("invalid").unwrap_err();
/// assert!(err.to_string().contains("Unknown LLM backend"));
/// ```
impl std::str::FromStr for LLMBackend {
    type Err = LLMError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deepseek" => Ok(LLMBackend::DeepSeek),
            "openai" => Ok(LLMBackend::OpenAI),
            _ => Err(LLMError::InvalidRequest(format!(
                "Unknown LLM backend: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for LLMBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMBackend::DeepSeek => write!(f, "deepseek"),
            LLMBackend::OpenAI => write!(f, "openai"),
        }
    }
}

/// Collects credentials and [`ClientOptions`] for one backend.
///
/// Each backend implements its own `build` on `LLMBuilder<Backend>`.
pub struct LLMBuilder<L: LLMProvider> {
    backend: PhantomData<L>,
    pub(crate) api_key: Option<String>,
    pub(crate) options: ClientOptions,
}

impl<L: LLMProvider> Default for LLMBuilder<L> {
    fn default() -> Self {
        Self {
            backend: PhantomData,
            api_key: None,
            options: ClientOptions::default(),
        }
    }
}

impl<L: LLMProvider> LLMBuilder<L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the vendor endpoint, e.g. for a proxy or a mock server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.options.base_url = Some(url.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.options.model = Some(model.into());
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.max_tokens = Some(max_tokens);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    /// Per-request timeout, in seconds.
    pub fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.options.timeout_seconds = Some(timeout_seconds);
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.options.top_p = Some(top_p);
        self
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Splits the builder, failing when no key was supplied.
    pub(crate) fn into_parts(self, vendor: &str) -> Result<(String, ClientOptions), LLMError> {
        let api_key = self.api_key.ok_or_else(|| {
            LLMError::InvalidRequest(format!("No API key provided for {vendor}"))
        })?;
        Ok((api_key, self.options))
    }
}
