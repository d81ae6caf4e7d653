use crate::config::LLMConfig;
use crate::error::{PipelineError, Result};
use notebookcast_llm::LLMProvider;
use notebookcast_llm::backends::deepseek::DeepSeek;
#[cfg(feature = "openai")]
use notebookcast_llm::backends::openai::OpenAI;
use notebookcast_llm::builder::{LLMBackend, LLMBuilder};
use std::str::FromStr;
use std::sync::Arc;

pub struct LLMFactory;

impl LLMFactory {
    /// Build the configured provider, reading the key from `api_key_env`.
    pub fn create_llm(config: &LLMConfig) -> Result<Arc<dyn LLMProvider>> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| PipelineError::Config(format!("{} not set", config.api_key_env)))?;
        Self::create_llm_with_key(config, api_key)
    }

    pub fn create_llm_with_key(
        config: &LLMConfig,
        api_key: impl Into<String>,
    ) -> Result<Arc<dyn LLMProvider>> {
        let backend = LLMBackend::from_str(&config.provider)
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        log::debug!("Creating {} client for model {}", backend, config.model);

        match backend {
            LLMBackend::DeepSeek => Self::create_deepseek(config, api_key.into()),
            LLMBackend::OpenAI => Self::create_openai(config, api_key.into()),
        }
    }

    fn create_deepseek(config: &LLMConfig, api_key: String) -> Result<Arc<dyn LLMProvider>> {
        let mut builder = LLMBuilder::<DeepSeek>::new()
            .api_key(api_key)
            .model(&config.model)
            .temperature(config.temperature)
            .max_tokens(config.max_tokens)
            .timeout_seconds(config.timeout_seconds);
        if let Some(base_url) = &config.base_url {
            builder = builder.base_url(base_url);
        }

        let llm = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        Ok(llm as Arc<dyn LLMProvider>)
    }

    #[cfg(feature = "openai")]
    fn create_openai(config: &LLMConfig, api_key: String) -> Result<Arc<dyn LLMProvider>> {
        let mut builder = LLMBuilder::<OpenAI>::new()
            .api_key(api_key)
            .model(&config.model)
            .temperature(config.temperature)
            .max_tokens(config.max_tokens)
            .timeout_seconds(config.timeout_seconds);
        if let Some(base_url) = &config.base_url {
            builder = builder.base_url(base_url);
        }

        let llm = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        Ok(llm as Arc<dyn LLMProvider>)
    }

    #[cfg(not(feature = "openai"))]
    fn create_openai(_config: &LLMConfig, _api_key: String) -> Result<Arc<dyn LLMProvider>> {
        Err(PipelineError::Config(
            "OpenAI support requires the `openai` feature".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider() {
        let config = LLMConfig {
            provider: "anthropic".to_string(),
            ..LLMConfig::default()
        };
        let err = LLMFactory::create_llm_with_key(&config, "sk-test").err().unwrap();
        assert!(err.to_string().contains("Unknown LLM backend"));
    }

    #[test]
    fn test_missing_key_env() {
        let config = LLMConfig {
            api_key_env: "NOTEBOOKCAST_TEST_UNSET_KEY".to_string(),
            ..LLMConfig::default()
        };
        let err = LLMFactory::create_llm(&config).err().unwrap();
        assert!(matches!(err, PipelineError::Config(msg) if msg.contains("NOTEBOOKCAST_TEST_UNSET_KEY")));
    }

    #[test]
    fn test_deepseek_from_defaults() {
        assert!(LLMFactory::create_llm_with_key(&LLMConfig::default(), "sk-test").is_ok());
    }
}
