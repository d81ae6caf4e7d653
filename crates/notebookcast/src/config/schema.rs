use crate::retry::RetryPolicy;
use notebookcast_speech::AudioFormat;
use notebookcast_speech::providers::melo::MeloConfig;
#[cfg(feature = "pocket-tts")]
use notebookcast_speech::providers::pocket_tts::PocketTTSConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration. Every field has a default, so an empty document
/// is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotebookcastConfig {
    #[serde(default)]
    pub llm: LLMConfig,
    #[serde(default)]
    pub reader: ReaderConfig,
    #[serde(default)]
    pub standard_tts: StandardTTSConfig,
    #[serde(default)]
    pub advanced_tts: AdvancedTTSConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    /// "deepseek" or "openai"
    #[serde(default = "default_llm_provider")]
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u64,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "RetryPolicy::llm_default")]
    pub retry: RetryPolicy,
}

fn default_llm_provider() -> String {
    "deepseek".to_string()
}

fn default_llm_model() -> String {
    "deepseek-chat".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_llm_timeout() -> u64 {
    30
}

fn default_api_key_env() -> String {
    "DEEPSEEK_API_KEY".to_string()
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            base_url: None,
            model: default_llm_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_llm_timeout(),
            api_key_env: default_api_key_env(),
            retry: RetryPolicy::llm_default(),
        }
    }
}

/// URL-to-text reader service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// The page URL is appended verbatim to this prefix
    #[serde(default = "default_reader_base_url")]
    pub base_url: String,
    #[serde(default = "default_reader_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "RetryPolicy::reader_default")]
    pub retry: RetryPolicy,
}

fn default_reader_base_url() -> String {
    "https://r.jina.ai/".to_string()
}

fn default_reader_timeout() -> u64 {
    60
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            base_url: default_reader_base_url(),
            timeout_seconds: default_reader_timeout(),
            retry: RetryPolicy::reader_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardTTSConfig {
    #[serde(flatten)]
    pub melo: MeloConfig,
    #[serde(default = "RetryPolicy::standard_tts_default")]
    pub retry: RetryPolicy,
}

impl Default for StandardTTSConfig {
    fn default() -> Self {
        Self {
            melo: MeloConfig::default(),
            retry: RetryPolicy::standard_tts_default(),
        }
    }
}

/// In-process backend. Loading it costs a model download on first use, so
/// it is off unless enabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvancedTTSConfig {
    #[serde(default)]
    pub enabled: bool,
    #[cfg(feature = "pocket-tts")]
    #[serde(default)]
    pub pocket: PocketTTSConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Exported podcasts land here and are swept by age
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// Per-line clips written by the advanced backend
    #[serde(default = "default_clip_dir")]
    pub clip_dir: PathBuf,
    #[serde(default = "default_retention_seconds")]
    pub retention_seconds: u64,
    #[serde(default = "default_format")]
    pub format: AudioFormat,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./notebookcast_cache/")
}

fn default_clip_dir() -> PathBuf {
    PathBuf::from("./notebookcast_cache/clips/")
}

fn default_retention_seconds() -> u64 {
    86_400
}

fn default_format() -> AudioFormat {
    AudioFormat::Mp3
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            clip_dir: default_clip_dir(),
            retention_seconds: default_retention_seconds(),
            format: default_format(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum combined source length, in Unicode scalar values
    #[serde(default = "default_character_limit")]
    pub character_limit: usize,
}

fn default_character_limit() -> usize {
    100_000
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            character_limit: default_character_limit(),
        }
    }
}
