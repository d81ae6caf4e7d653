//! Configuration for the MeloTTS provider

use serde::{Deserialize, Serialize};

/// Configuration for the MeloTTS provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeloConfig {
    /// Root URL of the Gradio app
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path segment Gradio mounts its API under
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Gradio endpoint name
    #[serde(default = "default_api_name")]
    pub api_name: String,

    /// Per-request timeout; synthesis of a long line can take a while
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Optional Hugging Face token for private or rate-limited spaces
    #[serde(default)]
    pub hf_token: Option<String>,
}

fn default_base_url() -> String {
    "https://mrfakename-melotts.hf.space".to_string()
}

fn default_api_prefix() -> String {
    "gradio_api".to_string()
}

fn default_api_name() -> String {
    "synthesize".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

impl Default for MeloConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            api_name: default_api_name(),
            timeout_seconds: default_timeout_seconds(),
            hf_token: None,
        }
    }
}

impl MeloConfig {
    /// `{base}/{prefix}/call/{api_name}`
    pub fn call_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            format!("{}/call/{}", base, self.api_name)
        } else {
            format!("{}/{}/call/{}", base, prefix, self.api_name)
        }
    }

    /// URL serving a file path produced by the app
    pub fn file_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            format!("{}/file={}", base, path)
        } else {
            format!("{}/{}/file={}", base, prefix, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MeloConfig::default();
        assert_eq!(
            config.call_url(),
            "https://mrfakename-melotts.hf.space/gradio_api/call/synthesize"
        );
        assert_eq!(config.timeout_seconds, 120);
    }

    #[test]
    fn test_empty_prefix_and_trailing_slash() {
        let config = MeloConfig {
            base_url: "http://localhost:7860/".to_string(),
            api_prefix: String::new(),
            ..MeloConfig::default()
        };
        assert_eq!(config.call_url(), "http://localhost:7860/call/synthesize");
        assert_eq!(
            config.file_url("/tmp/a.wav"),
            "http://localhost:7860/file=/tmp/a.wav"
        );
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: MeloConfig = serde_json::from_str(r#"{"base_url":"http://x"}"#).unwrap();
        assert_eq!(config.api_prefix, "gradio_api");
        assert_eq!(config.api_name, "synthesize");
    }
}
