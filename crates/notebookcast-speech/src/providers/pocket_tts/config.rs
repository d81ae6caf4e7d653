//! Pocket-TTS settings, as read from the `advanced_tts.pocket` config section

use serde::{Deserialize, Serialize};

/// Weights revision published on HuggingFace
pub const DEFAULT_MODEL_ID: &str = "b6369a24";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PocketTTSConfig {
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_decode_steps")]
    pub decode_steps: usize,

    /// Log-probability below which generation stops
    #[serde(default = "default_eos_threshold")]
    pub eos_threshold: f32,

    #[serde(default)]
    pub noise_clamp: Option<f32>,

    /// Load every predefined voice when the provider is built
    #[serde(default = "default_preload_voices")]
    pub preload_voices: bool,
}

fn default_model_id() -> String {
    DEFAULT_MODEL_ID.to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_decode_steps() -> usize {
    1
}

fn default_eos_threshold() -> f32 {
    -4.0
}

fn default_preload_voices() -> bool {
    true
}

impl Default for PocketTTSConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            temperature: default_temperature(),
            decode_steps: default_decode_steps(),
            eos_threshold: default_eos_threshold(),
            noise_clamp: None,
            preload_voices: default_preload_voices(),
        }
    }
}

impl PocketTTSConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.model_id.trim().is_empty() {
            return Err("pocket model_id must not be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "pocket temperature must be within 0.0..=2.0, got {}",
                self.temperature
            ));
        }
        if self.decode_steps == 0 {
            return Err("pocket decode_steps must be at least 1".to_string());
        }
        Ok(())
    }
}
