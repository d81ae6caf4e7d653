use crate::{AudioFormat, ModelInfo, SpeechRequest, SpeechResponse, TTSResult};
use async_trait::async_trait;

/// Marker Trait for TTS providers
///
/// This trait combines all TTS capabilities into a single provider interface.
/// Providers should implement this marker trait along with the specific capability traits.
pub trait TTSProvider: TTSSpeechProvider + TTSModelsProvider + Send + Sync {
    /// Short provider name used in logs and errors
    fn provider_name(&self) -> &str;
}

/// Trait for TTS speech generation capabilities
#[async_trait]
pub trait TTSSpeechProvider: Send + Sync {
    /// Generate speech from text (required)
    ///
    /// # Arguments
    /// * `request` - Speech generation request with text, voice, and format
    ///
    /// # Returns
    /// Speech response with decoded audio and metadata
    async fn generate_speech(&self, request: SpeechRequest) -> TTSResult<SpeechResponse>;

    /// Get supported audio formats (default: WAV only)
    fn supported_formats(&self) -> Vec<AudioFormat> {
        vec![AudioFormat::Wav]
    }

    /// Get default sample rate
    fn default_sample_rate(&self) -> u32 {
        24000
    }
}

/// Trait for TTS model management capabilities
#[async_trait]
pub trait TTSModelsProvider: Send + Sync {
    /// List available models (optional)
    async fn list_models(&self) -> TTSResult<Vec<ModelInfo>> {
        Ok(vec![self.get_current_model()])
    }

    /// Get current model information (required)
    fn get_current_model(&self) -> ModelInfo;

    /// Get supported languages, as lowercase codes
    fn supported_languages(&self) -> Vec<String> {
        vec!["en".to_string()]
    }

    /// Whether `language` appears in [`supported_languages`](Self::supported_languages),
    /// compared case-insensitively.
    fn supports_language(&self, language: &str) -> bool {
        self.supported_languages()
            .iter()
            .any(|code| code.eq_ignore_ascii_case(language))
    }
}
