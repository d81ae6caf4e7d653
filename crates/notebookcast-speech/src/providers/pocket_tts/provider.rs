use super::config::PocketTTSConfig;
use super::engine::Engine;
use super::error::{PocketTTSError, Result};
use super::voices::PredefinedVoice;
use crate::{
    AudioData, ModelInfo, SpeechRequest, SpeechResponse, TTSError, TTSModelsProvider, TTSProvider,
    TTSResult, TTSSpeechProvider,
};
use async_trait::async_trait;

/// English-only provider backed by the Pocket-TTS model
pub struct PocketTTS {
    config: PocketTTSConfig,
    engine: Engine,
}

impl PocketTTS {
    /// Loads the model, downloading weights on first use.
    pub fn new(config: PocketTTSConfig) -> Result<Self> {
        log::info!("Loading Pocket-TTS model {}", config.model_id);
        let engine = Engine::load(&config)?;
        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &PocketTTSConfig {
        &self.config
    }
}

impl TTSProvider for PocketTTS {
    fn provider_name(&self) -> &str {
        "pocket-tts"
    }
}

#[async_trait]
impl TTSSpeechProvider for PocketTTS {
    async fn generate_speech(&self, request: SpeechRequest) -> TTSResult<SpeechResponse> {
        if let Some(language) = request.language.as_deref() {
            if !self.supports_language(language) {
                return Err(TTSError::UnsupportedLanguage(
                    language.to_string(),
                    self.provider_name().to_string(),
                    self.supported_languages().join(", "),
                ));
            }
        }

        let voice = PredefinedVoice::resolve(request.voice.name())
            .ok_or_else(|| PocketTTSError::UnknownVoice(request.voice.name().to_string()))?;
        log::debug!("Pocket-TTS: {} speaks as {}", request.voice.name(), voice);

        let engine = self.engine.clone();
        let text = request.text;
        let (text, samples) = tokio::task::spawn_blocking(move || {
            let samples = engine.render(&text, voice);
            (text, samples)
        })
        .await
        .map_err(|e| TTSError::Other(e.to_string(), "pocket-tts worker".to_string()))?;

        Ok(SpeechResponse::new(
            text,
            AudioData::new(samples?, 1, self.engine.sample_rate()),
        ))
    }

    fn default_sample_rate(&self) -> u32 {
        self.engine.sample_rate()
    }
}

#[async_trait]
impl TTSModelsProvider for PocketTTS {
    fn get_current_model(&self) -> ModelInfo {
        ModelInfo {
            id: self.config.model_id.clone(),
            name: format!("pocket-tts {}", self.config.model_id),
            version: None,
            description: Some("Pocket-TTS, 24kHz English speech".to_string()),
            languages: self.supported_languages(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AudioFormat, VoiceIdentifier};

    #[tokio::test]
    #[ignore = "requires HuggingFace model download"]
    async fn test_generate_preset_voice() {
        let provider = PocketTTS::new(PocketTTSConfig {
            preload_voices: false,
            ..Default::default()
        })
        .unwrap();
        let response = provider
            .generate_speech(SpeechRequest {
                text: "Hello".to_string(),
                voice: VoiceIdentifier::new("v2/en_speaker_2"),
                format: AudioFormat::Wav,
                sample_rate: None,
                language: Some("en".to_string()),
                speed: None,
            })
            .await
            .unwrap();
        assert!(response.duration_ms > 0);
    }
}
