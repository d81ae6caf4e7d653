//! Per-line speech synthesis over the standard or advanced backend.

use crate::retry::RetryPolicy;
use crate::schema::Speaker;
use notebookcast_speech::{
    AudioData, AudioFormat, SpeechRequest, TTSError, TTSProvider, VoiceIdentifier, audio,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("advanced audio generation is not available")]
    AdvancedUnavailable,

    #[error("{provider} cannot speak language '{language}'")]
    LanguageNotSupported { provider: String, language: String },

    #[error("{0}")]
    Tts(#[from] TTSError),

    #[error("failed to write clip {path}: {source}")]
    ClipWrite {
        path: PathBuf,
        #[source]
        source: TTSError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisBackend {
    /// Remote MeloTTS
    Standard,
    /// In-process model
    Advanced,
}

/// Accent and speed the standard backend uses for a speaker.
///
/// Guest speaks slightly slower; for non-English the backend has a single
/// voice, so the host is sped up to tell the two apart.
pub fn standard_voice_params(speaker: Speaker, language: &str) -> (String, f32) {
    let english = language == "EN";
    match speaker {
        Speaker::Guest => {
            let accent = if english { "EN-US" } else { language };
            (accent.to_string(), 0.9)
        }
        Speaker::Host => {
            let accent = if english { "EN-Default" } else { language };
            (accent.to_string(), if english { 1.0 } else { 1.1 })
        }
    }
}

/// `v2/{language}_speaker_{n}`: the host uses the seed, the guest the next
/// one, wrapping at `u32::MAX` so the two never coincide.
pub fn voice_preset(speaker: Speaker, language: &str, voice_seed: u32) -> String {
    let number = match speaker {
        Speaker::Host => voice_seed,
        Speaker::Guest => voice_seed.wrapping_add(1),
    };
    format!("v2/{language}_speaker_{number}")
}

/// Backends and settings shared by every synthesis call.
pub struct SynthesisContext {
    pub standard: Arc<dyn TTSProvider>,
    pub advanced: Option<Arc<dyn TTSProvider>>,
    /// Advanced-backend clips are written here
    pub clip_dir: PathBuf,
    pub standard_retry: RetryPolicy,
}

impl SynthesisContext {
    pub fn new(standard: Arc<dyn TTSProvider>, clip_dir: impl Into<PathBuf>) -> Self {
        Self {
            standard,
            advanced: None,
            clip_dir: clip_dir.into(),
            standard_retry: RetryPolicy::standard_tts_default(),
        }
    }

    pub fn with_advanced(mut self, advanced: Arc<dyn TTSProvider>) -> Self {
        self.advanced = Some(advanced);
        self
    }

    pub fn with_standard_retry(mut self, retry: RetryPolicy) -> Self {
        self.standard_retry = retry;
        self
    }

    pub fn has_advanced(&self) -> bool {
        self.advanced.is_some()
    }
}

#[derive(Clone)]
pub struct VoiceSynthesizer {
    context: Arc<SynthesisContext>,
}

impl VoiceSynthesizer {
    pub fn new(context: Arc<SynthesisContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &SynthesisContext {
        &self.context
    }

    /// Speak one dialogue line.
    ///
    /// `language` is the backend's own code: `EN`, `ZH`... for the standard
    /// backend, `en`, `fr`... for the advanced one.
    pub async fn synthesize(
        &self,
        text: &str,
        speaker: Speaker,
        language: &str,
        backend: SynthesisBackend,
        voice_seed: u32,
    ) -> Result<AudioData, SynthesisError> {
        match backend {
            SynthesisBackend::Standard => self.synthesize_standard(text, speaker, language).await,
            SynthesisBackend::Advanced => {
                self.synthesize_advanced(text, speaker, language, voice_seed)
                    .await
            }
        }
    }

    async fn synthesize_standard(
        &self,
        text: &str,
        speaker: Speaker,
        language: &str,
    ) -> Result<AudioData, SynthesisError> {
        let (accent, speed) = standard_voice_params(speaker, language);
        let provider = &self.context.standard;
        log::debug!(
            "{}: {} line ({} chars), accent {accent}, speed {speed}",
            provider.provider_name(),
            speaker.role(),
            text.chars().count()
        );

        let response = self
            .context
            .standard_retry
            .run("standard tts", |_| {
                let request = SpeechRequest {
                    text: text.to_string(),
                    voice: VoiceIdentifier::new(accent.as_str()),
                    format: AudioFormat::Wav,
                    sample_rate: None,
                    language: Some(language.to_string()),
                    speed: Some(speed),
                };
                provider.generate_speech(request)
            })
            .await?;
        Ok(response.audio)
    }

    async fn synthesize_advanced(
        &self,
        text: &str,
        speaker: Speaker,
        language: &str,
        voice_seed: u32,
    ) -> Result<AudioData, SynthesisError> {
        let provider = self
            .context
            .advanced
            .as_ref()
            .ok_or(SynthesisError::AdvancedUnavailable)?;
        if !provider.supports_language(language) {
            return Err(SynthesisError::LanguageNotSupported {
                provider: provider.provider_name().to_string(),
                language: language.to_string(),
            });
        }

        let preset = voice_preset(speaker, language, voice_seed);
        log::debug!(
            "{}: {} line with preset {preset}",
            provider.provider_name(),
            speaker.role()
        );
        let response = provider
            .generate_speech(SpeechRequest {
                text: text.to_string(),
                voice: VoiceIdentifier::new(preset),
                format: AudioFormat::Wav,
                sample_rate: None,
                language: Some(language.to_string()),
                speed: None,
            })
            .await?;

        let path = clip_path(&self.context.clip_dir, language, speaker);
        write_clip(&path, &response.audio).await?;
        Ok(response.audio)
    }
}

/// `clip_dir/audio_{language}_{role}.wav`, overwritten by every line of the
/// same speaker.
pub fn clip_path(clip_dir: &Path, language: &str, speaker: Speaker) -> PathBuf {
    clip_dir.join(format!("audio_{language}_{}.wav", speaker.role()))
}

async fn write_clip(path: &Path, clip: &AudioData) -> Result<(), SynthesisError> {
    let clip_error = |source| SynthesisError::ClipWrite {
        path: path.to_path_buf(),
        source,
    };
    let io_error = |e, operation: &str| {
        clip_error(TTSError::IoError(
            e,
            operation.to_string(),
            path.display().to_string(),
        ))
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error(e, "create clip directory"))?;
    }
    let bytes = audio::encode_wav(clip).map_err(clip_error)?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| io_error(e, "write clip"))
}
