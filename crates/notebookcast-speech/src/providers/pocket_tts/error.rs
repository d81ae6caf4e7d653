use super::voices::PredefinedVoice;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PocketTTSError {
    #[error("Invalid Pocket-TTS configuration: {0}")]
    Config(String),

    #[error("Failed to load Pocket-TTS model '{model}': {message}")]
    ModelLoad { model: String, message: String },

    #[error("Unknown voice '{0}'")]
    UnknownVoice(String),

    #[error("Voice '{voice}' could not be prepared: {message}")]
    VoicePrep {
        voice: PredefinedVoice,
        message: String,
    },

    #[error("Synthesis failed for {chars} characters: {message}")]
    Synthesis { chars: usize, message: String },

    #[error("Voice state cache lock was poisoned")]
    CachePoisoned,
}

pub type Result<T> = std::result::Result<T, PocketTTSError>;

impl From<PocketTTSError> for crate::TTSError {
    fn from(err: PocketTTSError) -> Self {
        match err {
            PocketTTSError::UnknownVoice(name) => {
                crate::TTSError::VoiceNotFound(name, super::voices_catalog())
            }
            PocketTTSError::ModelLoad { model, message } => {
                crate::TTSError::ModelNotFound(model, message)
            }
            PocketTTSError::Synthesis { chars, message } => {
                crate::TTSError::GenerationFailed(message, chars, "pocket-tts".to_string())
            }
            other => crate::TTSError::ProviderError(other.to_string(), "pocket-tts".to_string()),
        }
    }
}
