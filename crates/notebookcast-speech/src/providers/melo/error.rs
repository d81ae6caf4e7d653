//! Error types for the MeloTTS provider

use thiserror::Error;

/// MeloTTS specific errors
#[derive(Error, Debug)]
pub enum MeloTTSError {
    /// Transport failure talking to the space
    #[error("MeloTTS request failed: {0}\nStage: {1}")]
    RequestError(String, String),

    /// The space answered with a non-success status
    #[error("MeloTTS returned HTTP {0}: {1}\nStage: {2}")]
    StatusError(u16, String, String),

    /// The queued job reported an error event
    #[error("MeloTTS job failed: {0}\nEvent id: {1}")]
    JobFailed(String, String),

    /// The response did not have the documented shape
    #[error("Unexpected MeloTTS response: {0}\nStage: {1}")]
    ProtocolError(String, String),

    /// The generated file could not be decoded
    #[error("Failed to decode MeloTTS audio: {0}\nURL: {1}")]
    AudioError(String, String),
}

impl MeloTTSError {
    pub fn request_error(err: reqwest::Error, stage: impl Into<String>) -> Self {
        Self::RequestError(err.to_string(), stage.into())
    }

    pub fn protocol_error(msg: impl Into<String>, stage: impl Into<String>) -> Self {
        Self::ProtocolError(msg.into(), stage.into())
    }
}

/// Result type for MeloTTS operations
pub type Result<T> = std::result::Result<T, MeloTTSError>;

impl From<MeloTTSError> for crate::TTSError {
    fn from(err: MeloTTSError) -> Self {
        match err {
            MeloTTSError::AudioError(msg, url) => {
                crate::TTSError::DecodeError(format!("{} (url: {})", msg, url))
            }
            other => crate::TTSError::ProviderError(other.to_string(), "melotts".to_string()),
        }
    }
}
