use thiserror::Error;

/// TTS-related errors
#[derive(Error, Debug)]
pub enum TTSError {
    /// Provider-specific error
    #[error("TTS provider error: {0}\nProvider: {1}")]
    ProviderError(String, String),

    /// Voice not found
    #[error("Voice not found: '{0}'\nAvailable voices: {1}")]
    VoiceNotFound(String, String),

    /// The backend cannot speak the requested language
    #[error("Language '{0}' is not supported by {1}\nSupported languages: {2}")]
    UnsupportedLanguage(String, String, String),

    /// Audio generation failed
    #[error(
        "Audio generation failed: {0}\nInput text length: {1} characters\nVoice: {2}\nSuggestion: Try shorter text or check model initialization"
    )]
    GenerationFailed(String, usize, String),

    /// Audio bytes could not be decoded
    #[error("Audio decode failed: {0}")]
    DecodeError(String),

    /// Audio could not be encoded or written
    #[error("Audio encode failed: {0}")]
    EncodeError(String),

    /// IO error
    #[error(
        "IO error during TTS operation: {0}\nOperation: {1}\nPath: {2}\nSuggestion: Check file permissions and disk space"
    )]
    IoError(std::io::Error, String, String),

    /// Model not found
    #[error(
        "Model not found: '{0}'\nModel path: {1}\nSuggestion: Ensure model is downloaded from HuggingFace. Check HUGGINGFACE_TOKEN environment variable"
    )]
    ModelNotFound(String, String),

    /// Other errors
    #[error("TTS error: {0}\nContext: {1}")]
    Other(String, String),
}

/// Result type for TTS operations
pub type TTSResult<T> = Result<T, TTSError>;
