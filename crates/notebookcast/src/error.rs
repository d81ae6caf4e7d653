use crate::assembler::AssemblyError;
use crate::schema::SchemaViolation;
use crate::script::ScriptError;
use crate::synthesizer::SynthesisError;
use thiserror::Error;

/// Everything that can stop a podcast request.
///
/// Every variant is terminal: a failed run produces no audio file and no
/// transcript.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A required external tool or backend is unavailable
    #[error("{0}")]
    DependencyMissing(String),

    #[error(
        "The selected language is not supported without advanced audio generation. Please enable advanced audio generation or choose a supported language. (language: {0})"
    )]
    UnsupportedLanguage(String),

    #[error("Please provide at least one PDF file or a URL.")]
    NoInputProvided,

    #[error("The provided file is not a PDF. Please upload only PDF files. ({0})")]
    NotPdf(String),

    #[error("Error reading the PDF file: {0}")]
    PdfRead(String),

    #[error("Failed to fetch URL content: {0}")]
    UrlFetch(String),

    #[error(
        "The total content is too long. Please ensure the combined text from PDFs and URL is fewer than {limit} characters. (got {actual})"
    )]
    ContentTooLong { limit: usize, actual: usize },

    #[error("Unknown length option: {0}")]
    UnknownLength(String),

    #[error("Voice seed must be between 0 and {max}, got {seed}")]
    InvalidVoiceSeed { seed: u32, max: u32 },

    #[error("Failed to generate the dialogue script: {0}")]
    Generation(ScriptError),

    #[error("Failed to synthesize audio: {0}")]
    Synthesis(#[from] SynthesisError),

    /// The model answered with JSON that is not a valid dialogue script
    #[error("Dialogue does not match the expected schema: {0}")]
    SchemaViolation(#[from] SchemaViolation),

    #[error("Failed to export audio: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure to load a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for PipelineError {
    fn from(err: ConfigError) -> Self {
        PipelineError::Config(err.to_string())
    }
}

impl From<ScriptError> for PipelineError {
    fn from(err: ScriptError) -> Self {
        match err {
            ScriptError::Schema(violation) => PipelineError::SchemaViolation(violation),
            other => PipelineError::Generation(other),
        }
    }
}

impl From<AssemblyError> for PipelineError {
    fn from(err: AssemblyError) -> Self {
        match err {
            AssemblyError::Synthesis(e) => PipelineError::Synthesis(e),
            AssemblyError::Export(e) => PipelineError::Export(e.to_string()),
            AssemblyError::Audio(e) => PipelineError::Export(e.to_string()),
            AssemblyError::Io(e) => PipelineError::Export(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DialogueScript;

    #[test]
    fn test_messages_match_user_wording() {
        assert_eq!(
            PipelineError::NoInputProvided.to_string(),
            "Please provide at least one PDF file or a URL."
        );
        assert!(
            PipelineError::NotPdf("notes.txt".into())
                .to_string()
                .starts_with("The provided file is not a PDF.")
        );
        let too_long = PipelineError::ContentTooLong {
            limit: 100_000,
            actual: 100_001,
        };
        assert!(too_long.to_string().contains("fewer than 100000 characters"));
    }

    #[test]
    fn test_script_errors_split_by_kind() {
        let empty = PipelineError::from(ScriptError::EmptyResponse);
        assert!(matches!(empty, PipelineError::Generation(ScriptError::EmptyResponse)));

        let violation = DialogueScript::from_json(r#"{"dialogue": []}"#).unwrap_err();
        let err = PipelineError::from(ScriptError::from(violation));
        assert!(matches!(err, PipelineError::SchemaViolation(_)));
    }
}
