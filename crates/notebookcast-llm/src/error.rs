use thiserror::Error;

/// Errors raised while talking to a chat-completion backend.
#[derive(Error, Debug)]
pub enum LLMError {
    /// Transport-level failure (connect, timeout, TLS, body read)
    #[error("HTTP Error: {0}")]
    HttpError(String),

    /// Missing or rejected credentials
    #[error("Auth Error: {0}")]
    AuthError(String),

    /// The request could not be built from the given configuration
    #[error("Invalid Request: {0}")]
    InvalidRequest(String),

    /// The provider answered with a non-success status
    #[error("Provider Error: {0}")]
    ProviderError(String),

    /// The provider answered, but not in the documented shape
    #[error("Response Format Error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },

    /// Serialization of a request body failed
    #[error("JSON Error: {0}")]
    JsonError(String),
}

impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        LLMError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        LLMError::JsonError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_format_error_keeps_raw_body() {
        let err = LLMError::ResponseFormatError {
            message: "missing choices".to_string(),
            raw_response: "{\"oops\":1}".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("missing choices"));
        assert!(text.contains("{\"oops\":1}"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: LLMError = parse_err.into();
        assert!(matches!(err, LLMError::JsonError(_)));
    }
}
