use super::schema::NotebookcastConfig;
use super::validator::validate_config;
use crate::error::ConfigError;
use std::path::Path;

pub fn parse_yaml_file<P: AsRef<Path>>(path: P) -> Result<NotebookcastConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml_str(&content)
}

/// Parse and validate. An empty document yields the defaults.
pub fn parse_yaml_str(yaml: &str) -> Result<NotebookcastConfig, ConfigError> {
    let config: NotebookcastConfig = if yaml.trim().is_empty() {
        NotebookcastConfig::default()
    } else {
        serde_yaml::from_str(yaml)?
    };
    validate_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notebookcast_speech::AudioFormat;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_yaml_str("").unwrap();
        assert_eq!(config.llm.model, "deepseek-chat");
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.llm.api_key_env, "DEEPSEEK_API_KEY");
        assert_eq!(config.reader.base_url, "https://r.jina.ai/");
        assert_eq!(config.limits.character_limit, 100_000);
        assert_eq!(config.output.retention_seconds, 86_400);
        assert_eq!(config.output.format, AudioFormat::Mp3);
        assert!(!config.advanced_tts.enabled);
    }

    #[test]
    fn test_partial_document_overrides() {
        let yaml = r#"
llm:
  model: deepseek-reasoner
  temperature: 0.3
standard_tts:
  base_url: http://localhost:7860
  retry:
    max_attempts: 5
    backoff:
      kind: fixed
      delay_ms: 100
output:
  format: wav
  cache_dir: /tmp/podcasts
"#;
        let config = parse_yaml_str(yaml).unwrap();
        assert_eq!(config.llm.model, "deepseek-reasoner");
        assert_eq!(config.llm.temperature, 0.3);
        assert_eq!(config.llm.timeout_seconds, 30);
        assert_eq!(config.standard_tts.melo.base_url, "http://localhost:7860");
        assert_eq!(config.standard_tts.melo.api_prefix, "gradio_api");
        assert_eq!(config.standard_tts.retry.max_attempts, 5);
        assert_eq!(config.output.format, AudioFormat::Wav);
        assert_eq!(config.output.cache_dir.to_str(), Some("/tmp/podcasts"));
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let config = parse_yaml_str(include_str!("../../../../notebookcast.example.yaml")).unwrap();
        let defaults = NotebookcastConfig::default();
        assert_eq!(config.llm.retry, defaults.llm.retry);
        assert_eq!(config.reader.retry, defaults.reader.retry);
        assert_eq!(config.standard_tts.retry, defaults.standard_tts.retry);
        assert_eq!(config.standard_tts.melo, defaults.standard_tts.melo);
        assert_eq!(config.output.format, defaults.output.format);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            parse_yaml_str("llm: [unclosed"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "limits:\n  character_limit: 500").unwrap();
        let config = parse_yaml_file(file.path()).unwrap();
        assert_eq!(config.limits.character_limit, 500);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            parse_yaml_file("/nonexistent/notebookcast.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
