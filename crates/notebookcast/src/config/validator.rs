use super::schema::NotebookcastConfig;
use crate::error::ConfigError;

pub fn validate_config(config: &NotebookcastConfig) -> Result<(), ConfigError> {
    if config.llm.api_key_env.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "llm.api_key_env must name an environment variable".to_string(),
        ));
    }
    if !(0.0..=2.0).contains(&config.llm.temperature) {
        return Err(ConfigError::Invalid(format!(
            "llm.temperature must be within 0.0..=2.0, got {}",
            config.llm.temperature
        )));
    }
    for (name, attempts) in [
        ("llm.retry", config.llm.retry.max_attempts),
        ("reader.retry", config.reader.retry.max_attempts),
        ("standard_tts.retry", config.standard_tts.retry.max_attempts),
    ] {
        if attempts == 0 {
            return Err(ConfigError::Invalid(format!(
                "{name}.max_attempts must be at least 1"
            )));
        }
    }
    if config.limits.character_limit == 0 {
        return Err(ConfigError::Invalid(
            "limits.character_limit must be positive".to_string(),
        ));
    }
    if config.reader.base_url.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "reader.base_url must not be empty".to_string(),
        ));
    }
    #[cfg(feature = "pocket-tts")]
    if config.advanced_tts.enabled {
        config
            .advanced_tts
            .pocket
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("advanced_tts.{e}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&NotebookcastConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = NotebookcastConfig::default();
        config.reader.retry.max_attempts = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("reader.retry.max_attempts"));
    }

    #[test]
    fn test_zero_character_limit_rejected() {
        let mut config = NotebookcastConfig::default();
        config.limits.character_limit = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Invalid(_))
        ));
    }
}
