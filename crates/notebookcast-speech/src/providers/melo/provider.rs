//! MeloTTS provider implementation

use super::config::MeloConfig;
use super::error::{MeloTTSError, Result};
use super::events::{FileRef, JobOutcome, first_file, parse_event_stream};
use crate::audio;
use crate::{
    AudioData, AudioFormat, ModelInfo, SpeechRequest, SpeechResponse, TTSError, TTSModelsProvider,
    TTSProvider, TTSResult, TTSSpeechProvider,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Language codes the MeloTTS space accepts
pub const MELO_LANGUAGES: [&str; 6] = ["EN", "ES", "FR", "ZH", "JP", "KR"];

/// Positional arguments of the `synthesize` endpoint: speaker, text, speed, language
#[derive(Serialize)]
struct SynthesizeCall<'a> {
    data: (&'a str, &'a str, f32, &'a str),
}

#[derive(Deserialize)]
struct QueuedJob {
    event_id: String,
}

/// MeloTTS client
pub struct MeloTTS {
    config: MeloConfig,
    client: Client,
}

impl MeloTTS {
    pub fn new(config: MeloConfig) -> TTSResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| TTSError::ProviderError(e.to_string(), "melotts".to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &MeloConfig {
        &self.config
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.hf_token {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    /// Queue one synthesis job and return its event id.
    async fn submit(&self, speaker: &str, text: &str, speed: f32, language: &str) -> Result<String> {
        let body = SynthesizeCall {
            data: (speaker, text, speed, language),
        };
        let response = self
            .authorize(self.client.post(self.config.call_url()))
            .json(&body)
            .send()
            .await
            .map_err(|e| MeloTTSError::request_error(e, "queue"))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(MeloTTSError::StatusError(
                status.as_u16(),
                error_body,
                "queue".to_string(),
            ));
        }

        let job: QueuedJob = response
            .json()
            .await
            .map_err(|e| MeloTTSError::protocol_error(e.to_string(), "queue"))?;
        Ok(job.event_id)
    }

    /// Wait for the job's event stream to finish and return the file location.
    async fn await_result(&self, event_id: &str) -> Result<String> {
        let url = format!("{}/{}", self.config.call_url(), event_id);
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| MeloTTSError::request_error(e, "result"))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(MeloTTSError::StatusError(
                status.as_u16(),
                error_body,
                "result".to_string(),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MeloTTSError::request_error(e, "result"))?;

        match parse_event_stream(&body) {
            Some(JobOutcome::Complete(data)) => match first_file(&data) {
                Some(FileRef::Url(url)) => Ok(url),
                Some(FileRef::Path(path)) => Ok(self.config.file_url(&path)),
                None => Err(MeloTTSError::protocol_error(
                    format!("no file in completion payload: {data}"),
                    "result",
                )),
            },
            Some(JobOutcome::Failed(message)) => {
                Err(MeloTTSError::JobFailed(message, event_id.to_string()))
            }
            None => Err(MeloTTSError::protocol_error(
                "event stream ended without a complete event",
                "result",
            )),
        }
    }

    async fn download(&self, url: &str) -> Result<AudioData> {
        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|e| MeloTTSError::request_error(e, "download"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MeloTTSError::StatusError(
                status.as_u16(),
                url.to_string(),
                "download".to_string(),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MeloTTSError::request_error(e, "download"))?;

        audio::decode_bytes(&bytes, AudioFormat::from_path(url))
            .map_err(|e| MeloTTSError::AudioError(e.to_string(), url.to_string()))
    }
}

impl TTSProvider for MeloTTS {
    fn provider_name(&self) -> &str {
        "melotts"
    }
}

#[async_trait]
impl TTSSpeechProvider for MeloTTS {
    async fn generate_speech(&self, request: SpeechRequest) -> TTSResult<SpeechResponse> {
        let language = request.language.as_deref().unwrap_or("EN");
        let speed = request.speed.unwrap_or(1.0);
        log::debug!(
            "MeloTTS: {} chars, speaker={}, language={}, speed={}",
            request.text.chars().count(),
            request.voice.name(),
            language,
            speed
        );

        let event_id = self
            .submit(request.voice.name(), &request.text, speed, language)
            .await?;
        let file_url = self.await_result(&event_id).await?;
        let audio = self.download(&file_url).await?;

        Ok(SpeechResponse::new(request.text, audio))
    }

    fn supported_formats(&self) -> Vec<AudioFormat> {
        vec![AudioFormat::Wav, AudioFormat::Mp3]
    }

    fn default_sample_rate(&self) -> u32 {
        44100
    }
}

#[async_trait]
impl TTSModelsProvider for MeloTTS {
    fn get_current_model(&self) -> ModelInfo {
        ModelInfo {
            id: "melotts".to_string(),
            name: "MeloTTS".to_string(),
            version: None,
            description: Some(format!("MeloTTS Gradio space at {}", self.config.base_url)),
            languages: self.supported_languages(),
        }
    }

    fn supported_languages(&self) -> Vec<String> {
        MELO_LANGUAGES.iter().map(|l| l.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_languages_case_insensitive() {
        let melo = MeloTTS::new(MeloConfig::default()).unwrap();
        assert!(melo.supports_language("ZH"));
        assert!(melo.supports_language("jp"));
        assert!(!melo.supports_language("DE"));
        assert_eq!(melo.provider_name(), "melotts");
    }
}
