//! One podcast request, start to finish.

use crate::assembler::{AudioAssembler, PodcastOutput};
use crate::error::{PipelineError, Result};
use crate::export::ExportError;
use crate::language::{is_supported_by_standard_tts, language_code, standard_tts_code};
use crate::prompts::{PromptOptions, build_system_prompt, non_blank};
use crate::retry::RetryPolicy;
use crate::schema::DialogueVariant;
use crate::script::ScriptGenerator;
use crate::source::{WebReader, extract_pdf_text, is_pdf};
use crate::synthesizer::SynthesisBackend;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Highest voice seed drawn when the request does not pin one
pub const MAX_VOICE_SEED: u32 = 8;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PodcastRequest {
    /// Local PDF files
    #[serde(default)]
    pub files: Vec<PathBuf>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    /// One of the length labels, e.g. `Short (1-2 min)`
    #[serde(default)]
    pub length: Option<String>,
    /// Display label, e.g. `English` or `中文`
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub use_advanced_audio: bool,
    /// Pins the voice pair of the advanced backend
    #[serde(default)]
    pub voice_seed: Option<u32>,
}

fn default_language() -> String {
    "English".to_string()
}

/// Runs [`PodcastRequest`]s, one at a time.
pub struct Pipeline {
    generator: ScriptGenerator,
    assembler: AudioAssembler,
    reader: Arc<dyn WebReader>,
    reader_retry: RetryPolicy,
    character_limit: usize,
    gate: Semaphore,
}

impl Pipeline {
    pub fn new(
        generator: ScriptGenerator,
        assembler: AudioAssembler,
        reader: Arc<dyn WebReader>,
        reader_retry: RetryPolicy,
        character_limit: usize,
    ) -> Self {
        Self {
            generator,
            assembler,
            reader,
            reader_retry,
            character_limit,
            gate: Semaphore::new(1),
        }
    }

    /// Produce the audio file and transcript, or the first error hit.
    ///
    /// Concurrent callers queue; only one run is in flight at a time.
    pub async fn run(&self, request: PodcastRequest) -> Result<PodcastOutput> {
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| PipelineError::Config("pipeline is shut down".to_string()))?;

        self.check_dependencies(&request).await?;

        let code = language_code(&request.language)
            .ok_or_else(|| PipelineError::UnsupportedLanguage(request.language.clone()))?;
        if !request.use_advanced_audio && !is_supported_by_standard_tts(&request.language) {
            return Err(PipelineError::UnsupportedLanguage(request.language.clone()));
        }

        if let Some(seed) = request.voice_seed.filter(|seed| *seed > MAX_VOICE_SEED) {
            return Err(PipelineError::InvalidVoiceSeed {
                seed,
                max: MAX_VOICE_SEED,
            });
        }

        let text = self.collect_sources(&request).await?;
        let length = text.chars().count();
        if length > self.character_limit {
            return Err(PipelineError::ContentTooLong {
                limit: self.character_limit,
                actual: length,
            });
        }
        log::info!("Collected {length} characters of source text");

        let system_prompt = build_system_prompt(&PromptOptions {
            question: request.question.as_deref(),
            tone: request.tone.as_deref(),
            length: request.length.as_deref(),
            language: Some(&request.language),
        })?;
        let variant = DialogueVariant::for_length(request.length.as_deref());
        let script = self.generator.generate(&system_prompt, &text, variant).await?;
        log::info!(
            "Generated {} dialogue ({} lines)",
            variant.name(),
            script.dialogue.len()
        );

        let (backend, tts_language) = if request.use_advanced_audio {
            (SynthesisBackend::Advanced, code)
        } else {
            let melo = standard_tts_code(code)
                .ok_or_else(|| PipelineError::UnsupportedLanguage(request.language.clone()))?;
            (SynthesisBackend::Standard, melo)
        };
        let voice_seed = request
            .voice_seed
            .unwrap_or_else(|| rand::random::<u32>() % (MAX_VOICE_SEED + 1));

        let output = self
            .assembler
            .assemble(&script, tts_language, backend, voice_seed)
            .await?;
        Ok(output)
    }

    async fn check_dependencies(&self, request: &PodcastRequest) -> Result<()> {
        self.assembler
            .encoder()
            .ensure_available()
            .await
            .map_err(|e| match e {
                ExportError::DependencyMissing(guidance) => {
                    PipelineError::DependencyMissing(guidance)
                }
                other => PipelineError::Export(other.to_string()),
            })?;

        if request.use_advanced_audio && !self.assembler.synthesizer().context().has_advanced() {
            return Err(PipelineError::DependencyMissing(
                "Advanced audio generation was requested but no advanced TTS backend is configured."
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// PDF pages and the web page, joined by blank lines.
    async fn collect_sources(&self, request: &PodcastRequest) -> Result<String> {
        let url = non_blank(request.url.as_deref());
        if request.files.is_empty() && url.is_none() {
            return Err(PipelineError::NoInputProvided);
        }

        if let Some(file) = request.files.iter().find(|file| !is_pdf(file)) {
            return Err(PipelineError::NotPdf(file.display().to_string()));
        }

        let mut sources = Vec::with_capacity(request.files.len() + 1);
        for file in &request.files {
            sources.push(extract_pdf_text(file).await?);
        }

        if let Some(url) = url {
            let reader = &self.reader;
            let body = self
                .reader_retry
                .run("url fetch", move |_| reader.fetch(url))
                .await
                .map_err(|e| {
                    PipelineError::UrlFetch(format!(
                        "{url} after {} attempt(s): {e}",
                        self.reader_retry.max_attempts
                    ))
                })?;
            sources.push(body);
        }

        Ok(sources.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_from_json() {
        let request: PodcastRequest =
            serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        assert_eq!(request.language, "English");
        assert!(request.files.is_empty());
        assert!(!request.use_advanced_audio);
        assert_eq!(request.voice_seed, None);
    }
}
