use crate::assembler::{AudioAssembler, AudioCache};
use crate::config::{NotebookcastConfig, parse_yaml_file, parse_yaml_str};
use crate::error::{PipelineError, Result};
use crate::export::{AudioEncoder, encoder_for};
use crate::llm_factory::LLMFactory;
use crate::pipeline::Pipeline;
use crate::script::ScriptGenerator;
use crate::source::{JinaReader, WebReader};
use crate::synthesizer::{SynthesisContext, VoiceSynthesizer};
use notebookcast_llm::LLMProvider;
use notebookcast_speech::TTSProvider;
use notebookcast_speech::providers::melo::MeloTTS;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Assembles a [`Pipeline`] from configuration, with optional overrides for
/// each collaborator.
///
/// # Examples
///
/// ```no_run
/// use notebookcast::{PipelineBuilder, PodcastRequest};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pipeline = PipelineBuilder::from_yaml_file("notebookcast.yaml")?.build()?;
///     let output = pipeline
///         .run(PodcastRequest {
///             url: Some("https://example.com/article".to_string()),
///             ..PodcastRequest::default()
///         })
///         .await?;
///     println!("{}", output.audio_path.display());
///     Ok(())
/// }
/// ```
pub struct PipelineBuilder {
    pub config: NotebookcastConfig,
    llm: Option<Arc<dyn LLMProvider>>,
    standard_tts: Option<Arc<dyn TTSProvider>>,
    advanced_tts: Option<Arc<dyn TTSProvider>>,
    reader: Option<Arc<dyn WebReader>>,
    encoder: Option<Arc<dyn AudioEncoder>>,
}

impl PipelineBuilder {
    pub fn new(config: NotebookcastConfig) -> Self {
        Self {
            config,
            llm: None,
            standard_tts: None,
            advanced_tts: None,
            reader: None,
            encoder: None,
        }
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(parse_yaml_file(path)?))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(Self::new(parse_yaml_str(yaml)?))
    }

    pub fn llm(mut self, llm: Arc<dyn LLMProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn standard_tts(mut self, provider: Arc<dyn TTSProvider>) -> Self {
        self.standard_tts = Some(provider);
        self
    }

    pub fn advanced_tts(mut self, provider: Arc<dyn TTSProvider>) -> Self {
        self.advanced_tts = Some(provider);
        self
    }

    pub fn reader(mut self, reader: Arc<dyn WebReader>) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn encoder(mut self, encoder: Arc<dyn AudioEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Build every collaborator not supplied explicitly from the config.
    ///
    /// Loading the advanced backend blocks while its model loads.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config;

        let llm = match self.llm {
            Some(llm) => llm,
            None => LLMFactory::create_llm(&config.llm)?,
        };
        let generator = ScriptGenerator::new(llm, config.llm.retry);

        let standard = match self.standard_tts {
            Some(provider) => provider,
            None => Arc::new(
                MeloTTS::new(config.standard_tts.melo.clone())
                    .map_err(|e| PipelineError::Config(e.to_string()))?,
            ),
        };
        let mut context = SynthesisContext::new(standard, &config.output.clip_dir)
            .with_standard_retry(config.standard_tts.retry);
        let advanced = match self.advanced_tts {
            Some(provider) => Some(provider),
            None if config.advanced_tts.enabled => Some(load_advanced(&config)?),
            None => None,
        };
        if let Some(advanced) = advanced {
            log::info!("Advanced audio backend: {}", advanced.provider_name());
            context = context.with_advanced(advanced);
        }

        let encoder = self
            .encoder
            .unwrap_or_else(|| Arc::from(encoder_for(config.output.format)));
        let cache = AudioCache::new(
            &config.output.cache_dir,
            Duration::from_secs(config.output.retention_seconds),
        );
        let assembler =
            AudioAssembler::new(VoiceSynthesizer::new(Arc::new(context)), encoder, cache);

        let reader = match self.reader {
            Some(reader) => reader,
            None => Arc::new(
                JinaReader::new(
                    &config.reader.base_url,
                    Duration::from_secs(config.reader.timeout_seconds),
                )
                .map_err(|e| PipelineError::Config(e.to_string()))?,
            ),
        };

        Ok(Pipeline::new(
            generator,
            assembler,
            reader,
            config.reader.retry,
            config.limits.character_limit,
        ))
    }
}

#[cfg(feature = "pocket-tts")]
fn load_advanced(config: &NotebookcastConfig) -> Result<Arc<dyn TTSProvider>> {
    use notebookcast_speech::providers::pocket_tts::PocketTTS;

    let provider = PocketTTS::new(config.advanced_tts.pocket.clone()).map_err(|e| {
        PipelineError::DependencyMissing(format!("Failed to load the advanced audio model: {e}"))
    })?;
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "pocket-tts"))]
fn load_advanced(_config: &NotebookcastConfig) -> Result<Arc<dyn TTSProvider>> {
    Err(PipelineError::DependencyMissing(
        "Advanced audio generation requires the `pocket-tts` feature".to_string(),
    ))
}
