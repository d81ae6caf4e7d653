#![allow(dead_code)]

use async_trait::async_trait;
use notebookcast::export::{AudioEncoder, ExportError, WavEncoder};
use notebookcast::llm::{
    ChatMessage, ChatProvider, ChatResponse, LLMError, LLMProvider, StructuredOutputFormat,
};
use notebookcast::source::{ReaderError, WebReader};
use notebookcast::speech::{
    AudioData, AudioFormat, ModelInfo, SpeechRequest, SpeechResponse, TTSError, TTSModelsProvider,
    TTSProvider, TTSResult, TTSSpeechProvider,
};
use notebookcast::{NotebookcastConfig, Pipeline, PipelineBuilder, RetryPolicy};
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SCRIPT_JSON: &str = r#"{
    "scratchpad": "notes",
    "name_of_guest": "Dr. Chen",
    "dialogue": [
        {"speaker": "Host (Jane)", "text": "Welcome to the show."},
        {"speaker": "专家", "text": "Glad to be here."},
        {"speaker": "小美", "text": "Let's dive in."},
        {"speaker": "Guest", "text": "Sure."}
    ]
}"#;

pub fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub const SAMPLE_RATE: u32 = 22_050;
pub const CLIP_FRAMES: usize = 2_205;

#[derive(Debug)]
struct TextResponse(String);

impl fmt::Display for TextResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ChatResponse for TextResponse {
    fn text(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Answers every completion with the same script.
pub struct FakeLLM {
    answer: String,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay: Duration,
}

impl FakeLLM {
    pub fn new(answer: &str) -> Arc<Self> {
        Self::with_delay(answer, Duration::ZERO)
    }

    pub fn with_delay(answer: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            answer: answer.to_string(),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            delay,
        })
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatProvider for FakeLLM {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        _json_schema: Option<StructuredOutputFormat>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(Box::new(TextResponse(self.answer.clone())))
    }
}

impl LLMProvider for FakeLLM {}

/// Fails the first `failures` fetches, then returns `body`.
pub struct FakeReader {
    body: String,
    failures: usize,
    calls: AtomicUsize,
}

impl FakeReader {
    pub fn new(body: impl Into<String>) -> Arc<Self> {
        Self::flaky(body, 0)
    }

    pub fn flaky(body: impl Into<String>, failures: usize) -> Arc<Self> {
        Arc::new(Self {
            body: body.into(),
            failures,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WebReader for FakeReader {
    async fn fetch(&self, url: &str) -> Result<String, ReaderError> {
        let attempt = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.failures {
            return Err(ReaderError::Status {
                status: 503,
                body: format!("{url} unavailable (attempt {attempt})"),
            });
        }
        Ok(self.body.clone())
    }
}

/// Answers every line with a 100 ms mono clip.
pub struct FakeTTS {
    name: String,
    languages: Vec<String>,
    requests: Mutex<Vec<SpeechRequest>>,
}

impl FakeTTS {
    pub fn new(name: &str, languages: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            languages: languages.iter().map(|l| l.to_string()).collect(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<SpeechRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TTSSpeechProvider for FakeTTS {
    async fn generate_speech(&self, request: SpeechRequest) -> TTSResult<SpeechResponse> {
        self.requests.lock().unwrap().push(request.clone());
        if request.text.is_empty() {
            return Err(TTSError::GenerationFailed(
                "empty text".to_string(),
                0,
                request.voice.name().to_string(),
            ));
        }
        let audio = AudioData::new(vec![0.2; CLIP_FRAMES], 1, SAMPLE_RATE);
        Ok(SpeechResponse::new(request.text, audio))
    }
}

impl TTSModelsProvider for FakeTTS {
    fn get_current_model(&self) -> ModelInfo {
        ModelInfo {
            id: self.name.clone(),
            name: self.name.clone(),
            version: None,
            description: None,
            languages: self.languages.clone(),
        }
    }

    fn supported_languages(&self) -> Vec<String> {
        self.languages.clone()
    }
}

impl TTSProvider for FakeTTS {
    fn provider_name(&self) -> &str {
        &self.name
    }
}

/// Encoder whose external tool is never installed.
pub struct MissingEncoder;

#[async_trait]
impl AudioEncoder for MissingEncoder {
    fn format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    async fn ensure_available(&self) -> Result<(), ExportError> {
        Err(ExportError::DependencyMissing(
            "Please install ffmpeg first.".to_string(),
        ))
    }

    async fn export(&self, _audio: &AudioData, _path: &Path) -> Result<(), ExportError> {
        unreachable!("export must not run when the encoder is unavailable")
    }
}

pub struct Harness {
    pub llm: Arc<FakeLLM>,
    pub reader: Arc<FakeReader>,
    pub standard: Arc<FakeTTS>,
    pub advanced: Option<Arc<FakeTTS>>,
    pub cache: tempfile::TempDir,
    pub character_limit: usize,
}

impl Harness {
    pub fn new(reader: Arc<FakeReader>) -> Self {
        Self {
            llm: FakeLLM::new(SCRIPT_JSON),
            reader,
            standard: FakeTTS::new("melotts", &["EN", "ES", "FR", "ZH", "JP", "KR"]),
            advanced: None,
            cache: tempfile::tempdir().unwrap(),
            character_limit: 100_000,
        }
    }

    pub fn with_character_limit(mut self, limit: usize) -> Self {
        self.character_limit = limit;
        self
    }

    pub fn with_llm(mut self, llm: Arc<FakeLLM>) -> Self {
        self.llm = llm;
        self
    }

    pub fn with_advanced(mut self, languages: &[&str]) -> Self {
        self.advanced = Some(FakeTTS::new("pocket-tts", languages));
        self
    }

    pub fn config(&self) -> NotebookcastConfig {
        let mut config = NotebookcastConfig::default();
        config.output.cache_dir = self.cache.path().to_path_buf();
        config.output.clip_dir = self.cache.path().join("clips");
        config.output.format = AudioFormat::Wav;
        config.standard_tts.retry = RetryPolicy::none();
        config.limits.character_limit = self.character_limit;
        config
    }

    pub fn builder(&self) -> PipelineBuilder {
        let mut builder = PipelineBuilder::new(self.config())
            .llm(self.llm.clone())
            .reader(self.reader.clone())
            .standard_tts(self.standard.clone())
            .encoder(Arc::new(WavEncoder));
        if let Some(advanced) = &self.advanced {
            builder = builder.advanced_tts(advanced.clone());
        }
        builder
    }

    pub fn pipeline(&self) -> Pipeline {
        self.builder().build().unwrap()
    }
}
