use async_trait::async_trait;
use notebookcast_speech::{
    AudioData, ModelInfo, SpeechRequest, SpeechResponse, TTSError, TTSModelsProvider,
    TTSProvider, TTSResult, TTSSpeechProvider,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

pub const FAKE_SAMPLE_RATE: u32 = 16_000;
/// Every fake clip lasts 100 ms
pub const FAKE_CLIP_FRAMES: usize = 1_600;

/// Records requests and answers with a short constant tone.
pub struct FakeTTS {
    name: String,
    languages: Vec<String>,
    failures: AtomicU32,
    requests: Mutex<Vec<SpeechRequest>>,
}

impl FakeTTS {
    pub fn new(name: &str, languages: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            languages: languages.iter().map(|l| l.to_string()).collect(),
            failures: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Fail the next `count` requests
    pub fn failing_first(self: Arc<Self>, count: u32) -> Arc<Self> {
        self.failures.store(count, Ordering::SeqCst);
        self
    }

    pub fn requests(&self) -> Vec<SpeechRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TTSSpeechProvider for FakeTTS {
    async fn generate_speech(&self, request: SpeechRequest) -> TTSResult<SpeechResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(TTSError::ProviderError(
                "temporarily unavailable".to_string(),
                self.name.clone(),
            ));
        }
        let audio = AudioData::new(vec![0.25; FAKE_CLIP_FRAMES], 1, FAKE_SAMPLE_RATE);
        Ok(SpeechResponse::new(request.text, audio))
    }

    fn default_sample_rate(&self) -> u32 {
        FAKE_SAMPLE_RATE
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
