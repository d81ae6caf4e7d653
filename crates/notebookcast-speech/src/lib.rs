//! # notebookcast-speech
//!
//! Text-to-speech abstractions for notebookcast.
//!
//! Backends implement [`TTSSpeechProvider`] and [`TTSModelsProvider`] and are
//! combined under the [`TTSProvider`] marker, so the voice synthesizer can
//! hold them as `Arc<dyn TTSProvider>` without knowing the vendor.
//!
//! ## Providers
//!
//! - [`providers::melo::MeloTTS`]: remote MeloTTS Gradio space (always built)
//! - `providers::pocket_tts::PocketTTS`: in-process Pocket-TTS model
//!   (feature `pocket-tts`)
//!
//! ## Example
//!
//! ```no_run
//! use notebookcast_speech::providers::melo::{MeloConfig, MeloTTS};
//! use notebookcast_speech::{AudioFormat, SpeechRequest, TTSSpeechProvider, VoiceIdentifier};
//!
//! # async fn run() -> notebookcast_speech::TTSResult<()> {
//! let melo = MeloTTS::new(MeloConfig::default())?;
//! let response = melo
//!     .generate_speech(SpeechRequest {
//!         text: "Hello there".to_string(),
//!         voice: VoiceIdentifier::new("EN-Default"),
//!         format: AudioFormat::Wav,
//!         sample_rate: None,
//!         language: Some("EN".to_string()),
//!         speed: Some(1.0),
//!     })
//!     .await?;
//! println!("{} ms of audio", response.duration_ms);
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod error;
mod provider;
pub mod types;

pub mod providers;

pub use error::{TTSError, TTSResult};
pub use provider::{TTSModelsProvider, TTSProvider, TTSSpeechProvider};
pub use types::{AudioData, AudioFormat, ModelInfo, SpeechRequest, SpeechResponse, VoiceIdentifier};
