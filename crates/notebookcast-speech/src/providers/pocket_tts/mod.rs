//! Pocket-TTS provider: a small in-process English TTS model.
//!
//! The model is loaded once when the provider is built; generation runs on
//! the blocking thread pool.
//!
//! ```no_run
//! use notebookcast_speech::providers::pocket_tts::{PocketTTS, PocketTTSConfig};
//! use notebookcast_speech::{AudioFormat, SpeechRequest, TTSSpeechProvider, VoiceIdentifier};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = PocketTTS::new(PocketTTSConfig::default())?;
//! let response = provider
//!     .generate_speech(SpeechRequest {
//!         text: "Hello, world!".to_string(),
//!         voice: VoiceIdentifier::new("v2/en_speaker_3"),
//!         format: AudioFormat::Wav,
//!         sample_rate: None,
//!         language: Some("en".to_string()),
//!         speed: None,
//!     })
//!     .await?;
//! println!("{} samples", response.audio.samples.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
mod engine;
mod provider;
pub mod voices;

pub use config::{DEFAULT_MODEL_ID, PocketTTSConfig};
pub use error::{PocketTTSError, Result};
pub use provider::PocketTTS;
pub use voices::PredefinedVoice;

fn voices_catalog() -> String {
    PredefinedVoice::all()
        .iter()
        .map(|v| v.identifier())
        .collect::<Vec<_>>()
        .join(", ")
}
