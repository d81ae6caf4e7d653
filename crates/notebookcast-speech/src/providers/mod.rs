//! Speech provider implementations
//!
//! MeloTTS is always built; in-process backends are feature-gated.

pub mod melo;

#[cfg(feature = "pocket-tts")]
pub mod pocket_tts;
