//! # notebookcast
//!
//! Turns PDFs and web pages into a two-speaker podcast.
//!
//! A [`Pipeline`] collects source text, asks a language model for a dialogue
//! script (a draft, then a refinement), speaks every line through a TTS
//! backend, and exports the concatenated audio together with a markdown
//! transcript.
//!
//! - [`schema`]: the dialogue script and its validation
//! - [`script`]: the two-pass script generator
//! - [`synthesizer`]: per-line speech over the standard or advanced backend
//! - [`assembler`]: concatenation, export and the output cache
//! - [`pipeline`]: request validation and orchestration

pub mod assembler;
pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod language;
pub mod llm_factory;
pub mod pipeline;
pub mod prompts;
pub mod retry;
pub mod schema;
pub mod script;
pub mod source;
pub mod synthesizer;

#[cfg(test)]
mod test_support;

pub use assembler::{AudioAssembler, AudioCache, PodcastOutput};
pub use builder::PipelineBuilder;
pub use config::NotebookcastConfig;
pub use error::{ConfigError, PipelineError, Result};
pub use pipeline::{Pipeline, PodcastRequest};
pub use retry::RetryPolicy;
pub use schema::{DialogueLine, DialogueScript, DialogueVariant, Speaker};
pub use synthesizer::{SynthesisBackend, SynthesisContext, VoiceSynthesizer};

pub use notebookcast_llm as llm;
pub use notebookcast_speech as speech;
