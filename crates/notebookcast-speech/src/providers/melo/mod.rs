//! MeloTTS provider backed by a hosted Gradio space.
//!
//! One synthesis is two requests: a `POST .../call/synthesize` that queues
//! the job and returns an event id, then a `GET .../call/synthesize/{id}`
//! whose server-sent events end with `complete` carrying the generated file.

pub mod config;
pub mod error;
mod events;
mod provider;

pub use config::MeloConfig;
pub use error::{MeloTTSError, Result};
pub use provider::{MELO_LANGUAGES, MeloTTS};
