//! # notebookcast-llm
//!
//! Chat-completion providers for notebookcast.
//!
//! Every backend speaks the OpenAI-compatible `chat/completions` protocol and
//! is exposed through the [`chat::ChatProvider`] trait, so the script
//! generator never depends on a concrete vendor.
//!
//! ```no_run
//! use notebookcast_llm::backends::deepseek::DeepSeek;
//! use notebookcast_llm::builder::LLMBuilder;
//! use notebookcast_llm::chat::{ChatMessage, ChatProvider};
//!
//! # async fn run() -> Result<(), notebookcast_llm::error::LLMError> {
//! let llm = LLMBuilder::<DeepSeek>::new()
//!     .api_key(std::env::var("DEEPSEEK_API_KEY").unwrap_or_default())
//!     .temperature(0.1)
//!     .build()?;
//! let reply = llm
//!     .chat(&[ChatMessage::user("Say hello as JSON")], None)
//!     .await?;
//! println!("{}", reply.text().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod builder;
pub mod chat;
pub mod error;
pub mod providers;

pub use chat::{ChatMessage, ChatProvider, ChatResponse, ChatRole, StructuredOutputFormat, Usage};
pub use error::LLMError;

/// Marker trait for a fully configured LLM backend.
pub trait LLMProvider: ChatProvider + Send + Sync {}
