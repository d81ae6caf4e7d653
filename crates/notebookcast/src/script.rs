//! Two-pass dialogue generation: a draft, then a refinement of that draft.

use crate::prompts::{REFINEMENT_USER_MESSAGE, refinement_prompt};
use crate::retry::RetryPolicy;
use crate::schema::{DialogueParseError, DialogueScript, DialogueVariant, SchemaViolation};
use notebookcast_llm::{ChatMessage, LLMError, LLMProvider, StructuredOutputFormat};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("LLM request failed: {0}")]
    Llm(#[from] LLMError),

    #[error("model output is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("model output does not match the dialogue schema: {0}")]
    Schema(#[source] SchemaViolation),

    #[error("model returned an empty answer")]
    EmptyResponse,
}

impl From<DialogueParseError> for ScriptError {
    fn from(err: DialogueParseError) -> Self {
        match err {
            DialogueParseError::InvalidJson(e) => ScriptError::InvalidJson(e),
            DialogueParseError::Schema(e) => ScriptError::Schema(e),
        }
    }
}

pub struct ScriptGenerator {
    llm: Arc<dyn LLMProvider>,
    retry: RetryPolicy,
}

impl ScriptGenerator {
    pub fn new(llm: Arc<dyn LLMProvider>, retry: RetryPolicy) -> Self {
        Self { llm, retry }
    }

    /// Draft a script from `source_text`, then ask the model to refine it.
    ///
    /// Only the refined script is returned. Transport failures are retried
    /// per the policy; malformed answers fail immediately.
    pub async fn generate(
        &self,
        system_prompt: &str,
        source_text: &str,
        variant: DialogueVariant,
    ) -> Result<DialogueScript, ScriptError> {
        let draft_prompt = format!("{system_prompt}\n\n{}", variant.dialogue_description());
        let draft = self.complete(&draft_prompt, source_text, variant).await?;
        log::info!(
            "Draft script ready: {} lines, guest {}",
            draft.dialogue.len(),
            draft.guest_name()
        );

        let refine_prompt = refinement_prompt(system_prompt, &draft.to_json());
        let refined = self
            .complete(&refine_prompt, REFINEMENT_USER_MESSAGE, variant)
            .await?;
        log::info!("Refined script ready: {} lines", refined.dialogue.len());

        Ok(refined)
    }

    async fn complete(
        &self,
        system: &str,
        user: &str,
        variant: DialogueVariant,
    ) -> Result<DialogueScript, ScriptError> {
        let messages = [ChatMessage::system(system), ChatMessage::user(user)];
        let format = StructuredOutputFormat {
            name: variant.name().to_string(),
            description: Some(variant.dialogue_description()),
            schema: Some(variant.json_schema()),
            strict: None,
        };

        let response = self
            .retry
            .run("completion", |_| {
                let format = format.clone();
                let messages = &messages;
                async move { self.llm.chat(messages, Some(format)).await }
            })
            .await?;

        let text = response
            .text()
            .filter(|text| !text.trim().is_empty())
            .ok_or(ScriptError::EmptyResponse)?;
        log::debug!("Model answer: {text}");

        Ok(DialogueScript::from_json(&text)?)
    }
}
