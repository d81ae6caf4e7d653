//! The dialogue script the language model must return, and its validation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

pub const HOST_LABEL: &str = "Host (Jane)";
pub const GUEST_LABEL: &str = "Guest";
/// Localized labels the model sometimes uses instead of the canonical ones
pub const LOCALIZED_HOST_LABEL: &str = "小美";
pub const LOCALIZED_GUEST_LABEL: &str = "专家";
pub const DEFAULT_GUEST_NAME: &str = "专家";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    #[serde(rename = "Host (Jane)")]
    Host,
    #[serde(rename = "Guest")]
    Guest,
}

impl Speaker {
    /// Resolve a raw label, translating the localized names first.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            HOST_LABEL | LOCALIZED_HOST_LABEL => Some(Speaker::Host),
            GUEST_LABEL | LOCALIZED_GUEST_LABEL => Some(Speaker::Guest),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Host => HOST_LABEL,
            Speaker::Guest => GUEST_LABEL,
        }
    }

    /// `host` or `guest`, used in file names
    pub fn role(&self) -> &'static str {
        match self {
            Speaker::Host => "host",
            Speaker::Guest => "guest",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub speaker: Speaker,
    pub text: String,
}

/// A validated dialogue script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueScript {
    /// Model's planning notes; never played
    pub scratchpad: String,
    pub name_of_guest: String,
    pub dialogue: Vec<DialogueLine>,
}

/// Ways a model answer can fail validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("expected a JSON object at the top level")]
    NotAnObject,

    #[error("missing required field `dialogue`")]
    MissingDialogue,

    #[error("`dialogue` must be an array")]
    DialogueNotArray,

    #[error("`dialogue` must contain at least one line")]
    EmptyDialogue,

    #[error("dialogue[{index}] must be an object")]
    LineNotObject { index: usize },

    #[error("dialogue[{index}].speaker is missing or not a string")]
    MissingSpeaker { index: usize },

    #[error("dialogue[{index}].speaker `{label}` is neither \"Host (Jane)\" nor \"Guest\"")]
    UnknownSpeaker { index: usize, label: String },

    #[error("dialogue[{index}].text is missing or not a string")]
    MissingText { index: usize },

    #[error("`{0}` must be a string")]
    NotAString(&'static str),
}

/// Failure to turn raw model text into a [`DialogueScript`].
#[derive(Error, Debug)]
pub enum DialogueParseError {
    #[error("model output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] SchemaViolation),
}

impl DialogueScript {
    /// Parse raw model text, tolerating a surrounding markdown code fence.
    pub fn from_json(text: &str) -> Result<Self, DialogueParseError> {
        let value: Value = serde_json::from_str(strip_code_fence(text))?;
        Ok(Self::from_value(&value)?)
    }

    /// Validate a decoded model answer.
    pub fn from_value(value: &Value) -> Result<Self, SchemaViolation> {
        let object = value.as_object().ok_or(SchemaViolation::NotAnObject)?;

        let lines = object
            .get("dialogue")
            .ok_or(SchemaViolation::MissingDialogue)?
            .as_array()
            .ok_or(SchemaViolation::DialogueNotArray)?;
        if lines.is_empty() {
            return Err(SchemaViolation::EmptyDialogue);
        }

        let dialogue = lines
            .iter()
            .enumerate()
            .map(|(index, line)| parse_line(index, line))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            scratchpad: optional_string(object, "scratchpad")?.unwrap_or_default(),
            name_of_guest: optional_string(object, "name_of_guest")?
                .unwrap_or_else(|| DEFAULT_GUEST_NAME.to_string()),
            dialogue,
        })
    }

    /// Guest name shown in the transcript
    pub fn guest_name(&self) -> &str {
        &self.name_of_guest
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.strip_prefix("json").unwrap_or(rest);
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn parse_line(index: usize, line: &Value) -> Result<DialogueLine, SchemaViolation> {
    let object = line
        .as_object()
        .ok_or(SchemaViolation::LineNotObject { index })?;

    let label = object
        .get("speaker")
        .and_then(Value::as_str)
        .ok_or(SchemaViolation::MissingSpeaker { index })?;
    let speaker = Speaker::from_label(label).ok_or_else(|| SchemaViolation::UnknownSpeaker {
        index,
        label: label.to_string(),
    })?;

    let text = object
        .get("text")
        .and_then(Value::as_str)
        .ok_or(SchemaViolation::MissingText { index })?;

    Ok(DialogueLine {
        speaker,
        text: text.to_string(),
    })
}

fn optional_string(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, SchemaViolation> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(SchemaViolation::NotAString(field)),
    }
}

/// Expected script length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogueVariant {
    Short,
    Medium,
}

impl DialogueVariant {
    /// Only the English short label selects `Short`; `短篇 (1-2分钟)` still
    /// gets the medium schema, its length guidance lives in the prompt.
    pub fn for_length(length: Option<&str>) -> Self {
        match length {
            Some("Short (1-2 min)") => DialogueVariant::Short,
            _ => DialogueVariant::Medium,
        }
    }

    /// Advisory number of lines; never enforced
    pub fn expected_lines(&self) -> (usize, usize) {
        match self {
            DialogueVariant::Short => (11, 17),
            DialogueVariant::Medium => (19, 29),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DialogueVariant::Short => "ShortDialogue",
            DialogueVariant::Medium => "MediumDialogue",
        }
    }

    /// Description of the `dialogue` field for this variant
    pub fn dialogue_description(&self) -> String {
        let (min, max) = self.expected_lines();
        format!("对话列表，通常包含{min}-{max}个对话项")
    }

    /// JSON schema of the expected answer
    pub fn json_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "scratchpad": {"type": "string", "description": "准备笔记"},
                "name_of_guest": {"type": "string", "description": "嘉宾名称"},
                "dialogue": {
                    "type": "array",
                    "description": self.dialogue_description(),
                    "items": {
                        "type": "object",
                        "properties": {
                            "speaker": {
                                "type": "string",
                                "enum": [HOST_LABEL, GUEST_LABEL],
                                "description": "对话者身份"
                            },
                            "text": {"type": "string", "description": "对话内容"}
                        },
                        "required": ["speaker", "text"]
                    }
                }
            },
            "required": ["dialogue"]
        })
    }
}
