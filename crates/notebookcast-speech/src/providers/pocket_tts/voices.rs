//! Predefined voices and speaker-preset resolution

use serde::{Deserialize, Serialize};

/// Predefined voice identifiers
///
/// Pre-computed `.safetensors` embeddings from the
/// kyutai/pocket-tts-without-voice-cloning HuggingFace repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PredefinedVoice {
    #[default]
    Alba,
    Marius,
    Javert,
    Jean,
    Fantine,
    Cosette,
    Eponine,
    Azelma,
}

impl PredefinedVoice {
    /// HuggingFace path for this voice's embeddings
    pub fn hf_path(&self) -> String {
        format!(
            "hf://kyutai/pocket-tts-without-voice-cloning/embeddings/{}.safetensors",
            self.identifier()
        )
    }

    pub fn identifier(&self) -> &'static str {
        match self {
            PredefinedVoice::Alba => "alba",
            PredefinedVoice::Marius => "marius",
            PredefinedVoice::Javert => "javert",
            PredefinedVoice::Jean => "jean",
            PredefinedVoice::Fantine => "fantine",
            PredefinedVoice::Cosette => "cosette",
            PredefinedVoice::Eponine => "eponine",
            PredefinedVoice::Azelma => "azelma",
        }
    }

    pub fn all() -> &'static [PredefinedVoice] {
        &[
            PredefinedVoice::Alba,
            PredefinedVoice::Marius,
            PredefinedVoice::Javert,
            PredefinedVoice::Jean,
            PredefinedVoice::Fantine,
            PredefinedVoice::Cosette,
            PredefinedVoice::Eponine,
            PredefinedVoice::Azelma,
        ]
    }

    /// Resolve a voice name or a `v2/{lang}_speaker_{n}` preset.
    ///
    /// Presets pick entry `n` of [`all`](Self::all), wrapping around, so a
    /// seed and seed + 1 always land on different voices.
    pub fn resolve(name: &str) -> Option<Self> {
        match preset_index(name) {
            Some(index) => Self::all().get(index % Self::all().len()).copied(),
            None => name.parse().ok(),
        }
    }
}

/// Speaker index of a `v2/{lang}_speaker_{n}` preset
pub fn preset_index(name: &str) -> Option<usize> {
    let (_, index) = name.rsplit_once("_speaker_")?;
    index.parse().ok()
}

impl std::fmt::Display for PredefinedVoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl std::str::FromStr for PredefinedVoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PredefinedVoice::all()
            .iter()
            .copied()
            .find(|voice| voice.identifier().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown predefined voice: {}", s))
    }
}
