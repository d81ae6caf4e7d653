//! In-process model handle and per-voice conditioning states

use super::config::PocketTTSConfig;
use super::error::{PocketTTSError, Result};
use super::voices::PredefinedVoice;
use candle_core::Tensor;
use pocket_tts::{ModelState, TTSModel};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Clone)]
pub(crate) struct Engine {
    model: TTSModel,
    voices: Arc<RwLock<HashMap<PredefinedVoice, ModelState>>>,
}

impl Engine {
    /// Blocking: fetches weights on first use.
    pub(crate) fn load(config: &PocketTTSConfig) -> Result<Self> {
        config.validate().map_err(PocketTTSError::Config)?;

        let model = TTSModel::load_with_params_device(
            &config.model_id,
            config.temperature,
            config.decode_steps,
            config.eos_threshold,
            config.noise_clamp,
            &candle_core::Device::Cpu,
        )
        .map_err(|e| PocketTTSError::ModelLoad {
            model: config.model_id.clone(),
            message: e.to_string(),
        })?;

        let engine = Self {
            model,
            voices: Arc::new(RwLock::new(HashMap::new())),
        };
        if config.preload_voices {
            for voice in PredefinedVoice::all() {
                engine.voice_state(*voice)?;
            }
            log::info!(
                "Pocket-TTS: {} voice states ready",
                PredefinedVoice::all().len()
            );
        }
        Ok(engine)
    }

    pub(crate) fn sample_rate(&self) -> u32 {
        self.model.sample_rate as u32
    }

    /// Blocking: run on the blocking pool.
    pub(crate) fn render(&self, text: &str, voice: PredefinedVoice) -> Result<Vec<f32>> {
        let state = self.voice_state(voice)?;
        let synthesis_error = |message: String| PocketTTSError::Synthesis {
            chars: text.chars().count(),
            message,
        };

        let waveform = self
            .model
            .generate(text, &state)
            .map_err(|e| synthesis_error(e.to_string()))?;
        flatten(waveform).map_err(|e| synthesis_error(e.to_string()))
    }

    fn voice_state(&self, voice: PredefinedVoice) -> Result<ModelState> {
        if let Some(state) = self
            .voices
            .read()
            .map_err(|_| PocketTTSError::CachePoisoned)?
            .get(&voice)
        {
            return Ok(state.clone());
        }

        let prep_error = |message: String| PocketTTSError::VoicePrep { voice, message };
        let embeddings = pocket_tts::weights::download_if_necessary(&voice.hf_path())
            .map_err(|e| prep_error(e.to_string()))?;
        let state = self
            .model
            .get_voice_state_from_prompt_file(&embeddings)
            .map_err(|e| prep_error(e.to_string()))?;

        log::debug!("Pocket-TTS: prepared voice {}", voice);
        self.voices
            .write()
            .map_err(|_| PocketTTSError::CachePoisoned)?
            .insert(voice, state.clone());
        Ok(state)
    }
}

/// The model emits either `[samples]` or `[1, samples]`.
fn flatten(waveform: Tensor) -> candle_core::Result<Vec<f32>> {
    match waveform.rank() {
        1 => waveform.to_vec1::<f32>(),
        _ => waveform.flatten_all()?.to_vec1::<f32>(),
    }
}
