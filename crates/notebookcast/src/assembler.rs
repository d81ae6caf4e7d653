//! Turns a validated script into one audio file and a transcript.

use crate::export::{AudioEncoder, ExportError};
use crate::schema::{DialogueScript, Speaker};
use crate::synthesizer::{SynthesisBackend, SynthesisError, VoiceSynthesizer};
use notebookcast_speech::{TTSError, audio};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("failed to combine clips: {0}")]
    Audio(#[from] TTSError),

    #[error("cache directory error: {0}")]
    Io(#[from] std::io::Error),
}

/// The finished podcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastOutput {
    pub audio_path: PathBuf,
    /// Markdown, one paragraph per dialogue line
    pub transcript: String,
}

/// One transcript paragraph: `**Host**: text` or `**<guest>**: text`.
pub fn transcript_line(speaker: Speaker, guest_name: &str, text: &str) -> String {
    match speaker {
        Speaker::Host => format!("**Host**: {text}\n\n"),
        Speaker::Guest => format!("**{guest_name}**: {text}\n\n"),
    }
}

pub fn build_transcript(script: &DialogueScript) -> String {
    script
        .dialogue
        .iter()
        .map(|line| transcript_line(line.speaker, script.guest_name(), &line.text))
        .collect()
}

/// Flat directory of exported podcasts, swept by age.
#[derive(Debug, Clone)]
pub struct AudioCache {
    dir: PathBuf,
    retention: Duration,
}

impl AudioCache {
    pub fn new(dir: impl Into<PathBuf>, retention: Duration) -> Self {
        Self {
            dir: dir.into(),
            retention,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// A fresh, unique path for a new export. Creates the directory.
    pub async fn allocate(&self, extension: &str) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(self
            .dir
            .join(format!("{}.{extension}", uuid::Uuid::new_v4())))
    }

    /// Remove files with `extension` whose modification time is older than
    /// the retention. Failures are logged and skipped.
    ///
    /// Returns the number of files removed.
    pub async fn sweep(&self, extension: &str) -> usize {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Cache sweep skipped, cannot read {}: {e}", self.dir.display());
                return 0;
            }
        };

        let now = SystemTime::now();
        let mut removed = 0;
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    log::warn!("Cache sweep stopped early: {e}");
                    break;
                }
            };

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
                continue;
            }
            let Ok(metadata) = entry.metadata().await else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            let age = metadata
                .modified()
                .ok()
                .and_then(|modified| now.duration_since(modified).ok());
            if age.is_some_and(|age| age > self.retention) {
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => {
                        log::debug!("Removed expired {}", path.display());
                        removed += 1;
                    }
                    Err(e) => log::warn!("Could not remove {}: {e}", path.display()),
                }
            }
        }
        removed
    }
}

pub struct AudioAssembler {
    synthesizer: VoiceSynthesizer,
    encoder: Arc<dyn AudioEncoder>,
    cache: AudioCache,
}

impl AudioAssembler {
    pub fn new(
        synthesizer: VoiceSynthesizer,
        encoder: Arc<dyn AudioEncoder>,
        cache: AudioCache,
    ) -> Self {
        Self {
            synthesizer,
            encoder,
            cache,
        }
    }

    pub fn encoder(&self) -> &dyn AudioEncoder {
        self.encoder.as_ref()
    }

    pub fn synthesizer(&self) -> &VoiceSynthesizer {
        &self.synthesizer
    }

    /// Synthesize every line in order, concatenate, export and sweep.
    ///
    /// The first failing line aborts the whole assembly.
    pub async fn assemble(
        &self,
        script: &DialogueScript,
        language: &str,
        backend: SynthesisBackend,
        voice_seed: u32,
    ) -> Result<PodcastOutput, AssemblyError> {
        let mut clips = Vec::with_capacity(script.dialogue.len());
        let mut transcript = String::new();
        let mut total_characters = 0;

        for line in &script.dialogue {
            log::info!("Generating audio for {}: {}", line.speaker, line.text);
            transcript.push_str(&transcript_line(
                line.speaker,
                script.guest_name(),
                &line.text,
            ));
            total_characters += line.text.chars().count();

            let clip = self
                .synthesizer
                .synthesize(&line.text, line.speaker, language, backend, voice_seed)
                .await?;
            clips.push(clip);
        }

        let combined = audio::concat(&clips)?;
        let extension = self.encoder.extension();
        let path = self.cache.allocate(extension).await?;
        self.encoder.export(&combined, &path).await?;

        let removed = self.cache.sweep(extension).await;
        if removed > 0 {
            log::info!("Removed {removed} expired file(s) from {}", self.cache.dir().display());
        }

        log::info!(
            "Generated {total_characters} characters of audio ({} ms) at {}",
            combined.duration_ms(),
            path.display()
        );
        Ok(PodcastOutput {
            audio_path: path,
            transcript,
        })
    }
}
