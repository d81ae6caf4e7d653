//! Writing the concatenated podcast to disk.

use async_trait::async_trait;
use notebookcast_speech::{AudioData, AudioFormat, TTSError, audio};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum ExportError {
    /// The encoder's external tool is missing; carries install guidance
    #[error("{0}")]
    DependencyMissing(String),

    #[error("{0}")]
    Encode(#[from] TTSError),

    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ffmpeg exited with {status}: {stderr}")]
    Ffmpeg { status: String, stderr: String },
}

/// Encodes finished audio into the output container.
#[async_trait]
pub trait AudioEncoder: Send + Sync {
    fn format(&self) -> AudioFormat;

    /// File extension, without the dot
    fn extension(&self) -> &'static str {
        self.format().extension()
    }

    /// Fail with install guidance when the encoder cannot run here.
    async fn ensure_available(&self) -> Result<(), ExportError>;

    async fn export(&self, audio: &AudioData, path: &Path) -> Result<(), ExportError>;
}

/// MP3 through an `ffmpeg` subprocess; WAV bytes go in on stdin.
pub struct FfmpegEncoder {
    binary: PathBuf,
}

impl FfmpegEncoder {
    pub fn new() -> Self {
        Self::with_binary("ffmpeg")
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    async fn encode_mp3(&self, wav: &[u8], path: &Path) -> Result<(), ExportError> {
        let io_error = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut child = Command::new(&self.binary)
            .args(["-y", "-loglevel", "error", "-f", "wav", "-i", "pipe:0"])
            .args(["-codec:a", "libmp3lame", "-q:a", "2"])
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(io_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(wav).await.map_err(io_error)?;
            stdin.shutdown().await.map_err(io_error)?;
        }

        let output = child.wait_with_output().await.map_err(io_error)?;
        if !output.status.success() {
            return Err(ExportError::Ffmpeg {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// How to get ffmpeg on the current OS
pub fn ffmpeg_install_guidance() -> String {
    if cfg!(target_os = "macos") {
        [
            "ffmpeg was not found. Install it with the following steps:",
            "",
            "1. Make sure Homebrew is installed:",
            "   /bin/bash -c \"$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)\"",
            "",
            "2. Install ffmpeg:",
            "   brew install ffmpeg",
            "",
            "If it is installed but still fails, try:",
            "   brew update",
            "   brew upgrade ffmpeg",
            "",
            "Or reinstall it:",
            "   brew uninstall ffmpeg",
            "   brew install ffmpeg",
            "",
            "Restart your terminal after installing and run the program again.",
        ]
        .join("\n")
    } else {
        [
            "Please install ffmpeg first.",
            "On Ubuntu/Debian run: sudo apt-get install ffmpeg",
            "On macOS run: brew install ffmpeg",
            "On Windows download and install ffmpeg from https://ffmpeg.org/download.html",
        ]
        .join("\n")
    }
}

#[async_trait]
impl AudioEncoder for FfmpegEncoder {
    fn format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    async fn ensure_available(&self) -> Result<(), ExportError> {
        let output = Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                log::info!("ffmpeg found: {}", stdout.lines().next().unwrap_or_default());
                Ok(())
            }
            Ok(output) => Err(ExportError::DependencyMissing(format!(
                "ffmpeg -version exited with {}\n\n{}",
                output.status,
                ffmpeg_install_guidance()
            ))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ExportError::DependencyMissing(ffmpeg_install_guidance()))
            }
            Err(e) => Err(ExportError::DependencyMissing(format!(
                "Error while checking the ffmpeg installation: {e}"
            ))),
        }
    }

    async fn export(&self, audio: &AudioData, path: &Path) -> Result<(), ExportError> {
        let wav = audio::encode_wav(audio)?;
        if let Err(err) = self.encode_mp3(&wav, path).await {
            discard_partial(path).await;
            return Err(err);
        }
        log::debug!("Exported {} ms of audio to {}", audio.duration_ms(), path.display());
        Ok(())
    }
}

/// A failed export leaves nothing behind at its cache path.
async fn discard_partial(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => log::debug!("Removed partial export {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("Could not remove partial export {}: {}", path.display(), e),
    }
}

/// 16-bit PCM WAV, no external tools.
#[derive(Debug, Default, Clone, Copy)]
pub struct WavEncoder;

#[async_trait]
impl AudioEncoder for WavEncoder {
    fn format(&self) -> AudioFormat {
        AudioFormat::Wav
    }

    async fn ensure_available(&self) -> Result<(), ExportError> {
        Ok(())
    }

    async fn export(&self, audio: &AudioData, path: &Path) -> Result<(), ExportError> {
        let bytes = audio::encode_wav(audio)?;
        tokio::fs::write(path, bytes)
            .await
            .map_err(|source| ExportError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Encoder for a configured output format
pub fn encoder_for(format: AudioFormat) -> Box<dyn AudioEncoder> {
    match format {
        AudioFormat::Mp3 => Box::new(FfmpegEncoder::new()),
        AudioFormat::Wav => Box::new(WavEncoder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_wav_encoder_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let clip = AudioData::new(vec![0.5; 2_400], 1, 24_000);

        WavEncoder.ensure_available().await.unwrap();
        WavEncoder.export(&clip, &path).await.unwrap();

        let decoded = audio::read_file(&path).unwrap();
        assert_eq!(decoded.frames(), 2_400);
        assert_eq!(decoded.sample_rate, 24_000);
    }

    #[tokio::test]
    async fn test_missing_ffmpeg_reports_guidance() {
        let encoder = FfmpegEncoder::with_binary("/nonexistent/bin/ffmpeg-missing");
        let err = encoder.ensure_available().await.unwrap_err();
        match err {
            ExportError::DependencyMissing(message) => {
                assert!(message.contains("ffmpeg"));
                assert!(message.contains("brew install ffmpeg"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_ffmpeg_leaves_no_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("ffmpeg");
        std::fs::write(
            &fake,
            "#!/bin/sh\nfor last; do :; done\necho partial > \"$last\"\ncat > /dev/null\necho 'encoder crashed' >&2\nexit 1\n",
        )
        .unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let path = dir.path().join("podcast.mp3");
        let clip = AudioData::new(vec![0.1; 1_600], 1, 16_000);
        let err = FfmpegEncoder::with_binary(&fake)
            .export(&clip, &path)
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::Ffmpeg { ref stderr, .. } if stderr == "encoder crashed"));
        assert!(!path.exists());
    }

    #[test]
    fn test_encoder_for_format() {
        assert_eq!(encoder_for(AudioFormat::Mp3).extension(), "mp3");
        assert_eq!(encoder_for(AudioFormat::Wav).extension(), "wav");
    }
}
