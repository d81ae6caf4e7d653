//! Decoding, encoding and splicing of [`AudioData`].
//!
//! WAV goes through `hound`; everything else (MP3 from the MeloTTS space)
//! through the `symphonia` probe.

use crate::{AudioData, AudioFormat, TTSError, TTSResult};
use std::io::Cursor;
use std::path::Path;

/// Decode an in-memory audio file.
///
/// `hint` is a file extension used to pick the demuxer; when it is `None`
/// or unknown, WAV is tried by magic bytes before falling back to probing.
pub fn decode_bytes(bytes: &[u8], hint: Option<AudioFormat>) -> TTSResult<AudioData> {
    let looks_like_wav = bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE";
    if hint == Some(AudioFormat::Wav) || (hint.is_none() && looks_like_wav) {
        return read_wav(Cursor::new(bytes));
    }
    decode_with_symphonia(bytes.to_vec(), hint)
}

/// Decode an audio file from disk.
pub fn read_file(path: impl AsRef<Path>) -> TTSResult<AudioData> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        TTSError::IoError(e, "read audio file".to_string(), path.display().to_string())
    })?;
    let hint = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|e| e.parse().ok());
    decode_bytes(&bytes, hint)
}

fn read_wav<R: std::io::Read>(reader: R) -> TTSResult<AudioData> {
    let mut reader =
        hound::WavReader::new(reader).map_err(|e| TTSError::DecodeError(e.to_string()))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => match spec.bits_per_sample {
            16 => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
                .collect::<Result<_, _>>(),
            24 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 8_388_607.0))
                .collect::<Result<_, _>>(),
            32 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / i32::MAX as f32))
                .collect::<Result<_, _>>(),
            bits => {
                return Err(TTSError::DecodeError(format!(
                    "unsupported WAV bit depth: {bits}"
                )));
            }
        },
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>(),
    }
    .map_err(|e| TTSError::DecodeError(e.to_string()))?;

    Ok(AudioData::new(
        samples,
        spec.channels as usize,
        spec.sample_rate,
    ))
}

fn decode_with_symphonia(bytes: Vec<u8>, hint: Option<AudioFormat>) -> TTSResult<AudioData> {
    use symphonia::core::audio::SampleBuffer;
    use symphonia::core::codecs::DecoderOptions;
    use symphonia::core::errors::Error as SymphoniaError;
    use symphonia::core::formats::FormatOptions;
    use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
    use symphonia::core::meta::MetadataOptions;
    use symphonia::core::probe::Hint;

    let mss = MediaSourceStream::new(
        Box::new(Cursor::new(bytes)),
        MediaSourceStreamOptions::default(),
    );

    let mut probe_hint = Hint::new();
    if let Some(format) = hint {
        probe_hint.with_extension(format.extension());
    }

    let probed = symphonia::default::get_probe()
        .format(
            &probe_hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| TTSError::DecodeError(e.to_string()))?;

    let mut format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| TTSError::DecodeError("no audio track found".into()))?;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| TTSError::DecodeError("unknown sample rate".into()))?;
    let mut channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(1);
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| TTSError::DecodeError(e.to_string()))?;

    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(_)) | Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(TTSError::DecodeError(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                channels = decoded.spec().channels.count();
                let sb = sample_buf.get_or_insert_with(|| {
                    SampleBuffer::new(decoded.capacity() as u64, *decoded.spec())
                });
                sb.copy_interleaved_ref(decoded);
                samples.extend_from_slice(sb.samples());
            }
            Err(SymphoniaError::IoError(_)) | Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => return Err(TTSError::DecodeError(e.to_string())),
        }
    }

    Ok(AudioData::new(samples, channels, sample_rate))
}

/// Write `audio` as 16-bit PCM WAV.
pub fn write_wav(path: impl AsRef<Path>, audio: &AudioData) -> TTSResult<()> {
    let path = path.as_ref();
    let spec = wav_spec(audio)?;
    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| TTSError::EncodeError(format!("{}: {}", path.display(), e)))?;
    write_samples(&mut writer, &audio.samples)?;
    writer
        .finalize()
        .map_err(|e| TTSError::EncodeError(format!("{}: {}", path.display(), e)))
}

/// Encode `audio` as an in-memory 16-bit PCM WAV file.
pub fn encode_wav(audio: &AudioData) -> TTSResult<Vec<u8>> {
    let spec = wav_spec(audio)?;
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| TTSError::EncodeError(e.to_string()))?;
        write_samples(&mut writer, &audio.samples)?;
        writer
            .finalize()
            .map_err(|e| TTSError::EncodeError(e.to_string()))?;
    }
    Ok(cursor.into_inner())
}

fn wav_spec(audio: &AudioData) -> TTSResult<hound::WavSpec> {
    let channels = u16::try_from(audio.channels)
        .ok()
        .filter(|c| *c > 0)
        .ok_or_else(|| {
            TTSError::EncodeError(format!("invalid channel count: {}", audio.channels))
        })?;
    Ok(hound::WavSpec {
        channels,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    })
}

fn write_samples<W: std::io::Write + std::io::Seek>(
    writer: &mut hound::WavWriter<W>,
    samples: &[f32],
) -> TTSResult<()> {
    for sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16;
        writer
            .write_sample(value)
            .map_err(|e| TTSError::EncodeError(e.to_string()))?;
    }
    Ok(())
}

/// Splice clips end to end.
///
/// The result takes the format of the first clip; later clips with a
/// different channel count or rate are converted first. Clips already in
/// the target format are appended untouched.
pub fn concat(clips: &[AudioData]) -> TTSResult<AudioData> {
    let first = clips
        .first()
        .ok_or_else(|| TTSError::Other("no clips to concatenate".into(), "concat".into()))?;
    let channels = first.channels.max(1);
    let sample_rate = first.sample_rate;

    let mut samples = Vec::with_capacity(clips.iter().map(|c| c.samples.len()).sum());
    for clip in clips {
        if clip.same_format(first) {
            samples.extend_from_slice(&clip.samples);
        } else {
            log::debug!(
                "converting clip {}ch/{}Hz to {}ch/{}Hz",
                clip.channels,
                clip.sample_rate,
                channels,
                sample_rate
            );
            let converted = convert(clip, channels, sample_rate);
            samples.extend_from_slice(&converted);
        }
    }

    Ok(AudioData::new(samples, channels, sample_rate))
}

fn convert(clip: &AudioData, channels: usize, sample_rate: u32) -> Vec<f32> {
    let clip_channels = clip.channels.max(1);
    let remixed = if clip_channels == channels {
        clip.samples.clone()
    } else {
        let mono = downmix_to_mono(&clip.samples, clip_channels);
        if channels == 1 {
            mono
        } else {
            upmix_from_mono(&mono, channels)
        }
    };
    resample_interleaved(&remixed, channels, clip.sample_rate, sample_rate)
}

fn downmix_to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    samples
        .chunks(channels)
        .map(|chunk| chunk.iter().sum::<f32>() / channels as f32)
        .collect()
}

fn upmix_from_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    samples
        .iter()
        .flat_map(|s| std::iter::repeat_n(*s, channels))
        .collect()
}

fn resample_interleaved(
    samples: &[f32],
    channels: usize,
    from_rate: u32,
    to_rate: u32,
) -> Vec<f32> {
    if from_rate == to_rate || from_rate == 0 || to_rate == 0 {
        return samples.to_vec();
    }

    let frame_count = samples.len() / channels;
    if frame_count == 0 {
        return Vec::new();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let target_frames =
        (frame_count as u64 * to_rate as u64).div_ceil(from_rate as u64) as usize;
    let mut out = Vec::with_capacity(target_frames * channels);

    for i in 0..target_frames {
        let src_pos = i as f64 * ratio;
        let src_idx = src_pos.floor() as usize;
        let frac = (src_pos - src_idx as f64) as f32;

        for ch in 0..channels {
            let base = src_idx * channels + ch;
            let next = base + channels;

            let sample = if next < samples.len() {
                samples[base] * (1.0 - frac) + samples[next] * frac
            } else if base < samples.len() {
                samples[base]
            } else {
                0.0
            };
            out.push(sample);
        }
    }

    out
}
