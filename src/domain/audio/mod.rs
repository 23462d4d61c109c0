use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

pub mod assembler;

pub use assembler::AudioAssembler;

pub const WAV_MIME_TYPE: &str = "audio/wav";

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("no audio segments to assemble")]
    NoSegments,
    #[error("audio payload is empty")]
    EmptyAudio,
    #[error("wav encoding failed: {0}")]
    Encoding(#[from] hound::Error),
}

/// Raw PCM layout of backend audio and of the produced WAV file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFormat {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl Default for AudioFormat {
    /// Mono, 24 kHz, 16-bit linear PCM
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 24_000,
            bits_per_sample: 16,
        }
    }
}

impl AudioFormat {
    pub fn validate(&self) -> Result<(), AudioError> {
        if self.channels == 0 {
            return Err(AudioError::UnsupportedFormat(
                "channel count must be at least 1".to_string(),
            ));
        }
        if self.sample_rate == 0 {
            return Err(AudioError::UnsupportedFormat(
                "sample rate must be > 0".to_string(),
            ));
        }
        if !matches!(self.bits_per_sample, 8 | 16 | 24 | 32) {
            return Err(AudioError::UnsupportedFormat(format!(
                "{} bits per sample (expected 8, 16, 24 or 32)",
                self.bits_per_sample
            )));
        }
        Ok(())
    }

    pub fn bytes_per_sample(&self) -> usize {
        usize::from(self.bits_per_sample / 8)
    }

    /// Bytes per frame (one sample for every channel)
    pub fn block_align(&self) -> usize {
        self.bytes_per_sample() * usize::from(self.channels)
    }

    pub fn duration_ms(&self, pcm_len: usize) -> u64 {
        let frames = (pcm_len / self.block_align()) as u64;
        frames * 1000 / u64::from(self.sample_rate)
    }
}

/// Raw audio for one cue under per-line synthesis; `None` marks a failed or
/// skipped cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSegment {
    pub sequence_index: usize,
    pub raw_samples: Option<Vec<u8>>,
}

impl AudioSegment {
    pub fn rendered(sequence_index: usize, raw_samples: Vec<u8>) -> Self {
        Self {
            sequence_index,
            raw_samples: Some(raw_samples),
        }
    }

    pub fn missing(sequence_index: usize) -> Self {
        Self {
            sequence_index,
            raw_samples: None,
        }
    }

    pub fn is_rendered(&self) -> bool {
        self.raw_samples.is_some()
    }
}

/// A complete WAV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAudio {
    pub wav_bytes: Vec<u8>,
    pub format: AudioFormat,
    pub duration_ms: u64,
    /// PCM buffers that made it into the file after frame alignment
    pub segment_count: usize,
}

impl EncodedAudio {
    /// `data:audio/wav;base64,...` for inline playback
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", WAV_MIME_TYPE, STANDARD.encode(&self.wav_bytes))
    }
}
