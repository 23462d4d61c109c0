use super::{AudioError, AudioFormat, AudioSegment, EncodedAudio};
use std::io::Cursor;

/// Joins raw PCM buffers and wraps them in a WAV container
#[derive(Debug, Clone, Copy)]
pub struct AudioAssembler {
    format: AudioFormat,
}

impl AudioAssembler {
    pub fn new(format: AudioFormat) -> Result<Self, AudioError> {
        format.validate()?;
        Ok(Self { format })
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Concatenate rendered segments in ascending `sequence_index` order and
    /// encode the result. Missing segments are skipped, nothing is inserted
    /// between segments.
    pub fn assemble_segments(
        &self,
        mut segments: Vec<AudioSegment>,
    ) -> Result<EncodedAudio, AudioError> {
        segments.sort_by_key(|s| s.sequence_index);

        let mut pcm = Vec::new();
        let mut used = 0usize;

        for segment in segments {
            let Some(samples) = segment.raw_samples else {
                continue;
            };
            let aligned = self.frame_aligned(&samples, segment.sequence_index);
            if aligned.is_empty() {
                continue;
            }
            pcm.extend_from_slice(aligned);
            used += 1;
        }

        if used == 0 {
            return Err(AudioError::NoSegments);
        }

        tracing::debug!(
            segment_count = used,
            pcm_size = pcm.len(),
            "Segments concatenated"
        );

        self.encode(&pcm, used)
    }

    /// Wrap a single complete PCM stream
    pub fn wrap(&self, raw_samples: &[u8]) -> Result<EncodedAudio, AudioError> {
        let aligned = self.frame_aligned(raw_samples, 0);
        if aligned.is_empty() {
            return Err(AudioError::EmptyAudio);
        }
        self.encode(aligned, 1)
    }

    /// Drop a trailing partial frame so later buffers stay aligned
    fn frame_aligned<'a>(&self, samples: &'a [u8], sequence_index: usize) -> &'a [u8] {
        let block_align = self.format.block_align();
        let usable = samples.len() - samples.len() % block_align;
        if usable != samples.len() {
            tracing::warn!(
                sequence_index = sequence_index,
                byte_len = samples.len(),
                block_align = block_align,
                "Dropping trailing partial audio frame"
            );
        }
        &samples[..usable]
    }

    fn encode(&self, pcm: &[u8], segment_count: usize) -> Result<EncodedAudio, AudioError> {
        let spec = hound::WavSpec {
            channels: self.format.channels,
            sample_rate: self.format.sample_rate,
            bits_per_sample: self.format.bits_per_sample,
            sample_format: hound::SampleFormat::Int,
        };

        let mut buf = Cursor::new(Vec::with_capacity(pcm.len() + 44));
        {
            let mut writer = hound::WavWriter::new(&mut buf, spec)?;
            match self.format.bits_per_sample {
                8 => {
                    // 8-bit PCM is unsigned on the wire; hound takes signed samples
                    for &b in pcm {
                        writer.write_sample((i16::from(b) - 128) as i8)?;
                    }
                }
                16 => {
                    for b in pcm.chunks_exact(2) {
                        writer.write_sample(i16::from_le_bytes([b[0], b[1]]))?;
                    }
                }
                24 => {
                    for b in pcm.chunks_exact(3) {
                        let sign = if b[2] & 0x80 != 0 { 0xFF } else { 0x00 };
                        writer.write_sample(i32::from_le_bytes([b[0], b[1], b[2], sign]))?;
                    }
                }
                _ => {
                    for b in pcm.chunks_exact(4) {
                        writer.write_sample(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))?;
                    }
                }
            }
            writer.finalize()?;
        }

        Ok(EncodedAudio {
            wav_bytes: buf.into_inner(),
            format: self.format,
            duration_ms: self.format.duration_ms(pcm.len()),
            segment_count,
        })
    }
}
