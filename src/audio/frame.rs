use crate::error::CaptureError;

/// One batch of raw PCM audio as delivered by the media transport
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Interleaved little-endian PCM bytes
    pub data: Vec<u8>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Bits per sample (16-bit and 32-bit integer PCM supported)
    pub bits_per_sample: u16,
}

impl AudioFrame {
    /// Decode the raw bytes into the 16-bit samples the frame buffer expects.
    ///
    /// 32-bit input is scaled down to 16 bits; other widths are rejected.
    pub fn decode(&self) -> Result<Vec<i16>, CaptureError> {
        match self.bits_per_sample {
            16 => Ok(self
                .data
                .chunks_exact(2)
                .map(|b| i16::from_le_bytes([b[0], b[1]]))
                .collect()),
            32 => Ok(self
                .data
                .chunks_exact(4)
                .map(|b| (i32::from_le_bytes([b[0], b[1], b[2], b[3]]) >> 16) as i16)
                .collect()),
            bits => Err(CaptureError::UnsupportedFormat { bits }),
        }
    }
}

/// A finished, contiguous take drained from the frame buffer
#[derive(Debug, Clone)]
pub struct AudioSegment {
    /// Decoded samples (i16 PCM, interleaved)
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
}

impl AudioSegment {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }
}

/// Accumulates decoded samples for one capture attempt.
///
/// The audio format is locked by the first append; the transport negotiates
/// a single format per stream, so later frames are assumed to match.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
    channels: u16,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one decoded frame's samples, in arrival order.
    pub fn append(&mut self, samples: &[i16], sample_rate: u32, channels: u16) {
        if self.sample_rate == 0 {
            self.sample_rate = sample_rate;
            self.channels = channels;
        }
        self.samples.extend_from_slice(samples);
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Take the accumulated segment and reset to empty, so the next capture
    /// attempt starts from a clean buffer.
    pub fn drain(&mut self) -> AudioSegment {
        let segment = AudioSegment {
            samples: std::mem::take(&mut self.samples),
            sample_rate: self.sample_rate,
            channels: self.channels,
        };
        self.sample_rate = 0;
        self.channels = 0;
        segment
    }
}
