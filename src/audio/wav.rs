use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use super::frame::AudioSegment;

/// Encode a finished segment to a 16-bit PCM WAV file, replacing any prior
/// file at the same path.
pub fn write_segment(path: impl AsRef<Path>, segment: &AudioSegment) -> Result<()> {
    let path = path.as_ref();

    let spec = hound::WavSpec {
        channels: segment.channels,
        sample_rate: segment.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;

    for &sample in &segment.samples {
        writer
            .write_sample(sample)
            .context("Failed to write sample to WAV")?;
    }

    writer.finalize().context("Failed to finalize WAV file")?;

    debug!(
        "Wrote {} ({:.1}s, {}Hz, {} channels)",
        path.display(),
        segment.duration_secs(),
        segment.sample_rate,
        segment.channels
    );

    Ok(())
}
