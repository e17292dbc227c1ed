use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::recording::Recording;
use super::store::{Prompt, SharedStore};
use crate::audio::{write_segment, AudioSource, FrameBuffer, SourcePoll};
use crate::error::CaptureError;

/// Result of one capture attempt
#[derive(Debug)]
pub enum CaptureOutcome {
    /// A non-empty take was persisted and registered
    Recorded(Recording),
    /// The stream ended before any audio arrived; nothing was written
    NoAudio,
}

/// Capture progress for one attempt, used for status logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Idle,
    Waiting,
    Receiving,
}

/// Drives one recording attempt: polls the audio source until the stream
/// ends, assembles the take, persists it under its content-derived identity,
/// and registers it in the session store.
pub struct RecordingController {
    recordings_dir: PathBuf,
    poll_timeout: Duration,
}

impl RecordingController {
    pub fn new(recordings_dir: PathBuf, poll_timeout: Duration) -> Self {
        Self {
            recordings_dir,
            poll_timeout,
        }
    }

    /// Run one capture attempt for `prompt`.
    ///
    /// Blocks (asynchronously) until the stream ends or persisting fails.
    /// Poll timeouts are transient: the loop keeps polling until the
    /// transport reports the stream has stopped, so a receiving stream is
    /// never abandoned early. Frames are appended in arrival order.
    pub async fn run(
        &self,
        source: &mut dyn AudioSource,
        store: &SharedStore,
        prompt: &Prompt,
    ) -> Result<CaptureOutcome, CaptureError> {
        let mut buffer = FrameBuffer::new();
        let mut state = CaptureState::Idle;

        info!("Capture attempt for prompt {}: {:?}", prompt.position, prompt.text);

        loop {
            match source.poll(self.poll_timeout).await {
                SourcePoll::Frames(batch) => {
                    if state != CaptureState::Receiving {
                        info!("Now recording...");
                        state = CaptureState::Receiving;
                    }
                    for frame in &batch {
                        let samples = frame.decode()?;
                        buffer.append(&samples, frame.sample_rate, frame.channels);
                    }
                }
                SourcePoll::Timeout => {
                    if state == CaptureState::Idle {
                        state = CaptureState::Waiting;
                    }
                    debug!("No frame arrived within the poll window, retrying");
                }
                SourcePoll::Ended => break,
            }
        }

        let segment = buffer.drain();
        if segment.is_empty() {
            info!(
                "Stream ended with no audio; prompt {} stays unrecorded",
                prompt.position
            );
            return Ok(CaptureOutcome::NoAudio);
        }

        let recording = Recording::new(prompt.text.clone(), prompt.position, &self.recordings_dir);

        if let Err(e) = write_segment(&recording.file_path, &segment) {
            warn!("Failed to persist recording: {e:#}");
            return Err(CaptureError::Persistence {
                path: recording.file_path,
                source: e,
            });
        }

        info!(
            "Recorded prompt {} ({:.1}s) -> {}",
            prompt.position,
            segment.duration_secs(),
            recording.file_path.display()
        );

        store.lock().await.register(recording.clone());

        Ok(CaptureOutcome::Recorded(recording))
    }
}
