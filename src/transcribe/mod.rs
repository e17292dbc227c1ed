//! Background transcription
//!
//! A finished recording is handed to an opaque speech-to-text engine on a
//! fire-and-forget task. The result is written back into the session store
//! by identity, and discarded when the recording was re-captured in the
//! meantime.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::session::{Recording, SharedStore, TranscriptState};

/// One timed span of transcribed speech
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Segment start in seconds from the beginning of the file
    pub start: f64,
    /// Segment end in seconds
    pub end: f64,
    pub text: String,
}

/// Best-effort result of transcribing one audio file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub text: String,
    /// Detected language code, if the engine reports one
    pub language: Option<String>,
    /// Confidence (0.0 to 1.0), if available
    pub confidence: Option<f32>,
    pub segments: Vec<TranscriptSegment>,
}

/// Opaque speech-to-text boundary
#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, path: &Path) -> Result<Transcription>;
}

/// Launches background transcription tasks and writes their results back
/// into the session store.
pub struct TranscriptionDispatcher {
    transcriber: Arc<dyn Transcriber>,
    store: SharedStore,
}

impl TranscriptionDispatcher {
    pub fn new(transcriber: Arc<dyn Transcriber>, store: SharedStore) -> Self {
        Self { transcriber, store }
    }

    /// Schedule transcription of a finished recording, off the capture path.
    ///
    /// The returned handle is never joined by the session itself (tests may
    /// await it). A failed transcription becomes `TranscriptState::Failed`,
    /// and a result for a take that was re-recorded while the task ran is
    /// discarded at write-back.
    pub fn dispatch(&self, recording: &Recording) -> JoinHandle<()> {
        let transcriber = Arc::clone(&self.transcriber);
        let store = Arc::clone(&self.store);
        let identity = recording.identity.clone();
        let captured_at = recording.captured_at;
        let path: PathBuf = recording.file_path.clone();

        tokio::spawn(async move {
            let started = Instant::now();

            let state = match transcriber.transcribe(&path).await {
                Ok(result) => {
                    info!(
                        "Transcribed {} in {:.2}s (lang: {}, confidence: {}): {:?}",
                        path.display(),
                        started.elapsed().as_secs_f64(),
                        result.language.as_deref().unwrap_or("unknown"),
                        result
                            .confidence
                            .map(|c| format!("{c:.2}"))
                            .unwrap_or_else(|| "n/a".to_string()),
                        result.text
                    );
                    TranscriptState::Ready(result)
                }
                Err(e) => {
                    warn!("Transcription failed for {}: {e:#}", path.display());
                    TranscriptState::Failed
                }
            };

            let applied = store.lock().await.apply_transcript(&identity, captured_at, state);
            if !applied {
                info!("Discarding stale transcript for {identity}");
            }
        })
    }
}
