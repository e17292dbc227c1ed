use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::transcribe::Transcription;

/// Stable identity for a (prompt text, position) pair.
///
/// Same pair, same digest across restarts. The digest doubles as the WAV
/// file stem, so re-recording a prompt overwrites its previous take.
pub fn derive_identity(text: &str, position: usize) -> String {
    format!("{:x}", md5::compute(format!("{text}{position}")))
}

/// Transcript lifecycle for a recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TranscriptState {
    /// Transcription dispatched but not finished
    Pending,
    /// Transcription completed
    Ready(Transcription),
    /// Transcription ran and failed; the recording itself is still valid
    Failed,
}

impl TranscriptState {
    pub fn is_pending(&self) -> bool {
        matches!(self, TranscriptState::Pending)
    }
}

/// One persisted take of a prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Content-derived identity, also the WAV file stem
    pub identity: String,
    /// 0-based position of the prompt in the session
    pub position: usize,
    /// The prompt text that was read aloud
    pub text: String,
    /// Where the WAV file lives on disk
    pub file_path: PathBuf,
    /// Transcript, filled in asynchronously after capture
    pub transcript: TranscriptState,
    /// When the take was finalized; distinguishes re-recordings of the same
    /// prompt from each other
    pub captured_at: DateTime<Utc>,
}

impl Recording {
    pub fn new(text: String, position: usize, recordings_dir: &Path) -> Self {
        let identity = derive_identity(&text, position);
        let file_path = recordings_dir.join(format!("{identity}.wav"));

        Self {
            identity,
            position,
            text,
            file_path,
            transcript: TranscriptState::Pending,
            captured_at: Utc::now(),
        }
    }

    /// WAV file name without directory, as it appears in the manifest and
    /// the export archive
    pub fn file_name(&self) -> String {
        format!("{}.wav", self.identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identity_is_deterministic() {
        assert_eq!(
            derive_identity("The cat sat on the mat.", 0),
            derive_identity("The cat sat on the mat.", 0)
        );
    }

    #[test]
    fn identity_depends_on_text_and_position() {
        let base = derive_identity("hello", 1);
        assert_ne!(base, derive_identity("hello", 2));
        assert_ne!(base, derive_identity("goodbye", 1));
    }

    #[test]
    fn no_collisions_across_generated_corpus() {
        let mut seen = HashSet::new();
        for position in 0..100 {
            for word in ["alpha", "beta", "gamma", "delta", "epsilon"] {
                let text = format!("prompt {word} number {position}");
                assert!(seen.insert(derive_identity(&text, position)));
            }
        }
        assert_eq!(seen.len(), 500);
    }

    #[test]
    fn file_path_is_identity_under_recordings_dir() {
        let recording = Recording::new("hi".to_string(), 3, Path::new("/tmp/takes"));
        assert_eq!(recording.file_name(), format!("{}.wav", recording.identity));
        assert_eq!(
            recording.file_path,
            Path::new("/tmp/takes").join(recording.file_name())
        );
        assert!(recording.transcript.is_pending());
    }
}
