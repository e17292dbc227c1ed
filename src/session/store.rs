use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use super::recording::{derive_identity, Recording, TranscriptState};

/// One prompt to be read aloud
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// 0-based position in the original prompt list
    pub position: usize,
    pub text: String,
}

/// Store handle shared between the foreground capture flow and background
/// transcription tasks
pub type SharedStore = Arc<Mutex<SessionStore>>;

/// Session state: the ordered prompts, the navigation cursor, and the map
/// from recording identity to finished recording.
///
/// `register` is the only mutator of the recordings map besides transcript
/// write-back; `advance` is the only mutator of the cursor.
#[derive(Debug, Default)]
pub struct SessionStore {
    prompts: Vec<Prompt>,
    cursor: usize,
    recordings: BTreeMap<String, Recording>,
}

impl SessionStore {
    pub fn new(texts: Vec<String>) -> Self {
        let prompts = texts
            .into_iter()
            .enumerate()
            .map(|(position, text)| Prompt { position, text })
            .collect();

        Self {
            prompts,
            cursor: 0,
            recordings: BTreeMap::new(),
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor by `delta`, clamped to `[0, total-1]`. Stepping past
    /// either end is a no-op, not an error.
    pub fn advance(&mut self, delta: i64) {
        if self.prompts.is_empty() {
            return;
        }
        let max = (self.prompts.len() - 1) as i64;
        self.cursor = (self.cursor as i64 + delta).clamp(0, max) as usize;
    }

    pub fn current_prompt(&self) -> Option<&Prompt> {
        self.prompts.get(self.cursor)
    }

    /// Insert or replace the recording for its identity.
    pub fn register(&mut self, recording: Recording) {
        self.recordings.insert(recording.identity.clone(), recording);
    }

    pub fn recording(&self, identity: &str) -> Option<&Recording> {
        self.recordings.get(identity)
    }

    pub fn recordings(&self) -> impl Iterator<Item = &Recording> {
        self.recordings.values()
    }

    pub fn recorded_count(&self) -> usize {
        self.recordings.len()
    }

    pub fn is_recorded(&self, prompt: &Prompt) -> bool {
        self.recordings
            .contains_key(&derive_identity(&prompt.text, prompt.position))
    }

    /// Prompts that have no recording yet, in original order
    pub fn unrecorded_prompts(&self) -> Vec<&Prompt> {
        self.prompts.iter().filter(|p| !self.is_recorded(p)).collect()
    }

    /// Progress through the prompt list, counting the current item
    pub fn progress_fraction(&self) -> f64 {
        if self.prompts.is_empty() {
            0.0
        } else {
            (self.cursor + 1) as f64 / self.prompts.len() as f64
        }
    }

    /// Write a finished transcript back onto its recording.
    ///
    /// Returns false (and changes nothing) when the recording is gone or was
    /// re-captured since transcription started; a stale result must be
    /// discarded, not applied to the newer take.
    pub fn apply_transcript(
        &mut self,
        identity: &str,
        captured_at: DateTime<Utc>,
        state: TranscriptState,
    ) -> bool {
        match self.recordings.get_mut(identity) {
            Some(recording) if recording.captured_at == captured_at => {
                recording.transcript = state;
                true
            }
            _ => false,
        }
    }
}

/// Start a session from a clean slate: delete any previous recordings
/// directory and recreate it empty. This is the only deleter of recordings.
pub fn reset_recordings_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)
            .with_context(|| format!("Failed to clear recordings directory: {}", dir.display()))?;
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create recordings directory: {}", dir.display()))?;

    info!("Recordings directory ready: {}", dir.display());

    Ok(())
}
