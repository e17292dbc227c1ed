//! Recording session state and control
//!
//! This module provides:
//! - `SessionStore`: the ordered prompt list, the navigation cursor, and the
//!   identity → recording map (single source of truth for progress)
//! - `RecordingController`: drives one capture attempt from first frame to
//!   persisted WAV file
//! - `Recording` and its content-derived identity

mod controller;
mod recording;
mod store;

pub use controller::{CaptureOutcome, RecordingController};
pub use recording::{derive_identity, Recording, TranscriptState};
pub use store::{reset_recordings_dir, Prompt, SessionStore, SharedStore};
