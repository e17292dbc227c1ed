pub mod audio;
pub mod config;
pub mod error;
pub mod export;
pub mod session;
pub mod transcribe;

pub use audio::{
    write_segment, AudioFrame, AudioSegment, AudioSource, ChannelSource, FrameBuffer, SourcePoll,
};
pub use config::Config;
pub use error::CaptureError;
pub use export::{ExportBuilder, ExportSummary, ManifestEntry};
pub use session::{
    derive_identity, reset_recordings_dir, CaptureOutcome, Prompt, Recording, RecordingController,
    SessionStore, SharedStore, TranscriptState,
};
pub use transcribe::{TranscriptSegment, Transcriber, Transcription, TranscriptionDispatcher};
