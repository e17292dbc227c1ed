//! Audio capture plumbing
//!
//! Raw PCM frames arrive in batches from a live media transport, accumulate
//! in a `FrameBuffer`, and are finalized into a single `AudioSegment` that
//! gets encoded to a WAV file on disk.

pub mod frame;
pub mod source;
pub mod wav;

pub use frame::{AudioFrame, AudioSegment, FrameBuffer};
pub use source::{AudioSource, ChannelSource, SourcePoll};
pub use wav::write_segment;
