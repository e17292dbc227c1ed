use std::time::Duration;
use tokio::sync::mpsc;

use super::frame::AudioFrame;

/// Result of one poll of the live audio transport
#[derive(Debug)]
pub enum SourcePoll {
    /// One or more frames arrived
    Frames(Vec<AudioFrame>),
    /// Nothing arrived within the poll window; retry
    Timeout,
    /// The transport has stopped producing frames
    Ended,
}

/// Pull-based view over the external media transport.
///
/// A `Timeout` is a transient gap, not an error. `Ended` is terminal for the
/// capture attempt; the caller must keep polling until it sees one, or the
/// tail of the recording would be lost.
#[async_trait::async_trait]
pub trait AudioSource: Send {
    async fn poll(&mut self, timeout: Duration) -> SourcePoll;
}

/// Audio source backed by an mpsc channel fed by the transport.
///
/// One poll waits up to `timeout` for the first frame, then drains whatever
/// else is already queued into the same batch. A closed channel means the
/// stream has ended.
pub struct ChannelSource {
    rx: mpsc::Receiver<AudioFrame>,
}

impl ChannelSource {
    pub fn new(rx: mpsc::Receiver<AudioFrame>) -> Self {
        Self { rx }
    }
}

#[async_trait::async_trait]
impl AudioSource for ChannelSource {
    async fn poll(&mut self, timeout: Duration) -> SourcePoll {
        match tokio::time::timeout(timeout, self.rx.recv()).await {
            Err(_) => SourcePoll::Timeout,
            Ok(None) => SourcePoll::Ended,
            Ok(Some(first)) => {
                let mut batch = vec![first];
                while let Ok(frame) = self.rx.try_recv() {
                    batch.push(frame);
                }
                SourcePoll::Frames(batch)
            }
        }
    }
}
