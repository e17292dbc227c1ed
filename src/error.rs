use std::path::PathBuf;
use thiserror::Error;

/// Errors a capture attempt surfaces to the caller.
///
/// Transient stream gaps and the normal end-of-stream signal are absorbed
/// inside the capture loop and never appear here.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Encoding or writing the finished take failed. The session store is
    /// left untouched, so the prompt stays unrecorded and can be retried.
    #[error("failed to persist recording to {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// The transport delivered frames in a sample format we cannot decode.
    #[error("unsupported audio frame format: {bits} bits per sample")]
    UnsupportedFormat { bits: u16 },
}
