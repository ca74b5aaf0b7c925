//! Encoder adapter contract used by the export pipeline.
//!
//! The pipeline hands owned frame snapshots to a [`FrameEncoder`] and then
//! waits on the returned [`EncodeJob`]. How the encoder does its work (inline,
//! on a thread, in a subprocess) stays behind the event channel.

mod gif;

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use image::RgbaImage;
use tracing::debug;

use crate::error::{ChartError, ChartResult};

pub use gif::{GifEncoderSettings, GifFrameEncoder};

/// Owned, straight-alpha copy of a rendered surface.
pub type FrameSnapshot = RgbaImage;

/// Encoded output plus its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBlob {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl EncodedBlob {
    #[must_use]
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    #[must_use]
    pub fn gif(bytes: Vec<u8>) -> Self {
        Self::new(bytes, "image/gif")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Notifications an encoder sends while it works.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeEvent {
    /// Fraction of the work done, in `[0, 1]`.
    Progress(f64),
    Finished(EncodedBlob),
    Failed(String),
}

/// Handle on an encode in flight.
#[derive(Debug)]
pub struct EncodeJob {
    events: Receiver<EncodeEvent>,
}

impl EncodeJob {
    /// Creates a job and the sender an encoder reports through.
    #[must_use]
    pub fn channel() -> (Sender<EncodeEvent>, Self) {
        let (sender, events) = mpsc::channel();
        (sender, Self { events })
    }

    /// A job that already finished, for encoders that work inline.
    #[must_use]
    pub fn completed(blob: EncodedBlob) -> Self {
        let (sender, job) = Self::channel();
        // The receiver is alive in `job`, so the send cannot fail.
        let _ = sender.send(EncodeEvent::Finished(blob));
        job
    }

    /// Blocks until the encoder finishes, forwarding progress.
    ///
    /// Reported values never decrease and the last one is exactly `1.0`.
    /// A sender dropped without a final event counts as a failure.
    pub fn wait(self, mut on_progress: impl FnMut(f64)) -> ChartResult<EncodedBlob> {
        let mut last = 0.0_f64;
        for event in self.events {
            match event {
                EncodeEvent::Progress(value) => {
                    if !value.is_finite() {
                        continue;
                    }
                    let value = value.clamp(0.0, 1.0);
                    if value > last {
                        last = value;
                        on_progress(value);
                    }
                }
                EncodeEvent::Finished(blob) => {
                    if last < 1.0 {
                        on_progress(1.0);
                    }
                    debug!(bytes = blob.len(), "encode finished");
                    return Ok(blob);
                }
                EncodeEvent::Failed(message) => return Err(ChartError::Encode(message)),
            }
        }
        Err(ChartError::Encode(
            "encoder stopped without producing output".to_owned(),
        ))
    }
}

/// Accepts frames with per-frame display delays and produces a blob.
pub trait FrameEncoder {
    fn add_frame(&mut self, frame: FrameSnapshot, delay: Duration) -> ChartResult<()>;

    /// Starts (or completes) encoding of every frame added so far.
    fn finish(self) -> ChartResult<EncodeJob>;
}

#[cfg(test)]
mod tests {
    use super::{EncodeEvent, EncodeJob, EncodedBlob};
    use crate::error::ChartError;

    #[test]
    fn wait_filters_regressing_progress_and_ends_at_one() {
        let (sender, job) = EncodeJob::channel();
        for value in [0.25, 0.1, 0.5, 0.5, 0.9] {
            sender.send(EncodeEvent::Progress(value)).expect("send");
        }
        sender
            .send(EncodeEvent::Finished(EncodedBlob::gif(vec![1, 2, 3])))
            .expect("send");

        let mut seen = Vec::new();
        let blob = job.wait(|value| seen.push(value)).expect("blob");

        assert_eq!(blob.bytes, vec![1, 2, 3]);
        assert_eq!(seen, vec![0.25, 0.5, 0.9, 1.0]);
    }

    #[test]
    fn dropped_sender_is_a_failure() {
        let (sender, job) = EncodeJob::channel();
        drop(sender);
        let err = job.wait(|_| {}).expect_err("must fail");
        assert!(matches!(err, ChartError::Encode(_)));
    }
}
