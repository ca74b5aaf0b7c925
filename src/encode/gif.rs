use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::error::{ChartError, ChartResult};

use super::{EncodeEvent, EncodeJob, EncodedBlob, FrameEncoder, FrameSnapshot};

/// GIF encoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GifEncoderSettings {
    pub width: u32,
    pub height: u32,
    /// Quantization speed, 1 (best quality) to 30 (fastest).
    #[serde(default = "default_speed")]
    pub speed: i32,
    /// Loop the animation forever.
    #[serde(default = "default_repeat")]
    pub repeat: bool,
}

fn default_speed() -> i32 {
    10
}

fn default_repeat() -> bool {
    true
}

impl GifEncoderSettings {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            speed: default_speed(),
            repeat: default_repeat(),
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        if !(1..=30).contains(&self.speed) {
            return Err(ChartError::InvalidData(format!(
                "gif speed must be in 1..=30, got {}",
                self.speed
            )));
        }
        Ok(())
    }
}

impl Default for GifEncoderSettings {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

/// Animated GIF encoder that quantizes and writes frames on a worker thread.
///
/// Frames are buffered by `add_frame`; `finish` moves them to a spawned thread
/// which reports progress after every written frame.
pub struct GifFrameEncoder {
    settings: GifEncoderSettings,
    frames: Vec<Frame>,
}

impl std::fmt::Debug for GifFrameEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GifFrameEncoder")
            .field("settings", &self.settings)
            .field("frames", &self.frames.len())
            .finish()
    }
}

impl GifFrameEncoder {
    pub fn new(settings: GifEncoderSettings) -> ChartResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            frames: Vec::new(),
        })
    }

    #[must_use]
    pub fn settings(&self) -> GifEncoderSettings {
        self.settings
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl FrameEncoder for GifFrameEncoder {
    fn add_frame(&mut self, frame: FrameSnapshot, delay: Duration) -> ChartResult<()> {
        if frame.width() != self.settings.width || frame.height() != self.settings.height {
            return Err(ChartError::Encode(format!(
                "frame is {}x{}, encoder expects {}x{}",
                frame.width(),
                frame.height(),
                self.settings.width,
                self.settings.height
            )));
        }
        let micros = u32::try_from(delay.as_micros()).map_err(|_| {
            ChartError::Encode(format!("frame delay {delay:?} is too long for a gif"))
        })?;
        self.frames.push(Frame::from_parts(
            frame,
            0,
            0,
            Delay::from_numer_denom_ms(micros, 1_000),
        ));
        Ok(())
    }

    fn finish(self) -> ChartResult<EncodeJob> {
        if self.frames.is_empty() {
            return Err(ChartError::Encode("no frames to encode".to_owned()));
        }

        let (sender, job) = EncodeJob::channel();
        let settings = self.settings;
        let frames = self.frames;
        debug!(frames = frames.len(), speed = settings.speed, "gif encode started");

        thread::Builder::new()
            .name("gif-encoder".to_owned())
            .spawn(move || {
                let event = match encode_frames(settings, frames, &sender) {
                    Ok(bytes) => EncodeEvent::Finished(EncodedBlob::gif(bytes)),
                    Err(err) => {
                        warn!(error = %err, "gif encode failed");
                        EncodeEvent::Failed(err.to_string())
                    }
                };
                // Nobody is waiting any more if the job was dropped.
                let _ = sender.send(event);
            })?;

        Ok(job)
    }
}

fn encode_frames(
    settings: GifEncoderSettings,
    frames: Vec<Frame>,
    progress: &Sender<EncodeEvent>,
) -> ChartResult<Vec<u8>> {
    let total = frames.len();
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut bytes, settings.speed);
        if settings.repeat {
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|err| ChartError::Encode(format!("gif repeat: {err}")))?;
        }
        for (index, frame) in frames.into_iter().enumerate() {
            encoder
                .encode_frame(frame)
                .map_err(|err| ChartError::Encode(format!("gif frame {index}: {err}")))?;
            let _ = progress.send(EncodeEvent::Progress((index + 1) as f64 / total as f64));
        }
    }
    Ok(bytes)
}
