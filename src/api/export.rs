use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::core::{Chart, Viewport};
use crate::encode::{EncodedBlob, FrameEncoder, GifEncoderSettings, GifFrameEncoder};
use crate::error::{ChartError, ChartResult};
use crate::layout::build_chart_frame;
use crate::render::{RasterRenderer, SnapshotRenderer};

/// Timing of an exported animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub duration_ms: u64,
    pub fps: u32,
    /// Copies of the final frame appended after the animation.
    pub hold_frames: u32,
    pub hold_delay_ms: u64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            duration_ms: 2_000,
            fps: 30,
            hold_frames: 10,
            hold_delay_ms: 100,
        }
    }
}

impl ExportSettings {
    pub fn validate(self) -> ChartResult<()> {
        let overflow = || {
            ChartError::InvalidData(format!(
                "export of {} ms at {} fps is too long",
                self.duration_ms, self.fps
            ))
        };
        self.checked_frame_count().ok_or_else(overflow)?;
        self.duration_ms.checked_mul(1_000_000).ok_or_else(overflow)?;
        if self.frame_count() == 0 {
            return Err(ChartError::InvalidData(format!(
                "export of {} ms at {} fps has no frames",
                self.duration_ms, self.fps
            )));
        }
        Ok(())
    }

    /// Animated intervals; the animation is sampled `frame_count + 1` times.
    #[must_use]
    pub fn frame_count(self) -> u64 {
        self.checked_frame_count().unwrap_or(u64::MAX)
    }

    fn checked_frame_count(self) -> Option<u64> {
        self.duration_ms
            .checked_mul(u64::from(self.fps))
            .map(|product| product / 1_000)
    }

    /// Display time of each animated frame: `duration / frame_count`.
    #[must_use]
    pub fn frame_delay(self) -> Duration {
        match self.frame_count() {
            0 => Duration::ZERO,
            count => Duration::from_nanos(self.duration_ms.saturating_mul(1_000_000) / count),
        }
    }

    #[must_use]
    pub fn hold_delay(self) -> Duration {
        Duration::from_millis(self.hold_delay_ms)
    }

    /// Frames handed to the encoder: samples plus holds.
    #[must_use]
    pub fn total_frames(self) -> u64 {
        self.frame_count()
            .saturating_add(1)
            .saturating_add(u64::from(self.hold_frames))
    }

    /// Global progress values sampled for the animated part.
    pub fn progress_samples(self) -> impl Iterator<Item = f64> {
        let count = self.frame_count();
        (0..=count).map(move |index| index as f64 / count as f64)
    }
}

/// Renders every animation sample on `surface` and encodes them.
///
/// The surface is borrowed exclusively for the whole call. `on_progress`
/// receives non-decreasing encoder progress ending at exactly `1.0`.
#[instrument(skip_all, fields(chart_id = %chart.id))]
pub fn export_animation<S, E>(
    surface: &mut S,
    chart: &Chart,
    settings: ExportSettings,
    mut encoder: E,
    on_progress: impl FnMut(f64),
) -> ChartResult<EncodedBlob>
where
    S: SnapshotRenderer,
    E: FrameEncoder,
{
    settings.validate()?;
    chart.validate()?;
    let viewport = surface.viewport();
    let delay = settings.frame_delay();
    debug!(
        samples = settings.frame_count() + 1,
        hold_frames = settings.hold_frames,
        "export frame generation started"
    );

    let mut last = None;
    for progress in settings.progress_samples() {
        let frame = build_chart_frame(chart, viewport, progress)?;
        surface.render(&frame)?;
        let snapshot = surface.snapshot_rgba()?;
        encoder.add_frame(snapshot.clone(), delay)?;
        last = Some(snapshot);
    }

    if let Some(final_frame) = last {
        for _ in 0..settings.hold_frames {
            encoder.add_frame(final_frame.clone(), settings.hold_delay())?;
        }
    }

    debug!("export frames submitted, waiting for encoder");
    let blob = encoder.finish()?.wait(on_progress)?;
    info!(bytes = blob.len(), "chart exported");
    Ok(blob)
}

/// Exports `chart` as an animated GIF on an internally created raster surface.
pub fn export_gif(
    chart: &Chart,
    viewport: Viewport,
    settings: ExportSettings,
    font: Option<Vec<u8>>,
    on_progress: impl FnMut(f64),
) -> ChartResult<EncodedBlob> {
    let mut surface = export_surface(chart, viewport, font)?;
    let encoder = GifFrameEncoder::new(GifEncoderSettings::new(viewport.width, viewport.height))?;
    export_animation(&mut surface, chart, settings, encoder, on_progress)
}

/// Raster surface used by [`export_gif`].
///
/// Without explicit font bytes the chart's font family is resolved against
/// the installed system fonts. When none is found labels are skipped.
pub fn export_surface(
    chart: &Chart,
    viewport: Viewport,
    font: Option<Vec<u8>>,
) -> ChartResult<RasterRenderer> {
    let mut surface = RasterRenderer::new(viewport.width, viewport.height)?;
    match font {
        Some(bytes) => surface = surface.with_font_bytes(bytes)?,
        None => {
            if !surface.load_system_font(&chart.style.font) {
                warn!(family = %chart.style.font, "no system font found, labels will be skipped");
            }
        }
    }
    Ok(surface)
}

/// Download name for an exported chart.
///
/// Every character that is not an ASCII letter or digit becomes `_`.
#[must_use]
pub fn export_filename(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect();
    format!("{stem}_chart.gif")
}

/// Destination for finished exports.
pub trait BlobSink {
    fn deliver(&mut self, blob: &EncodedBlob, filename: &str) -> ChartResult<()>;
}

/// Writes blobs into a directory, creating it when missing.
#[derive(Debug, Clone)]
pub struct FileBlobSink {
    directory: PathBuf,
    written: Vec<PathBuf>,
}

impl FileBlobSink {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            written: Vec::new(),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Paths written so far, in delivery order.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl BlobSink for FileBlobSink {
    fn deliver(&mut self, blob: &EncodedBlob, filename: &str) -> ChartResult<()> {
        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(filename);
        fs::write(&path, &blob.bytes)?;
        debug!(path = %path.display(), bytes = blob.len(), "blob delivered");
        self.written.push(path);
        Ok(())
    }
}
