use tracing::debug;

use crate::core::{Chart, ChartContent};
use crate::error::ChartResult;
use crate::layout::build_chart_frame;
use crate::render::SnapshotRenderer;

/// Receives freshly rendered thumbnails as PNG bytes.
pub trait ThumbnailSink {
    fn thumbnail_rendered(&mut self, png: &[u8]);
}

impl<F: FnMut(&[u8])> ThumbnailSink for F {
    fn thumbnail_rendered(&mut self, png: &[u8]) {
        self(png);
    }
}

/// Draws the final (progress 1) state of a chart and snapshots it.
///
/// `refresh` only re-renders when the visible content changed since the last
/// successful render.
#[derive(Debug)]
pub struct StaticRenderer<R: SnapshotRenderer> {
    surface: R,
    last_content: Option<ChartContent>,
}

impl<R: SnapshotRenderer> StaticRenderer<R> {
    #[must_use]
    pub fn new(surface: R) -> Self {
        Self {
            surface,
            last_content: None,
        }
    }

    /// Renders `chart` at progress 1 and returns PNG bytes.
    pub fn render(&mut self, chart: &Chart) -> ChartResult<Vec<u8>> {
        let frame = build_chart_frame(chart, self.surface.viewport(), 1.0)?;
        self.surface.render(&frame)?;
        let png = self.surface.snapshot_png()?;
        self.last_content = Some(chart.content());
        debug!(chart_id = %chart.id, bytes = png.len(), "static chart rendered");
        Ok(png)
    }

    /// Renders and reports to `sink` if the content key changed.
    ///
    /// Returns `true` when a thumbnail was produced.
    pub fn refresh(
        &mut self,
        chart: &Chart,
        sink: &mut impl ThumbnailSink,
    ) -> ChartResult<bool> {
        if self
            .last_content
            .as_ref()
            .is_some_and(|content| *content == chart.content())
        {
            return Ok(false);
        }
        let png = self.render(chart)?;
        sink.thumbnail_rendered(&png);
        Ok(true)
    }

    /// Forces the next `refresh` to render.
    pub fn invalidate(&mut self) {
        self.last_content = None;
    }

    #[must_use]
    pub fn surface(&self) -> &R {
        &self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> R {
        self.surface
    }
}
