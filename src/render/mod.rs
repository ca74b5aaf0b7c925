mod frame;
mod null_renderer;
mod primitives;
mod raster;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    ArcPrimitive, Color, FontWeight, RectPrimitive, TextBaseline, TextHAlign, TextPrimitive,
};
pub use raster::{RasterRenderStats, RasterRenderer};

use image::RgbaImage;

use crate::core::Viewport;
use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart layout and animation logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

/// Renderer that owns pixels and can hand out copies of them.
///
/// Used by the static thumbnail path and the export pipeline. Snapshots are
/// owned, straight-alpha RGBA images detached from the surface.
pub trait SnapshotRenderer: Renderer {
    /// Size of the owned surface; frames must be built for this viewport.
    fn viewport(&self) -> Viewport;

    fn snapshot_rgba(&mut self) -> ChartResult<RgbaImage>;

    fn snapshot_png(&mut self) -> ChartResult<Vec<u8>> {
        let image = self.snapshot_rgba()?;
        encode_png(&image)
    }
}

/// Encodes an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> ChartResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|err| crate::error::ChartError::Encode(format!("png snapshot: {err}")))?;
    Ok(bytes)
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
