use std::f64::consts::TAU;

use fontdb::{Database, Family, Query};
use fontdue::{Font, FontSettings};
use image::RgbaImage;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Rect, Transform};
use tracing::debug;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ArcPrimitive, Color, RectPrimitive, RenderFrame, Renderer, SnapshotRenderer, TextBaseline,
    TextHAlign, TextPrimitive,
};

/// Polyline segments used per full turn when flattening arcs.
const SEGMENTS_PER_TURN: f64 = 256.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RasterRenderStats {
    pub rects_drawn: usize,
    pub arcs_drawn: usize,
    pub texts_drawn: usize,
    /// Labels dropped because no font was loaded.
    pub texts_skipped: usize,
}

/// Software renderer painting into an owned RGBA pixmap.
///
/// Shapes are rasterized with `tiny-skia`. Text needs a font: load one with
/// [`RasterRenderer::with_font_bytes`] or [`RasterRenderer::load_system_font`],
/// otherwise labels are counted in `texts_skipped` and not painted. A single
/// face is used for every family and weight.
pub struct RasterRenderer {
    pixmap: Pixmap,
    font: Option<Font>,
    last_stats: RasterRenderStats,
}

impl std::fmt::Debug for RasterRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterRenderer")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("has_font", &self.font.is_some())
            .field("last_stats", &self.last_stats)
            .finish()
    }
}

impl RasterRenderer {
    pub fn new(width: u32, height: u32) -> ChartResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            ChartError::SurfaceUnavailable(format!(
                "cannot allocate a {width}x{height} raster surface"
            ))
        })?;
        Ok(Self {
            pixmap,
            font: None,
            last_stats: RasterRenderStats::default(),
        })
    }

    pub fn with_font_bytes(mut self, bytes: Vec<u8>) -> ChartResult<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|err| ChartError::InvalidData(format!("failed to load font: {err}")))?;
        self.font = Some(font);
        Ok(self)
    }

    /// Loads the installed face best matching a CSS font-family list such as
    /// `"Arial"` or `"'Helvetica Neue', serif"`, falling back to sans-serif.
    ///
    /// Returns `false` when no usable system font exists.
    pub fn load_system_font(&mut self, family: &str) -> bool {
        let Some((bytes, index)) = system_font_data(family) else {
            return false;
        };
        let settings = FontSettings {
            collection_index: index,
            ..FontSettings::default()
        };
        match Font::from_bytes(bytes, settings) {
            Ok(font) => {
                self.font = Some(font);
                true
            }
            Err(err) => {
                debug!(family, error = err, "system font rejected by rasterizer");
                false
            }
        }
    }

    #[must_use]
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "tiny-skia+fontdue"
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    #[must_use]
    pub fn last_stats(&self) -> RasterRenderStats {
        self.last_stats
    }

    /// Straight-alpha RGBA of one pixel, `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return None;
        }
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some([pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()])
    }

    fn fill_surface(&mut self, color: Color) {
        let [r, g, b, a] = color.to_rgba8();
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    fn paint_background(&mut self, color: Color) {
        let rect = RectPrimitive::new(
            0.0,
            0.0,
            f64::from(self.pixmap.width()),
            f64::from(self.pixmap.height()),
            color,
        );
        self.fill_rect(rect);
    }

    fn fill_rect(&mut self, rect: RectPrimitive) -> bool {
        let Some(bounds) = Rect::from_xywh(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        ) else {
            return false;
        };
        let paint = solid_paint(rect.fill_color);
        self.pixmap
            .fill_rect(bounds, &paint, Transform::identity(), None);
        true
    }

    fn fill_arc(&mut self, arc: ArcPrimitive) -> bool {
        let paint = solid_paint(arc.fill_color);
        let (path, rule) = if arc.inner_radius <= 0.0 && arc.is_full_turn() {
            (
                PathBuilder::from_circle(
                    arc.center_x as f32,
                    arc.center_y as f32,
                    arc.outer_radius as f32,
                ),
                FillRule::Winding,
            )
        } else {
            (arc_path(arc), FillRule::EvenOdd)
        };
        let Some(path) = path else {
            return false;
        };
        self.pixmap
            .fill_path(&path, &paint, rule, Transform::identity(), None);
        true
    }

    fn fill_text(&mut self, text: &TextPrimitive) -> bool {
        let Some(font) = self.font.as_ref() else {
            return false;
        };
        let size = text.font_size_px as f32;
        let glyphs: Vec<_> = text
            .text
            .chars()
            .map(|ch| font.rasterize(ch, size))
            .collect();
        let text_width: f32 = glyphs.iter().map(|(metrics, _)| metrics.advance_width).sum();
        let (ascent, descent) = font
            .horizontal_line_metrics(size)
            .map_or((size * 0.8, -size * 0.2), |line| (line.ascent, line.descent));

        let mut pen_x = match text.h_align {
            TextHAlign::Left => text.x as f32,
            TextHAlign::Center => text.x as f32 - text_width / 2.0,
            TextHAlign::Right => text.x as f32 - text_width,
        };
        let baseline_y = match text.baseline {
            TextBaseline::Top => text.y as f32 + ascent,
            TextBaseline::Middle => text.y as f32 + (ascent + descent) / 2.0,
            TextBaseline::Alphabetic => text.y as f32,
        };

        let [r, g, b, a] = text.color.to_rgba8();
        for (metrics, coverage) in &glyphs {
            let left = (pen_x + metrics.xmin as f32).round() as i64;
            let top = (baseline_y - (metrics.height as i32 + metrics.ymin) as f32).round() as i64;
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let cov = coverage[row * metrics.width + col];
                    if cov == 0 {
                        continue;
                    }
                    blend_pixel(
                        &mut self.pixmap,
                        left + col as i64,
                        top + row as i64,
                        [r, g, b],
                        f32::from(a) / 255.0 * f32::from(cov) / 255.0,
                    );
                }
            }
            pen_x += metrics.advance_width;
        }
        true
    }
}

impl Renderer for RasterRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        if frame.viewport.width != self.pixmap.width()
            || frame.viewport.height != self.pixmap.height()
        {
            return Err(ChartError::InvalidData(format!(
                "frame viewport {}x{} does not match raster surface {}x{}",
                frame.viewport.width,
                frame.viewport.height,
                self.pixmap.width(),
                self.pixmap.height()
            )));
        }

        self.fill_surface(frame.clear_color);
        if let Some(background) = frame.background {
            self.paint_background(background);
        }

        let mut stats = RasterRenderStats::default();
        for rect in &frame.rects {
            if self.fill_rect(*rect) {
                stats.rects_drawn += 1;
            }
        }
        for arc in &frame.arcs {
            if self.fill_arc(*arc) {
                stats.arcs_drawn += 1;
            }
        }
        for text in &frame.texts {
            if self.fill_text(text) {
                stats.texts_drawn += 1;
            } else {
                stats.texts_skipped += 1;
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl SnapshotRenderer for RasterRenderer {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.pixmap.width(), self.pixmap.height())
    }

    fn snapshot_rgba(&mut self) -> ChartResult<RgbaImage> {
        let mut data = Vec::with_capacity(self.pixmap.data().len());
        for pixel in self.pixmap.pixels() {
            let straight = pixel.demultiply();
            data.extend_from_slice(&[
                straight.red(),
                straight.green(),
                straight.blue(),
                straight.alpha(),
            ]);
        }
        RgbaImage::from_raw(self.pixmap.width(), self.pixmap.height(), data).ok_or_else(|| {
            ChartError::SurfaceUnavailable("raster snapshot buffer size mismatch".to_owned())
        })
    }
}

fn system_font_data(family: &str) -> Option<(Vec<u8>, u32)> {
    let mut families: Vec<Family<'_>> = family
        .split(',')
        .map(|name| name.trim().trim_matches(|ch: char| ch == '"' || ch == '\''))
        .filter(|name| !name.is_empty())
        .map(|name| match name.to_ascii_lowercase().as_str() {
            "sans-serif" => Family::SansSerif,
            "serif" => Family::Serif,
            "monospace" => Family::Monospace,
            "cursive" => Family::Cursive,
            "fantasy" => Family::Fantasy,
            _ => Family::Name(name),
        })
        .collect();
    families.push(Family::SansSerif);

    let mut db = Database::new();
    db.load_system_fonts();
    let id = db.query(&Query {
        families: &families,
        ..Query::default()
    });
    // No family matched: take any installed face.
    let id = id.or_else(|| db.faces().next().map(|face| face.id))?;
    let data = db.with_face_data(id, |data, index| (data.to_vec(), index));
    if let Some(face) = db.face(id) {
        debug!(requested = family, resolved = %face.post_script_name, "system font resolved");
    }
    data
}

fn solid_paint(color: Color) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn arc_path(arc: ArcPrimitive) -> Option<tiny_skia::Path> {
    let segments = ((arc.sweep / TAU) * SEGMENTS_PER_TURN).ceil().max(4.0) as usize;
    let point = |radius: f64, angle: f64| {
        (
            (arc.center_x + radius * angle.cos()) as f32,
            (arc.center_y + radius * angle.sin()) as f32,
        )
    };

    let mut builder = PathBuilder::new();
    for step in 0..=segments {
        let angle = arc.start_angle + arc.sweep * step as f64 / segments as f64;
        let (x, y) = point(arc.outer_radius, angle);
        if step == 0 {
            builder.move_to(x, y);
        } else {
            builder.line_to(x, y);
        }
    }

    if arc.inner_radius > 0.0 {
        if arc.is_full_turn() {
            // Closed outer ring plus a separate inner ring; even-odd leaves the hole.
            builder.close();
            for step in 0..=segments {
                let angle = arc.start_angle - arc.sweep * step as f64 / segments as f64;
                let (x, y) = point(arc.inner_radius, angle);
                if step == 0 {
                    builder.move_to(x, y);
                } else {
                    builder.line_to(x, y);
                }
            }
        } else {
            for step in (0..=segments).rev() {
                let angle = arc.start_angle + arc.sweep * step as f64 / segments as f64;
                let (x, y) = point(arc.inner_radius, angle);
                builder.line_to(x, y);
            }
        }
    } else {
        let (cx, cy) = (arc.center_x as f32, arc.center_y as f32);
        builder.line_to(cx, cy);
    }
    builder.close();
    builder.finish()
}

fn blend_pixel(pixmap: &mut Pixmap, x: i64, y: i64, rgb: [u8; 3], alpha: f32) {
    let (width, height) = (i64::from(pixmap.width()), i64::from(pixmap.height()));
    if x < 0 || y < 0 || x >= width || y >= height || alpha <= 0.0 {
        return;
    }
    let index = (y * width + x) as usize;
    let pixels = pixmap.pixels_mut();
    let dst = pixels[index];
    let keep = 1.0 - alpha;
    let mix = |src: u8, dst: u8| (f32::from(src) * alpha + f32::from(dst) * keep).round();
    let out_a = (alpha * 255.0 + f32::from(dst.alpha()) * keep).round().min(255.0) as u8;
    let clamp = |value: f32| value.min(f32::from(out_a)) as u8;
    if let Some(color) = PremultipliedColorU8::from_rgba(
        clamp(mix(rgb[0], dst.red())),
        clamp(mix(rgb[1], dst.green())),
        clamp(mix(rgb[2], dst.blue())),
        out_a,
    ) {
        pixels[index] = color;
    }
}
