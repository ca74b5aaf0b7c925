use cairo::{Context, Format, ImageSurface};
use image::RgbaImage;
use pango::FontDescription;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ArcPrimitive, Color, FontWeight, RenderFrame, Renderer, SnapshotRenderer, TextBaseline,
    TextHAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub arcs_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback driving playback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`, which also
///   backs thumbnails and export snapshots
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::SurfaceUnavailable(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_surface_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let width = f64::from(frame.viewport.width);
        let height = f64::from(frame.viewport.height);

        apply_color(context, frame.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        if let Some(background) = frame.background {
            apply_color(context, background);
            context.rectangle(0.0, 0.0, width, height);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill background", err))?;
        }

        let mut stats = CairoRenderStats::default();

        for rect in &frame.rects {
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            apply_color(context, rect.fill_color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            stats.rects_drawn += 1;
        }

        for arc in &frame.arcs {
            append_arc_path(context, *arc);
            apply_color(context, arc.fill_color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill arc", err))?;
            stats.arcs_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let mut font_description = FontDescription::new();
            font_description.set_family(&text.font_family);
            font_description.set_weight(match text.font_weight {
                FontWeight::Normal => pango::Weight::Normal,
                FontWeight::Bold => pango::Weight::Bold,
            });
            font_description.set_absolute_size(text.font_size_px * f64::from(pango::SCALE));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };
            let y = match text.baseline {
                TextBaseline::Top => text.y,
                TextBaseline::Middle => text.y - f64::from(text_height) / 2.0,
                TextBaseline::Alphabetic => {
                    text.y - f64::from(layout.baseline()) / f64::from(pango::SCALE)
                }
            };

            apply_color(context, text.color);
            context.move_to(x, y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_surface_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

impl SnapshotRenderer for CairoRenderer {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.surface.width() as u32, self.surface.height() as u32)
    }

    fn snapshot_rgba(&mut self) -> ChartResult<RgbaImage> {
        self.surface.flush();
        let width = self.surface.width() as u32;
        let height = self.surface.height() as u32;
        let stride = self.surface.stride() as usize;
        let data = self
            .surface
            .data()
            .map_err(|err| ChartError::SurfaceUnavailable(format!("cairo surface data: {err}")))?;

        // ARGB32 is premultiplied and stored as a native-endian u32 per pixel.
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for row in data.chunks(stride).take(height as usize) {
            for px in row[..width as usize * 4].chunks_exact(4) {
                let argb = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
                let a = (argb >> 24) as u8;
                let unpremultiply = |channel: u32| {
                    if a == 0 {
                        0
                    } else {
                        ((channel & 0xff) * 255 / u32::from(a)).min(255) as u8
                    }
                };
                rgba.extend_from_slice(&[
                    unpremultiply(argb >> 16),
                    unpremultiply(argb >> 8),
                    unpremultiply(argb),
                    a,
                ]);
            }
        }
        drop(data);

        RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
            ChartError::SurfaceUnavailable("cairo snapshot buffer size mismatch".to_owned())
        })
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_arc_path(context: &Context, arc: ArcPrimitive) {
    context.new_path();
    if arc.inner_radius <= 0.0 {
        if !arc.is_full_turn() {
            context.move_to(arc.center_x, arc.center_y);
        }
        context.arc(
            arc.center_x,
            arc.center_y,
            arc.outer_radius,
            arc.start_angle,
            arc.end_angle(),
        );
        context.close_path();
        return;
    }

    context.arc(
        arc.center_x,
        arc.center_y,
        arc.outer_radius,
        arc.start_angle,
        arc.end_angle(),
    );
    if arc.is_full_turn() {
        context.close_path();
        context.new_sub_path();
    }
    context.arc_negative(
        arc.center_x,
        arc.center_y,
        arc.inner_radius,
        arc.end_angle(),
        arc.start_angle,
    );
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}

fn map_surface_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::SurfaceUnavailable(format!("{prefix}: {err}"))
}
