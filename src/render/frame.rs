use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{ArcPrimitive, Color, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one chart draw pass.
///
/// Backends clear the surface to `clear_color`, fill `background` when set,
/// then paint `rects`, `arcs` and `texts` in that order, each list in
/// insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub clear_color: Color,
    pub background: Option<Color>,
    pub rects: Vec<RectPrimitive>,
    pub arcs: Vec<ArcPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            background: None,
            rects: Vec::new(),
            arcs: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_arc(mut self, arc: ArcPrimitive) -> Self {
        self.arcs.push(arc);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.rects.push(rect);
    }

    pub fn push_arc(&mut self, arc: ArcPrimitive) {
        self.arcs.push(arc);
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        self.texts.push(text);
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        self.clear_color.validate()?;
        if let Some(background) = self.background {
            background.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for arc in &self.arcs {
            arc.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    /// `true` when the frame paints nothing beyond clear and background.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty() && self.arcs.is_empty() && self.texts.is_empty()
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.rects.len() + self.arcs.len() + self.texts.len()
    }
}
