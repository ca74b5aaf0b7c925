use serde::{Deserialize, Serialize};

/// Canvas width used by the editor preview and the GIF export.
pub const DEFAULT_CANVAS_WIDTH: u32 = 600;
/// Canvas height used by the editor preview and the GIF export.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The 600x400 canvas the charts are designed around.
    #[must_use]
    pub fn default_canvas() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::default_canvas()
    }
}
