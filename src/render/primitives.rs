use std::f64::consts::TAU;

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            f64::from(alpha) / 255.0,
        )
    }

    /// Same color with `alpha` multiplied in, as used by fading labels.
    #[must_use]
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            alpha: self.alpha * opacity.clamp(0.0, 1.0),
            ..self
        }
    }

    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            channel(self.red),
            channel(self.green),
            channel(self.blue),
            channel(self.alpha),
        ]
    }

    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.alpha <= 0.0
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Solid axis-aligned rectangle fill in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(ChartError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect width/height must be >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Filled circular sector between two radii.
///
/// Angles are radians, measured clockwise from 3 o'clock in a y-down pixel
/// space. `inner_radius == 0` with a full `sweep` is a disc; a positive inner
/// radius makes an annulus segment (donut slice).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPrimitive {
    pub center_x: f64,
    pub center_y: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub start_angle: f64,
    pub sweep: f64,
    pub fill_color: Color,
}

impl ArcPrimitive {
    #[must_use]
    pub const fn circle(center_x: f64, center_y: f64, radius: f64, fill_color: Color) -> Self {
        Self {
            center_x,
            center_y,
            outer_radius: radius,
            inner_radius: 0.0,
            start_angle: 0.0,
            sweep: TAU,
            fill_color,
        }
    }

    #[must_use]
    pub const fn annulus_sector(
        center_x: f64,
        center_y: f64,
        outer_radius: f64,
        inner_radius: f64,
        start_angle: f64,
        sweep: f64,
        fill_color: Color,
    ) -> Self {
        Self {
            center_x,
            center_y,
            outer_radius,
            inner_radius,
            start_angle,
            sweep,
            fill_color,
        }
    }

    #[must_use]
    pub fn end_angle(self) -> f64 {
        self.start_angle + self.sweep
    }

    #[must_use]
    pub fn is_full_turn(self) -> bool {
        self.sweep >= TAU
    }

    pub fn validate(self) -> ChartResult<()> {
        for value in [
            self.center_x,
            self.center_y,
            self.outer_radius,
            self.inner_radius,
            self.start_angle,
            self.sweep,
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(
                    "arc geometry must be finite".to_owned(),
                ));
            }
        }
        if self.outer_radius <= 0.0 || self.inner_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "arc radii must satisfy outer > 0 and inner >= 0".to_owned(),
            ));
        }
        if self.inner_radius >= self.outer_radius {
            return Err(ChartError::InvalidData(
                "arc inner radius must be smaller than outer radius".to_owned(),
            ));
        }
        if self.sweep <= 0.0 || self.sweep > TAU + 1e-9 {
            return Err(ChartError::InvalidData(
                "arc sweep must be in (0, 2*pi]".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor of `TextPrimitive::y` within the text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Alphabetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_family: String,
    pub font_size_px: f64,
    pub font_weight: FontWeight,
    pub color: Color,
    pub h_align: TextHAlign,
    pub baseline: TextBaseline,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_family: "Arial".to_owned(),
            font_size_px,
            font_weight: FontWeight::Normal,
            color,
            h_align,
            baseline: TextBaseline::Alphabetic,
        }
    }

    #[must_use]
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    #[must_use]
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.font_weight = FontWeight::Bold;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
