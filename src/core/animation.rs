//! Progress math shared by every chart layout.
//!
//! All functions are pure. Progress values are fractions in `[0, 1]`.

use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Easing curves available to layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ease {
    Linear,
    #[default]
    OutCubic,
}

impl Ease {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t.clamp(0.0, 1.0),
            Self::OutCubic => ease_out_cubic(t),
        }
    }
}

/// Cubic ease-out: fast start, decelerating into `1.0`.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Maps global progress to one item's local progress.
///
/// `overlap` controls how much neighbouring items' reveal windows overlap:
/// `0.0` reveals items strictly one after another, `1.0` moves them together.
/// Item 0 starts at `global = 0` and every item reaches `1.0` at `global = 1`.
#[must_use]
pub fn staggered_progress(global: f64, index: usize, total_items: usize, overlap: f64) -> f64 {
    if total_items <= 1 {
        return global;
    }
    // The last item's window ends at exactly 1.0; skip the division so
    // rounding cannot leave it a hair short.
    if global >= 1.0 {
        return 1.0;
    }

    let stagger = 1.0 - overlap.clamp(0.0, 1.0);
    let item_duration = item_duration(total_items, overlap);
    let item_delay = index as f64 * item_duration * stagger;

    ((global - item_delay) / item_duration).clamp(0.0, 1.0)
}

/// Fraction of the global timeline one item's reveal occupies.
#[must_use]
pub fn item_duration(total_items: usize, overlap: f64) -> f64 {
    if total_items <= 1 {
        return 1.0;
    }
    let stagger = 1.0 - overlap.clamp(0.0, 1.0);
    1.0 / (1.0 + stagger * (total_items - 1) as f64)
}

/// Black or white, whichever reads better on top of `background`.
#[must_use]
pub fn contrast_color(background: Color) -> Color {
    let luminance = 0.299 * background.red + 0.587 * background.green + 0.114 * background.blue;
    if luminance > 0.5 {
        Color::rgb(0.0, 0.0, 0.0)
    } else {
        Color::rgb(1.0, 1.0, 1.0)
    }
}

/// Linear fade-in of `progress` over `[start, end]`.
#[must_use]
pub fn fade_in(progress: f64, start: f64, end: f64) -> f64 {
    ((progress - start) / (end - start)).clamp(0.0, 1.0)
}
