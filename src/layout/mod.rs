//! Progress-driven layout for the four chart shapes.
//!
//! Every algorithm turns `(chart, viewport, progress)` into primitives on a
//! [`RenderFrame`]. Layouts never paint directly; any [`crate::render::Renderer`]
//! can consume the result.

mod bars;
mod circles;
mod donut;
mod rectangles;

use tracing::trace;

use crate::core::{
    Chart, ChartType, Viewport, calculate_percents, display_value, terms_total,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RenderFrame, TextBaseline, TextHAlign, TextPrimitive};

/// Outer padding around bars, circles and rectangles.
pub const CHART_PADDING: f64 = 40.0;
/// Horizontal gap between neighbouring bars.
pub const BAR_GAP: f64 = 20.0;
/// Inner radius of the donut as a fraction of its outer radius.
pub const DONUT_INNER_RATIO: f64 = 0.55;

/// Local progress after which value labels start fading in.
pub(crate) const VALUE_LABEL_THRESHOLD: f64 = 0.7;
/// Dark gray used for labels drawn on the chart background.
pub(crate) const LABEL_COLOR: Color = Color::rgb(0.2, 0.2, 0.2);

/// Inputs shared by every layout, resolved once per frame.
pub(crate) struct LayoutInput<'a> {
    pub chart: &'a Chart,
    pub width: f64,
    pub height: f64,
    pub progress: f64,
    pub colors: Vec<Color>,
    pub percents: Vec<u32>,
    pub total: f64,
    pub max_value: f64,
}

impl LayoutInput<'_> {
    pub fn len(&self) -> usize {
        self.chart.terms.len()
    }

    /// Value or percent label for term `index`, per the chart's value type.
    pub fn value_label(&self, index: usize) -> String {
        display_value(
            self.chart.value_type,
            self.chart.terms[index].value,
            self.percents[index],
        )
    }

    /// Text primitive in the chart's font family. `None` for empty strings.
    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &self,
        content: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
        baseline: TextBaseline,
    ) -> Option<TextPrimitive> {
        let content = content.into();
        if content.is_empty() {
            return None;
        }
        Some(
            TextPrimitive::new(content, x, y, font_size_px, color, h_align)
                .with_baseline(baseline)
                .with_font_family(self.chart.style.font.clone()),
        )
    }
}

/// Opacity of a value label for the given local progress.
pub(crate) fn value_label_opacity(local: f64) -> f64 {
    (local - VALUE_LABEL_THRESHOLD) / (1.0 - VALUE_LABEL_THRESHOLD)
}

/// Opacity of a term label fading in over the first half of local progress.
pub(crate) fn term_label_opacity(local: f64) -> f64 {
    (local * 2.0).min(1.0)
}

/// Builds the frame for `chart` at `progress` on a `viewport`-sized surface.
///
/// The frame always carries the white clear color and, unless the chart
/// background is `transparent`, the background fill. Charts without terms or
/// whose values sum to zero produce no chart primitives. Unknown chart types
/// are laid out as bars.
pub fn build_chart_frame(
    chart: &Chart,
    viewport: Viewport,
    progress: f64,
) -> ChartResult<RenderFrame> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    if !progress.is_finite() {
        return Err(ChartError::InvalidData(
            "animation progress must be finite".to_owned(),
        ));
    }
    chart.validate()?;

    let background = if chart.style.background_color.is_transparent() {
        None
    } else {
        Some(chart.style.background_color.to_color()?)
    };
    let mut frame = RenderFrame::new(viewport).with_background(background);

    let total = terms_total(&chart.terms);
    if chart.terms.is_empty() || total <= 0.0 {
        return Ok(frame);
    }

    let colors = chart
        .terms
        .iter()
        .map(|term| term.color.to_color())
        .collect::<ChartResult<Vec<_>>>()?;
    let max_value = chart
        .terms
        .iter()
        .map(|term| term.value)
        .fold(0.0_f64, f64::max);

    let input = LayoutInput {
        chart,
        width: viewport.width_px(),
        height: viewport.height_px(),
        progress: progress.clamp(0.0, 1.0),
        colors,
        percents: calculate_percents(&chart.terms),
        total,
        max_value,
    };

    match chart.chart_type {
        ChartType::Bars | ChartType::Unknown => bars::layout(&input, &mut frame),
        ChartType::Circles => circles::layout(&input, &mut frame),
        ChartType::Rectangles => rectangles::layout(&input, &mut frame),
        ChartType::Donut => donut::layout(&input, &mut frame),
    }

    trace!(
        chart_type = ?chart.chart_type,
        progress = input.progress,
        rects = frame.rects.len(),
        arcs = frame.arcs.len(),
        texts = frame.texts.len(),
        "chart frame built"
    );
    Ok(frame)
}
