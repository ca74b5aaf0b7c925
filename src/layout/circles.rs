use crate::core::{contrast_color, ease_out_cubic, staggered_progress};
use crate::render::{ArcPrimitive, RenderFrame, TextBaseline, TextHAlign};

use super::{
    CHART_PADDING, LABEL_COLOR, LayoutInput, VALUE_LABEL_THRESHOLD, term_label_opacity,
    value_label_opacity,
};

const LABEL_STRIP_HEIGHT: f64 = 40.0;
const OVERLAP: f64 = 0.4;
/// Circles smaller than this keep their value label hidden.
const MIN_LABELED_RADIUS: f64 = 20.0;

/// One circle per term on a horizontal band, area proportional to value.
pub(super) fn layout(input: &LayoutInput<'_>, frame: &mut RenderFrame) {
    let count = input.len();
    let chart_width = input.width - CHART_PADDING * 2.0;
    let chart_height = input.height - CHART_PADDING * 2.0 - LABEL_STRIP_HEIGHT;

    let max_radius = (chart_height / 2.0).min(chart_width / (count as f64 * 2.0));
    let spacing = chart_width / count as f64;
    let center_y = CHART_PADDING + chart_height / 2.0;

    for (index, term) in input.chart.terms.iter().enumerate() {
        let local = staggered_progress(input.progress, index, count, OVERLAP);
        let eased = ease_out_cubic(local);

        let full_radius = max_radius * (term.value / input.max_value).sqrt();
        let radius = full_radius * eased;
        let center_x = CHART_PADDING + spacing * index as f64 + spacing / 2.0;

        if radius > 0.0 {
            frame.push_arc(ArcPrimitive::circle(
                center_x,
                center_y,
                radius,
                input.colors[index],
            ));
        }

        if radius > MIN_LABELED_RADIUS && local > VALUE_LABEL_THRESHOLD {
            let color =
                contrast_color(input.colors[index]).with_opacity(value_label_opacity(local));
            if let Some(text) = input.text(
                input.value_label(index),
                center_x,
                center_y,
                14.0,
                color,
                TextHAlign::Center,
                TextBaseline::Middle,
            ) {
                frame.push_text(text.bold());
            }
        }

        if local > 0.0 {
            let color = LABEL_COLOR.with_opacity(term_label_opacity(local));
            if let Some(text) = input.text(
                term.label.as_str(),
                center_x,
                CHART_PADDING + chart_height + 8.0,
                12.0,
                color,
                TextHAlign::Center,
                TextBaseline::Top,
            ) {
                frame.push_text(text);
            }
        }
    }
}
