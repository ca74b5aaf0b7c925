use crate::core::{ease_out_cubic, staggered_progress};
use crate::render::{RectPrimitive, RenderFrame, TextBaseline, TextHAlign};

use super::{
    BAR_GAP, CHART_PADDING, LABEL_COLOR, LayoutInput, VALUE_LABEL_THRESHOLD, term_label_opacity,
    value_label_opacity,
};

const LABEL_STRIP_HEIGHT: f64 = 24.0;
const OVERLAP: f64 = 0.4;
const VALUE_FONT_PX: f64 = 14.0;
const LABEL_FONT_PX: f64 = 12.0;

/// Vertical bars growing up from a shared baseline.
///
/// Heights are proportional to `value / max(value)`. Value labels sit 20 px
/// above each bar top; term labels sit under the baseline.
pub(super) fn layout(input: &LayoutInput<'_>, frame: &mut RenderFrame) {
    let count = input.len();
    let chart_width = input.width - CHART_PADDING * 2.0;
    let chart_height = input.height - CHART_PADDING * 2.0 - LABEL_STRIP_HEIGHT;
    let bar_width = (chart_width - BAR_GAP * (count as f64 - 1.0)) / count as f64;
    let baseline_y = CHART_PADDING + chart_height;

    for (index, term) in input.chart.terms.iter().enumerate() {
        let local = staggered_progress(input.progress, index, count, OVERLAP);
        let eased = ease_out_cubic(local);

        let x = CHART_PADDING + index as f64 * (bar_width + BAR_GAP);
        let full_height = term.value / input.max_value * chart_height;
        let bar_height = full_height * eased;
        let y = baseline_y - bar_height;
        let center_x = x + bar_width / 2.0;

        if bar_width > 0.0 && bar_height > 0.0 {
            frame.push_rect(RectPrimitive::new(
                x,
                y,
                bar_width,
                bar_height,
                input.colors[index],
            ));
        }

        if local > VALUE_LABEL_THRESHOLD {
            let color = LABEL_COLOR.with_opacity(value_label_opacity(local));
            if let Some(text) = input.text(
                input.value_label(index),
                center_x,
                y - 20.0,
                VALUE_FONT_PX,
                color,
                TextHAlign::Center,
                TextBaseline::Top,
            ) {
                frame.push_text(text);
            }
        }

        if local > 0.0 {
            let color = LABEL_COLOR.with_opacity(term_label_opacity(local));
            if let Some(text) = input.text(
                term.label.as_str(),
                center_x,
                baseline_y + 8.0,
                LABEL_FONT_PX,
                color,
                TextHAlign::Center,
                TextBaseline::Top,
            ) {
                frame.push_text(text);
            }
        }
    }
}
