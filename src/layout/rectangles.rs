use crate::core::{contrast_color, ease_out_cubic, staggered_progress};
use crate::render::{RectPrimitive, RenderFrame, TextBaseline, TextHAlign};

use super::{CHART_PADDING, LayoutInput, VALUE_LABEL_THRESHOLD, value_label_opacity};

const SEGMENT_GAP: f64 = 2.0;
const OVERLAP: f64 = 0.5;
/// Segments narrower than this keep their label hidden.
const MIN_LABELED_WIDTH: f64 = 30.0;

/// A single strip split into segments proportional to each term's share.
///
/// Left edges come from the fully revealed proportions, so a segment only
/// grows to the right and never moves.
pub(super) fn layout(input: &LayoutInput<'_>, frame: &mut RenderFrame) {
    let count = input.len();
    let chart_width = input.width - CHART_PADDING * 2.0;
    let chart_height = input.height - CHART_PADDING * 2.0;
    let available_width = chart_width - SEGMENT_GAP * (count as f64 - 1.0);

    let full_widths: Vec<f64> = input
        .chart
        .terms
        .iter()
        .map(|term| available_width * (term.value / input.total))
        .collect();
    let lefts: Vec<f64> = full_widths
        .iter()
        .scan(CHART_PADDING, |x, width| {
            let left = *x;
            *x += width + SEGMENT_GAP;
            Some(left)
        })
        .collect();

    let y = CHART_PADDING;
    for index in 0..count {
        let local = staggered_progress(input.progress, index, count, OVERLAP);
        let width = full_widths[index] * ease_out_cubic(local);
        let x = lefts[index];

        if width > 0.0 && chart_height > 0.0 {
            frame.push_rect(RectPrimitive::new(
                x,
                y,
                width,
                chart_height,
                input.colors[index],
            ));
        }

        if width > MIN_LABELED_WIDTH && local > VALUE_LABEL_THRESHOLD {
            let color =
                contrast_color(input.colors[index]).with_opacity(value_label_opacity(local));
            let center_x = x + width / 2.0;
            let center_y = y + chart_height / 2.0;

            if let Some(text) = input.text(
                input.chart.terms[index].label.as_str(),
                center_x,
                center_y - 12.0,
                14.0,
                color,
                TextHAlign::Center,
                TextBaseline::Middle,
            ) {
                frame.push_text(text.bold());
            }
            if let Some(text) = input.text(
                input.value_label(index),
                center_x,
                center_y + 12.0,
                12.0,
                color,
                TextHAlign::Center,
                TextBaseline::Middle,
            ) {
                frame.push_text(text);
            }
        }
    }
}
