use std::f64::consts::{FRAC_PI_2, TAU};

use crate::core::{contrast_color, ease_out_cubic, fade_in, format_value, staggered_progress};
use crate::render::{ArcPrimitive, RectPrimitive, RenderFrame, TextBaseline, TextHAlign};

use super::{
    DONUT_INNER_RATIO, LABEL_COLOR, LayoutInput, VALUE_LABEL_THRESHOLD, value_label_opacity,
};

const LEGEND_HEIGHT: f64 = 80.0;
const RADIUS_MARGIN: f64 = 20.0;
const OVERLAP: f64 = 0.6;
/// Slices narrower than this (radians) keep their percent label hidden.
const MIN_LABELED_SWEEP: f64 = 0.3;
/// Global progress after which the center caption and legend fade in.
const CAPTION_THRESHOLD: f64 = 0.5;
const SWATCH_SIZE: f64 = 12.0;

/// Annulus slices starting at 12 o'clock and running clockwise, with a
/// "Total" caption in the hole and a legend underneath.
pub(super) fn layout(input: &LayoutInput<'_>, frame: &mut RenderFrame) {
    let count = input.len();
    let chart_height = input.height - LEGEND_HEIGHT;
    let center_x = input.width / 2.0;
    let center_y = chart_height / 2.0;
    let outer_radius = center_x.min(center_y) - RADIUS_MARGIN;
    let inner_radius = outer_radius * DONUT_INNER_RATIO;

    let full_sweeps: Vec<f64> = input
        .chart
        .terms
        .iter()
        .map(|term| term.value / input.total * TAU)
        .collect();
    let start_angles: Vec<f64> = full_sweeps
        .iter()
        .scan(-FRAC_PI_2, |angle, sweep| {
            let start = *angle;
            *angle += sweep;
            Some(start)
        })
        .collect();

    for index in 0..count {
        let local = staggered_progress(input.progress, index, count, OVERLAP);
        let sweep = full_sweeps[index] * ease_out_cubic(local);
        let start = start_angles[index];

        if sweep > 0.0 && outer_radius > 0.0 {
            frame.push_arc(ArcPrimitive::annulus_sector(
                center_x,
                center_y,
                outer_radius,
                inner_radius,
                start,
                sweep,
                input.colors[index],
            ));
        }

        if sweep > MIN_LABELED_SWEEP && local > VALUE_LABEL_THRESHOLD {
            let mid_angle = start + sweep / 2.0;
            let label_radius = (outer_radius + inner_radius) / 2.0;
            let color =
                contrast_color(input.colors[index]).with_opacity(value_label_opacity(local));
            if let Some(text) = input.text(
                format!("{}%", input.percents[index]),
                center_x + mid_angle.cos() * label_radius,
                center_y + mid_angle.sin() * label_radius,
                12.0,
                color,
                TextHAlign::Center,
                TextBaseline::Middle,
            ) {
                frame.push_text(text.bold());
            }
        }
    }

    if input.progress > CAPTION_THRESHOLD {
        let color = LABEL_COLOR.with_opacity(fade_in(input.progress, CAPTION_THRESHOLD, 1.0));
        for (content, y, size) in [
            ("Total".to_owned(), center_y - 10.0, 16.0),
            (format_value(input.total), center_y + 14.0, 24.0),
        ] {
            if let Some(text) = input.text(
                content,
                center_x,
                y,
                size,
                color,
                TextHAlign::Center,
                TextBaseline::Middle,
            ) {
                frame.push_text(text.bold());
            }
        }
    }

    layout_legend(input, frame, chart_height);
}

/// Swatch, label and value per term, spread evenly across the width.
fn layout_legend(input: &LayoutInput<'_>, frame: &mut RenderFrame, top: f64) {
    if input.progress <= CAPTION_THRESHOLD {
        return;
    }

    let color = LABEL_COLOR.with_opacity(fade_in(input.progress, CAPTION_THRESHOLD, 1.0));
    let legend_y = top + 20.0;
    let item_width = input.width / input.len() as f64;

    for (index, term) in input.chart.terms.iter().enumerate() {
        let x = item_width * index as f64 + item_width / 2.0;

        frame.push_rect(RectPrimitive::new(
            x - 30.0,
            legend_y,
            SWATCH_SIZE,
            SWATCH_SIZE,
            input.colors[index],
        ));
        if let Some(text) = input.text(
            term.label.as_str(),
            x - 14.0,
            legend_y + 6.0,
            12.0,
            color,
            TextHAlign::Left,
            TextBaseline::Middle,
        ) {
            frame.push_text(text);
        }
        if let Some(text) = input.text(
            input.value_label(index),
            x - 14.0,
            legend_y + 22.0,
            10.0,
            color,
            TextHAlign::Left,
            TextBaseline::Middle,
        ) {
            frame.push_text(text);
        }
    }
}
