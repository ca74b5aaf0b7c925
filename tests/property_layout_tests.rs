use chart_motion::core::{Chart, ChartTerm, ChartType, Viewport};
use chart_motion::layout::build_chart_frame;
use proptest::prelude::*;

fn chart_type() -> impl Strategy<Value = ChartType> {
    prop_oneof![
        Just(ChartType::Bars),
        Just(ChartType::Circles),
        Just(ChartType::Rectangles),
        Just(ChartType::Donut),
        Just(ChartType::Unknown),
    ]
}

proptest! {
    #[test]
    fn chart_frames_are_deterministic_and_valid(
        chart_type in chart_type(),
        values in prop::collection::vec(0.0f64..1_000.0f64, 0..12),
        progress in 0.0f64..=1.0,
        width in 40u32..1200,
        height in 40u32..900,
    ) {
        let terms = values
            .iter()
            .enumerate()
            .map(|(index, value)| ChartTerm::new(format!("T{index}"), *value, "#4bc0c0"))
            .collect();
        let chart = Chart::new("prop", chart_type, "Prop").with_terms(terms);
        let viewport = Viewport::new(width, height);

        let first = build_chart_frame(&chart, viewport, progress).expect("first frame");
        let second = build_chart_frame(&chart, viewport, progress).expect("second frame");

        prop_assert_eq!(&first, &second);
        prop_assert!(first.validate().is_ok());
        prop_assert!(first.rects.iter().all(|rect| rect.x.is_finite() && rect.height >= 0.0));
        prop_assert!(first.arcs.iter().all(|arc| arc.sweep <= std::f64::consts::TAU + 1e-9));
    }

    #[test]
    fn completed_frames_show_every_positive_term(
        chart_type in chart_type(),
        values in prop::collection::vec(1.0f64..1_000.0f64, 1..8),
    ) {
        let terms = values
            .iter()
            .map(|value| ChartTerm::new("t", *value, "#ff6384"))
            .collect();
        let chart = Chart::new("prop", chart_type, "Prop").with_terms(terms);
        let frame = build_chart_frame(&chart, Viewport::default_canvas(), 1.0).expect("frame");

        let shapes = match chart_type {
            ChartType::Circles | ChartType::Donut => frame.arcs.len(),
            _ => frame.rects.len(),
        };
        prop_assert_eq!(shapes, values.len());
    }
}
