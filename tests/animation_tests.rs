use approx::assert_relative_eq;
use chart_motion::core::{
    Ease, contrast_color, ease_out_cubic, fade_in, item_duration, staggered_progress,
};
use chart_motion::render::Color;

#[test]
fn ease_out_cubic_hits_endpoints_and_clamps() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    assert_eq!(ease_out_cubic(-0.5), 0.0);
    assert_eq!(ease_out_cubic(1.5), 1.0);
    assert_relative_eq!(ease_out_cubic(0.5), 0.875);
    assert_eq!(Ease::default(), Ease::OutCubic);
}

#[test]
fn single_item_follows_global_progress() {
    for global in [0.0, 0.25, 0.6, 1.0] {
        assert_eq!(staggered_progress(global, 0, 1, 0.4), global);
    }
}

#[test]
fn every_item_starts_and_finishes_with_the_timeline() {
    for overlap in [0.0, 0.4, 0.5, 0.6, 1.0] {
        assert_eq!(staggered_progress(0.0, 0, 5, overlap), 0.0);
        for index in 0..5 {
            assert_eq!(staggered_progress(1.0, index, 5, overlap), 1.0);
        }
    }
}

#[test]
fn zero_overlap_reveals_items_back_to_back() {
    let count = 4;
    assert_relative_eq!(item_duration(count, 0.0), 0.25);
    for index in 0..count {
        let start = index as f64 / count as f64;
        let end = (index + 1) as f64 / count as f64;
        assert_eq!(staggered_progress(start, index, count, 0.0), 0.0);
        assert_relative_eq!(
            staggered_progress(end, index, count, 0.0),
            1.0,
            max_relative = 1e-12
        );
        if index + 1 < count {
            assert_eq!(staggered_progress(end, index + 1, count, 0.0), 0.0);
        }
    }
}

#[test]
fn full_overlap_moves_items_together() {
    assert_relative_eq!(staggered_progress(0.3, 0, 3, 1.0), 0.3);
    assert_relative_eq!(staggered_progress(0.3, 2, 3, 1.0), 0.3);
}

#[test]
fn contrast_color_picks_black_on_light_fills() {
    assert_eq!(contrast_color(Color::rgb(1.0, 1.0, 0.0)), Color::rgb(0.0, 0.0, 0.0));
    assert_eq!(contrast_color(Color::rgb(0.0, 0.0, 1.0)), Color::rgb(1.0, 1.0, 1.0));
    assert_eq!(
        contrast_color(Color::from_rgba8(54, 162, 235, 255)),
        Color::rgb(0.0, 0.0, 0.0)
    );
}

#[test]
fn fade_in_is_linear_between_bounds() {
    assert_eq!(fade_in(0.5, 0.5, 1.0), 0.0);
    assert_relative_eq!(fade_in(0.75, 0.5, 1.0), 0.5);
    assert_eq!(fade_in(1.0, 0.5, 1.0), 1.0);
}
