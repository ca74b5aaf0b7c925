#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use chart_motion::ChartError;
use chart_motion::api::StaticRenderer;
use chart_motion::core::{Chart, ChartTerm, ChartType, Viewport};
use chart_motion::layout::build_chart_frame;
use chart_motion::render::{
    CairoContextRenderer, CairoRenderer, Renderer, SnapshotRenderer,
};

fn donut() -> Chart {
    Chart::new("cairo", ChartType::Donut, "Cairo").with_terms(vec![
        ChartTerm::new("X", 1.0, "#36a2eb"),
        ChartTerm::new("Y", 3.0, "#ff6384"),
    ])
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::SurfaceUnavailable(_)));
}

#[test]
fn cairo_renderer_draws_arcs_rects_and_labels() {
    let mut renderer = CairoRenderer::new(600, 400).expect("renderer");
    let frame = build_chart_frame(&donut(), renderer.viewport(), 1.0).expect("frame");
    renderer.render(&frame).expect("render");

    let stats = renderer.last_stats();
    assert_eq!(stats.arcs_drawn, 2);
    assert_eq!(stats.rects_drawn, 2);
    assert_eq!(stats.texts_drawn, 8);
}

#[test]
fn cairo_snapshot_matches_bar_color() {
    let chart = Chart::new("cairo", ChartType::Bars, "Bar")
        .with_terms(vec![ChartTerm::new("Only", 1.0, "#ff0000")]);
    let mut renderer = CairoRenderer::new(600, 400).expect("renderer");
    let frame = build_chart_frame(&chart, Viewport::new(600, 400), 1.0).expect("frame");
    renderer.render(&frame).expect("render");

    let rgba = renderer.snapshot_rgba().expect("snapshot");
    assert_eq!(rgba.get_pixel(300, 200).0, [255, 0, 0, 255]);
    assert_eq!(rgba.get_pixel(5, 5).0, [255, 255, 255, 255]);
}

#[test]
fn cairo_renderer_backs_static_thumbnails() {
    let mut thumbnails = StaticRenderer::new(CairoRenderer::new(300, 200).expect("renderer"));
    let png = thumbnails.render(&donut()).expect("png");
    assert_eq!(&png[1..4], b"PNG");
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let mut renderer = CairoRenderer::new(600, 320).expect("renderer");
    let frame = build_chart_frame(&donut(), Viewport::new(600, 320), 0.8).expect("frame");

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on context");

    assert_eq!(renderer.last_stats().arcs_drawn, frame.arcs.len());
}
