use chart_motion::ChartError;
use chart_motion::core::{Chart, ChartStyle, ChartTerm, ChartType, ColorToken, Viewport};
use chart_motion::layout::build_chart_frame;
use chart_motion::render::{
    ArcPrimitive, Color, RasterRenderer, RectPrimitive, RenderFrame, Renderer, SnapshotRenderer,
    TextHAlign, TextPrimitive,
};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn single_bar(background: &str) -> Chart {
    Chart::new("raster", ChartType::Bars, "Raster")
        .with_terms(vec![ChartTerm::new("Only", 10.0, "#ff0000")])
        .with_style(ChartStyle {
            background_color: ColorToken::new(background),
            ..ChartStyle::default()
        })
}

#[test]
fn raster_renderer_rejects_empty_surface() {
    let err = RasterRenderer::new(0, 400).expect_err("zero width must fail");
    assert!(matches!(err, ChartError::SurfaceUnavailable(_)));
}

#[test]
fn bar_pixels_carry_the_term_color() {
    let mut renderer = RasterRenderer::new(600, 400).expect("renderer");
    let chart = single_bar("transparent");
    let frame = build_chart_frame(&chart, renderer.viewport(), 1.0).expect("frame");
    renderer.render(&frame).expect("render");

    assert_eq!(renderer.pixel(300, 200), Some([255, 0, 0, 255]));
    assert_eq!(renderer.pixel(5, 5), Some([255, 255, 255, 255]));
    assert_eq!(renderer.pixel(600, 0), None);

    let stats = renderer.last_stats();
    assert_eq!(stats.rects_drawn, 1);
    assert_eq!(stats.texts_drawn, 0);
    assert_eq!(stats.texts_skipped, 2);
}

#[test]
fn pixel_lookup_outside_the_surface_does_not_wrap() {
    let mut renderer = RasterRenderer::new(4, 3).expect("renderer");
    let frame = RenderFrame::new(Viewport::new(4, 3));
    renderer.render(&frame).expect("render");

    assert!(renderer.pixel(3, 2).is_some());
    assert_eq!(renderer.pixel(4, 0), None);
    assert_eq!(renderer.pixel(5, 1), None);
    assert_eq!(renderer.pixel(0, 3), None);
}

#[test]
fn chart_background_covers_the_clear_color() {
    let mut renderer = RasterRenderer::new(600, 400).expect("renderer");
    let chart = single_bar("#00ff00");
    let frame = build_chart_frame(&chart, renderer.viewport(), 0.0).expect("frame");
    renderer.render(&frame).expect("render");

    assert_eq!(renderer.pixel(5, 5), Some([0, 255, 0, 255]));
    assert_eq!(renderer.pixel(300, 200), Some([0, 255, 0, 255]));
}

#[test]
fn donut_ring_leaves_its_hole_unpainted() {
    let mut renderer = RasterRenderer::new(200, 200).expect("renderer");
    let frame = RenderFrame::new(Viewport::new(200, 200)).with_arc(ArcPrimitive::annulus_sector(
        100.0,
        100.0,
        80.0,
        40.0,
        0.0,
        std::f64::consts::TAU,
        Color::rgb(0.0, 0.0, 1.0),
    ));
    renderer.render(&frame).expect("render");

    assert_eq!(renderer.pixel(100, 100), Some([255, 255, 255, 255]));
    assert_eq!(renderer.pixel(160, 100), Some([0, 0, 255, 255]));
    assert_eq!(renderer.pixel(195, 100), Some([255, 255, 255, 255]));
}

#[test]
fn mismatched_frame_size_is_rejected() {
    let mut renderer = RasterRenderer::new(100, 100).expect("renderer");
    let frame = RenderFrame::new(Viewport::new(200, 100));
    assert!(matches!(
        renderer.render(&frame),
        Err(ChartError::InvalidData(_))
    ));
}

#[test]
fn invalid_primitives_fail_validation_before_drawing() {
    let mut renderer = RasterRenderer::new(100, 100).expect("renderer");
    let frame = RenderFrame::new(Viewport::new(100, 100))
        .with_rect(RectPrimitive::new(0.0, 0.0, -4.0, 10.0, Color::rgb(0.0, 0.0, 0.0)))
        .with_text(TextPrimitive::new(
            "ok",
            1.0,
            1.0,
            12.0,
            Color::rgb(0.0, 0.0, 0.0),
            TextHAlign::Left,
        ));
    assert!(renderer.render(&frame).is_err());
    assert_eq!(renderer.last_stats().rects_drawn, 0);
}

#[test]
fn snapshots_are_png_and_rgba_of_surface_size() {
    let mut renderer = RasterRenderer::new(64, 48).expect("renderer");
    let chart = single_bar("#ffffff");
    let frame = build_chart_frame(&chart, renderer.viewport(), 1.0).expect("frame");
    renderer.render(&frame).expect("render");

    let rgba = renderer.snapshot_rgba().expect("rgba");
    assert_eq!(rgba.dimensions(), (64, 48));

    let png = renderer.snapshot_png().expect("png");
    assert_eq!(&png[..8], &PNG_SIGNATURE);
    let decoded = image::load_from_memory(&png).expect("decode").to_rgba8();
    assert_eq!(decoded, rgba);
}
