#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use forestplot_rs::core::{ForestRecord, ForestTable, Viewport};
use forestplot_rs::render::{
    CairoContextRenderer, CairoRenderer, FontSpec, FontWeight, PangoTextMeasurer, PlotInsets,
    RecordingSurface, TextMeasurer,
};
use forestplot_rs::{ChartError, ForestPlot, ForestPlotConfig, ForestPlotOptions};

fn sample_plot() -> ForestPlot {
    let table = ForestTable::new(vec![
        ForestRecord::new("Age")
            .with_group("Demographics")
            .with_estimate(1.1)
            .with_limits(0.9, 1.3)
            .with_pvalue("0.04"),
        ForestRecord::new("BMI")
            .with_group("Clinical")
            .with_estimate(1.5)
            .with_limits(1.2, 1.9)
            .with_pvalue("<0.001"),
    ]);
    ForestPlot::new(
        &table,
        ForestPlotConfig::default(),
        ForestPlotOptions::default()
            .with_xlabel("Odds ratio")
            .with_ylabel("Variable"),
    )
    .expect("plot")
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn pango_measurer_widens_longer_text() {
    let measurer = PangoTextMeasurer::new().expect("measurer");
    let font = FontSpec::new("monospace", 10.0, FontWeight::Normal);

    let short = measurer.measure("ab", &font).expect("short");
    let long = measurer.measure("abcdefgh", &font).expect("long");
    let empty = measurer.measure("", &font).expect("empty");

    assert!(long.width > short.width);
    assert!(short.height > 0.0);
    assert_eq!(empty.width, 0.0);
}

#[test]
fn forest_plot_renders_with_realized_metrics() {
    let plot = sample_plot();
    let mut surface =
        RecordingSurface::with_measurer(PangoTextMeasurer::new().expect("measurer"));
    let report = plot.draw(&mut surface).expect("draw");
    assert!(report.metrics.pad > 0.0);

    let mut renderer = CairoRenderer::new(1000, 400).expect("renderer");
    surface
        .render_to(&mut renderer, Viewport::new(1000, 400), PlotInsets::default())
        .expect("render");

    let stats = renderer.last_stats();
    assert_eq!(stats.rects_drawn, report.shaded_rows.len());
    assert_eq!(stats.markers_drawn, 2);
    assert!(stats.texts_drawn >= 4 + 3);

    let mut png = Vec::new();
    renderer.write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let plot = sample_plot();
    let mut surface = RecordingSurface::new();
    plot.draw(&mut surface).expect("draw");
    let frame = surface
        .build_frame(Viewport::new(800, 320), PlotInsets::default())
        .expect("frame")
        .flatten();

    let mut renderer = CairoRenderer::new(800, 320).expect("renderer");
    let target = ImageSurface::create(Format::ARgb32, 800, 320).expect("target");
    let context = Context::new(&target).expect("context");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on context");

    assert_eq!(renderer.last_stats().markers_drawn, 2);
}
