use approx::assert_relative_eq;
use forestplot_rs::api::{
    ForestPlotConfig, LayoutMetrics, annotation_offset_x, build_base_chart, draw_left_axis_title,
    draw_pvalue_column, draw_right_annotations, format_x_ticks,
};
use forestplot_rs::core::{AxisLimits, ForestRecord, ForestTable, RowModel, RowModelOptions};
use forestplot_rs::render::{
    AxisTitleLocation, FontWeight, RecordingSurface, RenderSurface, TextHAlign, TextVAlign,
};

fn model_of(table: &ForestTable) -> RowModel {
    RowModel::from_table(table, &RowModelOptions::default()).expect("row model")
}

fn prepared_surface(model: &RowModel, config: &ForestPlotConfig) -> RecordingSurface {
    let mut surface = RecordingSurface::new();
    build_base_chart(&mut surface, model, config).expect("base chart");
    format_x_ticks(&mut surface, model, None, config).expect("x ticks");
    surface
}

fn pvalue_table() -> ForestTable {
    ForestTable::new(vec![
        ForestRecord::new("r0").with_limits(-1.0, 1.0).with_pvalue("0.01"),
        ForestRecord::new("r1").with_limits(0.0, 2.0),
        ForestRecord::new("r2").with_limits(0.5, 1.5).with_pvalue("0.30"),
    ])
}

#[test]
fn offset_is_upper_limit_scaled_by_relative_pad() {
    let limits = AxisLimits {
        lower: -1.0,
        upper: 2.0,
    };
    assert_relative_eq!(annotation_offset_x(limits, 0.05), 2.1, epsilon = 1e-12);
    assert_relative_eq!(annotation_offset_x(limits, 0.0), 2.0, epsilon = 1e-12);
}

#[test]
fn pvalues_land_at_offset_and_missing_values_are_skipped() {
    let config = ForestPlotConfig::default();
    let model = model_of(&pvalue_table());
    let mut surface = prepared_surface(&model, &config);

    let summary = draw_pvalue_column(&mut surface, &model, &config).expect("p-values");

    assert_eq!(summary.placed, 3);
    assert_relative_eq!(summary.offset_x.expect("offset"), 2.1, epsilon = 1e-12);
    assert_eq!(summary.header_row, None);

    let texts = surface.texts();
    assert_eq!(texts.len(), 3);
    for text in texts {
        assert_relative_eq!(text.x, 2.1, epsilon = 1e-12);
        assert_eq!(text.h_align, TextHAlign::Left);
    }
    // Tick 0 is the last record, tick 1 has no p-value.
    assert_eq!(texts[0].text, "0.30");
    assert_eq!(texts[0].y, 0.0);
    assert_eq!(texts[0].v_align, TextVAlign::Center);
    assert_eq!(texts[1].text, "0.01");
    assert_eq!(texts[1].y, 2.0);
    assert!(texts.iter().all(|text| text.y != 1.0));
}

#[test]
fn pvalue_header_goes_to_top_without_left_headers() {
    let config = ForestPlotConfig::default();
    let model = model_of(&pvalue_table());
    let mut surface = prepared_surface(&model, &config);

    draw_pvalue_column(&mut surface, &model, &config).expect("p-values");

    let header = surface.texts().last().expect("header");
    assert_eq!(header.text, "P-value");
    assert_eq!(header.y, surface.y_limits().upper);
    assert_eq!(header.y, 2.5);
    assert_eq!(header.font.weight, FontWeight::Bold);
    assert_eq!(header.font.size_px, config.pvalue_title_size);
}

#[test]
fn pvalue_header_aligns_with_table_header_row_when_left_headers_exist() {
    let config = ForestPlotConfig::default();
    let table = ForestTable::new(vec![
        ForestRecord::new("r0")
            .with_limits(0.0, 1.0)
            .with_pvalue("0.2")
            .with_annotations([Some("40")]),
        ForestRecord::new("r1")
            .with_limits(0.0, 3.0)
            .with_pvalue("0.9")
            .with_annotations([Some("41")]),
    ])
    .with_annotation_headers(["N"]);
    let model = model_of(&table);
    let mut surface = prepared_surface(&model, &config);

    let summary = draw_pvalue_column(&mut surface, &model, &config).expect("p-values");

    assert_eq!(summary.header_row, Some(2));
    let header = surface.texts().last().expect("header");
    assert_eq!(header.text, "P-value");
    assert_eq!(header.y, 2.0);
    assert_eq!(header.v_align, TextVAlign::Center);
    assert_relative_eq!(header.x, 3.0 * 1.05, epsilon = 1e-12);
}

#[test]
fn pvalue_header_can_be_disabled() {
    let config = ForestPlotConfig {
        pvalue_title: None,
        ..ForestPlotConfig::default()
    };
    let model = model_of(&pvalue_table());
    let mut surface = prepared_surface(&model, &config);

    let summary = draw_pvalue_column(&mut surface, &model, &config).expect("p-values");
    assert_eq!(summary.placed, 2);
    assert!(surface.texts().iter().all(|text| text.text != "P-value"));
}

#[test]
fn missing_pvalue_column_disables_the_pass() {
    let config = ForestPlotConfig::default();
    let table = ForestTable::new(vec![ForestRecord::new("r0").with_limits(0.0, 1.0)]);
    let model = model_of(&table);
    let mut surface = prepared_surface(&model, &config);

    let summary = draw_pvalue_column(&mut surface, &model, &config).expect("p-values");
    assert_eq!(summary.placed, 0);
    assert_eq!(summary.offset_x, None);
    assert!(surface.texts().is_empty());
}

#[test]
fn offset_follows_the_current_axis_limits() {
    let config = ForestPlotConfig::default();
    let model = model_of(&pvalue_table());
    let mut surface = prepared_surface(&model, &config);
    surface
        .set_x_limits(AxisLimits {
            lower: 0.0,
            upper: 10.0,
        })
        .expect("limits");

    let summary = draw_pvalue_column(&mut surface, &model, &config).expect("p-values");
    assert_relative_eq!(summary.offset_x.expect("offset"), 10.5, epsilon = 1e-12);
}

fn right_annotation_table() -> ForestTable {
    ForestTable::new(vec![
        ForestRecord::new("r0")
            .with_limits(0.0, 2.0)
            .with_right_annotations([Some("1.10 (0.90-1.30)"), Some("120")]),
        ForestRecord::new("r1").with_limits(0.5, 1.0),
    ])
    .with_right_annotation_headers(["HR (95% CI)", "N"])
}

#[test]
fn right_annotations_draw_every_row_and_bold_the_header() {
    let config = ForestPlotConfig {
        group_label_size: 12.0,
        table_header_size: 14.0,
        table_header_weight: FontWeight::Heavy,
        ..ForestPlotConfig::default()
    };
    let model = model_of(&right_annotation_table());
    let mut surface = prepared_surface(&model, &config);

    let summary = draw_right_annotations(&mut surface, &model, &config).expect("right");

    assert_eq!(summary.placed, 3);
    assert_eq!(summary.header_row, Some(2));
    let texts = surface.texts();
    assert_eq!(texts.len(), 3);

    // r1 has no cells and renders empty.
    assert_eq!(texts[0].text, "");
    assert_eq!(texts[1].text, "1.10 (0.90-1.30)  120");
    assert_eq!(texts[1].font.weight, FontWeight::Normal);
    assert_eq!(texts[2].text, "HR (95% CI)       N");
    assert_eq!(texts[2].font.weight, FontWeight::Bold);
    assert_eq!(texts[2].font.size_px, 12.0);
    for (index, text) in texts.iter().enumerate() {
        assert_eq!(text.y, index as f64);
        assert_relative_eq!(text.x, 2.0 * 1.05, epsilon = 1e-12);
        assert_eq!(text.font.family, "monospace");
    }
}

#[test]
fn right_annotations_without_columns_are_disabled() {
    let config = ForestPlotConfig::default();
    let model = model_of(&pvalue_table());
    let mut surface = prepared_surface(&model, &config);

    let summary = draw_right_annotations(&mut surface, &model, &config).expect("right");
    assert_eq!(summary.placed, 0);
    assert!(surface.texts().is_empty());
}

#[test]
fn left_axis_title_pulls_back_by_the_pad() {
    let config = ForestPlotConfig::default();
    let mut surface = RecordingSurface::new();
    let metrics = LayoutMetrics {
        pad: 84.0,
        tick_pad: 84.0,
        flush: true,
        label_count: 4,
        widest_index: Some(1),
    };

    draw_left_axis_title(&mut surface, Some("Variable"), &metrics, &config);

    let title = surface.y_title().expect("title");
    assert_eq!(title.text, "Variable");
    assert_eq!(title.label_pad, -84.0);
    assert_eq!(title.location, AxisTitleLocation::Top);
    assert_eq!(title.font.size_px, 12.0);
    assert_eq!(title.font.weight, FontWeight::Bold);

    draw_left_axis_title(&mut surface, None, &metrics, &config);
    assert!(surface.y_title().is_none());
}
