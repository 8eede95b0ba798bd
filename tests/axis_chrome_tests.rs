use forestplot_rs::api::{
    ForestPlotConfig, build_base_chart, despine, draw_xticks, format_x_ticks, format_xlabel,
    remove_ticks,
};
use forestplot_rs::core::{AxisLimits, ForestRecord, ForestTable, RowModel, RowModelOptions};
use forestplot_rs::render::{
    AxisSpine, FontWeight, RecordingSurface, RenderSurface, XTickPlacement,
};
use proptest::prelude::*;

fn model_of(table: &ForestTable) -> RowModel {
    RowModel::from_table(table, &RowModelOptions::default()).expect("row model")
}

fn interval_table() -> ForestTable {
    ForestTable::new(vec![
        ForestRecord::new("a").with_estimate(0.2).with_limits(-0.4, 0.9),
        ForestRecord::new("b").with_estimate(1.1).with_margin_of_error(0.6),
        ForestRecord::new("c"),
    ])
}

#[test]
fn x_limits_are_exactly_the_interval_bounds() {
    let config = ForestPlotConfig::default();
    let model = model_of(&interval_table());
    let mut surface = RecordingSurface::new();
    build_base_chart(&mut surface, &model, &config).expect("base chart");

    let limits = format_x_ticks(&mut surface, &model, None, &config)
        .expect("x ticks")
        .expect("bounds");

    let expected = AxisLimits {
        lower: -0.4,
        upper: 1.1 + 0.6,
    };
    assert_eq!(limits, expected);
    assert_eq!(surface.x_limits(), expected);
    assert_eq!(surface.x_ticks(), &XTickPlacement::Auto { max_bins: 5 });
    assert_eq!(surface.x_tick_label_size(), 9.0);
}

#[test]
fn repeated_formatting_is_idempotent() {
    let config = ForestPlotConfig::default();
    let model = model_of(&interval_table());
    let mut surface = RecordingSurface::new();
    build_base_chart(&mut surface, &model, &config).expect("base chart");

    let first = format_x_ticks(&mut surface, &model, None, &config).expect("first");
    let after_first = surface.x_limits();
    let second = format_x_ticks(&mut surface, &model, None, &config).expect("second");

    assert_eq!(first, second);
    assert_eq!(after_first, surface.x_limits());
}

#[test]
fn rows_without_intervals_leave_the_axis_alone() {
    let config = ForestPlotConfig::default();
    let model = model_of(&ForestTable::new(vec![ForestRecord::new("only label")]));
    let mut surface = RecordingSurface::new();

    let limits = format_x_ticks(&mut surface, &model, None, &config).expect("x ticks");

    assert_eq!(limits, None);
    assert_eq!(
        surface.x_limits(),
        AxisLimits {
            lower: 0.0,
            upper: 1.0
        }
    );
}

#[test]
fn explicit_tick_labels_are_taken_verbatim() {
    let config = ForestPlotConfig::default();
    let model = model_of(&interval_table());
    let mut surface = RecordingSurface::new();
    let labels = vec!["low".to_owned(), "high".to_owned()];

    format_x_ticks(&mut surface, &model, Some(&labels), &config).expect("x ticks");

    assert_eq!(surface.x_ticks(), &XTickPlacement::Fixed(labels.clone()));
    // Two labels for more locator positions: paired in order, never rejected.
    let resolved = surface.resolved_x_ticks();
    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].1, "low");
    assert_eq!(resolved[1].1, "high");
}

#[test]
fn draw_xticks_without_labels_only_sets_size() {
    let config = ForestPlotConfig {
        xtick_size: 7.0,
        ..ForestPlotConfig::default()
    };
    let mut surface = RecordingSurface::new();

    draw_xticks(&mut surface, None, &config).expect("x ticks");
    assert_eq!(surface.x_ticks(), &XTickPlacement::Auto { max_bins: 8 });
    assert_eq!(surface.x_tick_label_size(), 7.0);

    let labels = vec!["0".to_owned(), "1".to_owned()];
    draw_xticks(&mut surface, Some(&labels), &config).expect("x ticks");
    assert_eq!(surface.x_ticks(), &XTickPlacement::Fixed(labels));
}

#[test]
fn despine_hides_everything_but_the_bottom_spine() {
    let mut surface = RecordingSurface::new();
    despine(&mut surface, true);

    assert!(surface.spine_visible(AxisSpine::Bottom));
    assert!(!surface.spine_visible(AxisSpine::Top));
    assert!(!surface.spine_visible(AxisSpine::Left));
    assert!(!surface.spine_visible(AxisSpine::Right));

    let mut untouched = RecordingSurface::new();
    despine(&mut untouched, false);
    assert!(
        AxisSpine::ALL
            .iter()
            .all(|spine| untouched.spine_visible(*spine))
    );
}

#[test]
fn remove_ticks_keeps_bottom_marks_and_left_labels() {
    let mut surface = RecordingSurface::new();
    remove_ticks(&mut surface);

    let marks = surface.tick_marks();
    assert!(marks.bottom);
    assert!(!marks.top);
    assert!(!marks.left);
    assert!(!marks.right);
    assert!(marks.label_left);
    assert!(marks.label_bottom);
    assert!(!marks.label_right);
}

#[test]
fn xlabel_uses_configured_font() {
    let config = ForestPlotConfig::default();
    let mut surface = RecordingSurface::new();

    format_xlabel(&mut surface, Some("Hazard ratio"), &config);
    let title = surface.x_title().expect("title");
    assert_eq!(title.text, "Hazard ratio");
    assert_eq!(title.font.weight, FontWeight::Bold);
    assert_eq!(title.font.size_px, 10.0);

    format_xlabel(&mut surface, None, &config);
    assert!(surface.x_title().is_none());
}

proptest! {
    #[test]
    fn x_limits_match_min_low_and_max_high(
        bounds in proptest::collection::vec((-100.0f64..100.0, 0.0f64..50.0), 1..40)
    ) {
        let records: Vec<ForestRecord> = bounds
            .iter()
            .enumerate()
            .map(|(index, (low, width))| {
                ForestRecord::new(format!("v{index}")).with_limits(*low, low + width)
            })
            .collect();
        let model = model_of(&ForestTable::new(records));
        let config = ForestPlotConfig::default();

        let expected_low = bounds.iter().map(|(low, _)| *low).fold(f64::INFINITY, f64::min);
        let expected_high = bounds
            .iter()
            .map(|(low, width)| low + width)
            .fold(f64::NEG_INFINITY, f64::max);

        let mut surface = RecordingSurface::new();
        let first = format_x_ticks(&mut surface, &model, None, &config)
            .expect("x ticks")
            .expect("bounds");
        let second = format_x_ticks(&mut surface, &model, None, &config)
            .expect("x ticks")
            .expect("bounds");

        prop_assert_eq!(first.lower, expected_low);
        prop_assert_eq!(first.upper, expected_high);
        prop_assert_eq!(first, second);
    }
}
