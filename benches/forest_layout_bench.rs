use criterion::{Criterion, criterion_group, criterion_main};
use forestplot_rs::api::{DecorationTargets, ForestPlotConfig, draw_alternating_row_colors};
use forestplot_rs::core::{ForestRecord, ForestTable, RowModel, RowModelOptions};
use forestplot_rs::render::{RecordingSurface, RenderSurface};
use forestplot_rs::{ForestPlot, ForestPlotOptions};
use std::hint::black_box;

fn generated_table(records: usize, groups: usize) -> ForestTable {
    let records = (0..records)
        .map(|i| {
            let estimate = 0.5 + (i % 17) as f64 * 0.1;
            ForestRecord::new(format!("variable {i}"))
                .with_group(format!("group {}", i % groups))
                .with_estimate(estimate)
                .with_margin_of_error(0.05 + (i % 5) as f64 * 0.02)
                .with_pvalue(format!("{:.3}", (i % 1000) as f64 / 1000.0))
                .with_annotations([Some(format!("{}", 50 + i % 300))])
                .with_right_annotations([Some(format!("{estimate:.2}"))])
        })
        .collect();
    ForestTable::new(records)
        .with_variable_header("Variable")
        .with_annotation_headers(["N"])
        .with_right_annotation_headers(["Estimate"])
}

fn bench_row_model_2k(c: &mut Criterion) {
    let table = generated_table(2_000, 40);
    let options = RowModelOptions::default();

    c.bench_function("row_model_2k", |b| {
        b.iter(|| {
            let _ = RowModel::from_table(black_box(&table), black_box(&options))
                .expect("row model");
        })
    });
}

fn bench_forest_plot_draw_2k(c: &mut Criterion) {
    let table = generated_table(2_000, 40);
    let plot = ForestPlot::new(
        &table,
        ForestPlotConfig::default(),
        ForestPlotOptions::default().with_xlabel("Estimate"),
    )
    .expect("plot");

    c.bench_function("forest_plot_draw_2k", |b| {
        b.iter(|| {
            let mut surface = RecordingSurface::new();
            let _ = plot.draw(black_box(&mut surface)).expect("draw");
        })
    });
}

fn bench_row_shading_10k(c: &mut Criterion) {
    let table = generated_table(10_000, 200);
    let model = RowModel::from_table(&table, &RowModelOptions::default()).expect("row model");
    let targets = DecorationTargets::from(&model);
    let config = ForestPlotConfig::default();
    let mut surface = RecordingSurface::new();
    surface
        .set_row_categories(&model.tick_labels())
        .expect("categories");

    c.bench_function("row_shading_10k", |b| {
        b.iter(|| {
            let mut surface = surface.clone();
            let _ = draw_alternating_row_colors(&mut surface, black_box(&targets), &config)
                .expect("shading");
        })
    });
}

criterion_group!(
    benches,
    bench_row_model_2k,
    bench_forest_plot_draw_2k,
    bench_row_shading_10k
);
criterion_main!(benches);
