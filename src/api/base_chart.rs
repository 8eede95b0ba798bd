use tracing::debug;

use crate::api::ForestPlotConfig;
use crate::core::RowModel;
use crate::error::ChartResult;
use crate::render::{IntervalStyle, MarkerStyle, ReferenceLineStyle, RenderSurface};

/// Counts of the marks drawn by `build_base_chart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaseChartSummary {
    pub rows: usize,
    pub intervals: usize,
    pub markers: usize,
}

/// Establishes the categorical row axis and draws intervals and markers.
///
/// Row `i` of the model lands on tick `i`; every later engine reads row
/// positions back from the surface's tick enumeration.
pub fn build_base_chart<S: RenderSurface + ?Sized>(
    surface: &mut S,
    model: &RowModel,
    config: &ForestPlotConfig,
) -> ChartResult<BaseChartSummary> {
    surface.set_row_categories(&model.tick_labels())?;
    let intervals = draw_confidence_intervals(surface, model, config)?;
    let markers = draw_estimate_markers(surface, model, config)?;

    let summary = BaseChartSummary {
        rows: model.len(),
        intervals,
        markers,
    };
    debug!(
        rows = summary.rows,
        intervals = summary.intervals,
        markers = summary.markers,
        "drew base chart"
    );
    Ok(summary)
}

/// Draws one horizontal interval per row that has bounds.
pub fn draw_confidence_intervals<S: RenderSurface + ?Sized>(
    surface: &mut S,
    model: &RowModel,
    config: &ForestPlotConfig,
) -> ChartResult<usize> {
    let style = IntervalStyle {
        line_width: config.ci_line_width,
        color: config.ci_line_color,
    };
    let mut drawn = 0;
    for row in model.rows() {
        let Some(interval) = row.interval else {
            continue;
        };
        surface.draw_interval(row.index as f64, interval.low, interval.high, style)?;
        drawn += 1;
    }
    Ok(drawn)
}

pub fn draw_estimate_markers<S: RenderSurface + ?Sized>(
    surface: &mut S,
    model: &RowModel,
    config: &ForestPlotConfig,
) -> ChartResult<usize> {
    let style = MarkerStyle {
        shape: config.marker_shape,
        size: config.marker_size,
        color: config.marker_color,
    };
    let mut drawn = 0;
    for row in model.rows() {
        let Some(estimate) = row.estimate else {
            continue;
        };
        surface.draw_marker(estimate, row.index as f64, style)?;
        drawn += 1;
    }
    Ok(drawn)
}

pub fn draw_reference_line<S: RenderSurface + ?Sized>(
    surface: &mut S,
    config: &ForestPlotConfig,
) -> ChartResult<()> {
    surface.draw_reference_line(
        config.reference_line_x,
        ReferenceLineStyle {
            stroke_style: config.reference_line_style,
            color: config.reference_line_color,
            line_width: config.reference_line_width,
        },
    )
}
