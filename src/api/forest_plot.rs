use tracing::{debug, info_span};

use crate::api::{
    BaseChartSummary, DecorationTargets, ForestPlotConfig, ForestPlotOptions, LayoutMetrics,
    annotation_placement, axis_chrome, base_chart, label_layout, row_decoration,
};
use crate::core::{AxisLimits, ForestTable, RowModel, RowModelOptions};
use crate::error::ChartResult;
use crate::render::RenderSurface;

/// What one `ForestPlot::draw` call did to the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ForestPlotReport {
    pub base: BaseChartSummary,
    pub x_limits: Option<AxisLimits>,
    pub metrics: LayoutMetrics,
    pub annotations_placed: usize,
    /// Ticks formatted as group rows.
    pub bolded_rows: Vec<usize>,
    pub table_header: Option<usize>,
    pub shaded_rows: Vec<usize>,
}

/// A validated forest plot ready to be drawn onto any `RenderSurface`.
#[derive(Debug, Clone)]
pub struct ForestPlot {
    model: RowModel,
    config: ForestPlotConfig,
    options: ForestPlotOptions,
}

impl ForestPlot {
    pub fn new(
        table: &ForestTable,
        config: ForestPlotConfig,
        options: ForestPlotOptions,
    ) -> ChartResult<Self> {
        config.validate()?;
        let model = RowModel::from_table(
            table,
            &RowModelOptions {
                pvalue_title: config.pvalue_title.clone(),
            },
        )?;
        Ok(Self {
            model,
            config,
            options,
        })
    }

    #[must_use]
    pub fn model(&self) -> &RowModel {
        &self.model
    }

    #[must_use]
    pub fn config(&self) -> &ForestPlotConfig {
        &self.config
    }

    #[must_use]
    pub fn options(&self) -> &ForestPlotOptions {
        &self.options
    }

    /// Runs every pass in its fixed order against `surface`.
    ///
    /// The pad is measured once, after the tick labels are final and before
    /// anything else is placed.
    pub fn draw<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> ChartResult<ForestPlotReport> {
        let span = info_span!("forest_plot_draw", rows = self.model.len());
        let _guard = span.enter();
        let config = &self.config;
        let options = &self.options;
        let xticks = options.xticks.as_deref();

        let base = base_chart::build_base_chart(surface, &self.model, config)?;
        let x_limits = axis_chrome::format_x_ticks(surface, &self.model, xticks, config)?;
        if x_limits.is_none() {
            axis_chrome::draw_xticks(surface, xticks, config)?;
        }
        base_chart::draw_reference_line(surface, config)?;

        let metrics = label_layout::compute_left_pad(surface, &self.model, config, options.flush)?;

        let pvalues = annotation_placement::draw_pvalue_column(surface, &self.model, config)?;
        let right = annotation_placement::draw_right_annotations(surface, &self.model, config)?;
        annotation_placement::draw_left_axis_title(
            surface,
            options.ylabel.as_deref(),
            &metrics,
            config,
        );

        axis_chrome::remove_ticks(surface);
        let targets = DecorationTargets::from(&self.model);
        let bolded_rows = row_decoration::format_group_labels(surface, &targets.groups, config)?;
        let table_header =
            row_decoration::format_table_header(surface, targets.table_header, config)?;
        axis_chrome::despine(surface, options.despine);
        let shaded_rows = row_decoration::draw_alternating_row_colors(surface, &targets, config)?;
        axis_chrome::format_xlabel(surface, options.xlabel.as_deref(), config);

        let report = ForestPlotReport {
            base,
            x_limits,
            metrics,
            annotations_placed: pvalues.placed + right.placed,
            bolded_rows,
            table_header,
            shaded_rows,
        };
        debug!(
            pad = report.metrics.pad,
            annotations = report.annotations_placed,
            shaded = report.shaded_rows.len(),
            "drew forest plot"
        );
        Ok(report)
    }
}
