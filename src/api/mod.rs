pub mod annotation_placement;
pub mod axis_chrome;
pub mod base_chart;
mod config;
mod forest_plot;
pub mod label_layout;
pub mod row_decoration;

pub use annotation_placement::{
    PlacementSummary, annotation_offset_x, draw_left_axis_title, draw_pvalue_column,
    draw_right_annotations,
};
pub use axis_chrome::{despine, draw_xticks, format_x_ticks, format_xlabel, remove_ticks};
pub use base_chart::{
    BaseChartSummary, build_base_chart, draw_confidence_intervals, draw_estimate_markers,
    draw_reference_line,
};
pub use config::{ForestPlotConfig, ForestPlotOptions, ShadingOrder, UnknownOptionPolicy};
pub use forest_plot::{ForestPlot, ForestPlotReport};
pub use label_layout::{
    FinalizedLabels, LayoutMetrics, compute_left_pad, finalize_labels, tick_label_font,
};
pub use row_decoration::{
    DecorationTargets, RowShadingCursor, ShadeDecision, draw_alternating_row_colors,
    format_group_labels, format_table_header,
};
