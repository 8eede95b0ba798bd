use serde::{Deserialize, Serialize};

use crate::core::AxisLimits;
use crate::error::ChartResult;
use crate::render::{
    Color, FontSpec, FontWeight, LineStrokeStyle, MarkerShape, TextExtent, TextHAlign, TextVAlign,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalStyle {
    pub line_width: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    /// Marker area in square points.
    pub size: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceLineStyle {
    pub stroke_style: LineStrokeStyle,
    pub color: Color,
    pub line_width: f64,
}

/// Text anchored at data-space coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct DataText {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: FontSpec,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
}

impl DataText {
    #[must_use]
    pub fn new(text: impl Into<String>, x: f64, y: f64, font: FontSpec) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font,
            color: Color::BLACK,
            h_align: TextHAlign::Left,
            v_align: TextVAlign::Baseline,
        }
    }

    #[must_use]
    pub fn with_alignment(mut self, h_align: TextHAlign, v_align: TextVAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickLabelStyle {
    pub font: FontSpec,
    pub h_align: TextHAlign,
}

impl Default for TickLabelStyle {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            h_align: TextHAlign::Right,
        }
    }
}

/// How x tick positions and labels are chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum XTickPlacement {
    /// Nice-number locator with at most `max_bins` intervals.
    Auto { max_bins: usize },
    /// Verbatim labels assigned in order to the default locator positions.
    Fixed(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSpine {
    Top,
    Bottom,
    Left,
    Right,
}

impl AxisSpine {
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];
}

/// Visibility of tick marks and tick labels on each side of the axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickMarks {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
    pub label_left: bool,
    pub label_right: bool,
    pub label_bottom: bool,
}

impl Default for TickMarks {
    fn default() -> Self {
        Self {
            top: false,
            bottom: true,
            left: true,
            right: false,
            label_left: true,
            label_right: false,
            label_bottom: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisTitleLocation {
    Bottom,
    Center,
    #[default]
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleRotation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTitle {
    pub text: String,
    pub font: FontSpec,
    pub location: AxisTitleLocation,
    pub rotation: TitleRotation,
    /// Distance from the tick labels; negative values pull the title over them.
    pub label_pad: f64,
}

/// The 2-D plotting canvas every layout engine draws through.
///
/// Row positions live on a categorical y axis: row `i` is drawn at `y = i`.
/// Text metrics are only valid after `draw_now` completed a render pass.
pub trait RenderSurface {
    /// Establishes one categorical tick per label at positions `0..labels.len()`.
    fn set_row_categories(&mut self, labels: &[String]) -> ChartResult<()>;

    fn draw_interval(&mut self, y: f64, low: f64, high: f64, style: IntervalStyle)
    -> ChartResult<()>;

    fn draw_marker(&mut self, x: f64, y: f64, style: MarkerStyle) -> ChartResult<()>;

    fn draw_reference_line(&mut self, x: f64, style: ReferenceLineStyle) -> ChartResult<()>;

    /// Fills a full-width horizontal band behind every other mark.
    fn shade_row_band(&mut self, y_low: f64, y_high: f64, fill: Color) -> ChartResult<()>;

    fn draw_text(&mut self, text: DataText) -> ChartResult<()>;

    fn x_limits(&self) -> AxisLimits;

    fn set_x_limits(&mut self, limits: AxisLimits) -> ChartResult<()>;

    fn y_limits(&self) -> AxisLimits;

    fn y_tick_count(&self) -> usize;

    /// Text of one y tick label; `None` when the tick carries no text.
    fn y_tick_text(&self, index: usize) -> Option<&str>;

    fn set_y_tick_labels(&mut self, labels: &[String], style: &TickLabelStyle) -> ChartResult<()>;

    fn set_y_tick_font(&mut self, index: usize, weight: FontWeight, size_px: f64)
    -> ChartResult<()>;

    fn y_tick_pad(&self) -> f64;

    fn set_y_tick_pad(&mut self, pad: f64) -> ChartResult<()>;

    fn set_x_ticks(&mut self, placement: XTickPlacement) -> ChartResult<()>;

    fn set_x_tick_label_size(&mut self, size_px: f64) -> ChartResult<()>;

    fn set_x_title(&mut self, title: Option<AxisTitle>);

    fn set_y_title(&mut self, title: Option<AxisTitle>);

    fn set_spine_visible(&mut self, spine: AxisSpine, visible: bool);

    fn set_tick_marks(&mut self, marks: TickMarks);

    /// Runs a synchronous render pass so text extents become measurable.
    fn draw_now(&mut self) -> ChartResult<()>;

    fn measure_y_tick_label(&self, index: usize) -> ChartResult<TextExtent>;
}
