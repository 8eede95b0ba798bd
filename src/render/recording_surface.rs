use tracing::trace;

use crate::core::{AxisLimits, LinearScale, Viewport, format_tick_value, max_n_ticks};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    AxisSpine, AxisTitle, AxisTitleLocation, CanvasLayerKind, Color, DataText,
    EstimatedTextMeasurer, FontSpec, FontWeight, IntervalStyle, LayeredRenderFrame, LinePrimitive,
    MarkerPrimitive, MarkerStyle, RectPrimitive, ReferenceLineStyle, RenderSurface, Renderer,
    TextExtent, TextHAlign, TextMeasurer, TextPrimitive, TextVAlign, TickLabelStyle, TickMarks,
    TitleRotation, XTickPlacement,
};

pub const DEFAULT_Y_TICK_PAD_PX: f64 = 3.5;
pub const TICK_MARK_LENGTH_PX: f64 = 3.5;
const AUTOSCALE_MARGIN_RATIO: f64 = 0.05;
const DEFAULT_LOCATOR_BINS: usize = 8;
const DEFAULT_X_TICK_LABEL_SIZE_PX: f64 = 10.0;
const AXIS_LINE_WIDTH: f64 = 0.8;
const TITLE_GAP_PX: f64 = 6.0;

/// One categorical tick label on the y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct YTickLabel {
    pub text: Option<String>,
    pub style: TickLabelStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedInterval {
    pub y: f64,
    pub low: f64,
    pub high: f64,
    pub style: IntervalStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedMarker {
    pub x: f64,
    pub y: f64,
    pub style: MarkerStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedReferenceLine {
    pub x: f64,
    pub style: ReferenceLineStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedBand {
    pub y_low: f64,
    pub y_high: f64,
    pub fill: Color,
}

/// Pixel margins between the viewport edge and the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotInsets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for PlotInsets {
    fn default() -> Self {
        Self {
            left: 280.0,
            right: 200.0,
            top: 40.0,
            bottom: 56.0,
        }
    }
}

/// Headless axes that records every draw call in data space.
///
/// The recorded scene is projected into a pixel-space frame on export
/// (`build_frame` / `render_to`). Tick label extents come from the
/// configured `TextMeasurer` and are only available after `draw_now`.
#[derive(Debug, Clone)]
pub struct RecordingSurface<M: TextMeasurer = EstimatedTextMeasurer> {
    measurer: M,
    y_ticks: Vec<YTickLabel>,
    y_tick_pad: f64,
    explicit_x_limits: Option<AxisLimits>,
    data_extent: Option<AxisLimits>,
    x_ticks: XTickPlacement,
    x_tick_label_size: f64,
    x_title: Option<AxisTitle>,
    y_title: Option<AxisTitle>,
    spines: [bool; 4],
    tick_marks: TickMarks,
    intervals: Vec<RecordedInterval>,
    markers: Vec<RecordedMarker>,
    reference_lines: Vec<RecordedReferenceLine>,
    bands: Vec<RecordedBand>,
    texts: Vec<DataText>,
    render_passes: u32,
}

impl Default for RecordingSurface<EstimatedTextMeasurer> {
    fn default() -> Self {
        Self::with_measurer(EstimatedTextMeasurer)
    }
}

impl RecordingSurface<EstimatedTextMeasurer> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: TextMeasurer> RecordingSurface<M> {
    #[must_use]
    pub fn with_measurer(measurer: M) -> Self {
        Self {
            measurer,
            y_ticks: Vec::new(),
            y_tick_pad: DEFAULT_Y_TICK_PAD_PX,
            explicit_x_limits: None,
            data_extent: None,
            x_ticks: XTickPlacement::Auto {
                max_bins: DEFAULT_LOCATOR_BINS,
            },
            x_tick_label_size: DEFAULT_X_TICK_LABEL_SIZE_PX,
            x_title: None,
            y_title: None,
            spines: [true; 4],
            tick_marks: TickMarks::default(),
            intervals: Vec::new(),
            markers: Vec::new(),
            reference_lines: Vec::new(),
            bands: Vec::new(),
            texts: Vec::new(),
            render_passes: 0,
        }
    }

    #[must_use]
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    #[must_use]
    pub fn y_tick_labels(&self) -> &[YTickLabel] {
        &self.y_ticks
    }

    /// Drops the text of one tick, leaving a tick that carries no label.
    pub fn clear_y_tick_text(&mut self, index: usize) -> ChartResult<()> {
        self.y_tick_mut(index)?.text = None;
        Ok(())
    }

    #[must_use]
    pub fn intervals(&self) -> &[RecordedInterval] {
        &self.intervals
    }

    #[must_use]
    pub fn markers(&self) -> &[RecordedMarker] {
        &self.markers
    }

    #[must_use]
    pub fn reference_lines(&self) -> &[RecordedReferenceLine] {
        &self.reference_lines
    }

    #[must_use]
    pub fn bands(&self) -> &[RecordedBand] {
        &self.bands
    }

    #[must_use]
    pub fn texts(&self) -> &[DataText] {
        &self.texts
    }

    #[must_use]
    pub fn x_ticks(&self) -> &XTickPlacement {
        &self.x_ticks
    }

    #[must_use]
    pub fn x_tick_label_size(&self) -> f64 {
        self.x_tick_label_size
    }

    #[must_use]
    pub fn x_title(&self) -> Option<&AxisTitle> {
        self.x_title.as_ref()
    }

    #[must_use]
    pub fn y_title(&self) -> Option<&AxisTitle> {
        self.y_title.as_ref()
    }

    #[must_use]
    pub fn spine_visible(&self, spine: AxisSpine) -> bool {
        self.spines[spine_slot(spine)]
    }

    #[must_use]
    pub fn tick_marks(&self) -> TickMarks {
        self.tick_marks
    }

    #[must_use]
    pub fn render_passes(&self) -> u32 {
        self.render_passes
    }

    /// Tick values and label texts the x axis shows for the current limits.
    #[must_use]
    pub fn resolved_x_ticks(&self) -> Vec<(f64, String)> {
        let limits = self.x_limits();
        match &self.x_ticks {
            XTickPlacement::Auto { max_bins } => max_n_ticks(limits, *max_bins)
                .into_iter()
                .map(|value| (value, format_tick_value(value)))
                .collect(),
            // Labels are paired with locator positions as-is; a count mismatch
            // is the caller's responsibility.
            XTickPlacement::Fixed(labels) => max_n_ticks(limits, DEFAULT_LOCATOR_BINS)
                .into_iter()
                .zip(labels.iter().cloned())
                .collect(),
        }
    }

    /// Projects the recorded scene into pixel space.
    pub fn build_frame(
        &self,
        viewport: Viewport,
        insets: PlotInsets,
    ) -> ChartResult<LayeredRenderFrame> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let plot_left = insets.left;
        let plot_right = f64::from(viewport.width) - insets.right;
        let plot_top = insets.top;
        let plot_bottom = f64::from(viewport.height) - insets.bottom;
        if plot_right <= plot_left || plot_bottom <= plot_top {
            return Err(ChartError::InvalidData(
                "plot insets leave no room for the plot area".to_owned(),
            ));
        }

        let x_scale = LinearScale::new(self.x_limits(), plot_left, plot_right)?;
        let y_scale = LinearScale::new(
            AxisLimits::categorical(self.y_ticks.len().max(1)),
            plot_bottom,
            plot_top,
        )?;
        let mut frame = LayeredRenderFrame::new(viewport);

        for band in &self.bands {
            let top = y_scale.domain_to_pixel(band.y_high)?;
            let bottom = y_scale.domain_to_pixel(band.y_low)?;
            frame.push_rect(
                CanvasLayerKind::Background,
                RectPrimitive::new(
                    plot_left,
                    top.min(bottom),
                    plot_right - plot_left,
                    (bottom - top).abs(),
                    band.fill,
                ),
            );
        }

        for interval in &self.intervals {
            let y = y_scale.domain_to_pixel(interval.y)?;
            frame.push_line(
                CanvasLayerKind::Series,
                LinePrimitive::new(
                    x_scale.domain_to_pixel(interval.low)?,
                    y,
                    x_scale.domain_to_pixel(interval.high)?,
                    y,
                    interval.style.line_width,
                    interval.style.color,
                ),
            );
        }
        for marker in &self.markers {
            frame.push_marker(
                CanvasLayerKind::Series,
                MarkerPrimitive {
                    x: x_scale.domain_to_pixel(marker.x)?,
                    y: y_scale.domain_to_pixel(marker.y)?,
                    size_px: marker.style.size.sqrt(),
                    shape: marker.style.shape,
                    color: marker.style.color,
                },
            );
        }
        for line in &self.reference_lines {
            let x = x_scale.domain_to_pixel(line.x)?;
            frame.push_line(
                CanvasLayerKind::Series,
                LinePrimitive::new(
                    x,
                    plot_top,
                    x,
                    plot_bottom,
                    line.style.line_width,
                    line.style.color,
                )
                .with_stroke_style(line.style.stroke_style),
            );
        }

        for text in self.texts.iter().filter(|text| !text.text.is_empty()) {
            frame.push_text(
                CanvasLayerKind::Annotation,
                TextPrimitive::new(
                    text.text.clone(),
                    x_scale.domain_to_pixel(text.x)?,
                    y_scale.domain_to_pixel(text.y)?,
                    text.font.clone(),
                    text.color,
                    text.h_align,
                )
                .with_v_align(text.v_align),
            );
        }

        self.push_spines(&mut frame, plot_left, plot_right, plot_top, plot_bottom);
        let label_column_width =
            self.push_y_axis(&mut frame, &y_scale, plot_left, plot_right)?;
        self.push_x_axis(&mut frame, &x_scale, plot_top, plot_bottom)?;
        self.push_titles(
            &mut frame,
            label_column_width,
            (plot_left, plot_right),
            (plot_top, plot_bottom),
        );

        Ok(frame)
    }

    pub fn render_to<R: Renderer>(
        &self,
        renderer: &mut R,
        viewport: Viewport,
        insets: PlotInsets,
    ) -> ChartResult<()> {
        let frame = self.build_frame(viewport, insets)?;
        renderer.render(&frame.flatten())
    }

    fn y_tick_mut(&mut self, index: usize) -> ChartResult<&mut YTickLabel> {
        let count = self.y_ticks.len();
        self.y_ticks.get_mut(index).ok_or_else(|| {
            ChartError::InvalidData(format!("y tick index {index} out of range (count={count})"))
        })
    }

    fn extend_data_extent(&mut self, value: f64) {
        self.data_extent = Some(match self.data_extent {
            Some(extent) => extent.union_value(value),
            None => AxisLimits {
                lower: value,
                upper: value,
            },
        });
    }

    fn push_spines(
        &self,
        frame: &mut LayeredRenderFrame,
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
    ) {
        for spine in AxisSpine::ALL {
            if !self.spine_visible(spine) {
                continue;
            }
            let (x1, y1, x2, y2) = match spine {
                AxisSpine::Top => (left, top, right, top),
                AxisSpine::Bottom => (left, bottom, right, bottom),
                AxisSpine::Left => (left, top, left, bottom),
                AxisSpine::Right => (right, top, right, bottom),
            };
            frame.push_line(
                CanvasLayerKind::Axis,
                LinePrimitive::new(x1, y1, x2, y2, AXIS_LINE_WIDTH, Color::BLACK),
            );
        }
    }

    /// Emits y tick marks and labels; returns the widest label extent.
    fn push_y_axis(
        &self,
        frame: &mut LayeredRenderFrame,
        y_scale: &LinearScale,
        plot_left: f64,
        plot_right: f64,
    ) -> ChartResult<f64> {
        let mark_offset = if self.tick_marks.left {
            TICK_MARK_LENGTH_PX
        } else {
            0.0
        };
        let mut widest: f64 = 0.0;
        for (index, tick) in self.y_ticks.iter().enumerate() {
            let y = y_scale.domain_to_pixel(index as f64)?;
            if self.tick_marks.left {
                frame.push_line(
                    CanvasLayerKind::Axis,
                    LinePrimitive::new(
                        plot_left - TICK_MARK_LENGTH_PX,
                        y,
                        plot_left,
                        y,
                        AXIS_LINE_WIDTH,
                        Color::BLACK,
                    ),
                );
            }
            if self.tick_marks.right {
                frame.push_line(
                    CanvasLayerKind::Axis,
                    LinePrimitive::new(
                        plot_right,
                        y,
                        plot_right + TICK_MARK_LENGTH_PX,
                        y,
                        AXIS_LINE_WIDTH,
                        Color::BLACK,
                    ),
                );
            }

            let Some(text) = tick.text.as_deref().filter(|text| !text.is_empty()) else {
                continue;
            };
            widest = widest.max(self.measurer.measure(text, &tick.style.font)?.width);
            if !self.tick_marks.label_left {
                continue;
            }
            frame.push_text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    text,
                    plot_left - mark_offset - self.y_tick_pad,
                    y,
                    tick.style.font.clone(),
                    Color::BLACK,
                    tick.style.h_align,
                )
                .with_v_align(TextVAlign::Center),
            );
        }
        Ok(widest)
    }

    fn push_x_axis(
        &self,
        frame: &mut LayeredRenderFrame,
        x_scale: &LinearScale,
        plot_top: f64,
        plot_bottom: f64,
    ) -> ChartResult<()> {
        let font = FontSpec::new("sans-serif", self.x_tick_label_size, FontWeight::Normal);
        for (value, label) in self.resolved_x_ticks() {
            let x = x_scale.domain_to_pixel(value)?;
            if self.tick_marks.bottom {
                frame.push_line(
                    CanvasLayerKind::Axis,
                    LinePrimitive::new(
                        x,
                        plot_bottom,
                        x,
                        plot_bottom + TICK_MARK_LENGTH_PX,
                        AXIS_LINE_WIDTH,
                        Color::BLACK,
                    ),
                );
            }
            if self.tick_marks.top {
                frame.push_line(
                    CanvasLayerKind::Axis,
                    LinePrimitive::new(
                        x,
                        plot_top - TICK_MARK_LENGTH_PX,
                        x,
                        plot_top,
                        AXIS_LINE_WIDTH,
                        Color::BLACK,
                    ),
                );
            }
            if self.tick_marks.label_bottom && !label.is_empty() {
                frame.push_text(
                    CanvasLayerKind::Axis,
                    TextPrimitive::new(
                        label,
                        x,
                        plot_bottom + TICK_MARK_LENGTH_PX + DEFAULT_Y_TICK_PAD_PX,
                        font.clone(),
                        Color::BLACK,
                        TextHAlign::Center,
                    )
                    .with_v_align(TextVAlign::Top),
                );
            }
        }
        Ok(())
    }

    fn push_titles(
        &self,
        frame: &mut LayeredRenderFrame,
        label_column_width: f64,
        (plot_left, plot_right): (f64, f64),
        (plot_top, plot_bottom): (f64, f64),
    ) {
        if let Some(title) = self.x_title.as_ref().filter(|title| !title.text.is_empty()) {
            let tick_band = TICK_MARK_LENGTH_PX
                + DEFAULT_Y_TICK_PAD_PX
                + self.x_tick_label_size * 1.2
                + TITLE_GAP_PX;
            frame.push_text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    title.text.clone(),
                    (plot_left + plot_right) * 0.5,
                    plot_bottom + tick_band + title.label_pad.max(0.0),
                    title.font.clone(),
                    Color::BLACK,
                    TextHAlign::Center,
                )
                .with_v_align(TextVAlign::Top),
            );
        }

        if let Some(title) = self.y_title.as_ref().filter(|title| !title.text.is_empty()) {
            let y = match title.location {
                AxisTitleLocation::Top => plot_top,
                AxisTitleLocation::Center => (plot_top + plot_bottom) * 0.5,
                AxisTitleLocation::Bottom => plot_bottom,
            };
            let x = plot_left - self.y_tick_pad - label_column_width - title.label_pad;
            let (angle, v_align) = match title.rotation {
                TitleRotation::Horizontal => (0.0, TextVAlign::Bottom),
                TitleRotation::Vertical => (90.0, TextVAlign::Center),
            };
            frame.push_text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    title.text.clone(),
                    x,
                    y,
                    title.font.clone(),
                    Color::BLACK,
                    TextHAlign::Left,
                )
                .with_v_align(v_align)
                .with_angle(angle),
            );
        }
    }
}

impl<M: TextMeasurer> RenderSurface for RecordingSurface<M> {
    fn set_row_categories(&mut self, labels: &[String]) -> ChartResult<()> {
        self.y_ticks = labels
            .iter()
            .map(|label| YTickLabel {
                text: Some(label.clone()),
                style: TickLabelStyle::default(),
            })
            .collect();
        Ok(())
    }

    fn draw_interval(
        &mut self,
        y: f64,
        low: f64,
        high: f64,
        style: IntervalStyle,
    ) -> ChartResult<()> {
        if !y.is_finite() || !low.is_finite() || !high.is_finite() {
            return Err(ChartError::InvalidData(
                "interval coordinates must be finite".to_owned(),
            ));
        }
        self.extend_data_extent(low);
        self.extend_data_extent(high);
        self.intervals.push(RecordedInterval {
            y,
            low,
            high,
            style,
        });
        Ok(())
    }

    fn draw_marker(&mut self, x: f64, y: f64, style: MarkerStyle) -> ChartResult<()> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ChartError::InvalidData(
                "marker coordinates must be finite".to_owned(),
            ));
        }
        self.extend_data_extent(x);
        self.markers.push(RecordedMarker { x, y, style });
        Ok(())
    }

    fn draw_reference_line(&mut self, x: f64, style: ReferenceLineStyle) -> ChartResult<()> {
        if !x.is_finite() {
            return Err(ChartError::InvalidData(
                "reference line position must be finite".to_owned(),
            ));
        }
        // Reference lines never take part in x autoscaling.
        self.reference_lines.push(RecordedReferenceLine { x, style });
        Ok(())
    }

    fn shade_row_band(&mut self, y_low: f64, y_high: f64, fill: Color) -> ChartResult<()> {
        fill.validate()?;
        if !y_low.is_finite() || !y_high.is_finite() {
            return Err(ChartError::InvalidData(
                "band bounds must be finite".to_owned(),
            ));
        }
        self.bands.push(RecordedBand {
            y_low,
            y_high,
            fill,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: DataText) -> ChartResult<()> {
        if !text.x.is_finite() || !text.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text anchor must be finite".to_owned(),
            ));
        }
        text.font.validate()?;
        trace!(x = text.x, y = text.y, text = %text.text, "record data text");
        self.texts.push(text);
        Ok(())
    }

    fn x_limits(&self) -> AxisLimits {
        if let Some(limits) = self.explicit_x_limits {
            return limits;
        }
        match self.data_extent {
            Some(extent) => extent.with_margin(AUTOSCALE_MARGIN_RATIO),
            None => AxisLimits {
                lower: 0.0,
                upper: 1.0,
            },
        }
    }

    fn set_x_limits(&mut self, limits: AxisLimits) -> ChartResult<()> {
        if !limits.lower.is_finite() || !limits.upper.is_finite() {
            return Err(ChartError::InvalidData(
                "x limits must be finite".to_owned(),
            ));
        }
        self.explicit_x_limits = Some(limits);
        Ok(())
    }

    fn y_limits(&self) -> AxisLimits {
        AxisLimits::categorical(self.y_ticks.len())
    }

    fn y_tick_count(&self) -> usize {
        self.y_ticks.len()
    }

    fn y_tick_text(&self, index: usize) -> Option<&str> {
        self.y_ticks.get(index)?.text.as_deref()
    }

    fn set_y_tick_labels(&mut self, labels: &[String], style: &TickLabelStyle) -> ChartResult<()> {
        if labels.len() != self.y_ticks.len() {
            return Err(ChartError::InvalidData(format!(
                "expected {} y tick labels, got {}",
                self.y_ticks.len(),
                labels.len()
            )));
        }
        style.font.validate()?;
        for (tick, label) in self.y_ticks.iter_mut().zip(labels) {
            tick.text = Some(label.clone());
            tick.style = style.clone();
        }
        Ok(())
    }

    fn set_y_tick_font(
        &mut self,
        index: usize,
        weight: FontWeight,
        size_px: f64,
    ) -> ChartResult<()> {
        let tick = self.y_tick_mut(index)?;
        let font = FontSpec {
            size_px,
            weight,
            ..tick.style.font.clone()
        };
        font.validate()?;
        tick.style.font = font;
        Ok(())
    }

    fn y_tick_pad(&self) -> f64 {
        self.y_tick_pad
    }

    fn set_y_tick_pad(&mut self, pad: f64) -> ChartResult<()> {
        if !pad.is_finite() {
            return Err(ChartError::InvalidData(
                "tick pad must be finite".to_owned(),
            ));
        }
        self.y_tick_pad = pad;
        Ok(())
    }

    fn set_x_ticks(&mut self, placement: XTickPlacement) -> ChartResult<()> {
        if matches!(placement, XTickPlacement::Auto { max_bins: 0 }) {
            return Err(ChartError::InvalidData(
                "x tick locator needs at least one bin".to_owned(),
            ));
        }
        self.x_ticks = placement;
        Ok(())
    }

    fn set_x_tick_label_size(&mut self, size_px: f64) -> ChartResult<()> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "x tick label size must be finite and > 0".to_owned(),
            ));
        }
        self.x_tick_label_size = size_px;
        Ok(())
    }

    fn set_x_title(&mut self, title: Option<AxisTitle>) {
        self.x_title = title;
    }

    fn set_y_title(&mut self, title: Option<AxisTitle>) {
        self.y_title = title;
    }

    fn set_spine_visible(&mut self, spine: AxisSpine, visible: bool) {
        self.spines[spine_slot(spine)] = visible;
    }

    fn set_tick_marks(&mut self, marks: TickMarks) {
        self.tick_marks = marks;
    }

    fn draw_now(&mut self) -> ChartResult<()> {
        self.render_passes += 1;
        trace!(pass = self.render_passes, ticks = self.y_ticks.len(), "render pass");
        Ok(())
    }

    fn measure_y_tick_label(&self, index: usize) -> ChartResult<TextExtent> {
        if self.render_passes == 0 {
            return Err(ChartError::LayoutNotRealized(
                "call draw_now before measuring tick labels".to_owned(),
            ));
        }
        let tick = self.y_ticks.get(index).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "y tick index {index} out of range (count={})",
                self.y_ticks.len()
            ))
        })?;
        self.measurer
            .measure(tick.text.as_deref().unwrap_or_default(), &tick.style.font)
    }
}

fn spine_slot(spine: AxisSpine) -> usize {
    match spine {
        AxisSpine::Top => 0,
        AxisSpine::Bottom => 1,
        AxisSpine::Left => 2,
        AxisSpine::Right => 3,
    }
}
