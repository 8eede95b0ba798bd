use tracing::debug;

use crate::api::ForestPlotConfig;
use crate::core::RowModel;
use crate::error::ChartResult;
use crate::render::{FontSpec, FontWeight, RenderSurface, TextHAlign, TickLabelStyle};

/// Geometry of the primary label column, measured from realized glyphs.
///
/// Valid for the tick labels as they were when measured; any later change to
/// tick text or fonts makes it stale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Widest rendered primary label, in device units. Zero without rows.
    pub pad: f64,
    /// Tick pad the surface uses after layout.
    pub tick_pad: f64,
    pub flush: bool,
    pub label_count: usize,
    pub widest_index: Option<usize>,
}

impl LayoutMetrics {
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.label_count == 0
    }
}

/// Tick labels whose text and alignment are final but not yet measured.
///
/// Only `finalize_labels` creates this, so measurement cannot run ahead of
/// label assignment.
#[derive(Debug)]
#[must_use = "finalized labels must be measured to obtain layout metrics"]
pub struct FinalizedLabels {
    label_count: usize,
    flush: bool,
}

impl FinalizedLabels {
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.label_count
    }

    #[must_use]
    pub fn flush(&self) -> bool {
        self.flush
    }

    /// Runs a render pass and measures every primary label.
    ///
    /// In flush mode the tick pad becomes the widest label width, which pins
    /// that label's right edge to the axis and starts every label at one
    /// common x position.
    pub fn measure<S: RenderSurface + ?Sized>(self, surface: &mut S) -> ChartResult<LayoutMetrics> {
        if self.label_count == 0 {
            debug!(flush = self.flush, "no tick labels to measure, pad = 0");
            return Ok(LayoutMetrics {
                pad: 0.0,
                tick_pad: surface.y_tick_pad(),
                flush: self.flush,
                label_count: 0,
                widest_index: None,
            });
        }

        surface.draw_now()?;

        let mut pad: f64 = 0.0;
        let mut widest_index = None;
        for index in 0..self.label_count {
            let width = surface.measure_y_tick_label(index)?.width;
            if widest_index.is_none() || width > pad {
                pad = width;
                widest_index = Some(index);
            }
        }

        if self.flush {
            surface.set_y_tick_pad(pad)?;
        }
        let metrics = LayoutMetrics {
            pad,
            tick_pad: surface.y_tick_pad(),
            flush: self.flush,
            label_count: self.label_count,
            widest_index,
        };
        debug!(
            pad = metrics.pad,
            tick_pad = metrics.tick_pad,
            flush = metrics.flush,
            labels = metrics.label_count,
            "measured primary labels"
        );
        Ok(metrics)
    }
}

/// Font of the primary y tick labels.
#[must_use]
pub fn tick_label_font(config: &ForestPlotConfig) -> FontSpec {
    FontSpec::new(
        config.font_family.clone(),
        config.tick_label_size,
        FontWeight::Normal,
    )
}

/// Assigns final text and alignment to every primary tick label.
pub fn finalize_labels<S: RenderSurface + ?Sized>(
    surface: &mut S,
    model: &RowModel,
    config: &ForestPlotConfig,
    flush: bool,
) -> ChartResult<FinalizedLabels> {
    let labels = model.tick_labels();
    if !labels.is_empty() {
        let style = TickLabelStyle {
            font: tick_label_font(config),
            h_align: if flush {
                TextHAlign::Left
            } else {
                TextHAlign::Right
            },
        };
        surface.set_y_tick_labels(&labels, &style)?;
    }
    Ok(FinalizedLabels {
        label_count: labels.len(),
        flush,
    })
}

/// `finalize_labels` followed by `FinalizedLabels::measure`.
pub fn compute_left_pad<S: RenderSurface + ?Sized>(
    surface: &mut S,
    model: &RowModel,
    config: &ForestPlotConfig,
    flush: bool,
) -> ChartResult<LayoutMetrics> {
    finalize_labels(surface, model, config, flush)?.measure(surface)
}
