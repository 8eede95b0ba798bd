use tracing::{debug, trace};

use crate::api::{ForestPlotConfig, LayoutMetrics};
use crate::core::{AxisLimits, RowModel, RowRole};
use crate::error::ChartResult;
use crate::render::{
    AxisTitle, DataText, FontSpec, FontWeight, RenderSurface, TextHAlign, TextVAlign,
};

/// Outcome of one right-side placement pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlacementSummary {
    /// Texts drawn, headers included.
    pub placed: usize,
    /// Data-space x of the column; `None` when the pass was disabled.
    pub offset_x: Option<f64>,
    pub header_row: Option<usize>,
}

/// X position of right-side columns: `upper * (1 + rel_pad)`.
///
/// Always derived from the limits passed in, so callers should read them
/// from the surface right before placing.
#[must_use]
pub fn annotation_offset_x(limits: AxisLimits, rel_pad: f64) -> f64 {
    limits.upper * (1.0 + rel_pad)
}

/// Draws the single p-value column to the right of the axes.
///
/// The header goes to the top of the y range, or onto the table header row
/// when left annotation headers put one there.
pub fn draw_pvalue_column<S: RenderSurface + ?Sized>(
    surface: &mut S,
    model: &RowModel,
    config: &ForestPlotConfig,
) -> ChartResult<PlacementSummary> {
    if !model.has_pvalue_column() {
        return Ok(PlacementSummary::default());
    }

    let offset_x = annotation_offset_x(surface.x_limits(), config.annotation_rel_pad);
    let font = FontSpec::new(
        config.font_family.clone(),
        config.annotation_font_size,
        FontWeight::Normal,
    );
    let mut placed = 0;
    for row in model.rows() {
        let Some(pvalue) = row.formatted_pvalue.as_deref() else {
            continue;
        };
        surface.draw_text(
            DataText::new(pvalue, offset_x, row.index as f64, font.clone())
                .with_alignment(TextHAlign::Left, TextVAlign::Center),
        )?;
        placed += 1;
    }

    let mut header_row = None;
    if let Some(title) = config.pvalue_title.as_deref() {
        let header_font = FontSpec::new(
            config.font_family.clone(),
            config.pvalue_title_size,
            config.pvalue_title_weight,
        );
        let header = match model.table_header_index().filter(|_| model.has_left_headers()) {
            Some(index) => {
                header_row = Some(index);
                DataText::new(title, offset_x, index as f64, header_font)
                    .with_alignment(TextHAlign::Left, TextVAlign::Center)
            }
            None => DataText::new(title, offset_x, surface.y_limits().upper, header_font),
        };
        surface.draw_text(header)?;
        placed += 1;
    }

    debug!(placed, offset_x, ?header_row, "placed p-value column");
    Ok(PlacementSummary {
        placed,
        offset_x: Some(offset_x),
        header_row,
    })
}

/// Draws the composed right annotation columns, one text per row.
///
/// The table header row takes the group label font, matching the bold group
/// rows beside it; rows without right cells draw empty text.
pub fn draw_right_annotations<S: RenderSurface + ?Sized>(
    surface: &mut S,
    model: &RowModel,
    config: &ForestPlotConfig,
) -> ChartResult<PlacementSummary> {
    if !model.has_right_annotations() {
        return Ok(PlacementSummary::default());
    }

    let offset_x = annotation_offset_x(surface.x_limits(), config.annotation_rel_pad);
    let mut header_row = None;
    for row in model.rows() {
        let font = if row.role == RowRole::TableHeader {
            header_row = Some(row.index);
            FontSpec::new(
                config.font_family.clone(),
                config.group_label_size,
                config.group_label_weight,
            )
        } else {
            FontSpec::new(
                config.font_family.clone(),
                config.annotation_font_size,
                FontWeight::Normal,
            )
        };
        trace!(row = row.index, text = %row.right_label, "place right annotation");
        surface.draw_text(
            DataText::new(row.right_label.clone(), offset_x, row.index as f64, font)
                .with_alignment(TextHAlign::Left, TextVAlign::Center),
        )?;
    }

    let placed = model.len();
    debug!(placed, offset_x, ?header_row, "placed right annotations");
    Ok(PlacementSummary {
        placed,
        offset_x: Some(offset_x),
        header_row,
    })
}

/// Sets the left axis title so it starts at the flushed label column.
///
/// `None` clears any title.
pub fn draw_left_axis_title<S: RenderSurface + ?Sized>(
    surface: &mut S,
    ylabel: Option<&str>,
    metrics: &LayoutMetrics,
    config: &ForestPlotConfig,
) {
    let title = ylabel.map(|text| AxisTitle {
        text: text.to_owned(),
        font: FontSpec::new(
            config.font_family.clone(),
            config.ylabel_size,
            config.ylabel_weight,
        ),
        location: config.ylabel_location,
        rotation: config.ylabel_rotation,
        label_pad: -metrics.pad,
    });
    surface.set_y_title(title);
}
