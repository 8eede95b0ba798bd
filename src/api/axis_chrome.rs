use tracing::debug;

use crate::api::ForestPlotConfig;
use crate::core::{AxisLimits, RowModel};
use crate::error::ChartResult;
use crate::render::{
    AxisSpine, AxisTitle, AxisTitleLocation, FontSpec, RenderSurface, TickMarks, TitleRotation,
    XTickPlacement,
};

/// Fits the x limits to `[min(low), max(high)]` and picks the tick source.
///
/// Explicit labels are taken verbatim; their count is never checked against
/// the tick positions. Returns `None`, leaving the axis untouched, when no
/// row carries an interval.
pub fn format_x_ticks<S: RenderSurface + ?Sized>(
    surface: &mut S,
    model: &RowModel,
    xticks: Option<&[String]>,
    config: &ForestPlotConfig,
) -> ChartResult<Option<AxisLimits>> {
    let Some(bounds) = model.interval_bounds() else {
        debug!("no interval bounds, x ticks left to the surface");
        return Ok(None);
    };

    surface.set_x_limits(bounds)?;
    surface.set_x_ticks(match xticks {
        Some(labels) => XTickPlacement::Fixed(labels.to_vec()),
        None => XTickPlacement::Auto {
            max_bins: config.xtick_count,
        },
    })?;
    surface.set_x_tick_label_size(config.xtick_size)?;
    debug!(lower = bounds.lower, upper = bounds.upper, "formatted x ticks");
    Ok(Some(bounds))
}

/// Sets explicit x tick labels when given, otherwise only the label size.
pub fn draw_xticks<S: RenderSurface + ?Sized>(
    surface: &mut S,
    xticks: Option<&[String]>,
    config: &ForestPlotConfig,
) -> ChartResult<()> {
    if let Some(labels) = xticks {
        surface.set_x_ticks(XTickPlacement::Fixed(labels.to_vec()))?;
    }
    surface.set_x_tick_label_size(config.xtick_size)
}

pub fn format_xlabel<S: RenderSurface + ?Sized>(
    surface: &mut S,
    xlabel: Option<&str>,
    config: &ForestPlotConfig,
) {
    let title = xlabel.map(|text| AxisTitle {
        text: text.to_owned(),
        font: FontSpec::new(
            config.font_family.clone(),
            config.xlabel_size,
            config.xlabel_weight,
        ),
        location: AxisTitleLocation::Center,
        rotation: TitleRotation::Horizontal,
        label_pad: 0.0,
    });
    surface.set_x_title(title);
}

/// Hides the top, left and right spines when `despine` is set.
pub fn despine<S: RenderSurface + ?Sized>(surface: &mut S, despine: bool) {
    if !despine {
        return;
    }
    for spine in [AxisSpine::Top, AxisSpine::Left, AxisSpine::Right] {
        surface.set_spine_visible(spine, false);
    }
}

/// Keeps only bottom tick marks; left and bottom labels stay visible.
pub fn remove_ticks<S: RenderSurface + ?Sized>(surface: &mut S) {
    surface.set_tick_marks(TickMarks {
        top: false,
        bottom: true,
        left: false,
        right: false,
        label_left: true,
        label_right: false,
        label_bottom: true,
    });
}
