use tracing::{debug, trace};

use crate::api::{ForestPlotConfig, ShadingOrder};
use crate::core::{GroupSet, RowModel};
use crate::error::ChartResult;
use crate::render::RenderSurface;

/// What the shading pass does with one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadeDecision {
    Shade,
    Unshaded,
    /// A group row: never shaded, restarts the alternation.
    GroupBreak,
    /// The table header row: never shaded, leaves the counter alone.
    HeaderSkipped,
}

/// Alternating-row counter that restarts at every group boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowShadingCursor {
    counter: u32,
}

impl Default for RowShadingCursor {
    fn default() -> Self {
        Self { counter: 1 }
    }
}

impl RowShadingCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn advance(&mut self, is_table_header: bool, is_group: bool) -> ShadeDecision {
        if is_table_header {
            return ShadeDecision::HeaderSkipped;
        }
        if is_group {
            // The group row takes the even slot itself, so the next row is odd.
            self.counter = 2;
            self.counter += 1;
            return ShadeDecision::GroupBreak;
        }
        let shade = self.counter % 2 == 0;
        self.counter += 1;
        if shade {
            ShadeDecision::Shade
        } else {
            ShadeDecision::Unshaded
        }
    }
}

/// Rows the decoration passes single out, resolved from the row model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecorationTargets {
    pub groups: GroupSet,
    pub table_header: Option<usize>,
}

impl From<&RowModel> for DecorationTargets {
    fn from(model: &RowModel) -> Self {
        Self {
            groups: model.groups().clone(),
            table_header: model.table_header_index(),
        }
    }
}

/// Bolds every tick whose text names a group; returns their indices.
pub fn format_group_labels<S: RenderSurface + ?Sized>(
    surface: &mut S,
    groups: &GroupSet,
    config: &ForestPlotConfig,
) -> ChartResult<Vec<usize>> {
    if groups.is_empty() {
        return Ok(Vec::new());
    }
    let mut formatted = Vec::new();
    for index in 0..surface.y_tick_count() {
        if !groups.matches_label(surface.y_tick_text(index)) {
            continue;
        }
        surface.set_y_tick_font(index, config.group_label_weight, config.group_label_size)?;
        formatted.push(index);
    }
    debug!(count = formatted.len(), "formatted group labels");
    Ok(formatted)
}

/// Applies the header font to the table header tick.
///
/// Run after `format_group_labels` so the header style wins.
pub fn format_table_header<S: RenderSurface + ?Sized>(
    surface: &mut S,
    table_header: Option<usize>,
    config: &ForestPlotConfig,
) -> ChartResult<Option<usize>> {
    let Some(index) = table_header else {
        return Ok(None);
    };
    surface.set_y_tick_font(index, config.table_header_weight, config.table_header_size)?;
    debug!(index, "formatted table header");
    Ok(Some(index))
}

/// Shades every other ordinary row; returns the shaded tick indices in scan order.
pub fn draw_alternating_row_colors<S: RenderSurface + ?Sized>(
    surface: &mut S,
    targets: &DecorationTargets,
    config: &ForestPlotConfig,
) -> ChartResult<Vec<usize>> {
    let fill = config.row_fill();
    let count = surface.y_tick_count();
    let order: Box<dyn Iterator<Item = usize>> = match config.shading_order {
        ShadingOrder::TopDown => Box::new((0..count).rev()),
        ShadingOrder::BottomUp => Box::new(0..count),
    };

    let mut cursor = RowShadingCursor::new();
    let mut shaded = Vec::new();
    for index in order {
        let is_header = targets.table_header == Some(index);
        let is_group = targets.groups.matches_label(surface.y_tick_text(index));
        let decision = cursor.advance(is_header, is_group);
        trace!(index, ?decision, counter = cursor.counter(), "row shading");
        if decision == ShadeDecision::Shade {
            let y = index as f64;
            surface.shade_row_band(y - 0.5, y + 0.5, fill)?;
            shaded.push(index);
        }
    }
    debug!(shaded = shaded.len(), ticks = count, "drew alternating row colors");
    Ok(shaded)
}

#[cfg(test)]
mod tests {
    use super::{RowShadingCursor, ShadeDecision};

    #[test]
    fn plain_rows_alternate_starting_unshaded() {
        let mut cursor = RowShadingCursor::new();
        let decisions: Vec<_> = (0..4).map(|_| cursor.advance(false, false)).collect();
        assert_eq!(
            decisions,
            vec![
                ShadeDecision::Unshaded,
                ShadeDecision::Shade,
                ShadeDecision::Unshaded,
                ShadeDecision::Shade,
            ]
        );
    }

    #[test]
    fn group_break_restarts_alternation() {
        let mut cursor = RowShadingCursor::new();
        assert_eq!(cursor.advance(false, false), ShadeDecision::Unshaded);
        assert_eq!(cursor.advance(false, false), ShadeDecision::Shade);
        assert_eq!(cursor.advance(false, false), ShadeDecision::Unshaded);
        assert_eq!(cursor.advance(false, true), ShadeDecision::GroupBreak);
        assert_eq!(cursor.advance(false, false), ShadeDecision::Unshaded);
        assert_eq!(cursor.advance(false, false), ShadeDecision::Shade);
    }

    #[test]
    fn header_does_not_touch_counter() {
        let mut cursor = RowShadingCursor::new();
        cursor.advance(false, false);
        let before = cursor.counter();
        assert_eq!(cursor.advance(true, true), ShadeDecision::HeaderSkipped);
        assert_eq!(cursor.counter(), before);
    }
}
