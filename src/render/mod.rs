mod frame;
mod layer_stack;
mod layered_frame;
mod null_renderer;
mod primitives;
mod recording_surface;
mod surface;
mod text_metrics;

pub use frame::{PrimitiveCounts, RenderFrame};
pub use layer_stack::CanvasLayerKind;
pub use layered_frame::{LayerPrimitives, LayeredRenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, FontSpec, FontWeight, LinePrimitive, LineStrokeStyle, MarkerPrimitive, MarkerShape,
    RectPrimitive, TextHAlign, TextPrimitive, TextVAlign,
};
pub use recording_surface::{
    DEFAULT_Y_TICK_PAD_PX, PlotInsets, RecordedBand, RecordedInterval, RecordedMarker,
    RecordedReferenceLine, RecordingSurface, TICK_MARK_LENGTH_PX, YTickLabel,
};
pub use surface::{
    AxisSpine, AxisTitle, AxisTitleLocation, DataText, IntervalStyle, MarkerStyle,
    ReferenceLineStyle, RenderSurface, TickLabelStyle, TickMarks, TitleRotation, XTickPlacement,
};
pub use text_metrics::{EstimatedTextMeasurer, TextExtent, TextMeasurer};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from forest plot layout logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer, PangoTextMeasurer};
