use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_4, PI};

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, FontSpec, FontWeight, MarkerPrimitive, MarkerShape, RenderFrame, Renderer, TextExtent,
    TextHAlign, TextMeasurer, TextPrimitive, TextVAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub markers_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Encodes the last rendered image as PNG.
    pub fn write_png<W: std::io::Write>(&self, writer: &mut W) -> ChartResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| ChartError::InvalidData(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for rect in &frame.rects {
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            apply_color(context, rect.fill_color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            stats.rects_drawn += 1;
        }

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            let dashes: Vec<f64> = line
                .stroke_style
                .dash_pattern()
                .iter()
                .map(|length| length * line.stroke_width)
                .collect();
            context.set_dash(&dashes, 0.0);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }
        context.set_dash(&[], 0.0);

        for marker in &frame.markers {
            append_marker_path(context, *marker);
            apply_color(context, marker.color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill marker", err))?;
            stats.markers_drawn += 1;
        }

        for text in &frame.texts {
            draw_text(context, text)?;
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

/// Measures text with realized Pango glyph metrics.
#[derive(Debug)]
pub struct PangoTextMeasurer {
    surface: ImageSurface,
}

impl PangoTextMeasurer {
    pub fn new() -> ChartResult<Self> {
        let surface = ImageSurface::create(Format::ARgb32, 1, 1)
            .map_err(|err| map_backend_error("failed to create measuring surface", err))?;
        Ok(Self { surface })
    }
}

impl TextMeasurer for PangoTextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> ChartResult<TextExtent> {
        font.validate()?;
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create measuring context", err))?;
        let layout = pangocairo::functions::create_layout(&context);
        layout.set_font_description(Some(&font_description(font)));
        layout.set_text(text);
        let (width, height) = layout.pixel_size();
        Ok(TextExtent {
            width: if text.is_empty() { 0.0 } else { f64::from(width) },
            height: f64::from(height),
        })
    }
}

fn font_description(font: &FontSpec) -> FontDescription {
    let mut description = FontDescription::new();
    description.set_family(&font.family);
    description.set_absolute_size(font.size_px * f64::from(pango::SCALE));
    description.set_weight(match font.weight {
        FontWeight::Light => pango::Weight::Light,
        FontWeight::Normal => pango::Weight::Normal,
        FontWeight::Bold => pango::Weight::Bold,
        FontWeight::Heavy => pango::Weight::Heavy,
    });
    description
}

fn draw_text(context: &Context, text: &TextPrimitive) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    layout.set_font_description(Some(&font_description(&text.font)));
    layout.set_text(&text.text);

    let (text_width, text_height) = layout.pixel_size();
    let (text_width, text_height) = (f64::from(text_width), f64::from(text_height));
    let dx = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -text_width / 2.0,
        TextHAlign::Right => -text_width,
    };
    let dy = match text.v_align {
        TextVAlign::Top => 0.0,
        TextVAlign::Center => -text_height / 2.0,
        TextVAlign::Bottom => -text_height,
        TextVAlign::Baseline => -f64::from(layout.baseline()) / f64::from(pango::SCALE),
    };

    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    apply_color(context, text.color);
    context.translate(text.x, text.y);
    if text.angle_deg != 0.0 {
        context.rotate(-text.angle_deg.to_radians());
    }
    context.move_to(dx, dy);
    pangocairo::functions::show_layout(context, &layout);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))
}

fn append_marker_path(context: &Context, marker: MarkerPrimitive) {
    let half = marker.size_px / 2.0;
    match marker.shape {
        MarkerShape::Square => {
            context.rectangle(marker.x - half, marker.y - half, marker.size_px, marker.size_px);
        }
        MarkerShape::Circle => {
            context.new_sub_path();
            context.arc(marker.x, marker.y, half, 0.0, 2.0 * PI);
        }
        MarkerShape::Diamond => {
            let reach = half / FRAC_PI_4.cos();
            context.move_to(marker.x, marker.y - reach);
            context.line_to(marker.x + half, marker.y);
            context.line_to(marker.x, marker.y + reach);
            context.line_to(marker.x - half, marker.y);
            context.close_path();
        }
        MarkerShape::Triangle => {
            context.move_to(marker.x, marker.y - half);
            context.line_to(marker.x + half, marker.y + half);
            context.line_to(marker.x - half, marker.y + half);
            context.close_path();
        }
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
