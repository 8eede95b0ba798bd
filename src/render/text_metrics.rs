use crate::error::ChartResult;
use crate::render::{FontSpec, FontWeight};

/// Rendered size of a run of text in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// Measures text the way a render backend lays it out.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> ChartResult<TextExtent>;
}

const MONOSPACE_ADVANCE_EM: f64 = 0.6;
const LINE_HEIGHT_EM: f64 = 1.2;

/// Deterministic, backend-independent glyph-advance estimate.
///
/// Monospace families get a fixed advance per character; other families use
/// a small per-glyph class table. Bold and heavy weights widen proportional
/// text slightly.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> ChartResult<TextExtent> {
        font.validate()?;
        let height = font.size_px * LINE_HEIGHT_EM;
        if text.is_empty() {
            return Ok(TextExtent { width: 0.0, height });
        }

        let units = if font.is_monospace() {
            text.chars().count() as f64 * MONOSPACE_ADVANCE_EM
        } else {
            let units = text.chars().fold(0.0, |acc, ch| {
                acc + match ch {
                    '0'..='9' => 0.62,
                    '.' | ',' | ':' | ';' | 'i' | 'l' | '|' => 0.30,
                    '-' | '+' | '%' | '(' | ')' => 0.42,
                    ' ' => 0.33,
                    'm' | 'w' | 'M' | 'W' => 0.86,
                    'A'..='Z' => 0.68,
                    _ => 0.56,
                }
            });
            units * weight_factor(font.weight)
        };

        Ok(TextExtent {
            width: units * font.size_px,
            height,
        })
    }
}

fn weight_factor(weight: FontWeight) -> f64 {
    match weight {
        FontWeight::Light => 0.96,
        FontWeight::Normal => 1.0,
        FontWeight::Bold => 1.07,
        FontWeight::Heavy => 1.12,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{EstimatedTextMeasurer, TextMeasurer};
    use crate::error::ChartError;
    use crate::render::{FontSpec, FontWeight};

    #[test]
    fn monospace_width_scales_with_char_count() {
        let font = FontSpec::new("monospace", 10.0, FontWeight::Normal);
        let short = EstimatedTextMeasurer.measure("ab", &font).expect("measure");
        let long = EstimatedTextMeasurer.measure("abcd", &font).expect("measure");
        assert_relative_eq!(short.width * 2.0, long.width);
        assert_relative_eq!(short.width, 12.0);
    }

    #[test]
    fn bold_widens_proportional_text_only() {
        let normal = FontSpec::new("sans-serif", 10.0, FontWeight::Normal);
        let bold = FontSpec::new("sans-serif", 10.0, FontWeight::Bold);
        let normal_width = EstimatedTextMeasurer.measure("Age", &normal).expect("measure");
        let bold_width = EstimatedTextMeasurer.measure("Age", &bold).expect("measure");
        assert!(bold_width.width > normal_width.width);

        let mono = FontSpec::new("monospace", 10.0, FontWeight::Bold);
        let mono_width = EstimatedTextMeasurer.measure("Age", &mono).expect("measure");
        assert_relative_eq!(mono_width.width, 18.0);
    }

    #[test]
    fn empty_text_has_zero_width() {
        let extent = EstimatedTextMeasurer
            .measure("", &FontSpec::default())
            .expect("measure");
        assert_eq!(extent.width, 0.0);
    }

    #[test]
    fn unmeasurable_font_size_propagates() {
        let font = FontSpec::new("monospace", 0.0, FontWeight::Normal);
        let err = EstimatedTextMeasurer
            .measure("x", &font)
            .expect_err("zero size must fail");
        assert!(matches!(err, ChartError::TextMeasurement(_)));
    }
}
