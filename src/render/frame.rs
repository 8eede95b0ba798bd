use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{LinePrimitive, MarkerPrimitive, RectPrimitive, TextPrimitive};

/// Number of primitives of each kind in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrimitiveCounts {
    pub lines: usize,
    pub rects: usize,
    pub markers: usize,
    pub texts: usize,
}

/// Pixel-space forest plot scene handed to a `Renderer`.
///
/// Paint order is fixed: row bands, then lines, markers and finally text.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub markers: Vec<MarkerPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            lines: Vec::new(),
            rects: Vec::new(),
            markers: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn counts(&self) -> PrimitiveCounts {
        PrimitiveCounts {
            lines: self.lines.len(),
            rects: self.rects.len(),
            markers: self.markers.len(),
            texts: self.texts.len(),
        }
    }

    /// Checks the viewport and every primitive; errors name the offending one.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let with_context = |kind: &str, index: usize, err: ChartError| match err {
            ChartError::InvalidData(message) => {
                ChartError::InvalidData(format!("{kind} #{index}: {message}"))
            }
            other => other,
        };
        for (index, rect) in self.rects.iter().enumerate() {
            rect.validate().map_err(|err| with_context("band", index, err))?;
        }
        for (index, line) in self.lines.iter().enumerate() {
            line.validate().map_err(|err| with_context("line", index, err))?;
        }
        for (index, marker) in self.markers.iter().enumerate() {
            marker
                .validate()
                .map_err(|err| with_context("marker", index, err))?;
        }
        for (index, text) in self.texts.iter().enumerate() {
            text.validate().map_err(|err| with_context("text", index, err))?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts() == PrimitiveCounts::default()
    }
}
