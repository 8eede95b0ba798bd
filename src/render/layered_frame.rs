use crate::core::Viewport;

use super::{
    CanvasLayerKind, LinePrimitive, MarkerPrimitive, RectPrimitive, RenderFrame, TextPrimitive,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub markers: Vec<MarkerPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    fn empty(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            rects: Vec::new(),
            markers: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.rects.is_empty()
            && self.markers.is_empty()
            && self.texts.is_empty()
    }

    fn append_to(&self, frame: &mut RenderFrame) {
        frame.lines.extend_from_slice(&self.lines);
        frame.rects.extend_from_slice(&self.rects);
        frame.markers.extend_from_slice(&self.markers);
        frame.texts.extend_from_slice(&self.texts);
    }
}

/// Pixel-space scene split by paint layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredRenderFrame {
    pub viewport: Viewport,
    pub layers: Vec<LayerPrimitives>,
}

impl LayeredRenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layers: CanvasLayerKind::CANONICAL_ORDER
                .into_iter()
                .map(LayerPrimitives::empty)
                .collect(),
        }
    }

    pub fn push_line(&mut self, kind: CanvasLayerKind, line: LinePrimitive) {
        self.layer_mut(kind).lines.push(line);
    }

    pub fn push_rect(&mut self, kind: CanvasLayerKind, rect: RectPrimitive) {
        self.layer_mut(kind).rects.push(rect);
    }

    pub fn push_marker(&mut self, kind: CanvasLayerKind, marker: MarkerPrimitive) {
        self.layer_mut(kind).markers.push(marker);
    }

    pub fn push_text(&mut self, kind: CanvasLayerKind, text: TextPrimitive) {
        self.layer_mut(kind).texts.push(text);
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    /// Collapses layers into one frame, preserving back-to-front order.
    #[must_use]
    pub fn flatten(&self) -> RenderFrame {
        self.flatten_layers(&CanvasLayerKind::CANONICAL_ORDER)
    }

    #[must_use]
    pub fn flatten_layers(&self, include_layers: &[CanvasLayerKind]) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        for layer in &self.layers {
            if !include_layers.contains(&layer.kind) {
                continue;
            }
            layer.append_to(&mut frame);
        }
        frame
    }

    fn layer_mut(&mut self, kind: CanvasLayerKind) -> &mut LayerPrimitives {
        let position = match self.layers.iter().position(|layer| layer.kind == kind) {
            Some(position) => position,
            None => {
                self.layers.push(LayerPrimitives::empty(kind));
                self.layers.len() - 1
            }
        };
        &mut self.layers[position]
    }
}

#[cfg(test)]
mod tests {
    use super::LayeredRenderFrame;
    use crate::core::Viewport;
    use crate::render::{CanvasLayerKind, Color, LinePrimitive, RectPrimitive};

    #[test]
    fn flatten_keeps_only_requested_layers() {
        let mut frame = LayeredRenderFrame::new(Viewport::new(100, 50));
        frame.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(0.0, 0.0, 10.0, 0.0, 1.0, Color::BLACK),
        );
        frame.push_rect(
            CanvasLayerKind::Background,
            RectPrimitive::new(0.0, 10.0, 100.0, 5.0, Color::BLACK.with_alpha(0.1)),
        );

        let all = frame.flatten();
        assert_eq!(all.counts().lines, 1);
        assert_eq!(all.counts().rects, 1);

        let bands_only = frame.flatten_layers(&[CanvasLayerKind::Background]);
        assert!(bands_only.lines.is_empty());
        assert_eq!(bands_only.rects.len(), 1);
        assert!(frame.layer(CanvasLayerKind::Series).is_some_and(|layer| layer.is_empty()));
    }
}
