use serde::{Deserialize, Serialize};

/// Paint layers of one forest plot, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    /// Row shading bands.
    Background,
    /// Intervals, markers and the reference line.
    Series,
    /// Text placed in data space next to the rows.
    Annotation,
    /// Spines, tick marks, tick labels and axis titles.
    Axis,
}

impl CanvasLayerKind {
    pub const CANONICAL_ORDER: [Self; 4] = [
        Self::Background,
        Self::Series,
        Self::Annotation,
        Self::Axis,
    ];
}

#[cfg(test)]
mod tests {
    use super::CanvasLayerKind;

    #[test]
    fn row_shading_is_painted_first() {
        assert_eq!(
            CanvasLayerKind::CANONICAL_ORDER.first(),
            Some(&CanvasLayerKind::Background)
        );
        assert_eq!(
            CanvasLayerKind::CANONICAL_ORDER.last(),
            Some(&CanvasLayerKind::Axis)
        );
    }
}
