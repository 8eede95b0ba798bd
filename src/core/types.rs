use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Closed data-space range of one axis, `lower` first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLimits {
    pub lower: f64,
    pub upper: f64,
}

impl AxisLimits {
    pub fn new(lower: f64, upper: f64) -> ChartResult<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(ChartError::InvalidData(
                "axis limits must be finite".to_owned(),
            ));
        }
        Ok(Self { lower, upper })
    }

    /// Limits of a categorical axis holding `count` rows at positions `0..count`.
    #[must_use]
    pub fn categorical(count: usize) -> Self {
        Self {
            lower: -0.5,
            upper: count as f64 - 0.5,
        }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.upper - self.lower
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        let (min, max) = if self.lower <= self.upper {
            (self.lower, self.upper)
        } else {
            (self.upper, self.lower)
        };
        (min..=max).contains(&value)
    }

    /// Expands the range by `ratio` of its span on both sides.
    ///
    /// A degenerate range grows by `ratio` of its magnitude instead (or by one
    /// unit around zero), so autoscaled single-value data stays drawable.
    #[must_use]
    pub fn with_margin(self, ratio: f64) -> Self {
        let span = self.span();
        let delta = if span.abs() > f64::EPSILON {
            span * ratio
        } else if self.lower != 0.0 {
            self.lower.abs() * ratio
        } else {
            1.0
        };
        Self {
            lower: self.lower - delta,
            upper: self.upper + delta,
        }
    }

    #[must_use]
    pub fn union_value(self, value: f64) -> Self {
        Self {
            lower: self.lower.min(value),
            upper: self.upper.max(value),
        }
    }
}
