use crate::core::types::AxisLimits;
use crate::error::{ChartError, ChartResult};

/// Affine mapping from a data-space domain to a pixel range.
///
/// The pixel range may be inverted (`pixel_start > pixel_end`), which is how
/// the categorical y axis maps row 0 to the bottom of the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(domain: AxisLimits, pixel_start: f64, pixel_end: f64) -> ChartResult<Self> {
        let (domain_start, domain_end) = (domain.lower, domain.upper);
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale pixel range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            pixel_start,
            pixel_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(self.pixel_start + normalized * (self.pixel_end - self.pixel_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let pixel_span = self.pixel_end - self.pixel_start;
        if pixel_span == 0.0 {
            return Err(ChartError::InvalidData(
                "scale pixel range must be non-zero".to_owned(),
            ));
        }

        let normalized = (pixel - self.pixel_start) / pixel_span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}

#[cfg(test)]
mod tests {
    use super::LinearScale;
    use crate::core::AxisLimits;

    #[test]
    fn inverted_pixel_range_maps_first_row_to_bottom() {
        let scale =
            LinearScale::new(AxisLimits::categorical(4), 400.0, 0.0).expect("valid scale");
        assert_eq!(scale.domain_to_pixel(-0.5).expect("pixel"), 400.0);
        assert_eq!(scale.domain_to_pixel(3.5).expect("pixel"), 0.0);
        assert_eq!(scale.pixel_to_domain(200.0).expect("domain"), 1.5);
    }

    #[test]
    fn zero_width_domain_is_rejected() {
        let limits = AxisLimits::new(2.0, 2.0).expect("finite limits");
        assert!(LinearScale::new(limits, 0.0, 100.0).is_err());
    }
}
