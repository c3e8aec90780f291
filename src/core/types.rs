use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Relative spans at or below this are treated as zero-width.
pub const DEGENERATE_SPAN_EPSILON: f64 = f64::EPSILON;

/// Per-axis value mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Scaling {
    /// Uniform spacing in raw data units.
    #[default]
    Linear,
    /// Uniform spacing in `log10` units (all bounds must be > 0).
    Logarithmic,
}

/// Which pixel axis a mapping targets.
///
/// Vertical mappings are flipped because pixel-y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisOrientation {
    Horizontal,
    Vertical,
}

/// Closed data-space interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Creates a range, rejecting non-finite bounds and `min > max`.
    ///
    /// Zero-width ranges are accepted here; mapping code rejects them unless
    /// the caller widened them with [`Range::widened_if_degenerate`].
    pub fn new(min: f64, max: f64) -> PlotResult<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(PlotError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Scans finite values and returns their envelope, `None` when there are none.
    #[must_use]
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            if value.is_finite() {
                min = min.min(*value);
                max = max.max(*value);
            }
        }
        (min <= max).then_some(Self { min, max })
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Whether the range has no usable width for `scaling`.
    ///
    /// Linear ranges compare the span against the bound magnitudes, so tiny
    /// but distinct bounds stay usable. Positive log ranges compare in decades.
    #[must_use]
    pub fn is_degenerate(self, scaling: Scaling) -> bool {
        match scaling {
            Scaling::Logarithmic if self.min > 0.0 => {
                (self.max / self.min).log10() <= DEGENERATE_SPAN_EPSILON
            }
            _ => {
                let span = self.span().abs();
                span < f64::MIN_POSITIVE
                    || span <= DEGENERATE_SPAN_EPSILON * self.min.abs().max(self.max.abs())
            }
        }
    }

    /// Widens a zero-width range by `amount` on both sides.
    ///
    /// On a logarithmic axis the lower bound must stay positive, so the
    /// widening is multiplicative there (`min / 10^amount`, `max * 10^amount`).
    #[must_use]
    pub fn widened_if_degenerate(self, amount: f64, scaling: Scaling) -> Self {
        if !self.is_degenerate(scaling) {
            return self;
        }
        match scaling {
            Scaling::Linear => Self {
                min: self.min - amount,
                max: self.max + amount,
            },
            Scaling::Logarithmic => {
                let factor = 10f64.powf(amount);
                Self {
                    min: self.min / factor,
                    max: self.max * factor,
                }
            }
        }
    }

    /// Pads the range by fractions of its span (or of its decade span on log axes).
    #[must_use]
    pub fn padded(self, lower_ratio: f64, upper_ratio: f64, scaling: Scaling) -> Self {
        match scaling {
            Scaling::Linear => {
                let span = self.span();
                Self {
                    min: self.min - span * lower_ratio,
                    max: self.max + span * upper_ratio,
                }
            }
            Scaling::Logarithmic => {
                let log_min = self.min.log10();
                let log_max = self.max.log10();
                let span = log_max - log_min;
                Self {
                    min: 10f64.powf(log_min - span * lower_ratio),
                    max: 10f64.powf(log_max + span * upper_ratio),
                }
            }
        }
    }

    /// Checks the range is usable as a mapping domain for `scaling`.
    pub fn validate_for(self, scaling: Scaling) -> PlotResult<Self> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(PlotError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        if scaling == Scaling::Logarithmic && self.min <= 0.0 {
            return Err(PlotError::InvalidLogDomain {
                min: self.min,
                max: self.max,
            });
        }
        if self.is_degenerate(scaling) {
            return Err(PlotError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(self)
    }
}

/// Pixel rectangle the plot is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelArea {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelArea {
    #[must_use]
    pub fn new(origin_x: f64, origin_y: f64, width: f64, height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            height,
        }
    }

    /// Area anchored at `(0, 0)`.
    #[must_use]
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.origin_x.is_finite()
            && self.origin_y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    pub fn validate(self) -> PlotResult<Self> {
        if !self.is_valid() {
            return Err(PlotError::InvalidPixelArea {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn extent(self, orientation: AxisOrientation) -> f64 {
        match orientation {
            AxisOrientation::Horizontal => self.width,
            AxisOrientation::Vertical => self.height,
        }
    }
}

/// `(x, y)` pair used for both data points and pixel points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::{Range, Scaling};

    #[test]
    fn degenerate_linear_range_widens_by_amount() {
        let range = Range::new(5.0, 5.0).expect("range");
        let widened = range.widened_if_degenerate(1.0, Scaling::Linear);
        assert_eq!(widened, Range { min: 4.0, max: 6.0 });
    }

    #[test]
    fn degenerate_log_range_stays_positive() {
        let range = Range::new(0.5, 0.5).expect("range");
        let widened = range.widened_if_degenerate(1.0, Scaling::Logarithmic);
        assert!(widened.min > 0.0);
        assert!((widened.min - 0.05).abs() <= 1e-12);
        assert!((widened.max - 5.0).abs() <= 1e-12);
    }

    #[test]
    fn tiny_distinct_bounds_are_not_degenerate() {
        let linear = Range::new(1e-20, 2e-20).expect("range");
        assert!(!linear.is_degenerate(Scaling::Linear));
        assert_eq!(linear.widened_if_degenerate(1.0, Scaling::Linear), linear);

        let log = Range::new(1e-20, 1e-18).expect("range");
        assert!(!log.is_degenerate(Scaling::Logarithmic));
        assert!(Range::new(0.0, 0.0).expect("range").is_degenerate(Scaling::Linear));
        assert!(Range::new(3e-9, 3e-9).expect("range").is_degenerate(Scaling::Logarithmic));
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(Range::new(2.0, 1.0).is_err());
        assert!(Range::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn from_values_skips_non_finite() {
        let values = [f64::NAN, 3.0, -1.0, f64::INFINITY];
        let range = Range::from_values(values.iter()).expect("envelope");
        assert_eq!(range, Range { min: -1.0, max: 3.0 });
        assert!(Range::from_values([f64::NAN].iter()).is_none());
    }
}
