use serde::{Deserialize, Serialize};

use crate::core::types::{AxisOrientation, PixelArea, Range, Scaling};
use crate::error::{PlotError, PlotResult};

/// Affine mapping between one data axis and one pixel extent.
///
/// Forward: `pixel = t(value) * scale - offset`, where `t` is the identity for
/// linear axes and `log10` for logarithmic axes.
/// Inverse: `value = t⁻¹((pixel + offset) / scale)`.
///
/// Horizontal transforms map `min` to pixel `0` and `max` to `extent`.
/// Vertical transforms carry a negative `scale` so `max` lands on pixel `0`
/// and `min` on `extent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleTransform {
    scaling: Scaling,
    orientation: AxisOrientation,
    scale: f64,
    offset: f64,
    extent: f64,
}

impl ScaleTransform {
    pub fn new(
        extent: f64,
        range: Range,
        scaling: Scaling,
        orientation: AxisOrientation,
    ) -> PlotResult<Self> {
        if !extent.is_finite() || extent <= 0.0 {
            let (width, height) = match orientation {
                AxisOrientation::Horizontal => (extent, 0.0),
                AxisOrientation::Vertical => (0.0, extent),
            };
            return Err(PlotError::InvalidPixelArea { width, height });
        }
        let range = range.validate_for(scaling)?;

        let t_min = transform_value(range.min, scaling);
        let t_max = transform_value(range.max, scaling);
        let magnitude = extent / (t_max - t_min);
        let (scale, offset) = match orientation {
            AxisOrientation::Horizontal => (magnitude, t_min * magnitude),
            AxisOrientation::Vertical => (-magnitude, -(t_max * magnitude)),
        };

        Ok(Self {
            scaling,
            orientation,
            scale,
            offset,
            extent,
        })
    }

    /// Builds the x-axis transform for a pixel area.
    pub fn horizontal(area: PixelArea, range: Range, scaling: Scaling) -> PlotResult<Self> {
        Self::new(area.width, range, scaling, AxisOrientation::Horizontal)
    }

    /// Builds the y-axis transform for a pixel area.
    pub fn vertical(area: PixelArea, range: Range, scaling: Scaling) -> PlotResult<Self> {
        Self::new(area.height, range, scaling, AxisOrientation::Vertical)
    }

    #[must_use]
    pub fn scale(self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn offset(self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn scaling(self) -> Scaling {
        self.scaling
    }

    #[must_use]
    pub fn orientation(self) -> AxisOrientation {
        self.orientation
    }

    #[must_use]
    pub fn extent(self) -> f64 {
        self.extent
    }

    /// Width of one pixel in transformed units (data units or decades).
    #[must_use]
    pub fn transformed_units_per_pixel(self) -> f64 {
        1.0 / self.scale.abs()
    }

    /// Maps a data value to a pixel offset along the axis.
    ///
    /// Non-positive values on a logarithmic axis yield a non-finite pixel;
    /// use [`ScaleTransform::try_data_to_pixel`] when the input is untrusted.
    #[must_use]
    pub fn data_to_pixel(self, value: f64) -> f64 {
        transform_value(value, self.scaling) * self.scale - self.offset
    }

    /// Maps a pixel offset along the axis back to a data value.
    #[must_use]
    pub fn pixel_to_data(self, pixel: f64) -> f64 {
        inverse_transform_value((pixel + self.offset) / self.scale, self.scaling)
    }

    pub fn try_data_to_pixel(self, value: f64) -> PlotResult<f64> {
        if !value.is_finite() {
            return Err(PlotError::InvalidData("value must be finite".to_owned()));
        }
        if self.scaling == Scaling::Logarithmic && value <= 0.0 {
            return Err(PlotError::InvalidLogDomain {
                min: value,
                max: value,
            });
        }
        Ok(self.data_to_pixel(value))
    }

    pub fn try_pixel_to_data(self, pixel: f64) -> PlotResult<f64> {
        if !pixel.is_finite() {
            return Err(PlotError::InvalidData("pixel must be finite".to_owned()));
        }
        Ok(self.pixel_to_data(pixel))
    }

    /// Returns the data range currently mapped onto `[0, extent]`.
    #[must_use]
    pub fn visible_range(self) -> Range {
        let a = self.pixel_to_data(0.0);
        let b = self.pixel_to_data(self.extent);
        Range {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Whether `value` can be placed on this axis at all.
    #[must_use]
    pub fn is_representable(self, value: f64) -> bool {
        value.is_finite() && (self.scaling == Scaling::Linear || value > 0.0)
    }
}

/// Applies the axis transform `t` to a raw value.
#[must_use]
pub fn transform_value(value: f64, scaling: Scaling) -> f64 {
    match scaling {
        Scaling::Linear => value,
        Scaling::Logarithmic => value.log10(),
    }
}

/// Inverse of [`transform_value`].
#[must_use]
pub fn inverse_transform_value(transformed: f64, scaling: Scaling) -> f64 {
    match scaling {
        Scaling::Linear => transformed,
        Scaling::Logarithmic => 10f64.powf(transformed),
    }
}
