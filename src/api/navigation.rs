use tracing::debug;

use crate::core::{Point2D, Range, inverse_transform_value, transform_value};
use crate::error::{PlotError, PlotResult};

use super::PlotEngine;
use super::axis_state::PlotAxis;

impl PlotEngine {
    /// Pans both axes by a pointer drag of `(dx, dy)` pixels.
    ///
    /// Content follows the pointer: dragging right reveals smaller x values,
    /// dragging down reveals larger y values. Log axes pan by a constant
    /// number of decades per pixel.
    pub fn pan_by_pixels(&mut self, dx: f64, dy: f64) -> PlotResult<()> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(PlotError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }

        let x = self.panned_range(PlotAxis::X, dx)?;
        let y = self.panned_range(PlotAxis::Y, dy)?;
        self.x_axis.range = x;
        self.y_axis.range = y;
        debug!(dx, dy, x_min = x.min, x_max = x.max, y_min = y.min, y_max = y.max, "pan");
        self.recompute()
    }

    /// Zooms both axes around an absolute pixel anchor.
    ///
    /// `factor > 1.0` zooms in, `0.0 < factor < 1.0` zooms out. The data value
    /// under the anchor stays under the anchor.
    pub fn zoom_about_pixel(&mut self, anchor: Point2D, factor: f64) -> PlotResult<()> {
        let x = self.zoomed_range(PlotAxis::X, anchor.x, factor)?;
        let y = self.zoomed_range(PlotAxis::Y, anchor.y, factor)?;
        self.x_axis.range = x;
        self.y_axis.range = y;
        debug!(anchor_x = anchor.x, anchor_y = anchor.y, factor, "zoom");
        self.recompute()
    }

    /// Zooms a single axis around an absolute pixel coordinate on that axis.
    pub fn zoom_axis_about_pixel(
        &mut self,
        axis: PlotAxis,
        anchor_px: f64,
        factor: f64,
    ) -> PlotResult<()> {
        let range = self.zoomed_range(axis, anchor_px, factor)?;
        self.axis_mut(axis).range = range;
        debug!(?axis, anchor_px, factor, min = range.min, max = range.max, "zoom axis");
        self.recompute()
    }

    fn panned_range(&self, axis: PlotAxis, delta_px: f64) -> PlotResult<Range> {
        if delta_px == 0.0 {
            return Ok(self.axis(axis).range);
        }
        let transform = self.transform(axis)?;
        let a = transform.pixel_to_data(-delta_px);
        let b = transform.pixel_to_data(transform.extent() - delta_px);
        Range::new(a.min(b), a.max(b))?.validate_for(transform.scaling())
    }

    fn zoomed_range(&self, axis: PlotAxis, anchor_px: f64, factor: f64) -> PlotResult<Range> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PlotError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        if !anchor_px.is_finite() {
            return Err(PlotError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }

        let transform = self.transform(axis)?;
        let scaling = transform.scaling();
        let state = self.axis(axis);
        let anchor = transform_value(
            transform.pixel_to_data(anchor_px - axis.origin(self.pixel_area)),
            scaling,
        );
        let t_min = transform_value(state.range.min, scaling);
        let t_max = transform_value(state.range.max, scaling);

        let min = inverse_transform_value(anchor - (anchor - t_min) / factor, scaling);
        let max = inverse_transform_value(anchor + (t_max - anchor) / factor, scaling);
        Range::new(min, max)?.validate_for(scaling)
    }
}
