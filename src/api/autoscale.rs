use tracing::debug;

use crate::core::{Range, Scaling, transform_value};
use crate::error::{PlotError, PlotResult};

use super::PlotEngine;
use super::axis_state::{PlotAxis, resolve_range};

impl PlotEngine {
    /// Fits both visible ranges to the data of every series.
    ///
    /// Only values that can be mapped on the axis take part (finite, and
    /// positive on log axes). The fitted extent is padded by the autoscale
    /// ratios and widened when it collapses to a single value.
    pub fn fit_ranges_to_data(&mut self) -> PlotResult<()> {
        let x = self.fitted_range(PlotAxis::X)?;
        let y = self.fitted_range(PlotAxis::Y)?;
        self.x_axis.range = x;
        self.y_axis.range = y;
        self.recompute()
    }

    pub fn fit_x_to_data(&mut self) -> PlotResult<()> {
        self.fit_axis_to_data(PlotAxis::X)
    }

    pub fn fit_y_to_data(&mut self) -> PlotResult<()> {
        self.fit_axis_to_data(PlotAxis::Y)
    }

    pub fn fit_axis_to_data(&mut self, axis: PlotAxis) -> PlotResult<()> {
        let range = self.fitted_range(axis)?;
        self.axis_mut(axis).range = range;
        self.recompute()
    }

    fn fitted_range(&self, axis: PlotAxis) -> PlotResult<Range> {
        let scaling = self.axis(axis).scaling;
        let raw = self
            .series
            .iter()
            .flat_map(|entry| match axis {
                PlotAxis::X => entry.model.x(),
                PlotAxis::Y => entry.model.y(),
            })
            .filter(|&&value| transform_value(value, scaling).is_finite());
        let Some(extent) = Range::from_values(raw) else {
            return Err(PlotError::InvalidData(format!(
                "no {} values can be mapped on a {} axis",
                axis_name(axis),
                scaling_name(scaling)
            )));
        };

        let tuning = self.autoscale;
        let padded = if extent.is_degenerate(scaling) {
            extent
        } else {
            extent.padded(tuning.lower_padding_ratio, tuning.upper_padding_ratio, scaling)
        };
        let fitted = resolve_range(axis, padded, scaling, tuning.degenerate_widening)?;
        debug!(
            ?axis,
            data_min = extent.min,
            data_max = extent.max,
            min = fitted.min,
            max = fitted.max,
            "fit axis range to data"
        );
        Ok(fitted)
    }
}

fn axis_name(axis: PlotAxis) -> &'static str {
    match axis {
        PlotAxis::X => "x",
        PlotAxis::Y => "y",
    }
}

fn scaling_name(scaling: Scaling) -> &'static str {
    match scaling {
        Scaling::Linear => "linear",
        Scaling::Logarithmic => "logarithmic",
    }
}
