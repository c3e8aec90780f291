use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{AxisOrientation, PixelArea, Range, Scaling, TickDensityPolicy, TickGenerator};
use crate::error::PlotResult;

/// Identifies one of the two plot axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlotAxis {
    X,
    Y,
}

impl PlotAxis {
    #[must_use]
    pub fn orientation(self) -> AxisOrientation {
        match self {
            Self::X => AxisOrientation::Horizontal,
            Self::Y => AxisOrientation::Vertical,
        }
    }

    #[must_use]
    pub fn extent(self, area: PixelArea) -> f64 {
        area.extent(self.orientation())
    }

    #[must_use]
    pub fn origin(self, area: PixelArea) -> f64 {
        match self {
            Self::X => area.origin_x,
            Self::Y => area.origin_y,
        }
    }
}

/// Visible range, scaling and tick continuity for one axis.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct AxisState {
    pub(super) range: Range,
    pub(super) scaling: Scaling,
    pub(super) ticks: TickGenerator,
}

impl AxisState {
    pub(super) fn new(
        axis: PlotAxis,
        range: Range,
        scaling: Scaling,
        policy: TickDensityPolicy,
        widening: f64,
    ) -> PlotResult<Self> {
        let range = resolve_range(axis, range, scaling, widening)?;
        Ok(Self {
            range,
            scaling,
            ticks: TickGenerator::new(policy)?,
        })
    }
}

/// Validates `range` for `scaling`, widening a zero-width range first.
///
/// The widening is a caller-visible policy and is reported with `warn!`.
pub(super) fn resolve_range(
    axis: PlotAxis,
    range: Range,
    scaling: Scaling,
    widening: f64,
) -> PlotResult<Range> {
    let range = Range::new(range.min, range.max)?;
    let resolved = range.widened_if_degenerate(widening, scaling);
    if resolved != range {
        warn!(
            ?axis,
            min = range.min,
            max = range.max,
            widened_min = resolved.min,
            widened_max = resolved.max,
            "widened zero-width visible range"
        );
    }
    resolved.validate_for(scaling)
}
