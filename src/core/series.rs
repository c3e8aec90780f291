use std::borrow::Cow;

use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::downsample::{
    DownsamplingMode, IndexSet, identity_indices, x_based_indices, xy_based_indices,
};
use crate::core::scale::ScaleTransform;
use crate::core::types::{PixelArea, Point2D, Range, Scaling};
use crate::error::{PlotError, PlotResult};

/// Inputs a pixel-point recompute depends on besides the series data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotView {
    pub range_x: Range,
    pub range_y: Range,
    pub scaling_x: Scaling,
    pub scaling_y: Scaling,
    pub area: PixelArea,
}

impl PlotView {
    #[must_use]
    pub fn new(range_x: Range, range_y: Range, area: PixelArea) -> Self {
        Self {
            range_x,
            range_y,
            scaling_x: Scaling::Linear,
            scaling_y: Scaling::Linear,
            area,
        }
    }

    #[must_use]
    pub fn with_scaling(mut self, scaling_x: Scaling, scaling_y: Scaling) -> Self {
        self.scaling_x = scaling_x;
        self.scaling_y = scaling_y;
        self
    }

    /// Whether the area has room for at least one pixel in both directions.
    #[must_use]
    pub fn has_drawable_area(self) -> bool {
        self.area.width > 0.0 && self.area.height > 0.0
    }

    /// Builds the `(x, y)` transforms for this view.
    pub fn transforms(self) -> PlotResult<(ScaleTransform, ScaleTransform)> {
        let area = self.area.validate()?;
        let x = ScaleTransform::horizontal(area, self.range_x, self.scaling_x)?;
        let y = ScaleTransform::vertical(area, self.range_y, self.scaling_y)?;
        Ok((x, y))
    }
}

/// One line series: raw x/y samples plus the derived render caches.
///
/// `indices` and `pixel_points` are caches. They are fully recomputable from
/// the data and the last [`PlotView`], and are rebuilt whenever either changes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesModel {
    x: Vec<f64>,
    y: Vec<f64>,
    x_based_indices: IndexSet,
    indices: IndexSet,
    pixel_points: Vec<Point2D>,
    dropped_samples: usize,
    last_view: Option<(PlotView, DownsamplingMode)>,
    stale: bool,
}

impl SeriesModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(x: Vec<f64>, y: Vec<f64>) -> PlotResult<Self> {
        let mut series = Self::new();
        series.set_data(x, y)?;
        Ok(series)
    }

    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Sample count, or `None` while x and y lengths disagree.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        (self.x.len() == self.y.len()).then_some(self.x.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty()
    }

    /// Rendered indices after the last recompute.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Stage-1 indices after the last recompute.
    #[must_use]
    pub fn x_based_indices(&self) -> &[usize] {
        &self.x_based_indices
    }

    /// Pixel points after the last recompute, one per rendered index.
    #[must_use]
    pub fn pixel_points(&self) -> &[Point2D] {
        &self.pixel_points
    }

    /// Samples removed from the last recompute because they cannot be mapped.
    #[must_use]
    pub fn dropped_samples(&self) -> usize {
        self.dropped_samples
    }

    /// `true` when data changed since the caches were last rebuilt.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    #[must_use]
    pub fn last_view(&self) -> Option<(PlotView, DownsamplingMode)> {
        self.last_view
    }

    /// Replaces the x sequence.
    ///
    /// Caches are rebuilt against the last view when y already has a matching
    /// length; otherwise they stay stale until the lengths agree again. If the
    /// rebuild fails the previous x sequence is restored.
    pub fn set_x(&mut self, x: Vec<f64>) -> PlotResult<()> {
        let previous = std::mem::replace(&mut self.x, x);
        self.refresh_or_restore(Some(previous), None)
    }

    /// Replaces the y sequence. See [`SeriesModel::set_x`].
    pub fn set_y(&mut self, y: Vec<f64>) -> PlotResult<()> {
        let previous = std::mem::replace(&mut self.y, y);
        self.refresh_or_restore(None, Some(previous))
    }

    /// Replaces both sequences at once, rejecting mismatched lengths.
    pub fn set_data(&mut self, x: Vec<f64>, y: Vec<f64>) -> PlotResult<()> {
        if x.len() != y.len() {
            return Err(PlotError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        let previous_x = std::mem::replace(&mut self.x, x);
        let previous_y = std::mem::replace(&mut self.y, y);
        self.refresh_or_restore(Some(previous_x), Some(previous_y))
    }

    /// Appends one sample for streaming updates.
    pub fn append_sample(&mut self, x: f64, y: f64) -> PlotResult<()> {
        if self.x.len() != self.y.len() {
            return Err(PlotError::LengthMismatch {
                x_len: self.x.len(),
                y_len: self.y.len(),
            });
        }
        self.x.push(x);
        self.y.push(y);
        let stale = self.stale;
        if let Err(error) = self.refresh_after_data_change() {
            self.x.pop();
            self.y.pop();
            self.stale = stale;
            return Err(error);
        }
        Ok(())
    }

    /// Rebuilds indices and pixel points for `view`.
    ///
    /// X pixel coordinates are computed first, then y, and the two are merged
    /// positionally. Samples that cannot be mapped (non-finite values, or
    /// non-positive values on a logarithmic axis) are removed from the index
    /// set so every index keeps exactly one pixel point. Nothing is modified
    /// when an error is returned.
    pub fn recompute_pixel_points(
        &mut self,
        view: PlotView,
        mode: DownsamplingMode,
    ) -> PlotResult<&[Point2D]> {
        if self.x.len() != self.y.len() {
            return Err(PlotError::LengthMismatch {
                x_len: self.x.len(),
                y_len: self.y.len(),
            });
        }
        view.area.validate()?;

        if self.x.is_empty() || !view.has_drawable_area() {
            self.commit(IndexSet::new(), IndexSet::new(), Vec::new(), 0, view, mode);
            return Ok(&self.pixel_points);
        }

        let (x_transform, y_transform) = view.transforms()?;
        let x_based = match mode {
            DownsamplingMode::None => identity_indices(self.x.len()),
            DownsamplingMode::XBased | DownsamplingMode::XyBased => {
                x_based_indices(&self.x, view.range_x, view.scaling_x, view.area.width)?
            }
        };
        let mut indices = match mode {
            DownsamplingMode::XyBased => {
                let y = representable_values(&self.y, y_transform);
                xy_based_indices(&x_based, &y)?
            }
            DownsamplingMode::None | DownsamplingMode::XBased => x_based.clone(),
        };

        let before = indices.len();
        indices.retain(|&index| {
            x_transform.is_representable(self.x[index]) && y_transform.is_representable(self.y[index])
        });
        let dropped = before - indices.len();

        let xs = project_axis(&indices, &self.x, x_transform, view.area.origin_x);
        let ys = project_axis(&indices, &self.y, y_transform, view.area.origin_y);
        let points = xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| Point2D::new(x, y))
            .collect();

        self.commit(x_based, indices, points, dropped, view, mode);
        Ok(&self.pixel_points)
    }

    /// Closed pixel outline between this series and `other`.
    ///
    /// This series' points run forward, `other`'s run backward, so the result
    /// can be filled directly as a spread band. Empty when either side has no
    /// points.
    #[must_use]
    pub fn fill_polygon(&self, other: &SeriesModel) -> Vec<Point2D> {
        if self.pixel_points.is_empty() || other.pixel_points.is_empty() {
            return Vec::new();
        }
        let mut polygon = Vec::with_capacity(self.pixel_points.len() + other.pixel_points.len());
        polygon.extend_from_slice(&self.pixel_points);
        polygon.extend(other.pixel_points.iter().rev().copied());
        polygon
    }

    fn refresh_or_restore(
        &mut self,
        previous_x: Option<Vec<f64>>,
        previous_y: Option<Vec<f64>>,
    ) -> PlotResult<()> {
        let stale = self.stale;
        let Err(error) = self.refresh_after_data_change() else {
            return Ok(());
        };
        if let Some(x) = previous_x {
            self.x = x;
        }
        if let Some(y) = previous_y {
            self.y = y;
        }
        self.stale = stale;
        Err(error)
    }

    fn refresh_after_data_change(&mut self) -> PlotResult<()> {
        self.stale = true;
        match self.last_view {
            Some((view, mode)) if self.x.len() == self.y.len() => {
                self.recompute_pixel_points(view, mode)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn commit(
        &mut self,
        x_based: IndexSet,
        indices: IndexSet,
        points: Vec<Point2D>,
        dropped: usize,
        view: PlotView,
        mode: DownsamplingMode,
    ) {
        self.x_based_indices = x_based;
        self.indices = indices;
        self.pixel_points = points;
        self.dropped_samples = dropped;
        self.last_view = Some((view, mode));
        self.stale = false;
    }
}

/// `values` with samples the transform cannot map replaced by NaN, so column
/// extremes are only picked among drawable samples.
fn representable_values(values: &[f64], transform: ScaleTransform) -> Cow<'_, [f64]> {
    if values.iter().all(|value| transform.is_representable(*value)) {
        return Cow::Borrowed(values);
    }
    Cow::Owned(
        values
            .iter()
            .map(|&value| {
                if transform.is_representable(value) {
                    value
                } else {
                    f64::NAN
                }
            })
            .collect(),
    )
}

fn project_axis(indices: &[usize], values: &[f64], transform: ScaleTransform, origin: f64) -> Vec<f64> {
    // Large index sets may be mapped in parallel; output order is unchanged.
    #[cfg(feature = "parallel-projection")]
    {
        indices
            .par_iter()
            .map(|&index| origin + transform.data_to_pixel(values[index]))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        indices
            .iter()
            .map(|&index| origin + transform.data_to_pixel(values[index]))
            .collect()
    }
}
