use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::{
    DownsamplingMode, GridLine, PixelArea, PlotView, Point2D, Range, ScaleTransform, Scaling,
    SeriesModel, TickDensityPolicy, TickGenerator, TickState, grid_lines,
};
use crate::error::{PlotError, PlotResult};

use super::axis_state::{AxisState, PlotAxis, resolve_range};
use super::{AutoscaleTuning, PlotEngineConfig};

/// One series registered with the engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotSeries {
    pub(super) model: SeriesModel,
    pub(super) fill_target: Option<usize>,
    pub(super) metadata: IndexMap<String, String>,
}

impl PlotSeries {
    #[must_use]
    pub fn model(&self) -> &SeriesModel {
        &self.model
    }

    /// Series this one is filled against, if any.
    #[must_use]
    pub fn fill_target(&self) -> Option<usize> {
        self.fill_target
    }

    /// Insertion-ordered host metadata (name, unit, ...).
    #[must_use]
    pub fn metadata(&self) -> &IndexMap<String, String> {
        &self.metadata
    }
}

/// Single-plot orchestration facade consumed by host applications.
///
/// `PlotEngine` owns the pixel area, both axes (visible range, scaling, tick
/// continuity) and every series. Any change to data, ranges, scalings or the
/// area rebuilds the series caches before returning, so `pixel_points` are
/// always consistent with the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotEngine {
    pub(super) pixel_area: PixelArea,
    pub(super) x_axis: AxisState,
    pub(super) y_axis: AxisState,
    pub(super) downsampling_mode: DownsamplingMode,
    pub(super) autoscale: AutoscaleTuning,
    pub(super) series: Vec<PlotSeries>,
}

impl PlotEngine {
    pub fn new(config: PlotEngineConfig) -> PlotResult<Self> {
        let pixel_area = config.pixel_area.validate()?;
        let autoscale = config.autoscale.validate()?;
        let policy = config.tick_density.validate()?;
        let x_axis = AxisState::new(
            PlotAxis::X,
            config.x_range,
            config.x_scaling,
            policy,
            autoscale.degenerate_widening,
        )?;
        let y_axis = AxisState::new(
            PlotAxis::Y,
            config.y_range,
            config.y_scaling,
            policy,
            autoscale.degenerate_widening,
        )?;

        Ok(Self {
            pixel_area,
            x_axis,
            y_axis,
            downsampling_mode: config.downsampling_mode,
            autoscale,
            series: Vec::new(),
        })
    }

    #[must_use]
    pub fn pixel_area(&self) -> PixelArea {
        self.pixel_area
    }

    pub fn set_pixel_area(&mut self, area: PixelArea) -> PlotResult<()> {
        self.pixel_area = area.validate()?;
        self.recompute()
    }

    #[must_use]
    pub fn range(&self, axis: PlotAxis) -> Range {
        self.axis(axis).range
    }

    #[must_use]
    pub fn x_range(&self) -> Range {
        self.x_axis.range
    }

    #[must_use]
    pub fn y_range(&self) -> Range {
        self.y_axis.range
    }

    /// Sets the visible range of one axis.
    ///
    /// Zero-width ranges are widened by the autoscale widening amount;
    /// inverted, non-finite or (on log axes) non-positive ranges are rejected.
    pub fn set_range(&mut self, axis: PlotAxis, min: f64, max: f64) -> PlotResult<()> {
        let widening = self.autoscale.degenerate_widening;
        let state = self.axis(axis);
        let range = resolve_range(axis, Range { min, max }, state.scaling, widening)?;
        self.axis_mut(axis).range = range;
        self.recompute()
    }

    pub fn set_x_range(&mut self, min: f64, max: f64) -> PlotResult<()> {
        self.set_range(PlotAxis::X, min, max)
    }

    pub fn set_y_range(&mut self, min: f64, max: f64) -> PlotResult<()> {
        self.set_range(PlotAxis::Y, min, max)
    }

    #[must_use]
    pub fn scaling(&self, axis: PlotAxis) -> Scaling {
        self.axis(axis).scaling
    }

    /// Switches an axis between linear and logarithmic mapping.
    ///
    /// The current range must be valid for the new scaling. Tick continuity
    /// history is dropped because it belongs to the old mapping.
    pub fn set_scaling(&mut self, axis: PlotAxis, scaling: Scaling) -> PlotResult<()> {
        let state = self.axis(axis);
        if state.scaling == scaling {
            return Ok(());
        }
        state.range.validate_for(scaling)?;
        let state = self.axis_mut(axis);
        state.scaling = scaling;
        state.ticks.reset();
        debug!(?axis, ?scaling, "axis scaling changed");
        self.recompute()
    }

    pub fn set_x_scaling(&mut self, scaling: Scaling) -> PlotResult<()> {
        self.set_scaling(PlotAxis::X, scaling)
    }

    pub fn set_y_scaling(&mut self, scaling: Scaling) -> PlotResult<()> {
        self.set_scaling(PlotAxis::Y, scaling)
    }

    #[must_use]
    pub fn downsampling_mode(&self) -> DownsamplingMode {
        self.downsampling_mode
    }

    pub fn set_downsampling_mode(&mut self, mode: DownsamplingMode) -> PlotResult<()> {
        self.downsampling_mode = mode;
        self.recompute()
    }

    #[must_use]
    pub fn autoscale_tuning(&self) -> AutoscaleTuning {
        self.autoscale
    }

    pub fn set_autoscale_tuning(&mut self, tuning: AutoscaleTuning) -> PlotResult<()> {
        self.autoscale = tuning.validate()?;
        Ok(())
    }

    pub fn set_tick_density(&mut self, policy: TickDensityPolicy) -> PlotResult<()> {
        self.x_axis.ticks.set_policy(policy)?;
        self.y_axis.ticks.set_policy(policy)
    }

    /// Current inputs of a pixel-point recompute.
    #[must_use]
    pub fn view(&self) -> PlotView {
        PlotView {
            range_x: self.x_axis.range,
            range_y: self.y_axis.range,
            scaling_x: self.x_axis.scaling,
            scaling_y: self.y_axis.scaling,
            area: self.pixel_area,
        }
    }

    /// Coordinate mapping for one axis, relative to the area origin.
    pub fn transform(&self, axis: PlotAxis) -> PlotResult<ScaleTransform> {
        let state = self.axis(axis);
        ScaleTransform::new(
            axis.extent(self.pixel_area),
            state.range,
            state.scaling,
            axis.orientation(),
        )
    }

    pub fn x_transform(&self) -> PlotResult<ScaleTransform> {
        self.transform(PlotAxis::X)
    }

    pub fn y_transform(&self) -> PlotResult<ScaleTransform> {
        self.transform(PlotAxis::Y)
    }

    /// Maps a data point to absolute pixel space.
    pub fn data_to_pixel(&self, point: Point2D) -> PlotResult<Point2D> {
        let x = self.x_transform()?.try_data_to_pixel(point.x)?;
        let y = self.y_transform()?.try_data_to_pixel(point.y)?;
        Ok(Point2D::new(
            self.pixel_area.origin_x + x,
            self.pixel_area.origin_y + y,
        ))
    }

    /// Maps an absolute pixel position back to data space.
    pub fn pixel_to_data(&self, pixel: Point2D) -> PlotResult<Point2D> {
        let x = self
            .x_transform()?
            .try_pixel_to_data(pixel.x - self.pixel_area.origin_x)?;
        let y = self
            .y_transform()?
            .try_pixel_to_data(pixel.y - self.pixel_area.origin_y)?;
        Ok(Point2D::new(x, y))
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn series(&self, index: usize) -> PlotResult<&PlotSeries> {
        self.series.get(index).ok_or(PlotError::IndexOutOfRange {
            index,
            len: self.series.len(),
        })
    }

    /// Registers an empty series and returns its position.
    pub fn add_series(&mut self) -> usize {
        self.series.push(PlotSeries::default());
        self.series.len() - 1
    }

    /// Registers a series with data and returns its position.
    pub fn add_series_with_data(&mut self, x: Vec<f64>, y: Vec<f64>) -> PlotResult<usize> {
        let mut model = SeriesModel::from_data(x, y)?;
        model.recompute_pixel_points(self.view(), self.downsampling_mode)?;
        debug!(
            index = self.series.len(),
            samples = model.x().len(),
            rendered = model.indices().len(),
            "add series"
        );
        self.series.push(PlotSeries {
            model,
            ..PlotSeries::default()
        });
        Ok(self.series.len() - 1)
    }

    /// Replaces one series' data and rebuilds its caches.
    pub fn set_series_data(&mut self, index: usize, x: Vec<f64>, y: Vec<f64>) -> PlotResult<()> {
        let view = self.view();
        let mode = self.downsampling_mode;
        let entry = self.series_mut(index)?;
        let mut model = SeriesModel::from_data(x, y)?;
        model.recompute_pixel_points(view, mode)?;
        debug!(
            index,
            samples = model.x().len(),
            rendered = model.indices().len(),
            "set series data"
        );
        entry.model = model;
        Ok(())
    }

    /// Appends one streaming sample to a series.
    pub fn append_sample(&mut self, index: usize, x: f64, y: f64) -> PlotResult<()> {
        let view = self.view();
        let mode = self.downsampling_mode;
        let entry = self.series_mut(index)?;
        if entry.model.last_view().is_none() {
            entry.model.recompute_pixel_points(view, mode)?;
        }
        entry.model.append_sample(x, y)?;
        trace!(
            index,
            samples = entry.model.x().len(),
            rendered = entry.model.indices().len(),
            "append sample"
        );
        Ok(())
    }

    /// Removes a series, shifting later positions down by one.
    ///
    /// Fill targets pointing at the removed series are cleared; targets past
    /// it are renumbered.
    pub fn remove_series(&mut self, index: usize) -> PlotResult<PlotSeries> {
        self.series(index)?;
        let removed = self.series.remove(index);
        for entry in &mut self.series {
            entry.fill_target = match entry.fill_target {
                Some(target) if target == index => None,
                Some(target) if target > index => Some(target - 1),
                other => other,
            };
        }
        debug!(index, remaining = self.series.len(), "remove series");
        Ok(removed)
    }

    pub fn set_series_metadata(
        &mut self,
        index: usize,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> PlotResult<()> {
        self.series_mut(index)?
            .metadata
            .insert(key.into(), value.into());
        Ok(())
    }

    /// Fills `index` against `target` (or clears the fill with `None`).
    pub fn set_fill_between(&mut self, index: usize, target: Option<usize>) -> PlotResult<()> {
        if let Some(target) = target {
            self.series(target)?;
            if target == index {
                return Err(PlotError::InvalidData(
                    "a series cannot be filled against itself".to_owned(),
                ));
            }
        }
        self.series_mut(index)?.fill_target = target;
        Ok(())
    }

    /// Pixel polygon for a series' fill band; empty when it has no fill target.
    pub fn fill_polygon(&self, index: usize) -> PlotResult<Vec<Point2D>> {
        let entry = self.series(index)?;
        let Some(target) = entry.fill_target else {
            return Ok(Vec::new());
        };
        let other = self.series(target)?;
        Ok(entry.model.fill_polygon(&other.model))
    }

    /// Rebuilds indices and pixel points of every series.
    ///
    /// The view is validated before any series is touched.
    pub fn recompute(&mut self) -> PlotResult<()> {
        let view = self.view();
        let mode = self.downsampling_mode;
        if view.has_drawable_area() {
            view.transforms()?;
        }

        for (index, entry) in self.series.iter_mut().enumerate() {
            entry.model.recompute_pixel_points(view, mode)?;
            trace!(
                index,
                samples = entry.model.x().len(),
                x_based = entry.model.x_based_indices().len(),
                rendered = entry.model.indices().len(),
                "recompute series pixel points"
            );
            if entry.model.dropped_samples() > 0 {
                debug!(
                    index,
                    dropped = entry.model.dropped_samples(),
                    "skipped samples that cannot be mapped onto the current axes"
                );
            }
        }
        Ok(())
    }

    /// Generates ticks for one axis and records them for continuity.
    pub fn ticks(&mut self, axis: PlotAxis) -> PlotResult<Vec<f64>> {
        let extent = axis.extent(self.pixel_area);
        let state = self.axis_mut(axis);
        let ticks = state
            .ticks
            .generate(state.range, state.scaling, extent)?
            .to_vec();
        trace!(?axis, count = ticks.len(), "generate ticks");
        Ok(ticks)
    }

    pub fn x_ticks(&mut self) -> PlotResult<Vec<f64>> {
        self.ticks(PlotAxis::X)
    }

    pub fn y_ticks(&mut self) -> PlotResult<Vec<f64>> {
        self.ticks(PlotAxis::Y)
    }

    #[must_use]
    pub fn tick_state(&self, axis: PlotAxis) -> &TickState {
        self.axis(axis).ticks.state()
    }

    /// Replaces one axis' continuity history.
    pub fn set_tick_state(&mut self, axis: PlotAxis, state: TickState) -> PlotResult<()> {
        let current = &self.axis(axis).ticks;
        let generator = TickGenerator::with_state(current.policy(), state)?;
        self.axis_mut(axis).ticks = generator;
        Ok(())
    }

    /// Regenerates ticks for both axes and returns their grid lines,
    /// x-axis (vertical) lines first.
    ///
    /// An area with no extent produces no lines.
    pub fn grid_lines(&mut self) -> PlotResult<Vec<GridLine>> {
        let x_ticks = self.x_ticks()?;
        let y_ticks = self.y_ticks()?;
        if !self.view().has_drawable_area() {
            return Ok(Vec::new());
        }

        let mut lines = grid_lines(&x_ticks, self.x_transform()?, self.pixel_area);
        lines.extend(grid_lines(&y_ticks, self.y_transform()?, self.pixel_area));
        Ok(lines)
    }

    pub(super) fn axis(&self, axis: PlotAxis) -> &AxisState {
        match axis {
            PlotAxis::X => &self.x_axis,
            PlotAxis::Y => &self.y_axis,
        }
    }

    pub(super) fn axis_mut(&mut self, axis: PlotAxis) -> &mut AxisState {
        match axis {
            PlotAxis::X => &mut self.x_axis,
            PlotAxis::Y => &mut self.y_axis,
        }
    }

    fn series_mut(&mut self, index: usize) -> PlotResult<&mut PlotSeries> {
        let len = self.series.len();
        self.series
            .get_mut(index)
            .ok_or(PlotError::IndexOutOfRange { index, len })
    }
}
