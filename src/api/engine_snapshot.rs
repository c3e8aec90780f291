use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{DownsamplingMode, PixelArea, Point2D, Range, Scaling};

use super::PlotEngine;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSnapshot {
    pub pixel_area: PixelArea,
    pub x_range: Range,
    pub y_range: Range,
    pub x_scaling: Scaling,
    pub y_scaling: Scaling,
    pub downsampling_mode: DownsamplingMode,
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
    pub series: Vec<SeriesSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    pub sample_count: usize,
    pub indices: Vec<usize>,
    pub pixel_points: Vec<Point2D>,
    pub fill_target: Option<usize>,
    pub metadata: IndexMap<String, String>,
}

impl PlotEngine {
    /// Captures the render-relevant state.
    ///
    /// Ticks are the continuity history of the last tick generation; taking a
    /// snapshot does not advance it.
    #[must_use]
    pub fn snapshot(&self) -> PlotSnapshot {
        PlotSnapshot {
            pixel_area: self.pixel_area,
            x_range: self.x_axis.range,
            y_range: self.y_axis.range,
            x_scaling: self.x_axis.scaling,
            y_scaling: self.y_axis.scaling,
            downsampling_mode: self.downsampling_mode,
            x_ticks: self.x_axis.ticks.state().previous().to_vec(),
            y_ticks: self.y_axis.ticks.state().previous().to_vec(),
            series: self
                .series
                .iter()
                .map(|entry| SeriesSnapshot {
                    sample_count: entry.model.x().len(),
                    indices: entry.model.indices().to_vec(),
                    pixel_points: entry.model.pixel_points().to_vec(),
                    fill_target: entry.fill_target,
                    metadata: entry.metadata.clone(),
                })
                .collect(),
        }
    }
}
