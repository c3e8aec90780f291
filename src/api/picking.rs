use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Point2D;

use super::PlotEngine;

/// Rendered sample closest to a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestPoint {
    pub series: usize,
    /// Index into the series' raw data.
    pub sample: usize,
    pub data: Point2D,
    pub pixel: Point2D,
    pub distance_px: f64,
}

impl PlotEngine {
    /// Finds the rendered sample closest to an absolute pixel position.
    ///
    /// Only samples that survived downsampling are candidates, so the result
    /// always matches something drawn on screen. Ties keep the earlier series.
    #[must_use]
    pub fn nearest_point(&self, pixel: Point2D) -> Option<NearestPoint> {
        if !pixel.x.is_finite() || !pixel.y.is_finite() {
            return None;
        }

        let mut candidates: SmallVec<[(OrderedFloat<f64>, NearestPoint); 4]> = SmallVec::new();
        for (series, entry) in self.series.iter().enumerate() {
            let model = &entry.model;
            let best = model
                .indices()
                .iter()
                .zip(model.pixel_points())
                .map(|(&sample, &point)| (OrderedFloat(point.distance_to(pixel)), sample, point))
                .min_by_key(|item| item.0);
            if let Some((distance, sample, point)) = best {
                candidates.push((
                    distance,
                    NearestPoint {
                        series,
                        sample,
                        data: Point2D::new(model.x()[sample], model.y()[sample]),
                        pixel: point,
                        distance_px: distance.0,
                    },
                ));
            }
        }

        candidates
            .into_iter()
            .min_by_key(|item| item.0)
            .map(|(_, nearest)| nearest)
    }

    /// Like [`PlotEngine::nearest_point`], limited to `max_distance_px`.
    #[must_use]
    pub fn nearest_point_within(&self, pixel: Point2D, max_distance_px: f64) -> Option<NearestPoint> {
        self.nearest_point(pixel)
            .filter(|nearest| nearest.distance_px <= max_distance_px)
    }
}
