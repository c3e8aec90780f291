use serde::{Deserialize, Serialize};

use crate::core::types::{Range, Scaling};
use crate::error::{PlotError, PlotResult};

/// Upper bound on step doublings/halvings when continuing a previous tick grid.
const MAX_CONTINUITY_RESCALES: usize = 8;
/// Relative tolerance used when testing log ticks against range bounds.
const LOG_BOUND_TOLERANCE: f64 = 1e-12;

/// Pixel-extent policy selecting tick density.
///
/// Extents above `dense_threshold_px` use the dense band, extents above
/// `medium_threshold_px` the medium band, everything else the sparse band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickDensityPolicy {
    pub dense_threshold_px: f64,
    pub medium_threshold_px: f64,
    pub linear_dense_count: usize,
    pub linear_medium_count: usize,
    pub linear_sparse_count: usize,
    pub log_dense_per_decade: usize,
    pub log_medium_per_decade: usize,
    pub log_sparse_per_decade: usize,
    /// Decades are thinned when log ticks would sit closer than this.
    pub min_tick_spacing_px: f64,
}

impl Default for TickDensityPolicy {
    fn default() -> Self {
        Self {
            dense_threshold_px: 435.0,
            medium_threshold_px: 175.0,
            linear_dense_count: 10,
            linear_medium_count: 6,
            linear_sparse_count: 3,
            log_dense_per_decade: 10,
            log_medium_per_decade: 5,
            log_sparse_per_decade: 2,
            min_tick_spacing_px: 8.0,
        }
    }
}

impl TickDensityPolicy {
    pub fn validate(self) -> PlotResult<Self> {
        if !self.dense_threshold_px.is_finite()
            || !self.medium_threshold_px.is_finite()
            || self.medium_threshold_px < 0.0
            || self.dense_threshold_px < self.medium_threshold_px
        {
            return Err(PlotError::InvalidData(
                "tick density thresholds must be finite with dense >= medium >= 0".to_owned(),
            ));
        }
        let counts = [
            self.linear_dense_count,
            self.linear_medium_count,
            self.linear_sparse_count,
            self.log_dense_per_decade,
            self.log_medium_per_decade,
            self.log_sparse_per_decade,
        ];
        if counts.contains(&0) {
            return Err(PlotError::InvalidData(
                "tick counts must be > 0".to_owned(),
            ));
        }
        if !self.min_tick_spacing_px.is_finite() || self.min_tick_spacing_px <= 0.0 {
            return Err(PlotError::InvalidData(
                "minimum tick spacing must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn linear_tick_count(&self, extent_px: f64) -> usize {
        if extent_px > self.dense_threshold_px {
            self.linear_dense_count
        } else if extent_px > self.medium_threshold_px {
            self.linear_medium_count
        } else {
            self.linear_sparse_count
        }
    }

    #[must_use]
    pub fn log_ticks_per_decade(&self, extent_px: f64) -> usize {
        if extent_px > self.dense_threshold_px {
            self.log_dense_per_decade
        } else if extent_px > self.medium_threshold_px {
            self.log_medium_per_decade
        } else {
            self.log_sparse_per_decade
        }
    }
}

/// Continuity history for one axis: the last emitted tick sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TickState {
    previous: Vec<f64>,
}

impl TickState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the history, dropping non-finite values and sorting ascending.
    #[must_use]
    pub fn from_ticks(mut ticks: Vec<f64>) -> Self {
        ticks.retain(|tick| tick.is_finite());
        ticks.sort_by(f64::total_cmp);
        Self { previous: ticks }
    }

    #[must_use]
    pub fn previous(&self) -> &[f64] {
        &self.previous
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.previous.is_empty()
    }

    pub fn clear(&mut self) {
        self.previous.clear();
    }
}

/// Per-axis tick generator owning its own continuity state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickGenerator {
    policy: TickDensityPolicy,
    state: TickState,
}

impl TickGenerator {
    pub fn new(policy: TickDensityPolicy) -> PlotResult<Self> {
        Self::with_state(policy, TickState::new())
    }

    pub fn with_state(policy: TickDensityPolicy, state: TickState) -> PlotResult<Self> {
        Ok(Self {
            policy: policy.validate()?,
            state,
        })
    }

    #[must_use]
    pub fn policy(&self) -> TickDensityPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: TickDensityPolicy) -> PlotResult<()> {
        self.policy = policy.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> &TickState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> TickState {
        self.state
    }

    /// Forgets continuity history (e.g. after a scaling change).
    pub fn reset(&mut self) {
        self.state.clear();
    }

    /// Generates ticks and records them as the next continuity input.
    ///
    /// On error the previous history is left untouched.
    pub fn generate(&mut self, range: Range, scaling: Scaling, extent_px: f64) -> PlotResult<&[f64]> {
        let ticks = generate_ticks(range, scaling, extent_px, &self.policy, self.state.previous())?;
        self.state = TickState { previous: ticks };
        Ok(self.state.previous())
    }
}

/// Produces tick values for `range` at the density `policy` selects for `extent_px`.
///
/// `previous` is the tick sequence emitted for the same axis last time (empty
/// when none). Linear axes and sub-decade logarithmic axes continue that grid
/// when it overlaps the new range, so ticks glide with pan/zoom instead of
/// jumping. Everything else is computed from scratch.
///
/// A sub-decade logarithmic range with fewer than two decade ticks falls back
/// to centered linear ticks, which then seed the continuity history.
///
/// A logarithmic range with a non-positive bound or zero width yields an empty
/// sequence. A zero-width linear range is rejected.
pub fn generate_ticks(
    range: Range,
    scaling: Scaling,
    extent_px: f64,
    policy: &TickDensityPolicy,
    previous: &[f64],
) -> PlotResult<Vec<f64>> {
    if !extent_px.is_finite() {
        return Err(PlotError::InvalidPixelArea {
            width: extent_px,
            height: extent_px,
        });
    }
    if extent_px <= 0.0 {
        return Ok(Vec::new());
    }

    match scaling {
        Scaling::Linear => {
            let range = range.validate_for(Scaling::Linear)?;
            let count = policy.linear_tick_count(extent_px);
            if let Some(ticks) = continue_previous_grid(previous, range, count) {
                return Ok(ticks);
            }
            Ok(centered_linear_ticks(range, count))
        }
        Scaling::Logarithmic => {
            let Ok(range) = range.validate_for(Scaling::Logarithmic) else {
                return Ok(Vec::new());
            };
            let decades = (range.max / range.min).log10();
            let sub_decade_count = (decades < 1.0).then(|| policy.linear_tick_count(extent_px));
            if let Some(ticks) = sub_decade_count
                .and_then(|count| continue_previous_grid(previous, range, count))
            {
                return Ok(ticks);
            }
            let ticks = log_decade_ticks(
                range,
                policy.log_ticks_per_decade(extent_px),
                extent_px,
                policy.min_tick_spacing_px,
            );
            // Inside one decade the decade grid can miss the range entirely.
            match sub_decade_count {
                Some(count) if ticks.len() < 2 => Ok(centered_linear_ticks(range, count)),
                _ => Ok(ticks),
            }
        }
    }
}

/// Ticks centered in `count` equal sub-intervals: `min + (k + 0.5) * step`.
#[must_use]
pub fn centered_linear_ticks(range: Range, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let step = range.span() / count as f64;
    (0..count)
        .map(|k| range.min + (k as f64 + 0.5) * step)
        .collect()
}

/// Evenly log-spaced ticks for every decade touching `range`.
#[must_use]
pub fn log_decade_ticks(
    range: Range,
    per_decade: usize,
    extent_px: f64,
    min_spacing_px: f64,
) -> Vec<f64> {
    let first_decade = range.min.log10().floor() as i32;
    let last_decade = range.max.log10().ceil() as i32;
    let decade_count = (last_decade - first_decade).max(1) as usize;

    let max_ticks = ((extent_px / min_spacing_px).floor() as usize).max(1);
    let (per_decade, decade_stride) = if decade_count * per_decade.max(1) > max_ticks {
        (1, decade_count.div_ceil(max_ticks))
    } else {
        (per_decade.max(1), 1)
    };

    let lower = range.min * (1.0 - LOG_BOUND_TOLERANCE);
    let upper = range.max * (1.0 + LOG_BOUND_TOLERANCE);
    let mut ticks = Vec::new();
    for decade in (first_decade..=last_decade).step_by(decade_stride) {
        for k in 0..per_decade {
            let exponent = f64::from(decade) + k as f64 / per_decade as f64;
            let value = 10f64.powf(exponent);
            if value >= lower && value <= upper {
                ticks.push(value);
            }
        }
    }
    ticks
}

/// Smallest positive spacing between consecutive values, `0.0` when none.
#[must_use]
pub fn tick_step_hint_from_values(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }

    let mut best = f64::INFINITY;
    for pair in values.windows(2) {
        let step = (pair[1] - pair[0]).abs();
        if step.is_finite() && step > 0.0 {
            best = best.min(step);
        }
    }

    if best.is_finite() { best } else { 0.0 }
}

/// Extends the previous tick grid linearly across `range`.
///
/// The grid is anchored on the previous ticks bracketing the range and uses
/// their local spacing, halved or doubled until the visible count lands in
/// `[target / 2, target * 2]`. Returns `None` when the previous ticks do not
/// overlap the range or no acceptable spacing exists.
fn continue_previous_grid(previous: &[f64], range: Range, target: usize) -> Option<Vec<f64>> {
    if previous.len() < 2 || target == 0 {
        return None;
    }

    let last = previous.len() - 1;
    let lower = previous
        .iter()
        .rposition(|tick| *tick <= range.min)
        .unwrap_or(0);
    let upper = previous
        .iter()
        .position(|tick| *tick >= range.max)
        .unwrap_or(last);
    if lower >= upper {
        return None;
    }

    let local = &previous[lower..=upper];
    let anchor = local[0];
    let mut step = tick_step_hint_from_values(local);
    if step <= 0.0 || !anchor.is_finite() {
        return None;
    }

    let min_count = (target / 2).max(1);
    let max_count = target.saturating_mul(2);
    let mut rescales = 0;
    let (first, last_step) = loop {
        let first = ((range.min - anchor) / step).ceil();
        let last_step = ((range.max - anchor) / step).floor();
        let count = last_step - first + 1.0;
        if count < min_count as f64 {
            step /= 2.0;
        } else if count > max_count as f64 {
            step *= 2.0;
        } else {
            break (first, last_step);
        }
        rescales += 1;
        if rescales > MAX_CONTINUITY_RESCALES {
            return None;
        }
    };

    let ticks: Vec<f64> = (first as i64..=last_step as i64)
        .map(|m| anchor + m as f64 * step)
        .filter(|tick| range.contains(*tick))
        .collect();
    (!ticks.is_empty()).then_some(ticks)
}
