//! Shape-preserving index reduction for dense series.
//!
//! Reduction runs in two stages. The horizontal stage keeps roughly one
//! sample per pixel column of the visible x window. The vertical stage then
//! revisits every column and keeps the samples that carry its y extremes, so
//! spikes survive no matter how many samples share a column.

use serde::{Deserialize, Serialize};

use crate::core::scale::{ScaleTransform, transform_value};
use crate::core::types::{AxisOrientation, Range, Scaling};
use crate::error::{PlotError, PlotResult};

/// Series shorter than this are never reduced.
pub const DOWNSAMPLING_MIN_SAMPLES: usize = 100;
/// Extra samples kept on each side of the visible x window.
pub const WINDOW_MARGIN_SAMPLES: usize = 2;
/// Pixel columns holding at most this many samples are kept verbatim.
pub const VERBATIM_COLUMN_SAMPLES: usize = 3;

/// Ordered, strictly increasing indices into a series.
pub type IndexSet = Vec<usize>;

/// Which reduction stages run before pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DownsamplingMode {
    /// Every sample is rendered.
    None,
    /// Horizontal reduction only.
    XBased,
    /// Horizontal reduction followed by per-column min/max reduction.
    #[default]
    XyBased,
}

/// Inclusive sample window `[start, end]` covering the visible x range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleWindow {
    pub start: usize,
    pub end: usize,
}

impl SampleWindow {
    #[must_use]
    pub fn sample_count(self) -> usize {
        self.end - self.start + 1
    }
}

/// Locates the samples that can contribute to the visible x range.
///
/// The window starts at the first sample with `x >= visible.min` and ends at
/// the last sample with `x <= visible.max`, each widened by
/// [`WINDOW_MARGIN_SAMPLES`] so segments entering from off-screen are drawn.
#[must_use]
pub fn visible_window(x: &[f64], visible: Range) -> Option<SampleWindow> {
    let last = x.len().checked_sub(1)?;
    let first_inside = x
        .iter()
        .position(|value| *value >= visible.min)
        .unwrap_or(last);
    let last_inside = x
        .iter()
        .rposition(|value| *value <= visible.max)
        .unwrap_or(0);

    let start = first_inside.saturating_sub(WINDOW_MARGIN_SAMPLES);
    let end = last_inside.saturating_add(WINDOW_MARGIN_SAMPLES).min(last);
    Some(SampleWindow {
        start: start.min(end),
        end: start.max(end),
    })
}

/// Identity index set `[0, len)`.
#[must_use]
pub fn identity_indices(len: usize) -> IndexSet {
    (0..len).collect()
}

/// Horizontal reduction over the x sequence.
///
/// A sample is kept when it opens the window, when the x walk reverses
/// direction (the turning sample and the one after it), or when it lies more
/// than one pixel away from the last kept sample. The window end is always
/// the final element.
pub fn x_based_indices(
    x: &[f64],
    visible: Range,
    scaling: Scaling,
    width_px: f64,
) -> PlotResult<IndexSet> {
    if x.len() < DOWNSAMPLING_MIN_SAMPLES {
        return Ok(identity_indices(x.len()));
    }

    let transform = ScaleTransform::new(width_px, visible, scaling, AxisOrientation::Horizontal)?;
    let units_per_pixel = transform.transformed_units_per_pixel();
    let Some(window) = visible_window(x, visible) else {
        return Ok(IndexSet::new());
    };

    let mut indices = IndexSet::with_capacity(window.sample_count());
    indices.push(window.start);
    let mut last_added_x = x[window.start];
    let mut forward: Option<bool> = None;

    for i in (window.start + 1)..window.end {
        let step = x[i] - x[i - 1];
        let direction = if step > 0.0 {
            Some(true)
        } else if step < 0.0 {
            Some(false)
        } else {
            None
        };

        let mut reversed = false;
        if let Some(direction) = direction {
            reversed = forward.is_some_and(|previous| previous != direction);
            forward = Some(direction);
        }

        if reversed {
            push_unique(&mut indices, i - 1);
            push_unique(&mut indices, i);
            last_added_x = x[i];
        } else if exceeds_one_pixel(x[i], last_added_x, scaling, units_per_pixel) {
            push_unique(&mut indices, i);
            last_added_x = x[i];
        }
    }

    push_unique(&mut indices, window.end);
    indices.shrink_to_fit();
    Ok(indices)
}

/// Vertical reduction applied to the columns delimited by `x_based`.
///
/// Consecutive x-based indices `(i, j)` bound one pixel column. Columns with
/// at most [`VERBATIM_COLUMN_SAMPLES`] samples are copied. Larger columns emit
/// their first index, the samples holding the y extremes in the order they
/// occur, and their last scanned index. Whenever the running extreme switches
/// from one side to the other, the superseded opposite extreme is emitted too,
/// which keeps every alternating record inside the column. Non-finite y
/// values never count as extremes.
pub fn xy_based_indices(x_based: &[usize], y: &[f64]) -> PlotResult<IndexSet> {
    let Some(&last) = x_based.last() else {
        return Ok(IndexSet::new());
    };
    if last >= y.len() {
        return Err(PlotError::IndexOutOfRange {
            index: last,
            len: y.len(),
        });
    }
    if y.len() < DOWNSAMPLING_MIN_SAMPLES {
        return Ok(x_based.to_vec());
    }

    let mut indices = IndexSet::with_capacity(last - x_based[0] + 1);
    for column in x_based.windows(2) {
        let (start, end) = (column[0], column[1]);
        if end - start <= VERBATIM_COLUMN_SAMPLES {
            for index in start..end {
                push_unique(&mut indices, index);
            }
        } else {
            reduce_column(y, start, end, &mut indices);
        }
    }

    push_unique(&mut indices, last);
    indices.shrink_to_fit();
    Ok(indices)
}

/// Runs the stages selected by `mode` over one series.
pub fn downsample(
    x: &[f64],
    y: &[f64],
    visible_x: Range,
    scaling_x: Scaling,
    width_px: f64,
    mode: DownsamplingMode,
) -> PlotResult<IndexSet> {
    if x.len() != y.len() {
        return Err(PlotError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.is_empty() {
        return Ok(IndexSet::new());
    }

    match mode {
        DownsamplingMode::None => Ok(identity_indices(x.len())),
        DownsamplingMode::XBased => x_based_indices(x, visible_x, scaling_x, width_px),
        DownsamplingMode::XyBased => {
            let x_based = x_based_indices(x, visible_x, scaling_x, width_px)?;
            xy_based_indices(&x_based, y)
        }
    }
}

fn reduce_column(y: &[f64], start: usize, end: usize, indices: &mut IndexSet) {
    push_unique(indices, start);

    let Some(seed) = ((start + 1)..end).find(|&k| y[k].is_finite()) else {
        push_unique(indices, end - 1);
        return;
    };
    let mut min = (y[seed], seed);
    let mut max = (y[seed], seed);
    let mut min_last = false;

    for (offset, value) in y[(seed + 1)..end].iter().copied().enumerate() {
        if !value.is_finite() {
            continue;
        }
        let k = seed + 1 + offset;
        if value < min.0 {
            if !min_last {
                push_unique(indices, max.1);
            }
            min = (value, k);
            min_last = true;
        } else if value > max.0 {
            if min_last {
                push_unique(indices, min.1);
            }
            max = (value, k);
            min_last = false;
        }
    }

    let (earlier, later) = if min_last {
        (max.1, min.1)
    } else {
        (min.1, max.1)
    };
    push_unique(indices, earlier);
    push_unique(indices, later);
    push_unique(indices, end - 1);
}

fn exceeds_one_pixel(value: f64, last_added: f64, scaling: Scaling, units_per_pixel: f64) -> bool {
    match scaling {
        Scaling::Linear => (value - last_added).abs() > units_per_pixel,
        Scaling::Logarithmic => {
            let ratio = value / last_added;
            if !ratio.is_finite() || ratio <= 0.0 {
                return true;
            }
            transform_value(ratio, scaling).abs() > units_per_pixel
        }
    }
}

fn push_unique(indices: &mut IndexSet, index: usize) {
    if indices.last().is_none_or(|last| *last < index) {
        indices.push(index);
    }
}
