use serde::{Deserialize, Serialize};

use crate::core::scale::ScaleTransform;
use crate::core::types::{AxisOrientation, PixelArea, Point2D, Scaling};

/// Direction a grid line is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridDirection {
    /// Spans the area height; emitted for x-axis ticks.
    Vertical,
    /// Spans the area width; emitted for y-axis ticks.
    Horizontal,
}

/// One tick rendered as a line across the pixel area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub tick: f64,
    /// Start of the line in absolute pixel space.
    pub position: Point2D,
    pub direction: GridDirection,
    pub length: f64,
    pub label: String,
}

/// Builds grid lines for one axis.
///
/// The transform's orientation decides the direction: horizontal transforms
/// (x axis) produce vertical lines, vertical transforms produce horizontal
/// lines. Ticks that map outside the area are dropped.
#[must_use]
pub fn grid_lines(ticks: &[f64], transform: ScaleTransform, area: PixelArea) -> Vec<GridLine> {
    let step_hint = crate::core::ticks::tick_step_hint_from_values(ticks);
    let extent = transform.extent();

    ticks
        .iter()
        .copied()
        .filter(|tick| transform.is_representable(*tick))
        .filter_map(|tick| {
            let pixel = transform.data_to_pixel(tick);
            if !pixel.is_finite() || pixel < -0.5 || pixel > extent + 0.5 {
                return None;
            }
            let label = format_tick_label(tick, step_hint, transform.scaling());
            Some(match transform.orientation() {
                AxisOrientation::Horizontal => GridLine {
                    tick,
                    position: Point2D::new(area.origin_x + pixel, area.origin_y),
                    direction: GridDirection::Vertical,
                    length: area.height,
                    label,
                },
                AxisOrientation::Vertical => GridLine {
                    tick,
                    position: Point2D::new(area.origin_x, area.origin_y + pixel),
                    direction: GridDirection::Horizontal,
                    length: area.width,
                    label,
                },
            })
        })
        .collect()
}

/// Formats a tick value for display.
///
/// Linear labels carry enough decimals to tell ticks `step_hint` apart.
/// Logarithmic labels use plain notation inside `[1e-3, 1e4)` and scientific
/// notation outside it.
#[must_use]
pub fn format_tick_label(tick: f64, step_hint: f64, scaling: Scaling) -> String {
    if !tick.is_finite() {
        return "nan".to_owned();
    }

    match scaling {
        Scaling::Linear => {
            let precision = linear_label_precision(step_hint);
            let text = format!("{tick:.precision$}");
            normalize_negative_zero(text)
        }
        Scaling::Logarithmic => {
            let magnitude = tick.abs();
            if (1e-3..1e4).contains(&magnitude) {
                let precision = significant_decimals(magnitude, 3);
                trim_trailing_zeros(format!("{tick:.precision$}"))
            } else {
                format!("{tick:.2e}")
            }
        }
    }
}

fn linear_label_precision(step_hint: f64) -> usize {
    if !step_hint.is_finite() || step_hint <= 0.0 {
        return 2;
    }
    let digits = -step_hint.log10().floor() + 1.0;
    digits.clamp(0.0, 12.0) as usize
}

fn significant_decimals(magnitude: f64, significant: i32) -> usize {
    let leading = magnitude.log10().floor() as i32;
    (significant - 1 - leading).clamp(0, 12) as usize
}

fn trim_trailing_zeros(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

fn normalize_negative_zero(text: String) -> String {
    let is_zero = text
        .trim_start_matches('-')
        .chars()
        .all(|c| c == '0' || c == '.');
    if is_zero && text.starts_with('-') {
        text[1..].to_owned()
    } else {
        text
    }
}
