pub mod downsample;
pub mod grid;
pub mod scale;
pub mod series;
pub mod ticks;
pub mod types;

pub use downsample::{
    DOWNSAMPLING_MIN_SAMPLES, DownsamplingMode, IndexSet, SampleWindow,
    VERBATIM_COLUMN_SAMPLES, WINDOW_MARGIN_SAMPLES, downsample, identity_indices,
    visible_window, x_based_indices, xy_based_indices,
};
pub use grid::{GridDirection, GridLine, format_tick_label, grid_lines};
pub use scale::{ScaleTransform, inverse_transform_value, transform_value};
pub use series::{PlotView, SeriesModel};
pub use ticks::{
    TickDensityPolicy, TickGenerator, TickState, centered_linear_ticks, generate_ticks,
    log_decade_ticks, tick_step_hint_from_values,
};
pub use types::{AxisOrientation, DEGENERATE_SPAN_EPSILON, PixelArea, Point2D, Range, Scaling};
