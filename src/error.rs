use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotError {
    #[error("invalid range: min={min}, max={max}")]
    InvalidRange { min: f64, max: f64 },

    #[error("invalid logarithmic domain: min={min}, max={max} (bounds must be > 0)")]
    InvalidLogDomain { min: f64, max: f64 },

    #[error("x/y length mismatch: x has {x_len} samples, y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid pixel area: width={width}, height={height}")]
    InvalidPixelArea { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
