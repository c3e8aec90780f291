use serde::{Deserialize, Serialize};

use crate::core::{DownsamplingMode, PixelArea, Range, Scaling, TickDensityPolicy};
use crate::error::{PlotError, PlotResult};

/// Padding and widening used when ranges are fitted to data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoscaleTuning {
    pub lower_padding_ratio: f64,
    pub upper_padding_ratio: f64,
    /// Half-width added around a zero-width range (decades on log axes).
    pub degenerate_widening: f64,
}

impl Default for AutoscaleTuning {
    fn default() -> Self {
        Self {
            lower_padding_ratio: 0.05,
            upper_padding_ratio: 0.05,
            degenerate_widening: 1.0,
        }
    }
}

impl AutoscaleTuning {
    pub fn validate(self) -> PlotResult<Self> {
        if !self.lower_padding_ratio.is_finite()
            || !self.upper_padding_ratio.is_finite()
            || self.lower_padding_ratio < 0.0
            || self.upper_padding_ratio < 0.0
        {
            return Err(PlotError::InvalidData(
                "autoscale padding ratios must be finite and >= 0".to_owned(),
            ));
        }
        if !self.degenerate_widening.is_finite() || self.degenerate_widening <= 0.0 {
            return Err(PlotError::InvalidData(
                "degenerate range widening must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can persist plot setup next to their own settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotEngineConfig {
    pub pixel_area: PixelArea,
    pub x_range: Range,
    #[serde(default = "default_y_range")]
    pub y_range: Range,
    #[serde(default)]
    pub x_scaling: Scaling,
    #[serde(default)]
    pub y_scaling: Scaling,
    #[serde(default = "default_downsampling_mode")]
    pub downsampling_mode: DownsamplingMode,
    #[serde(default)]
    pub tick_density: TickDensityPolicy,
    #[serde(default)]
    pub autoscale: AutoscaleTuning,
}

impl PlotEngineConfig {
    /// Creates a minimal config with a `[0, 1]` y range.
    #[must_use]
    pub fn new(pixel_area: PixelArea, x_min: f64, x_max: f64) -> Self {
        Self {
            pixel_area,
            x_range: Range { min: x_min, max: x_max },
            y_range: default_y_range(),
            x_scaling: Scaling::Linear,
            y_scaling: Scaling::Linear,
            downsampling_mode: default_downsampling_mode(),
            tick_density: TickDensityPolicy::default(),
            autoscale: AutoscaleTuning::default(),
        }
    }

    /// Sets the initial y range.
    #[must_use]
    pub fn with_y_range(mut self, y_min: f64, y_max: f64) -> Self {
        self.y_range = Range { min: y_min, max: y_max };
        self
    }

    /// Sets initial axis scalings.
    #[must_use]
    pub fn with_scaling(mut self, x_scaling: Scaling, y_scaling: Scaling) -> Self {
        self.x_scaling = x_scaling;
        self.y_scaling = y_scaling;
        self
    }

    #[must_use]
    pub fn with_downsampling_mode(mut self, mode: DownsamplingMode) -> Self {
        self.downsampling_mode = mode;
        self
    }

    #[must_use]
    pub fn with_tick_density(mut self, policy: TickDensityPolicy) -> Self {
        self.tick_density = policy;
        self
    }

    #[must_use]
    pub fn with_autoscale(mut self, tuning: AutoscaleTuning) -> Self {
        self.autoscale = tuning;
        self
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> PlotResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| PlotError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| PlotError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_y_range() -> Range {
    Range { min: 0.0, max: 1.0 }
}

fn default_downsampling_mode() -> DownsamplingMode {
    DownsamplingMode::XyBased
}
