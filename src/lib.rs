//! plotline-rs: data reduction and coordinate mapping for 2D line plots.
//!
//! The crate turns large x/y series into the small set of pixel points a
//! renderer actually needs. It owns axis scaling (linear or log10), the
//! two-stage min/max downsampler, tick generation with frame-to-frame
//! continuity, and a [`PlotEngine`] facade tying them to one plot area.
//! Drawing is left to the host.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{PlotEngine, PlotEngineConfig};
pub use error::{PlotError, PlotResult};
