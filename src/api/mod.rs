mod autoscale;
mod axis_state;
mod engine;
mod engine_config;
mod engine_snapshot;
mod json_contract;
mod navigation;
mod picking;

pub use axis_state::PlotAxis;
pub use engine::{PlotEngine, PlotSeries};
pub use engine_config::{AutoscaleTuning, PlotEngineConfig};
pub use engine_snapshot::{PlotSnapshot, SeriesSnapshot};
pub use json_contract::{PLOT_SNAPSHOT_JSON_SCHEMA_V1, PlotSnapshotJsonContractV1};
pub use picking::NearestPoint;
