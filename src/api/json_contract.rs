use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

use super::PlotSnapshot;

pub const PLOT_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: PlotSnapshot,
}

impl PlotSnapshot {
    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PlotError::InvalidData(format!("failed to serialize snapshot json: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> PlotResult<String> {
        let payload = PlotSnapshotJsonContractV1 {
            schema_version: PLOT_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            PlotError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Parses either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> PlotResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<PlotSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: PlotSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            PlotError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != PLOT_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(PlotError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
