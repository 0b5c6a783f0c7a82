//! Engine configuration supplied by the host application

use serde::{Deserialize, Serialize};
use super::defaults::{
    DEFAULT_BPM, DEFAULT_END_TIME, DEFAULT_HISTORY_LIMIT, RECORDING_PLACEHOLDER_DURATION,
};
use super::timeline::Timeline;

/// Sequencer configuration
///
/// Every field is optional on the wire; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Maximum number of undo steps
    pub history_limit: usize,
    /// Duration of an event while it is being recorded
    pub recording_placeholder: f64,
    pub end_time: f64,
    pub bpm: f64,
}

impl EngineConfig {
    pub fn timeline(&self) -> Timeline {
        Timeline::new(self.end_time, self.bpm)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            recording_placeholder: RECORDING_PLACEHOLDER_DURATION,
            end_time: DEFAULT_END_TIME,
            bpm: DEFAULT_BPM,
        }
    }
}
