//! Timeline bounds and tempo
//!
//! Owned by the sequencer state; the pure operations receive these values
//! as parameters and never change them.

use serde::{Deserialize, Serialize};
use super::defaults::{DEFAULT_BPM, DEFAULT_END_TIME};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    /// Length of the timeline in seconds; repeats wrap around it
    pub end_time: f64,
    pub bpm: f64,
}

impl Timeline {
    pub fn new(end_time: f64, bpm: f64) -> Self {
        Self { end_time, bpm }
    }

    /// Length of one beat in seconds
    pub fn beat_duration(&self) -> f64 {
        60.0 / self.bpm
    }

    /// Grid cells per second for a grid of `steps_per_beat` subdivisions
    ///
    /// The result is the `step` argument of `quantize`.
    pub fn grid_step(&self, steps_per_beat: f64) -> f64 {
        self.bpm / 60.0 * steps_per_beat
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(DEFAULT_END_TIME, DEFAULT_BPM)
    }
}
