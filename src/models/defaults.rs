//! Default values for the sequencer timeline and engine

/// Default tempo in beats per minute
pub const DEFAULT_BPM: f64 = 120.0;

/// Default timeline length in seconds
pub const DEFAULT_END_TIME: f64 = 60.0;

/// Number of undo steps kept in history
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Duration given to an event while it is still being recorded
pub const RECORDING_PLACEHOLDER_DURATION: f64 = 0.01;
