//! Shared types for the WASM API
//!
//! Result shapes returned to JavaScript after an action is applied.

use crate::models::Event;

/// Result of dispatching an action
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    /// Whether the event collection changed (callers persist only then)
    pub changed: bool,
    pub events: Vec<Event>,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Current timeline bounds and history availability
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SequencerStatus {
    pub end_time: f64,
    pub bpm: f64,
    pub event_count: usize,
    pub selected_count: usize,
    pub clipboard_count: usize,
    pub undo_label: Option<String>,
}
