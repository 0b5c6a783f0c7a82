//! WASM API for the timeline sequencer
//!
//! The sequencer instance lives here, behind a mutex, as the single owner of
//! the event collection. JavaScript dispatches one action at a time and gets
//! the complete new event list back.

use wasm_bindgen::prelude::*;
use std::sync::Mutex;
use lazy_static::lazy_static;
use js_sys;

use crate::api::helpers::{
    deserialize, engine_error, serialize, validate_finite, validate_positive, validation_error,
};
use crate::api::types::{DispatchResult, SequencerStatus};
use crate::error::EngineError;
use crate::intervals::quantize;
use crate::models::EngineConfig;
use crate::persistence::TrackMap;
use crate::store::{Action, Sequencer};
use crate::{wasm_error, wasm_info, wasm_log, wasm_warn};

// WASM-owned sequencer (canonical source of truth for events)
lazy_static! {
    static ref SEQUENCER: Mutex<Option<Sequencer>> = Mutex::new(None);
}

fn with_sequencer<T>(f: impl FnOnce(&mut Sequencer) -> Result<T, JsValue>) -> Result<T, JsValue> {
    let mut guard = SEQUENCER
        .lock()
        .map_err(|e| validation_error(format!("Failed to lock sequencer: {}", e)))?;
    let sequencer = guard.as_mut().ok_or_else(|| engine_error(EngineError::NotInitialized))?;
    f(sequencer)
}

fn dispatch_result(sequencer: &Sequencer, changed: bool) -> DispatchResult {
    DispatchResult {
        changed,
        events: sequencer.events().to_vec(),
        can_undo: sequencer.history().can_undo(),
        can_redo: sequencer.history().can_redo(),
    }
}

/// Reject non-finite times and durations before they reach the engine
fn validate_action(action: &Action) -> Result<(), String> {
    match action {
        Action::AddEvent { time, duration, .. }
        | Action::ToggleEvent { time, duration, .. }
        | Action::SelectEventsAtTime { time, duration, .. } => {
            validate_finite(*time, "time")?;
            validate_finite(*duration, "duration")
        }
        Action::RemoveEvent { time, .. }
        | Action::PasteEvents { time, .. }
        | Action::SetSelectedEventsTime { time }
        | Action::StartRecording { time, .. }
        | Action::StopRecording { time, .. } => validate_finite(*time, "time"),
        Action::MoveEvents { time_delta, .. } => validate_finite(*time_delta, "timeDelta"),
        Action::SetSelectedEventsDuration { duration } => validate_finite(*duration, "duration"),
        Action::SnapEvents { step } => validate_finite(*step, "step"),
        Action::RepeatEvents { end_time: Some(end_time) } => validate_finite(*end_time, "endTime"),
        Action::SetTimeline { end_time, bpm } => {
            if let Some(end_time) = end_time {
                validate_positive(*end_time, "endTime")?;
            }
            if let Some(bpm) = bpm {
                validate_positive(*bpm, "bpm")?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Create (or reset) the sequencer
///
/// # Parameters
/// - `config_js`: optional `EngineConfig` object; missing fields use defaults
#[wasm_bindgen(js_name = initSequencer)]
pub fn init_sequencer(config_js: JsValue) -> Result<(), JsValue> {
    let config: EngineConfig = if config_js.is_undefined() || config_js.is_null() {
        EngineConfig::default()
    } else {
        deserialize(config_js, "Invalid sequencer config")?
    };

    wasm_info!(
        "initSequencer: endTime={}, bpm={}, historyLimit={}",
        config.end_time,
        config.bpm,
        config.history_limit
    );

    let mut guard = SEQUENCER
        .lock()
        .map_err(|e| validation_error(format!("Failed to lock sequencer: {}", e)))?;
    *guard = Some(Sequencer::new(config));
    Ok(())
}

/// Apply one tagged action
///
/// # Returns
/// JavaScript object with `changed`, `events`, `canUndo` and `canRedo`
#[wasm_bindgen(js_name = dispatchAction)]
pub fn dispatch_action(action_js: JsValue) -> Result<JsValue, JsValue> {
    let action: Action = deserialize(action_js, "Invalid action")?;
    validate_action(&action).map_err(validation_error)?;

    with_sequencer(|sequencer| {
        let label = action.label();
        let changed = sequencer.dispatch(action);
        wasm_log!("{}: changed={}, {} events", label, changed, sequencer.events().len());
        serialize(&dispatch_result(sequencer, changed), "Failed to serialize dispatch result")
    })
}

/// Current events as a JavaScript array, ordered by time
#[wasm_bindgen(js_name = getEvents)]
pub fn get_events() -> Result<js_sys::Array, JsValue> {
    with_sequencer(|sequencer| {
        let events_array = js_sys::Array::new();
        for event in sequencer.events() {
            events_array.push(&serialize(event, "Event serialization error")?);
        }
        Ok(events_array)
    })
}

#[wasm_bindgen(js_name = getSequencerStatus)]
pub fn get_sequencer_status() -> Result<JsValue, JsValue> {
    with_sequencer(|sequencer| {
        let timeline = sequencer.timeline();
        let status = SequencerStatus {
            end_time: timeline.end_time,
            bpm: timeline.bpm,
            event_count: sequencer.events().len(),
            selected_count: sequencer.selected_events().len(),
            clipboard_count: sequencer.clipboard().len(),
            undo_label: sequencer.history().undo_label().map(str::to_string),
        };
        serialize(&status, "Failed to serialize sequencer status")
    })
}

#[wasm_bindgen(js_name = undoAction)]
pub fn undo_action() -> Result<JsValue, JsValue> {
    with_sequencer(|sequencer| {
        let changed = match sequencer.undo() {
            Ok(()) => true,
            Err(e) => {
                wasm_warn!("undo: {}", e);
                false
            }
        };
        serialize(&dispatch_result(sequencer, changed), "Failed to serialize undo result")
    })
}

#[wasm_bindgen(js_name = redoAction)]
pub fn redo_action() -> Result<JsValue, JsValue> {
    with_sequencer(|sequencer| {
        let changed = match sequencer.redo() {
            Ok(()) => true,
            Err(e) => {
                wasm_warn!("redo: {}", e);
                false
            }
        };
        serialize(&dispatch_result(sequencer, changed), "Failed to serialize redo result")
    })
}

/// Export events as JSON: `{ padId: [[time, duration], ...] }`
#[wasm_bindgen(js_name = exportEvents)]
pub fn export_events() -> Result<String, JsValue> {
    with_sequencer(|sequencer| sequencer.to_json().map_err(engine_error))
}

/// Replace all events with the contents of an exported JSON document
#[wasm_bindgen(js_name = importEvents)]
pub fn import_events(json: &str) -> Result<JsValue, JsValue> {
    let tracks: TrackMap = serde_json::from_str(json).map_err(|e| {
        wasm_error!("importEvents: {}", e);
        engine_error(EngineError::from(e))
    })?;

    with_sequencer(|sequencer| {
        sequencer.import_tracks(&tracks);
        wasm_info!("importEvents: {} events", sequencer.events().len());
        serialize(&dispatch_result(sequencer, true), "Failed to serialize import result")
    })
}

/// Snap a time value to a grid of `step` cells per second
#[wasm_bindgen(js_name = quantizeTime)]
pub fn quantize_time(seconds: f64, step: f64) -> Result<f64, JsValue> {
    validate_finite(seconds, "seconds").map_err(validation_error)?;
    Ok(quantize(seconds, step))
}

/// Grid cells per second for the current tempo
#[wasm_bindgen(js_name = gridStep)]
pub fn grid_step(steps_per_beat: f64) -> Result<f64, JsValue> {
    with_sequencer(|sequencer| Ok(sequencer.timeline().grid_step(steps_per_beat)))
}
