//! Tagged actions sent by the application's dispatcher
//!
//! Wire format is JSON with a `type` tag and camelCase fields, e.g.
//! `{"type": "addEvent", "padId": "a1", "time": 0.0, "duration": 4.0}`.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::models::{EventId, TrackId};

/// Which events `clearEvents` removes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClearScope {
    Track(TrackId),
    Selection,
    All,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    AddEvent {
        #[serde(rename = "padId")]
        track_id: TrackId,
        time: f64,
        duration: f64,
    },
    RemoveEvent {
        #[serde(rename = "padId")]
        track_id: TrackId,
        time: f64,
    },
    ToggleEvent {
        #[serde(rename = "padId")]
        track_id: TrackId,
        time: f64,
        duration: f64,
    },
    ClearEvents {
        scope: ClearScope,
    },
    SelectEventsAtTime {
        #[serde(rename = "padIds")]
        track_ids: Vec<TrackId>,
        time: f64,
        duration: f64,
    },
    SelectEvents {
        ids: Vec<EventId>,
    },
    MoveEvents {
        time_delta: f64,
        #[serde(default)]
        track_delta: i32,
        #[serde(default)]
        is_finished: bool,
    },
    /// Repeat the selection; wraps at the timeline's end unless overridden
    RepeatEvents {
        #[serde(default)]
        end_time: Option<f64>,
    },
    CutEvents,
    CopyEvents,
    PasteEvents {
        time: f64,
        #[serde(rename = "padId")]
        track_id: TrackId,
    },
    SnapEvents {
        step: f64,
    },
    SetSelectedEventsTime {
        time: f64,
    },
    SetSelectedEventsDuration {
        duration: f64,
    },
    StartRecording {
        #[serde(rename = "padId")]
        track_id: TrackId,
        time: f64,
    },
    StopRecording {
        #[serde(rename = "padId")]
        track_id: TrackId,
        time: f64,
    },
    SetTimeline {
        #[serde(default)]
        end_time: Option<f64>,
        #[serde(default)]
        bpm: Option<f64>,
    },
}

impl Action {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EngineError::InvalidAction(e.to_string()))
    }

    /// The action's wire name, used as the undo label
    pub fn label(&self) -> &'static str {
        match self {
            Action::AddEvent { .. } => "addEvent",
            Action::RemoveEvent { .. } => "removeEvent",
            Action::ToggleEvent { .. } => "toggleEvent",
            Action::ClearEvents { .. } => "clearEvents",
            Action::SelectEventsAtTime { .. } => "selectEventsAtTime",
            Action::SelectEvents { .. } => "selectEvents",
            Action::MoveEvents { .. } => "moveEvents",
            Action::RepeatEvents { .. } => "repeatEvents",
            Action::CutEvents => "cutEvents",
            Action::CopyEvents => "copyEvents",
            Action::PasteEvents { .. } => "pasteEvents",
            Action::SnapEvents { .. } => "snapEvents",
            Action::SetSelectedEventsTime { .. } => "setSelectedEventsTime",
            Action::SetSelectedEventsDuration { .. } => "setSelectedEventsDuration",
            Action::StartRecording { .. } => "startRecording",
            Action::StopRecording { .. } => "stopRecording",
            Action::SetTimeline { .. } => "setTimeline",
        }
    }

    /// Whether a change made by this action gets an undo entry
    ///
    /// Selection changes are not undoable. Opening a recording is held by
    /// the history and becomes one step together with its close.
    pub fn is_undoable(&self) -> bool {
        !matches!(
            self,
            Action::SelectEventsAtTime { .. }
                | Action::SelectEvents { .. }
                | Action::CopyEvents
                | Action::SetTimeline { .. }
        )
    }
}
