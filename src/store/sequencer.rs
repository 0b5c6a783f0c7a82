//! The sequencer state container
//!
//! Owns the authoritative event snapshot together with everything the pure
//! operations need but must not own themselves: the id generator, the
//! clipboard, the timeline bounds, and the undo history. Actions are applied
//! one at a time; each produces a complete new snapshot that replaces the
//! old one in a single assignment.

use std::mem;

use crate::error::{EngineError, Result};
use crate::models::{EngineConfig, Event, IdGenerator, Timeline};
use crate::persistence::{self, TrackMap};
use crate::undo::{Snapshot, UndoStack};
use super::actions::{Action, ClearScope};
use super::operations as ops;
use super::selection;

#[derive(Debug, Clone)]
pub struct Sequencer {
    events: Vec<Event>,
    ids: IdGenerator,
    clipboard: Vec<Event>,
    timeline: Timeline,
    history: UndoStack,
    config: EngineConfig,
}

impl Sequencer {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            events: Vec::new(),
            ids: IdGenerator::new(),
            clipboard: Vec::new(),
            timeline: config.timeline(),
            history: UndoStack::new(config.history_limit),
            config,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn selected_events(&self) -> Vec<Event> {
        selection::partition_selected(&self.events).0
    }

    pub fn timeline(&self) -> Timeline {
        self.timeline
    }

    pub fn clipboard(&self) -> &[Event] {
        &self.clipboard
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Apply one action; returns whether the event collection changed
    pub fn dispatch(&mut self, action: Action) -> bool {
        let next = self.reduce(&action);
        let changed = next != self.events;

        if changed {
            let previous = mem::replace(&mut self.events, next);
            if action.is_undoable() {
                self.record_history(&action, previous);
            }
            log::debug!("{}: {} events", action.label(), self.events.len());
        } else {
            log::debug!("{}: no change", action.label());
        }

        // A release frame closes the drag even when it moved nothing itself
        if let Action::MoveEvents { is_finished: true, .. } = action {
            self.history.finalize_batch();
        }

        changed
    }

    fn record_history(&mut self, action: &Action, previous: Vec<Event>) {
        let snapshot = Snapshot::new(action.label(), previous);
        match action {
            Action::MoveEvents { is_finished: false, .. } => self.history.push_batched(snapshot),
            Action::MoveEvents { is_finished: true, .. } if self.history.has_pending_batch() => {
                self.history.finalize_batch()
            }
            Action::StartRecording { .. } => self.history.open_recording(snapshot),
            Action::StopRecording { .. } if self.history.has_open_recording() => {
                self.history.commit_recording()
            }
            _ => self.history.push(snapshot),
        }
    }

    /// Compute the snapshot an action produces, without installing it
    fn reduce(&mut self, action: &Action) -> Vec<Event> {
        let events = &self.events;
        let ids = &mut self.ids;
        let placeholder = self.config.recording_placeholder;

        match action {
            Action::AddEvent { track_id, time, duration } => {
                ops::add_event(events, ids, track_id, *time, *duration)
            }
            Action::RemoveEvent { track_id, time } => ops::remove_event(events, track_id, *time),
            Action::ToggleEvent { track_id, time, duration } => {
                ops::toggle_event(events, ids, track_id, *time, *duration)
            }
            Action::ClearEvents { scope } => match scope {
                ClearScope::Track(track_id) => ops::clear_track(events, track_id),
                ClearScope::Selection => ops::clear_selected(events),
                ClearScope::All => ops::clear_all(),
            },
            Action::SelectEventsAtTime { track_ids, time, duration } => {
                selection::select_window(events, track_ids, *time, *duration)
            }
            Action::SelectEvents { ids: selected } => selection::select_explicit(events, selected),
            Action::MoveEvents { time_delta, track_delta, is_finished } => {
                ops::move_selected(events, *time_delta, *track_delta, *is_finished)
            }
            Action::RepeatEvents { end_time } => {
                let end_time = end_time.unwrap_or(self.timeline.end_time);
                ops::repeat_selected(events, ids, end_time)
            }
            Action::CutEvents => {
                if !selection::has_selection(events) {
                    return events.clone();
                }
                let (remaining, clipboard) = ops::cut_selected(events);
                self.clipboard = clipboard;
                remaining
            }
            Action::CopyEvents => {
                if selection::has_selection(events) {
                    self.clipboard = ops::copy_selected(events);
                }
                events.clone()
            }
            Action::PasteEvents { time, track_id } => {
                ops::paste(events, &self.clipboard, ids, *time, track_id)
            }
            Action::SnapEvents { step } => ops::snap_selected(events, *step),
            Action::SetSelectedEventsTime { time } => ops::set_selected_time(events, *time),
            Action::SetSelectedEventsDuration { duration } => {
                ops::set_selected_duration(events, *duration)
            }
            Action::StartRecording { track_id, time } => {
                ops::start_recording(events, ids, track_id, *time, placeholder)
            }
            Action::StopRecording { track_id, time } => {
                ops::stop_recording(events, ids, track_id, *time, placeholder)
            }
            Action::SetTimeline { end_time, bpm } => {
                if let Some(end_time) = end_time {
                    self.timeline.end_time = *end_time;
                }
                if let Some(bpm) = bpm {
                    self.timeline.bpm = *bpm;
                }
                events.clone()
            }
        }
    }

    pub fn undo(&mut self) -> Result<()> {
        let current = mem::take(&mut self.events);
        match self.history.undo(current) {
            Ok(previous) => {
                self.events = previous;
                Ok(())
            }
            Err(current) => {
                self.events = current;
                Err(EngineError::NothingToUndo)
            }
        }
    }

    pub fn redo(&mut self) -> Result<()> {
        let current = mem::take(&mut self.events);
        match self.history.redo(current) {
            Ok(next) => {
                self.events = next;
                Ok(())
            }
            Err(current) => {
                self.events = current;
                Err(EngineError::NothingToRedo)
            }
        }
    }

    /// Persisted shape of the current events
    pub fn export_tracks(&self) -> TrackMap {
        persistence::export_tracks(&self.events)
    }

    /// Replace all events with imported ones; history and clipboard reset
    pub fn import_tracks(&mut self, tracks: &TrackMap) {
        self.events = persistence::import_tracks(tracks, &mut self.ids);
        self.clipboard.clear();
        self.history.clear();
        log::info!("Imported {} events on {} tracks", self.events.len(), tracks.len());
    }

    pub fn to_json(&self) -> Result<String> {
        persistence::to_json(&self.events)
    }

    /// Load an exported document; on a parse error nothing changes
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        self.events = persistence::from_json(json, &mut self.ids)?;
        self.clipboard.clear();
        self.history.clear();
        log::info!("Loaded {} events", self.events.len());
        Ok(())
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
