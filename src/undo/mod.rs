use crate::models::defaults::DEFAULT_HISTORY_LIMIT;
use crate::models::Event;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A labelled copy of the event collection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Name of the action that replaced this state (e.g. "moveEvents")
    pub label: String,
    pub events: Vec<Event>,
}

impl Snapshot {
    /// Open recordings are never part of history; they are dropped here
    pub fn new(label: impl Into<String>, events: Vec<Event>) -> Self {
        Self {
            label: label.into(),
            events: events.into_iter().filter(|e| !e.in_progress).collect(),
        }
    }
}

/// Snapshot-based undo/redo history with drag batching
///
/// Every entry holds the state *before* an action. A drag produces many live
/// frames; only the state before its first frame is kept, and the batch is
/// closed by the final frame (or by any other recorded action). An open
/// recording is held the same way until it is stopped.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UndoStack {
    /// States that can be restored by undo, oldest first
    pub entries: VecDeque<Snapshot>,
    /// States that can be restored by redo, most recent last
    pub redo_entries: Vec<Snapshot>,
    /// Maximum number of undo entries to keep
    max_size: usize,
    /// State before the drag currently in progress (if any)
    #[serde(skip)]
    current_batch: Option<Snapshot>,
    /// State before the recording currently open (if any)
    #[serde(skip)]
    open_recording: Option<Snapshot>,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl PartialEq for UndoStack {
    fn eq(&self, other: &Self) -> bool {
        // Only compare serialized fields (skip transient fields)
        self.entries == other.entries
            && self.redo_entries == other.redo_entries
            && self.max_size == other.max_size
    }
}

impl UndoStack {
    /// Create a new undo stack with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            redo_entries: Vec::new(),
            max_size,
            current_batch: None,
            open_recording: None,
        }
    }

    /// Record the state before a completed action
    pub fn push(&mut self, snapshot: Snapshot) {
        self.finalize_batch();
        self.commit_recording();
        self.record(snapshot);
    }

    /// Record the state before a live drag frame
    ///
    /// Only the first frame of a batch is kept.
    pub fn push_batched(&mut self, snapshot: Snapshot) {
        if self.current_batch.is_none() {
            self.commit_recording();
            self.current_batch = Some(snapshot);
        }
    }

    pub fn has_pending_batch(&self) -> bool {
        self.current_batch.is_some()
    }

    /// Close the current batch and add it to the undo stack
    pub fn finalize_batch(&mut self) {
        if let Some(snapshot) = self.current_batch.take() {
            self.record(snapshot);
        }
    }

    /// Hold the state before a recording opens
    ///
    /// Only the first of overlapping recordings is kept.
    pub fn open_recording(&mut self, snapshot: Snapshot) {
        if self.open_recording.is_none() {
            self.finalize_batch();
            self.open_recording = Some(snapshot);
        }
    }

    pub fn has_open_recording(&self) -> bool {
        self.open_recording.is_some()
    }

    /// Turn the held pre-recording state into one undo entry
    pub fn commit_recording(&mut self) {
        if let Some(snapshot) = self.open_recording.take() {
            self.record(snapshot);
        }
    }

    fn record(&mut self, snapshot: Snapshot) {
        // New history invalidates anything that could be redone
        self.redo_entries.clear();
        self.push_entry(snapshot);
    }

    fn push_entry(&mut self, snapshot: Snapshot) {
        self.entries.push_back(snapshot);

        if self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
    }

    /// Step back: returns the state to restore, `current` becomes redoable
    ///
    /// With a recording open, undo only discards that recording and leaves
    /// nothing to redo.
    pub fn undo(&mut self, current: Vec<Event>) -> Result<Vec<Event>, Vec<Event>> {
        if let Some(before) = self.open_recording.take() {
            return Ok(before.events);
        }
        self.finalize_batch();

        match self.entries.pop_back() {
            Some(previous) => {
                self.redo_entries.push(Snapshot::new(previous.label.clone(), current));
                Ok(previous.events)
            }
            None => Err(current),
        }
    }

    /// Step forward: returns the state to restore, `current` becomes undoable
    pub fn redo(&mut self, current: Vec<Event>) -> Result<Vec<Event>, Vec<Event>> {
        match self.redo_entries.pop() {
            Some(next) => {
                self.push_entry(Snapshot::new(next.label.clone(), current));
                Ok(next.events)
            }
            None => Err(current),
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() || self.current_batch.is_some() || self.open_recording.is_some()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_entries.is_empty()
    }

    /// Label of the action the next undo would revert
    pub fn undo_label(&self) -> Option<&str> {
        self.open_recording
            .as_ref()
            .or(self.current_batch.as_ref())
            .or_else(|| self.entries.back())
            .map(|s| s.label.as_str())
    }

    /// Clear all undo history
    pub fn clear(&mut self) {
        self.entries.clear();
        self.redo_entries.clear();
        self.current_batch = None;
        self.open_recording = None;
    }

    /// Get the number of available undo steps
    pub fn undo_count(&self) -> usize {
        self.entries.len()
            + usize::from(self.current_batch.is_some())
            + usize::from(self.open_recording.is_some())
    }

    /// Get the number of available redo steps
    pub fn redo_count(&self) -> usize {
        self.redo_entries.len()
    }
}
