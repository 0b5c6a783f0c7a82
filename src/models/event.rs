//! Timeline events and their identifiers
//!
//! An event is a time interval `[time, time + duration)` on one track. Events
//! are values: operations clone and rebuild them, they never edit an event
//! that already lives in a snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of an event, unique for the lifetime of an `IdGenerator`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic event id allocator
///
/// Owned by the state container and handed to every operation that creates
/// events. Ids are never reused, not even after undo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Start allocating at a specific id (used when resuming a session)
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    pub fn next_id(&mut self) -> EventId {
        let id = EventId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to `next_id` will hand out
    pub fn peek(&self) -> EventId {
        EventId(self.next)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque track (pad) identifier, e.g. `"a1"`
///
/// A trailing run of ASCII digits is read as the track's row number, which
/// is what vertical moves and pastes shift.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn split_row(&self) -> (&str, Option<u32>) {
        let digits_start = self
            .0
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i);

        match digits_start {
            Some(i) => (&self.0[..i], self.0[i..].parse().ok()),
            None => (&self.0, None),
        }
    }

    /// Row number encoded in the id (`"a12"` -> `12`)
    pub fn row(&self) -> Option<u32> {
        self.split_row().1
    }

    /// The id of the track `delta` rows away, keeping the prefix
    ///
    /// Returns `None` when the id carries no row number or the row would
    /// become negative. A zero delta always succeeds.
    pub fn with_row_offset(&self, delta: i32) -> Option<TrackId> {
        if delta == 0 {
            return Some(self.clone());
        }
        let (prefix, row) = self.split_row();
        let shifted = i64::from(row?) + i64::from(delta);
        if shifted < 0 {
            return None;
        }
        Some(TrackId(format!("{}{}", prefix, shifted)))
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single trigger interval on a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,

    #[serde(rename = "padId")]
    pub track_id: TrackId,

    /// Start in seconds
    pub time: f64,

    /// Length in seconds
    pub duration: f64,

    #[serde(default)]
    pub is_selected: bool,

    /// Still being recorded; the end is not fixed yet
    #[serde(default)]
    pub in_progress: bool,
}

impl Event {
    /// Create a new event with a freshly allocated id
    pub fn new(ids: &mut IdGenerator, track_id: TrackId, time: f64, duration: f64) -> Self {
        Self {
            id: ids.next_id(),
            track_id,
            time,
            duration,
            is_selected: false,
            in_progress: false,
        }
    }

    /// End of the interval in seconds
    pub fn end(&self) -> f64 {
        self.time + self.duration
    }

    pub fn with_selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }

    pub fn with_in_progress(mut self, in_progress: bool) -> Self {
        self.in_progress = in_progress;
        self
    }
}
