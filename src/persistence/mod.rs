//! Bulk export/import of timeline events
//!
//! The persisted shape maps each track to its `[time, duration]` pairs:
//!
//! ```json
//! { "a1": [[0.0, 4.0], [6.0, 1.5]], "b3": [[2.0, 0.5]] }
//! ```
//!
//! Ids, selection, and in-progress recordings are not persisted. Importing
//! allocates fresh ids in list order.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::intervals::merge;
use crate::models::{Event, IdGenerator, TrackId};

pub type TrackMap = BTreeMap<TrackId, Vec<(f64, f64)>>;

pub fn export_tracks(events: &[Event]) -> TrackMap {
    let mut tracks = TrackMap::new();

    for event in events.iter().filter(|e| !e.in_progress) {
        tracks
            .entry(event.track_id.clone())
            .or_insert_with(Vec::new)
            .push((event.time, event.duration));
    }

    for spans in tracks.values_mut() {
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));
    }

    tracks
}

pub fn import_tracks(tracks: &TrackMap, ids: &mut IdGenerator) -> Vec<Event> {
    let imported: Vec<Event> = tracks
        .iter()
        .flat_map(|(track_id, spans)| spans.iter().map(move |span| (track_id, span)))
        .map(|(track_id, &(time, duration))| Event::new(ids, track_id.clone(), time, duration))
        .collect();

    merge([imported])
}

pub fn to_json(events: &[Event]) -> Result<String> {
    Ok(serde_json::to_string(&export_tracks(events))?)
}

pub fn from_json(json: &str, ids: &mut IdGenerator) -> Result<Vec<Event>> {
    let tracks: TrackMap = serde_json::from_str(json)?;
    Ok(import_tracks(&tracks, ids))
}
