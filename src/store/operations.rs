//! Event store operations
//!
//! Every operation is pure: it takes the full event collection and returns a
//! new one. Operations that create events take the `IdGenerator` explicitly.
//! A stale reference (unknown track, id, or time) yields an unchanged copy.
//!
//! Adding and toggling are deliberately different gestures:
//! - `add_event` absorbs everything it overlaps into one joined event.
//! - `toggle_event` deletes whatever it hits, or creates an event on a miss.

use std::collections::HashSet;
use std::slice;

use crate::intervals::{bounds, intersecting_window, join, merge, quantize, quantize_duration, repeat};
use crate::intervals::quantize::is_valid_step;
use crate::models::{Event, EventId, IdGenerator, TrackId};
use super::selection::{deselect_all, partition_selected, update_selected};

fn without(events: &[Event], removed: &[Event]) -> Vec<Event> {
    let removed: HashSet<EventId> = removed.iter().map(|e| e.id).collect();
    events
        .iter()
        .filter(|e| !removed.contains(&e.id))
        .cloned()
        .collect()
}

/// Join `incoming` with every existing event on the tracks it touches
fn join_into_tracks(events: &[Event], incoming: Vec<Event>, ids: &mut IdGenerator) -> Vec<Event> {
    let touched: HashSet<&TrackId> = incoming.iter().map(|e| &e.track_id).collect();
    let (on_tracks, others): (Vec<Event>, Vec<Event>) = events
        .iter()
        .cloned()
        .partition(|e| touched.contains(&e.track_id));

    let mut combined = incoming;
    combined.extend(on_tracks);
    merge([join(combined, ids), others])
}

// ============================================================================
// Single-event gestures
// ============================================================================

/// Add an event, absorbing any events on the track it overlaps
pub fn add_event(
    events: &[Event],
    ids: &mut IdGenerator,
    track_id: &TrackId,
    time: f64,
    duration: f64,
) -> Vec<Event> {
    let created = Event::new(ids, track_id.clone(), time, duration);
    let absorbed = intersecting_window(events, time, duration, slice::from_ref(track_id));
    let rest = without(events, &absorbed);

    log::debug!(
        "add_event: {} on track {} at {} (+{}), {} candidates to join",
        created.id,
        track_id,
        time,
        duration,
        absorbed.len()
    );

    let mut group = vec![created];
    group.extend(absorbed);
    merge([join(group, ids), rest])
}

/// Delete everything the window hits on the track, or create an event there
pub fn toggle_event(
    events: &[Event],
    ids: &mut IdGenerator,
    track_id: &TrackId,
    time: f64,
    duration: f64,
) -> Vec<Event> {
    let hits = intersecting_window(events, time, duration, slice::from_ref(track_id));

    if hits.is_empty() {
        let created = Event::new(ids, track_id.clone(), time, duration);
        log::debug!("toggle_event: created {} on track {}", created.id, track_id);
        merge([vec![created], events.to_vec()])
    } else {
        log::debug!("toggle_event: removed {} events on track {}", hits.len(), track_id);
        without(events, &hits)
    }
}

/// Remove the events on the track starting exactly at `time`
pub fn remove_event(events: &[Event], track_id: &TrackId, time: f64) -> Vec<Event> {
    events
        .iter()
        .filter(|e| !(e.track_id == *track_id && e.time == time))
        .cloned()
        .collect()
}

// ============================================================================
// Group edits on the selection
// ============================================================================

/// Shift the selection in time and across track rows
///
/// The time shift is limited so the selection never starts before zero.
/// If any selected event cannot be moved to the target row, nothing moves.
/// `is_finished` marks the final frame of a drag; the mutation is the same
/// for every frame.
pub fn move_selected(events: &[Event], time_delta: f64, track_delta: i32, is_finished: bool) -> Vec<Event> {
    let (selected, rest) = partition_selected(events);
    if selected.is_empty() {
        return events.to_vec();
    }

    let (start, _) = bounds(&selected);
    let time_delta = time_delta.max(-start);

    let mut moved = Vec::with_capacity(selected.len());
    for event in selected {
        let Some(track_id) = event.track_id.with_row_offset(track_delta) else {
            log::warn!(
                "move_selected: track {} cannot move by {} rows, ignoring move",
                event.track_id,
                track_delta
            );
            return events.to_vec();
        };
        moved.push(Event {
            track_id,
            time: event.time + time_delta,
            ..event
        });
    }

    log::debug!(
        "move_selected: {} events by {}s / {} rows (finished: {})",
        moved.len(),
        time_delta,
        track_delta,
        is_finished
    );
    merge([moved, rest])
}

/// Place a copy of the selection right after itself, wrapping at `end_time`
///
/// The copies become the selection and the originals are deselected, so
/// repeating again extends the chain. Anything the copies overlap is joined
/// with them.
pub fn repeat_selected(events: &[Event], ids: &mut IdGenerator, end_time: f64) -> Vec<Event> {
    let (selected, rest) = partition_selected(events);
    let copies = repeat(&selected, end_time, ids);
    if copies.is_empty() {
        return events.to_vec();
    }

    log::debug!("repeat_selected: {} copies (end time {})", copies.len(), end_time);

    let mut combined: Vec<Event> = selected.into_iter().map(|e| e.with_selected(false)).collect();
    combined.extend(copies.into_iter().map(|e| e.with_selected(true)));
    combined.extend(rest);
    merge([join(combined, ids)])
}

/// Snap the selection's start times and durations to the grid
pub fn snap_selected(events: &[Event], step: f64) -> Vec<Event> {
    if !is_valid_step(step) {
        log::warn!("snap_selected: invalid grid step {}, ignoring", step);
        return events.to_vec();
    }

    update_selected(events, |e| Event {
        time: quantize(e.time, step),
        duration: quantize_duration(e.duration, step),
        ..e
    })
}

/// Move the selection so that it starts at `time`, keeping its shape
pub fn set_selected_time(events: &[Event], time: f64) -> Vec<Event> {
    let (selected, _) = partition_selected(events);
    if selected.is_empty() {
        return events.to_vec();
    }

    let (start, _) = bounds(&selected);
    let delta = time.max(0.0) - start;
    update_selected(events, |e| Event {
        time: e.time + delta,
        ..e
    })
}

pub fn set_selected_duration(events: &[Event], duration: f64) -> Vec<Event> {
    update_selected(events, |e| Event { duration, ..e })
}

// ============================================================================
// Clipboard
// ============================================================================

/// Take the selection out of the collection: `(remaining, clipboard)`
pub fn cut_selected(events: &[Event]) -> (Vec<Event>, Vec<Event>) {
    let (selected, rest) = partition_selected(events);
    log::debug!("cut_selected: {} events to clipboard", selected.len());
    (rest, copy_selected(&selected))
}

/// Clipboard contents for the current selection, left in place
pub fn copy_selected(events: &[Event]) -> Vec<Event> {
    events
        .iter()
        .filter(|e| e.is_selected)
        .map(|e| e.clone().with_selected(false).with_in_progress(false))
        .collect()
}

/// Re-insert clipboard contents with fresh ids, anchored at `time`/`track_id`
///
/// The clipboard's earliest event lands at `time` on `track_id`; other rows
/// keep their offset from it. A single-track clipboard may be pasted onto any
/// track. The pasted events become the selection and are joined with
/// whatever they overlap.
pub fn paste(
    events: &[Event],
    clipboard: &[Event],
    ids: &mut IdGenerator,
    time: f64,
    track_id: &TrackId,
) -> Vec<Event> {
    let Some(anchor) = clipboard.iter().min_by(|a, b| a.time.total_cmp(&b.time)) else {
        return events.to_vec();
    };
    let single_track = clipboard.iter().all(|e| e.track_id == anchor.track_id);
    let row_delta = match (anchor.track_id.row(), track_id.row()) {
        (Some(from), Some(to)) => Some(i64::from(to) - i64::from(from)),
        _ => None,
    };

    let offset = time.max(0.0) - anchor.time;
    let mut pasted = Vec::with_capacity(clipboard.len());
    for event in clipboard {
        let target = if single_track {
            Some(track_id.clone())
        } else {
            row_delta
                .and_then(|delta| i32::try_from(delta).ok())
                .and_then(|delta| event.track_id.with_row_offset(delta))
        };
        let Some(target) = target else {
            log::warn!("paste: cannot map track {} onto {}, ignoring paste", event.track_id, track_id);
            return events.to_vec();
        };
        pasted.push(Event::new(ids, target, event.time + offset, event.duration).with_selected(true));
    }

    log::debug!("paste: {} events at {} on track {}", pasted.len(), time, track_id);
    join_into_tracks(&deselect_all(events), pasted, ids)
}

// ============================================================================
// Recording
// ============================================================================

/// Open a recording on the track: an in-progress event of placeholder length
pub fn start_recording(
    events: &[Event],
    ids: &mut IdGenerator,
    track_id: &TrackId,
    time: f64,
    placeholder: f64,
) -> Vec<Event> {
    let created = Event::new(ids, track_id.clone(), time, placeholder).with_in_progress(true);
    log::debug!("start_recording: {} on track {} at {}", created.id, track_id, time);
    merge([vec![created], events.to_vec()])
}

/// Close every open recording on the track at `time` and join it in
pub fn stop_recording(
    events: &[Event],
    ids: &mut IdGenerator,
    track_id: &TrackId,
    time: f64,
    placeholder: f64,
) -> Vec<Event> {
    let (recording, rest): (Vec<Event>, Vec<Event>) = events
        .iter()
        .cloned()
        .partition(|e| e.in_progress && e.track_id == *track_id);
    if recording.is_empty() {
        return events.to_vec();
    }

    let finalized: Vec<Event> = recording
        .into_iter()
        .map(|e| Event {
            duration: (time - e.time).max(placeholder),
            in_progress: false,
            ..e
        })
        .collect();

    log::debug!("stop_recording: {} events finalized on track {}", finalized.len(), track_id);
    join_into_tracks(&rest, finalized, ids)
}

// ============================================================================
// Bulk removal
// ============================================================================

pub fn clear_track(events: &[Event], track_id: &TrackId) -> Vec<Event> {
    events
        .iter()
        .filter(|e| e.track_id != *track_id)
        .cloned()
        .collect()
}

pub fn clear_selected(events: &[Event]) -> Vec<Event> {
    events.iter().filter(|e| !e.is_selected).cloned().collect()
}

pub fn clear_all() -> Vec<Event> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intervals::intersects;
    use crate::store::selection::select_explicit;

    fn track(id: &str) -> TrackId {
        TrackId::from(id)
    }

    fn spans_on(events: &[Event], track_id: &str) -> Vec<(f64, f64)> {
        events
            .iter()
            .filter(|e| e.track_id.as_str() == track_id)
            .map(|e| (e.time, e.duration))
            .collect()
    }

    #[test]
    fn test_add_overlapping_events_joins() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 0.0, 4.0);
        let events = add_event(&events, &mut ids, &track("a1"), 3.5, 4.0);

        assert_eq!(spans_on(&events, "a1"), vec![(0.0, 7.5)]);
    }

    #[test]
    fn test_add_touching_event_stays_separate() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 0.0, 4.0);
        let first_id = events[0].id;
        let events = add_event(&events, &mut ids, &track("a1"), 4.0, 2.0);

        assert_eq!(spans_on(&events, "a1"), vec![(0.0, 4.0), (4.0, 2.0)]);
        assert_eq!(events[0].id, first_id);
    }

    #[test]
    fn test_add_on_other_track_does_not_interact() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 0.0, 4.0);
        let events = add_event(&events, &mut ids, &track("a2"), 1.0, 4.0);

        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_add_bridging_event_joins_three() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 0.0, 2.0);
        let events = add_event(&events, &mut ids, &track("a1"), 3.0, 2.0);
        let events = add_event(&events, &mut ids, &track("a1"), 1.0, 3.0);

        assert_eq!(spans_on(&events, "a1"), vec![(0.0, 5.0)]);
    }

    #[test]
    fn test_toggle_deletes_then_creates() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 0.0, 4.0);

        let events = toggle_event(&events, &mut ids, &track("a1"), 2.0, 1.0);
        assert!(events.is_empty());

        let events = toggle_event(&events, &mut ids, &track("a1"), 2.0, 1.0);
        assert_eq!(spans_on(&events, "a1"), vec![(2.0, 1.0)]);
    }

    #[test]
    fn test_toggle_never_joins() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 0.0, 1.0);

        let events = toggle_event(&events, &mut ids, &track("a1"), 2.0, 1.0);

        assert_eq!(spans_on(&events, "a1"), vec![(0.0, 1.0), (2.0, 1.0)]);
    }

    #[test]
    fn test_remove_requires_exact_start() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 1.0, 4.0);

        assert_eq!(remove_event(&events, &track("a1"), 2.0), events);
        assert_eq!(remove_event(&events, &track("a2"), 1.0), events);
        assert!(remove_event(&events, &track("a1"), 1.0).is_empty());
    }

    #[test]
    fn test_move_selected_shifts_time_and_row() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a3"), 1.0, 1.0);
        let events = add_event(&events, &mut ids, &track("a4"), 5.0, 1.0);
        let id = events[0].id;
        let events = select_explicit(&events, &[id]);

        let moved = move_selected(&events, 2.0, 1, true);

        let event = moved.iter().find(|e| e.id == id).unwrap();
        assert_eq!(event.track_id, track("a4"));
        assert_eq!(event.time, 3.0);
        assert!(event.is_selected);
        assert_eq!(moved.len(), 2);
    }

    #[test]
    fn test_move_selected_stops_at_zero() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 1.0, 1.0);
        let events = add_event(&events, &mut ids, &track("a1"), 3.0, 1.0);
        let all: Vec<EventId> = events.iter().map(|e| e.id).collect();
        let events = select_explicit(&events, &all);

        let moved = move_selected(&events, -5.0, 0, false);

        assert_eq!(spans_on(&moved, "a1"), vec![(0.0, 1.0), (2.0, 1.0)]);
    }

    #[test]
    fn test_move_to_missing_row_is_noop() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 1.0, 1.0);
        let events = add_event(&events, &mut ids, &track("kick"), 1.0, 1.0);
        let all: Vec<EventId> = events.iter().map(|e| e.id).collect();
        let events = select_explicit(&events, &all);

        assert_eq!(move_selected(&events, 1.0, 1, true), events);
        assert_eq!(move_selected(&events, 1.0, -2, true), events);
    }

    #[test]
    fn test_repeat_selected_selects_copies() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 0.0, 4.0);
        let original = events[0].id;
        let events = select_explicit(&events, &[original]);

        let events = repeat_selected(&events, &mut ids, 12.0);

        assert_eq!(spans_on(&events, "a1"), vec![(0.0, 4.0), (4.0, 4.0)]);
        assert!(!events[0].is_selected);
        assert!(events[1].is_selected);
        assert_eq!(events[0].id, original);

        let events = repeat_selected(&events, &mut ids, 12.0);
        assert_eq!(spans_on(&events, "a1"), vec![(0.0, 4.0), (4.0, 4.0), (8.0, 4.0)]);
    }

    #[test]
    fn test_repeat_selected_joins_overlaps() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 0.0, 2.0);
        let events = add_event(&events, &mut ids, &track("a1"), 3.0, 2.0);
        let first = events[0].id;
        let events = select_explicit(&events, &[first]);

        // Copy lands on [2, 4] and overlaps [3, 5]
        let events = repeat_selected(&events, &mut ids, 16.0);

        assert_eq!(spans_on(&events, "a1"), vec![(0.0, 2.0), (2.0, 3.0)]);
        assert!(events[1].is_selected);
        assert!(events.iter().all(|a| events.iter().all(|b| !intersects(a, b))));
    }

    #[test]
    fn test_repeat_without_selection_is_noop() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 0.0, 2.0);

        assert_eq!(repeat_selected(&events, &mut ids, 16.0), events);
    }

    #[test]
    fn test_snap_selected() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 1.1, 0.05);
        let events = add_event(&events, &mut ids, &track("a1"), 3.3, 1.0);
        let first = events[0].id;
        let events = select_explicit(&events, &[first]);

        let snapped = snap_selected(&events, 4.0);

        assert_eq!(snapped[0].id, first);
        assert_eq!((snapped[0].time, snapped[0].duration), (1.0, 0.25));
        assert_eq!((snapped[1].time, snapped[1].duration), (3.3, 1.0));
        assert_eq!(snap_selected(&events, 0.0), events);
    }

    #[test]
    fn test_set_selected_time_keeps_shape() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 2.0, 1.0);
        let events = add_event(&events, &mut ids, &track("a2"), 3.0, 1.0);
        let all: Vec<EventId> = events.iter().map(|e| e.id).collect();
        let events = select_explicit(&events, &all);

        let events = set_selected_time(&events, 5.0);

        assert_eq!(spans_on(&events, "a1"), vec![(5.0, 1.0)]);
        assert_eq!(spans_on(&events, "a2"), vec![(6.0, 1.0)]);
    }

    #[test]
    fn test_set_selected_duration() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 2.0, 1.0);
        let id = events[0].id;
        let events = select_explicit(&events, &[id]);

        let events = set_selected_duration(&events, 0.5);

        assert_eq!(events[0].id, id);
        assert_eq!(events[0].duration, 0.5);
    }

    #[test]
    fn test_cut_and_paste_single_track() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 1.0, 1.0);
        let events = add_event(&events, &mut ids, &track("a1"), 3.0, 1.0);
        let all: Vec<EventId> = events.iter().map(|e| e.id).collect();
        let events = select_explicit(&events, &all);

        let (events, clipboard) = cut_selected(&events);
        assert!(events.is_empty());
        assert_eq!(clipboard.len(), 2);

        let events = paste(&events, &clipboard, &mut ids, 10.0, &track("kick"));

        assert_eq!(spans_on(&events, "kick"), vec![(10.0, 1.0), (12.0, 1.0)]);
        assert!(events.iter().all(|e| e.is_selected));
        assert!(events.iter().all(|e| !all.contains(&e.id)));
    }

    #[test]
    fn test_paste_keeps_row_offsets() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 0.0, 1.0);
        let events = add_event(&events, &mut ids, &track("a2"), 0.5, 1.0);
        let all: Vec<EventId> = events.iter().map(|e| e.id).collect();
        let clipboard = copy_selected(&select_explicit(&events, &all));

        let events = paste(&events, &clipboard, &mut ids, 4.0, &track("a5"));

        assert_eq!(spans_on(&events, "a5"), vec![(4.0, 1.0)]);
        assert_eq!(spans_on(&events, "a6"), vec![(4.5, 1.0)]);
        assert_eq!(events.iter().filter(|e| e.is_selected).count(), 2);
    }

    #[test]
    fn test_paste_joins_with_existing() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 0.0, 2.0);
        let first = events[0].id;
        let clipboard = copy_selected(&select_explicit(&events, &[first]));

        let events = paste(&events, &clipboard, &mut ids, 1.0, &track("a1"));

        assert_eq!(spans_on(&events, "a1"), vec![(0.0, 3.0)]);
        assert!(events[0].is_selected);
    }

    #[test]
    fn test_paste_empty_clipboard_is_noop() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 0.0, 2.0);

        assert_eq!(paste(&events, &[], &mut ids, 1.0, &track("a1")), events);
    }

    #[test]
    fn test_recording_lifecycle() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 0.0, 1.0);

        let events = start_recording(&events, &mut ids, &track("a1"), 0.5, 0.01);
        assert_eq!(events.iter().filter(|e| e.in_progress).count(), 1);
        assert_eq!(events.len(), 2);

        let events = stop_recording(&events, &mut ids, &track("a1"), 3.0, 0.01);
        assert_eq!(spans_on(&events, "a1"), vec![(0.0, 3.0)]);
        assert!(events.iter().all(|e| !e.in_progress));
    }

    #[test]
    fn test_stop_without_recording_is_noop() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 0.0, 1.0);

        assert_eq!(stop_recording(&events, &mut ids, &track("a1"), 3.0, 0.01), events);
    }

    #[test]
    fn test_clear_scopes() {
        let mut ids = IdGenerator::new();
        let events = add_event(&[], &mut ids, &track("a1"), 0.0, 1.0);
        let events = add_event(&events, &mut ids, &track("a2"), 0.0, 1.0);
        let events = add_event(&events, &mut ids, &track("a2"), 5.0, 1.0);
        let last = events[2].id;
        let events = select_explicit(&events, &[last]);

        assert_eq!(clear_track(&events, &track("a2")).len(), 1);
        assert_eq!(clear_track(&events, &track("zz")), events);
        assert_eq!(clear_selected(&events).len(), 2);
        assert!(clear_all().is_empty());
    }
}
