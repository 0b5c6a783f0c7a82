//! Interval algebra over timeline events
//!
//! Two overlap rules live here and must not be unified:
//! - `intersects` is exclusive at the boundaries, so events that merely touch
//!   (`a.end() == b.time`) stay separate when joining.
//! - `intersecting_window` is inclusive, so hit-testing and selection catch
//!   events that touch the queried window.

use std::collections::HashSet;
use std::iter;

use crate::models::{Event, IdGenerator, TrackId};

/// Whether two distinct events on the same track overlap
pub fn intersects(a: &Event, b: &Event) -> bool {
    if a.id == b.id || a.track_id != b.track_id {
        return false;
    }

    let (lo, hi) = if a.time <= b.time { (a, b) } else { (b, a) };
    lo.end() > hi.time && hi.end() > lo.time
}

/// `(earliest start, latest end)` over the events, `(0, 0)` when empty
pub fn bounds<'a, I>(events: I) -> (f64, f64)
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut events = events.into_iter();
    let Some(first) = events.next() else {
        return (0.0, 0.0);
    };

    events.fold((first.time, first.end()), |(start, end), e| {
        (start.min(e.time), end.max(e.end()))
    })
}

/// Sort events ascending by start time (stable, so equal starts keep order)
pub fn sort_by_time(events: &mut [Event]) {
    events.sort_by(|a, b| a.time.total_cmp(&b.time));
}

/// Concatenate event lists, keeping the first occurrence of each id
///
/// This is how a recomputed subset is folded back into the full collection:
/// pass the subset first and the original collection after it.
pub fn merge<L>(lists: L) -> Vec<Event>
where
    L: IntoIterator,
    L::Item: IntoIterator<Item = Event>,
{
    let mut seen = HashSet::new();
    let mut merged: Vec<Event> = lists
        .into_iter()
        .flatten()
        .filter(|e| seen.insert(e.id))
        .collect();

    sort_by_time(&mut merged);
    merged
}

/// Collapse every group of intersecting events on a track into one event
///
/// Greedy fixpoint: pop an event, pull out everything it intersects, and if
/// anything was found push back one fresh event spanning the whole group.
/// The synthesized event may still intersect other remaining events, so it
/// goes back onto the worklist rather than into the result.
///
/// The combined event is selected if any of its inputs was. Events that are
/// still being recorded pass through untouched.
pub fn join(events: Vec<Event>, ids: &mut IdGenerator) -> Vec<Event> {
    let (mut worklist, recording): (Vec<Event>, Vec<Event>) =
        events.into_iter().partition(|e| !e.in_progress);
    let mut joined = Vec::with_capacity(worklist.len());

    while let Some(event) = worklist.pop() {
        let (hits, rest): (Vec<Event>, Vec<Event>) = worklist
            .into_iter()
            .partition(|other| intersects(&event, other));
        worklist = rest;

        if hits.is_empty() {
            joined.push(event);
            continue;
        }

        let (start, end) = bounds(hits.iter().chain(iter::once(&event)));
        let is_selected = event.is_selected || hits.iter().any(|e| e.is_selected);
        let combined = Event::new(ids, event.track_id.clone(), start, end - start)
            .with_selected(is_selected);

        log::trace!(
            "join: {} events on track {} -> {} [{}, {}]",
            hits.len() + 1,
            event.track_id,
            combined.id,
            start,
            end
        );

        worklist.push(combined);
    }

    merge([joined, recording])
}

/// Events on any of `track_ids` touching the window `[time, time + duration]`
///
/// Boundaries are inclusive and `duration == 0` is a point query.
pub fn intersecting_window(
    events: &[Event],
    time: f64,
    duration: f64,
    track_ids: &[TrackId],
) -> Vec<Event> {
    if track_ids.is_empty() {
        return Vec::new();
    }

    events
        .iter()
        .filter(|e| track_ids.contains(&e.track_id))
        .filter(|e| e.time <= time + duration && e.end() >= time)
        .cloned()
        .collect()
}

/// Copy a cluster of events to directly after itself, wrapping at `end_time`
///
/// Every event shifts by the cluster's span. A copy that would run past the
/// end of the timeline is truncated there instead of being split. Copies get
/// fresh ids and keep their other fields; no copies are produced for a
/// non-positive `end_time`.
pub fn repeat(events: &[Event], end_time: f64, ids: &mut IdGenerator) -> Vec<Event> {
    if events.is_empty() || !(end_time > 0.0) {
        return Vec::new();
    }

    let (span_start, span_end) = bounds(events);

    events
        .iter()
        .map(|e| {
            let time = (e.time - span_start + span_end).rem_euclid(end_time);
            let duration = if time + e.duration > end_time {
                end_time - time
            } else {
                e.duration
            };

            Event {
                id: ids.next_id(),
                time,
                duration,
                in_progress: false,
                ..e.clone()
            }
        })
        .collect()
}
