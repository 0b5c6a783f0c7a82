//! Selection as the working set for group edits
//!
//! Selection is a single slot: every select call replaces the previous
//! selection entirely instead of adding to it.

use std::collections::HashSet;

use crate::intervals::{intersecting_window, merge};
use crate::models::{Event, EventId, TrackId};

/// Select exactly the events touching the window on the given tracks
pub fn select_window(events: &[Event], track_ids: &[TrackId], time: f64, duration: f64) -> Vec<Event> {
    let hits: HashSet<EventId> = intersecting_window(events, time, duration, track_ids)
        .iter()
        .map(|e| e.id)
        .collect();

    log::debug!("select_window: {} events selected", hits.len());
    mark_selected(events, |e| hits.contains(&e.id))
}

/// Select exactly the given ids; unknown ids are ignored
pub fn select_explicit(events: &[Event], ids: &[EventId]) -> Vec<Event> {
    mark_selected(events, |e| ids.contains(&e.id))
}

pub fn deselect_all(events: &[Event]) -> Vec<Event> {
    mark_selected(events, |_| false)
}

fn mark_selected(events: &[Event], is_selected: impl Fn(&Event) -> bool) -> Vec<Event> {
    events
        .iter()
        .map(|e| e.clone().with_selected(is_selected(e)))
        .collect()
}

/// Split into `(selected, everything else)`, both cloned
pub fn partition_selected(events: &[Event]) -> (Vec<Event>, Vec<Event>) {
    events.iter().cloned().partition(|e| e.is_selected)
}

pub fn has_selection(events: &[Event]) -> bool {
    events.iter().any(|e| e.is_selected)
}

/// Rebuild every selected event with `edit` and fold the results back
///
/// `edit` must keep the id; this is the path for non-merging group edits.
pub fn update_selected(events: &[Event], edit: impl Fn(Event) -> Event) -> Vec<Event> {
    let (selected, rest) = partition_selected(events);
    if selected.is_empty() {
        return events.to_vec();
    }

    let edited: Vec<Event> = selected.into_iter().map(edit).collect();
    merge([edited, rest])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IdGenerator;

    fn sample(ids: &mut IdGenerator) -> Vec<Event> {
        vec![
            Event::new(ids, "1".into(), 0.0, 4.0),
            Event::new(ids, "2".into(), 2.0, 4.0),
            Event::new(ids, "1".into(), 10.0, 1.0),
        ]
    }

    fn selected_ids(events: &[Event]) -> Vec<EventId> {
        events.iter().filter(|e| e.is_selected).map(|e| e.id).collect()
    }

    #[test]
    fn test_select_window_replaces_previous_selection() {
        let mut ids = IdGenerator::new();
        let events = sample(&mut ids);
        let tracks = vec![TrackId::from("1"), TrackId::from("2")];

        let first = select_window(&events, &tracks, 9.0, 2.0);
        assert_eq!(selected_ids(&first), vec![EventId(3)]);

        let second = select_window(&first, &tracks, 3.0, 0.0);
        assert_eq!(selected_ids(&second), vec![EventId(1), EventId(2)]);
    }

    #[test]
    fn test_select_explicit() {
        let mut ids = IdGenerator::new();
        let events = select_explicit(&sample(&mut ids), &[EventId(1), EventId(3)]);
        let events = select_explicit(&events, &[EventId(2), EventId(99)]);

        assert_eq!(selected_ids(&events), vec![EventId(2)]);
    }

    #[test]
    fn test_update_selected_keeps_ids() {
        let mut ids = IdGenerator::new();
        let events = select_explicit(&sample(&mut ids), &[EventId(3)]);

        let updated = update_selected(&events, |e| Event { time: 1.0, ..e });

        assert_eq!(updated.len(), 3);
        assert_eq!(updated[1].id, EventId(3));
        assert_eq!(updated[1].time, 1.0);
    }

    #[test]
    fn test_update_without_selection_is_noop() {
        let mut ids = IdGenerator::new();
        let events = sample(&mut ids);

        assert_eq!(update_selected(&events, |e| Event { time: 1.0, ..e }), events);
    }
}
