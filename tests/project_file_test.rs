// Saving and reloading a sequencer project file

use std::fs;

use pad_timeline_wasm::{Action, EngineError, Sequencer, TrackId};

fn add(sequencer: &mut Sequencer, track: &str, time: f64, duration: f64) {
    sequencer.dispatch(Action::AddEvent {
        track_id: TrackId::from(track),
        time,
        duration,
    });
}

#[test]
fn test_project_file_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("pattern.json");

    let mut sequencer = Sequencer::default();
    add(&mut sequencer, "a1", 4.0, 1.0);
    add(&mut sequencer, "a1", 0.0, 2.0);
    add(&mut sequencer, "b3", 1.5, 0.5);
    let ids: Vec<_> = sequencer.events().iter().map(|e| e.id).collect();
    sequencer.dispatch(Action::SelectEvents { ids: ids.clone() });

    fs::write(&path, sequencer.to_json().expect("export should succeed"))
        .expect("project file should be written");

    let mut restored = Sequencer::default();
    add(&mut restored, "c1", 9.0, 1.0);
    let json = fs::read_to_string(&path).expect("project file should be readable");
    restored.load_json(&json).expect("import should succeed");

    // Loading replaces whatever was there before
    assert_eq!(restored.events().len(), 3);
    assert!(restored.events().iter().all(|e| e.track_id != TrackId::from("c1")));

    // Selection is not persisted
    assert!(restored.events().iter().all(|e| !e.is_selected));

    let spans: Vec<(String, f64, f64)> = restored
        .events()
        .iter()
        .map(|e| (e.track_id.to_string(), e.time, e.duration))
        .collect();
    assert_eq!(
        spans,
        vec![
            ("a1".to_string(), 0.0, 2.0),
            ("b3".to_string(), 1.5, 0.5),
            ("a1".to_string(), 4.0, 1.0),
        ]
    );

    // Loading resets history
    assert!(!restored.history().can_undo());
}

#[test]
fn test_loaded_events_get_fresh_ids() {
    let mut sequencer = Sequencer::default();
    add(&mut sequencer, "a1", 0.0, 1.0);
    let json = sequencer.to_json().unwrap();
    let before: Vec<_> = sequencer.events().iter().map(|e| e.id).collect();

    sequencer.load_json(&json).unwrap();

    assert_eq!(sequencer.events().len(), 1);
    assert!(!before.contains(&sequencer.events()[0].id));
}

#[test]
fn test_malformed_project_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"a1": [[0.0]]"#).unwrap();

    let mut sequencer = Sequencer::default();
    add(&mut sequencer, "a1", 2.0, 1.0);

    let json = fs::read_to_string(&path).unwrap();
    let result = sequencer.load_json(&json);

    assert!(matches!(result, Err(EngineError::InvalidProject(_))));
    assert_eq!(sequencer.events().len(), 1, "failed load should leave events untouched");
}
