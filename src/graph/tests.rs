//! Unit tests for the diagram store

use crate::graph::{Diagram, GraphError, StateId, Transition, DEFAULT_STATE_POSITION};

fn names(diagram: &Diagram) -> Vec<&str> {
    diagram.states().map(|s| s.name.as_str()).collect()
}

#[test]
fn test_seeded_diagram() {
    let diagram = Diagram::seeded();
    assert_eq!(names(&diagram), vec!["S1", "S2"]);

    let s1 = diagram.state(StateId(1)).unwrap();
    assert_eq!((s1.x, s1.y), (100.0, 100.0));
    let s2 = diagram.state(StateId(2)).unwrap();
    assert_eq!((s2.x, s2.y), (250.0, 100.0));

    assert_eq!(diagram.transitions(), &[Transition::new(StateId(1), StateId(2))]);
}

#[test]
fn test_add_state_to_empty_store_gets_id_one() {
    let mut diagram = Diagram::new();
    let id = diagram.add_state("Idle");
    assert_eq!(id, StateId(1));

    let state = diagram.state(id).unwrap();
    assert_eq!(state.name, "Idle");
    assert_eq!((state.x, state.y), DEFAULT_STATE_POSITION);
}

#[test]
fn test_add_state_uses_max_plus_one() {
    let mut diagram = Diagram::seeded();
    assert_eq!(diagram.add_state("S3"), StateId(3));

    // Removing a lower id does not free it up for reuse
    diagram.remove_state("S1").unwrap();
    assert_eq!(diagram.add_state("S4"), StateId(4));

    // Removing the highest id does
    diagram.remove_state("S4").unwrap();
    assert_eq!(diagram.add_state("S5"), StateId(4));
}

#[test]
fn test_duplicate_names_resolve_to_first() {
    let mut diagram = Diagram::new();
    let first = diagram.add_state("A");
    let _second = diagram.add_state("A");
    let b = diagram.add_state("B");

    let t = diagram.add_transition("A", "B").unwrap();
    assert_eq!(t, Transition::new(first, b));

    let removed = diagram.remove_state("A").unwrap();
    assert_eq!(removed.id, first);
    assert_eq!(diagram.find_by_name("A").map(|s| s.id), Some(StateId(2)));
}

#[test]
fn test_add_transition_unknown_name_is_noop() {
    let mut diagram = Diagram::seeded();
    let before = diagram.clone();

    let err = diagram.add_transition("S1", "Nope").unwrap_err();
    assert_eq!(err, GraphError::UnknownState("Nope".to_string()));

    let err = diagram.add_transition("Nope", "S2").unwrap_err();
    assert_eq!(err, GraphError::UnknownState("Nope".to_string()));

    assert_eq!(diagram, before);
}

#[test]
fn test_add_transition_allows_duplicates_and_self_loops() {
    let mut diagram = Diagram::seeded();
    diagram.add_transition("S1", "S2").unwrap();
    diagram.add_transition("S2", "S2").unwrap();

    assert_eq!(diagram.transition_count(), 3);
    assert!(diagram.transitions()[2].is_self_loop());
}

#[test]
fn test_remove_state_drops_referencing_transitions() {
    let mut diagram = Diagram::seeded();
    diagram.add_state("S3");
    diagram.add_transition("S3", "S1").unwrap();
    diagram.add_transition("S3", "S3").unwrap();
    diagram.add_transition("S2", "S3").unwrap();

    let removed = diagram.remove_state("S3").unwrap();
    assert_eq!(removed.id, StateId(3));

    assert!(diagram.state(StateId(3)).is_none());
    assert!(diagram.find_by_name("S3").is_none());
    assert!(diagram.transitions().iter().all(|t| !t.touches(StateId(3))));
    assert_eq!(diagram.transitions(), &[Transition::new(StateId(1), StateId(2))]);
}

#[test]
fn test_remove_unknown_state_leaves_everything() {
    let mut diagram = Diagram::seeded();
    let before = diagram.clone();

    let err = diagram.remove_state("Ghost").unwrap_err();
    assert_eq!(err, GraphError::UnknownState("Ghost".to_string()));
    assert_eq!(diagram, before);
}

#[test]
fn test_remove_transition_drops_every_exact_match() {
    let mut diagram = Diagram::seeded();
    diagram.add_state("S3");
    diagram.add_transition("S2", "S3").unwrap();
    diagram.add_transition("S1", "S2").unwrap();
    diagram.add_transition("S2", "S1").unwrap();

    let removed = diagram.remove_transition("S1", "S2").unwrap();
    assert_eq!(removed, 2);
    assert_eq!(
        diagram.transitions(),
        &[
            Transition::new(StateId(2), StateId(3)),
            Transition::new(StateId(2), StateId(1)),
        ]
    );

    // Nothing left to match, still fine
    assert_eq!(diagram.remove_transition("S1", "S2").unwrap(), 0);
}

#[test]
fn test_remove_transition_unknown_name_is_noop() {
    let mut diagram = Diagram::seeded();
    let before = diagram.clone();

    assert!(diagram.remove_transition("S1", "Nope").is_err());
    assert!(diagram.remove_transition("Nope", "S2").is_err());
    assert_eq!(diagram, before);
}

#[test]
fn test_add_then_remove_transition_restores_list() {
    let mut diagram = Diagram::seeded();
    diagram.add_state("S3");
    diagram.add_transition("S2", "S3").unwrap();
    let before = diagram.transitions().to_vec();

    diagram.add_transition("S3", "S1").unwrap();
    diagram.remove_transition("S3", "S1").unwrap();

    assert_eq!(diagram.transitions(), before.as_slice());
}

#[test]
fn test_update_state_position() {
    let mut diagram = Diagram::seeded();
    diagram.update_state_position(StateId(2), -5.5, 42.0).unwrap();

    let s2 = diagram.state(StateId(2)).unwrap();
    assert_eq!((s2.x, s2.y), (-5.5, 42.0));

    let err = diagram.update_state_position(StateId(99), 0.0, 0.0).unwrap_err();
    assert_eq!(err, GraphError::UnknownId(StateId(99)));
}

#[test]
fn test_resolved_transitions_pairs_states() {
    let mut diagram = Diagram::seeded();
    diagram.add_transition("S2", "S2").unwrap();

    let pairs: Vec<(&str, &str)> = diagram
        .resolved_transitions()
        .map(|(from, to)| (from.name.as_str(), to.name.as_str()))
        .collect();
    assert_eq!(pairs, vec![("S1", "S2"), ("S2", "S2")]);
}

#[test]
fn test_end_to_end_editing_session() {
    let mut diagram = Diagram::seeded();

    let s3 = diagram.add_state("S3");
    assert_eq!(s3, StateId(3));
    let state = diagram.state(s3).unwrap();
    assert_eq!((state.x, state.y), (150.0, 150.0));

    diagram.add_transition("S2", "S3").unwrap();
    assert_eq!(
        diagram.transitions(),
        &[
            Transition::new(StateId(1), StateId(2)),
            Transition::new(StateId(2), StateId(3)),
        ]
    );

    diagram.remove_state("S2").unwrap();
    assert_eq!(names(&diagram), vec!["S1", "S3"]);
    assert!(diagram.transitions().is_empty());

    let snapshot = diagram.clone();
    diagram.update_state_position(StateId(1), 10.0, 20.0).unwrap();
    let s1 = diagram.state(StateId(1)).unwrap();
    assert_eq!((s1.x, s1.y), (10.0, 20.0));
    assert_eq!(diagram.state(s3), snapshot.state(s3));
    assert_eq!(diagram.transitions(), snapshot.transitions());
}

#[test]
fn test_snapshot_serializes_to_json() {
    let diagram = Diagram::seeded();
    let json = serde_json::to_value(&diagram).unwrap();

    assert_eq!(json["states"]["1"]["name"], "S1");
    assert_eq!(json["transitions"][0]["from"], 1);
    assert_eq!(json["transitions"][0]["to"], 2);

    let back: Diagram = serde_json::from_value(json).unwrap();
    assert_eq!(back, diagram);
}
