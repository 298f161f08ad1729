//! Unit tests for the control panel forms

use crate::controls::{split_transition_pair, ControlPanel, Submission};
use crate::graph::{Diagram, GraphError, StateId, Transition};

#[test]
fn test_split_transition_pair() {
    assert_eq!(split_transition_pair("S1-S2").unwrap(), ("S1", "S2"));
    // Only the first dash separates
    assert_eq!(split_transition_pair("a-b-c").unwrap(), ("a", "b-c"));
    assert_eq!(split_transition_pair("-x").unwrap(), ("", "x"));
    assert_eq!(
        split_transition_pair("S1S2").unwrap_err(),
        GraphError::MalformedTransition("S1S2".to_string())
    );
}

#[test]
fn test_add_state_form() {
    let mut diagram = Diagram::seeded();
    let mut panel = ControlPanel::new();

    assert_eq!(panel.add_state.submit(&mut diagram), Submission::Skipped);
    assert_eq!(diagram.state_count(), 2);

    panel.add_state.name = "S3".to_string();
    assert_eq!(panel.add_state.submit(&mut diagram), Submission::Applied);
    assert!(panel.add_state.name.is_empty());
    assert_eq!(diagram.find_by_name("S3").map(|s| s.id), Some(StateId(3)));
}

#[test]
fn test_add_transition_form_requires_both_fields() {
    let mut diagram = Diagram::seeded();
    let mut panel = ControlPanel::new();

    panel.add_transition.from = "S2".to_string();
    assert_eq!(panel.add_transition.submit(&mut diagram), Submission::Skipped);
    // Partially filled forms keep their text
    assert_eq!(panel.add_transition.from, "S2");

    panel.add_transition.to = "S1".to_string();
    assert_eq!(panel.add_transition.submit(&mut diagram), Submission::Applied);
    assert!(panel.add_transition.from.is_empty());
    assert!(panel.add_transition.to.is_empty());
    assert_eq!(diagram.transitions()[1], Transition::new(StateId(2), StateId(1)));
}

#[test]
fn test_add_transition_form_unknown_state_clears_and_reports() {
    let mut diagram = Diagram::seeded();
    let before = diagram.clone();
    let mut panel = ControlPanel::new();

    panel.add_transition.from = "S1".to_string();
    panel.add_transition.to = "S9".to_string();
    let outcome = panel.add_transition.submit(&mut diagram);

    assert_eq!(outcome, Submission::Failed(GraphError::UnknownState("S9".to_string())));
    assert!(panel.add_transition.from.is_empty());
    assert!(panel.add_transition.to.is_empty());
    assert_eq!(diagram, before);
}

#[test]
fn test_remove_state_form() {
    let mut diagram = Diagram::seeded();
    let mut panel = ControlPanel::new();

    panel.remove_state.name = "S1".to_string();
    assert!(panel.remove_state.submit(&mut diagram).is_applied());
    assert!(panel.remove_state.name.is_empty());
    assert!(diagram.find_by_name("S1").is_none());
    assert!(diagram.transitions().is_empty());

    panel.remove_state.name = "S1".to_string();
    assert!(matches!(
        panel.remove_state.submit(&mut diagram),
        Submission::Failed(GraphError::UnknownState(_))
    ));
}

#[test]
fn test_remove_transition_form() {
    let mut diagram = Diagram::seeded();
    let mut panel = ControlPanel::new();

    panel.remove_transition.pair = "S1-S2".to_string();
    assert!(panel.remove_transition.submit(&mut diagram).is_applied());
    assert!(panel.remove_transition.pair.is_empty());
    assert!(diagram.transitions().is_empty());
}

#[test]
fn test_remove_transition_form_without_dash() {
    let mut diagram = Diagram::seeded();
    let before = diagram.clone();
    let mut panel = ControlPanel::new();

    panel.remove_transition.pair = "S1S2".to_string();
    assert_eq!(
        panel.remove_transition.submit(&mut diagram),
        Submission::Failed(GraphError::MalformedTransition("S1S2".to_string()))
    );
    assert!(panel.remove_transition.pair.is_empty());
    assert_eq!(diagram, before);
}

#[test]
fn test_remove_transition_form_dashed_names_are_ambiguous() {
    let mut diagram = Diagram::new();
    diagram.add_state("A");
    diagram.add_state("B-C");
    diagram.add_state("A-B");
    diagram.add_state("C");
    diagram.add_transition("A-B", "C").unwrap();
    diagram.add_transition("A", "B-C").unwrap();
    let mut panel = ControlPanel::new();

    // "A-B-C" always means A -> "B-C"
    panel.remove_transition.pair = "A-B-C".to_string();
    assert!(panel.remove_transition.submit(&mut diagram).is_applied());
    assert_eq!(diagram.transitions(), &[Transition::new(StateId(3), StateId(4))]);
}
