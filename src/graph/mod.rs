//! Diagram Data Structures
//! The graph store: states keyed by generated ids plus ordered transitions

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Position given to every freshly added state
pub const DEFAULT_STATE_POSITION: (f32, f32) = (150.0, 150.0);

/// Identifier of a state inside a [`Diagram`]. Always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(pub u32);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Could not find state named '{0}'")]
    UnknownState(String),
    #[error("No state with id {0}")]
    UnknownId(StateId),
    #[error("Malformed transition '{0}', expected <from>-<to>")]
    MalformedTransition(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// A node in the diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    /// Display label, also used as the lookup key by the control panel
    pub name: String,
    pub x: f32,
    pub y: f32,
}

impl State {
    pub fn new(id: StateId, name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id,
            name: name.into(),
            x,
            y,
        }
    }

    pub fn pos(&self) -> egui::Pos2 {
        egui::pos2(self.x, self.y)
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}

/// A directed edge between two state ids. `from == to` is a self-loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
}

impl Transition {
    pub fn new(from: StateId, to: StateId) -> Self {
        Self { from, to }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    pub fn touches(&self, id: StateId) -> bool {
        self.from == id || self.to == id
    }
}

/// The authoritative diagram: every mutation goes through these methods.
///
/// States iterate in ascending id order. Since new ids are always
/// `max + 1`, this is also insertion order, and name lookups return the
/// first match in that order when names are duplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    states: BTreeMap<StateId, State>,
    transitions: Vec<Transition>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// The diagram shown on startup: `S1 -> S2`
    pub fn seeded() -> Self {
        let s1 = StateId(1);
        let s2 = StateId(2);
        let mut states = BTreeMap::new();
        states.insert(s1, State::new(s1, "S1", 100.0, 100.0));
        states.insert(s2, State::new(s2, "S2", 250.0, 100.0));
        Self {
            states,
            transitions: vec![Transition::new(s1, s2)],
        }
    }

    pub fn states(&self) -> impl DoubleEndedIterator<Item = &State> + '_ {
        self.states.values()
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(&id)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// First state carrying `name`, in ascending id order
    pub fn find_by_name(&self, name: &str) -> Option<&State> {
        self.states.values().find(|s| s.is_named(name))
    }

    fn resolve(&self, name: &str) -> GraphResult<StateId> {
        self.find_by_name(name)
            .map(|s| s.id)
            .ok_or_else(|| GraphError::UnknownState(name.to_string()))
    }

    fn next_id(&self) -> StateId {
        let max = self.states.keys().next_back().map(|id| id.0).unwrap_or(0);
        StateId(max + 1)
    }

    /// Add a state at the default position. Names are not checked for uniqueness.
    pub fn add_state(&mut self, name: impl Into<String>) -> StateId {
        let id = self.next_id();
        let (x, y) = DEFAULT_STATE_POSITION;
        let state = State::new(id, name, x, y);
        log::debug!("add state {} '{}'", id, state.name);
        self.states.insert(id, state);
        id
    }

    /// Append a transition between the first states named `from` and `to`.
    /// Duplicates are kept.
    pub fn add_transition(&mut self, from: &str, to: &str) -> GraphResult<Transition> {
        let transition = Transition::new(self.resolve(from)?, self.resolve(to)?);
        log::debug!("add transition {} -> {}", transition.from, transition.to);
        self.transitions.push(transition);
        Ok(transition)
    }

    /// Remove the first state named `name` along with every transition touching it
    pub fn remove_state(&mut self, name: &str) -> GraphResult<State> {
        let id = self.resolve(name)?;
        let removed = self
            .states
            .remove(&id)
            .ok_or(GraphError::UnknownId(id))?;
        let before = self.transitions.len();
        self.transitions.retain(|t| !t.touches(id));
        log::debug!(
            "remove state {} '{}' ({} transitions dropped)",
            id,
            removed.name,
            before - self.transitions.len()
        );
        Ok(removed)
    }

    /// Remove every transition exactly matching `(from, to)`; returns how many went away
    pub fn remove_transition(&mut self, from: &str, to: &str) -> GraphResult<usize> {
        let target = Transition::new(self.resolve(from)?, self.resolve(to)?);
        let before = self.transitions.len();
        self.transitions.retain(|t| *t != target);
        let removed = before - self.transitions.len();
        log::debug!("remove transition {} -> {}: {} removed", target.from, target.to, removed);
        Ok(removed)
    }

    pub fn update_state_position(&mut self, id: StateId, x: f32, y: f32) -> GraphResult<()> {
        let state = self.states.get_mut(&id).ok_or(GraphError::UnknownId(id))?;
        state.x = x;
        state.y = y;
        Ok(())
    }

    /// Transitions paired with their endpoint states, in drawing order
    pub fn resolved_transitions(&self) -> impl Iterator<Item = (&State, &State)> + '_ {
        self.transitions
            .iter()
            .filter_map(|t| Some((self.states.get(&t.from)?, self.states.get(&t.to)?)))
    }
}
