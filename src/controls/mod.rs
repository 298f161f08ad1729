//! Control Panel
//! The four editing forms. Each keeps its own pending text and forwards to the diagram on submit.

use crate::graph::{Diagram, GraphError, GraphResult};

#[cfg(test)]
mod tests;

/// Outcome of submitting one form
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Required input was empty; nothing happened and the fields were kept
    Skipped,
    Applied,
    /// The diagram rejected the operation; fields were still cleared
    Failed(GraphError),
}

impl Submission {
    pub fn from_result<T>(operation: &str, result: GraphResult<T>) -> Self {
        match result {
            Ok(_) => Submission::Applied,
            Err(e) => {
                log::warn!("{} failed: {}", operation, e);
                Submission::Failed(e)
            }
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Submission::Applied)
    }
}

/// Split a `"<from>-<to>"` pair on its first `-`.
///
/// Names containing `-` cannot be expressed on the `from` side; everything
/// after the first `-` is taken as the target name.
pub fn split_transition_pair(pair: &str) -> GraphResult<(&str, &str)> {
    pair.split_once('-')
        .ok_or_else(|| GraphError::MalformedTransition(pair.to_string()))
}

#[derive(Debug, Clone, Default)]
pub struct AddStateForm {
    pub name: String,
}

impl AddStateForm {
    pub fn submit(&mut self, diagram: &mut Diagram) -> Submission {
        if self.name.is_empty() {
            return Submission::Skipped;
        }
        let id = diagram.add_state(std::mem::take(&mut self.name));
        log::info!("added state {}", id);
        Submission::Applied
    }
}

#[derive(Debug, Clone, Default)]
pub struct AddTransitionForm {
    pub from: String,
    pub to: String,
}

impl AddTransitionForm {
    pub fn submit(&mut self, diagram: &mut Diagram) -> Submission {
        if self.from.is_empty() || self.to.is_empty() {
            return Submission::Skipped;
        }
        let from = std::mem::take(&mut self.from);
        let to = std::mem::take(&mut self.to);
        Submission::from_result("add transition", diagram.add_transition(&from, &to))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RemoveStateForm {
    pub name: String,
}

impl RemoveStateForm {
    pub fn submit(&mut self, diagram: &mut Diagram) -> Submission {
        if self.name.is_empty() {
            return Submission::Skipped;
        }
        let name = std::mem::take(&mut self.name);
        Submission::from_result("remove state", diagram.remove_state(&name))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RemoveTransitionForm {
    /// Composite `"<from>-<to>"` text
    pub pair: String,
}

impl RemoveTransitionForm {
    pub fn submit(&mut self, diagram: &mut Diagram) -> Submission {
        if self.pair.is_empty() {
            return Submission::Skipped;
        }
        let pair = std::mem::take(&mut self.pair);
        let result = split_transition_pair(&pair)
            .and_then(|(from, to)| diagram.remove_transition(from, to));
        Submission::from_result("remove transition", result)
    }
}

/// All pending form input, owned by the application and lent to the UI each frame
#[derive(Debug, Clone, Default)]
pub struct ControlPanel {
    pub add_state: AddStateForm,
    pub add_transition: AddTransitionForm,
    pub remove_state: RemoveStateForm,
    pub remove_transition: RemoveTransitionForm,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }
}
