//! Command Script Module
//! Parses line-oriented editing scripts and replays them through the control panel

use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

use crate::controls::{ControlPanel, Submission};
use crate::graph::{Diagram, StateId};


#[derive(Parser)]
#[grammar = "script/script.pest"]
pub struct ScriptParser;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Parse error: {0}")]
    PestError(#[from] pest::error::Error<Rule>),
    #[error("Invalid syntax at line {line}: {message}")]
    SyntaxError { line: usize, message: String },
}

pub type ScriptResult<T> = Result<T, ScriptError>;

/// One editing action
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddState(String),
    AddTransition { from: String, to: String },
    RemoveState(String),
    /// Composite `"<from>-<to>"`, split the same way the form does
    RemoveTransition(String),
    Move { id: StateId, x: f32, y: f32 },
}

impl Command {
    /// Fill in the matching form and submit it; `Move` goes straight to the diagram
    pub fn apply(&self, diagram: &mut Diagram, panel: &mut ControlPanel) -> Submission {
        match self {
            Command::AddState(name) => {
                panel.add_state.name = name.clone();
                panel.add_state.submit(diagram)
            }
            Command::AddTransition { from, to } => {
                panel.add_transition.from = from.clone();
                panel.add_transition.to = to.clone();
                panel.add_transition.submit(diagram)
            }
            Command::RemoveState(name) => {
                panel.remove_state.name = name.clone();
                panel.remove_state.submit(diagram)
            }
            Command::RemoveTransition(pair) => {
                panel.remove_transition.pair = pair.clone();
                panel.remove_transition.submit(diagram)
            }
            Command::Move { id, x, y } => {
                Submission::from_result("move state", diagram.update_state_position(*id, *x, *y))
            }
        }
    }
}

/// Parse a script into commands, in source order
pub fn parse_script(source: &str) -> ScriptResult<Vec<Command>> {
    let pairs = ScriptParser::parse(Rule::script, source)?;
    let mut commands = Vec::new();

    for pair in pairs {
        if pair.as_rule() != Rule::script {
            continue;
        }
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::EOI => {}
                _ => commands.push(parse_command(inner)?),
            }
        }
    }

    Ok(commands)
}

/// Parse and apply every command. Failed lookups are logged and skipped.
pub fn replay(
    source: &str,
    diagram: &mut Diagram,
    panel: &mut ControlPanel,
) -> ScriptResult<Vec<Submission>> {
    let commands = parse_script(source)?;
    log::info!("replaying {} command(s)", commands.len());
    Ok(commands
        .iter()
        .map(|command| command.apply(diagram, panel))
        .collect())
}

fn parse_command(pair: Pair<Rule>) -> ScriptResult<Command> {
    let line = pair.as_span().start_pos().line_col().0;
    let rule = pair.as_rule();
    let mut inner = pair.into_inner();

    let command = match rule {
        Rule::add_state => Command::AddState(next_text(&mut inner, line)?.to_string()),
        Rule::add_transition => Command::AddTransition {
            from: next_text(&mut inner, line)?.to_string(),
            to: next_text(&mut inner, line)?.to_string(),
        },
        Rule::remove_state => Command::RemoveState(next_text(&mut inner, line)?.to_string()),
        Rule::remove_transition => {
            Command::RemoveTransition(next_text(&mut inner, line)?.to_string())
        }
        Rule::move_state => {
            let id = next_text(&mut inner, line)?;
            let id = id.parse::<u32>().map_err(|e| ScriptError::SyntaxError {
                line,
                message: format!("bad state id '{}': {}", id, e),
            })?;
            let x = parse_coord(next_text(&mut inner, line)?, line)?;
            let y = parse_coord(next_text(&mut inner, line)?, line)?;
            Command::Move { id: StateId(id), x, y }
        }
        other => {
            return Err(ScriptError::SyntaxError {
                line,
                message: format!("unexpected {:?}", other),
            })
        }
    };

    Ok(command)
}

fn next_text<'a>(inner: &mut Pairs<'a, Rule>, line: usize) -> ScriptResult<&'a str> {
    inner
        .next()
        .map(|p| p.as_str())
        .ok_or_else(|| ScriptError::SyntaxError {
            line,
            message: "missing argument".to_string(),
        })
}

fn parse_coord(text: &str, line: usize) -> ScriptResult<f32> {
    text.parse::<f32>().map_err(|e| ScriptError::SyntaxError {
        line,
        message: format!("bad coordinate '{}': {}", text, e),
    })
}
