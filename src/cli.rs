//! Statesketch CLI - replay editing scripts without the GUI

use std::env;
use std::fs;

use statesketch::controls::{ControlPanel, Submission};
use statesketch::graph::Diagram;
use statesketch::script::replay;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let empty = args.iter().any(|a| a == "--empty");
    let Some(filename) = args.iter().find(|a| !a.starts_with("--")) else {
        println!("Statesketch CLI - FSM diagram script runner");
        println!("Usage: statesketch-cli [--json] [--empty] <script.txt>");
        println!();
        println!("Commands: add-state NAME | add-transition FROM TO | remove-state NAME");
        println!("          remove-transition FROM-TO | move ID X Y");
        return;
    };

    let content = match fs::read_to_string(filename) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("❌ Could not read file '{}': {}", filename, e);
            std::process::exit(1);
        }
    };

    let mut diagram = if empty { Diagram::new() } else { Diagram::seeded() };
    let mut panel = ControlPanel::new();

    let outcomes = match replay(&content, &mut diagram, &mut panel) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&diagram) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ Could not serialize diagram: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let failed = outcomes
        .iter()
        .filter(|o| matches!(o, Submission::Failed(_)))
        .count();
    println!("✅ Replayed {} command(s), {} rejected", outcomes.len(), failed);
    println!();
    println!("  States: {}", diagram.state_count());
    for state in diagram.states() {
        println!("    - #{} {} at ({}, {})", state.id, state.name, state.x, state.y);
    }
    println!("  Transitions: {}", diagram.transition_count());
    for (from, to) in diagram.resolved_transitions() {
        println!("    {} --> {}", from.name, to.name);
    }
}
