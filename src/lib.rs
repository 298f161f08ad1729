//! Statesketch - interactive FSM diagram sketcher
//! Diagram store, transition geometry and canvas/control-panel logic behind the egui editor

pub mod canvas;
pub mod controls;
pub mod geometry;
pub mod graph;
pub mod script;

pub use canvas::{CanvasStyle, CanvasTransform, DragSession, PointerEvent};
pub use controls::{ControlPanel, Submission};
pub use geometry::{transition_shape, TransitionCurve, TransitionShape};
pub use graph::*;
pub use script::{parse_script, replay};
