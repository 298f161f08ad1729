//! Canvas Interaction
//! Drag sessions, coordinate conversion and hit testing for the diagram canvas
//!
//! ## Drag lifecycle
//!
//! ```text
//! Idle -> Dragging(id)   (pointer down over a state)
//! Dragging(id) -> itself (pointer move: state follows the pointer)
//! Any -> Idle            (pointer up, or pointer leaves the canvas)
//! ```

use egui::{Color32, Pos2};

use crate::graph::{Diagram, StateId};


pub const MIN_ZOOM: f32 = 0.3;
pub const MAX_ZOOM: f32 = 3.0;

/// Sizes and colours used when painting the diagram
#[derive(Clone, Debug)]
pub struct CanvasStyle {
    pub state_radius: f32,
    pub state_fill: Color32,
    pub state_stroke: Color32,
    pub dragged_stroke: Color32,
    pub state_font_size: f32,
    pub transition_color: Color32,
    pub transition_width: f32,
    pub label_color: Color32,
    pub label_font_size: f32,
    pub arrow_size: f32,
    pub background: Color32,
    pub grid_size: f32,
    /// Segments used to flatten each curve
    pub curve_segments: usize,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            state_radius: 30.0,
            state_fill: Color32::from_rgb(40, 55, 75),
            state_stroke: Color32::from_rgb(100, 120, 145),
            dragged_stroke: Color32::from_rgb(255, 220, 120),
            state_font_size: 13.0,
            transition_color: Color32::from_rgb(160, 175, 195),
            transition_width: 1.5,
            label_color: Color32::from_rgb(255, 230, 120),
            label_font_size: 12.0,
            arrow_size: 10.0,
            background: Color32::from_rgb(25, 28, 32),
            grid_size: 50.0,
            curve_segments: 32,
        }
    }
}

/// Maps canvas coordinates onto the screen: `screen = origin + canvas * zoom`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasTransform {
    pub origin: Pos2,
    pub zoom: f32,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self {
            origin: Pos2::ZERO,
            zoom: 1.0,
        }
    }
}

impl CanvasTransform {
    pub fn new(origin: Pos2, zoom: f32) -> Self {
        Self { origin, zoom }
    }

    pub fn to_screen(&self, canvas: Pos2) -> Pos2 {
        self.origin + canvas.to_vec2() * self.zoom
    }

    /// Exact inverse of [`CanvasTransform::to_screen`]
    pub fn to_canvas(&self, screen: Pos2) -> Pos2 {
        ((screen - self.origin) / self.zoom).to_pos2()
    }

    pub fn scale(&self, length: f32) -> f32 {
        length * self.zoom
    }
}

/// Clamp a zoom change to the supported range
pub fn clamp_zoom(zoom: f32) -> f32 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Topmost state whose circle contains `canvas_pos`.
///
/// States are painted in iteration order, so the last hit is the visible one.
pub fn hit_test(diagram: &Diagram, canvas_pos: Pos2, radius: f32) -> Option<StateId> {
    diagram
        .states()
        .rev()
        .find(|s| s.pos().distance(canvas_pos) <= radius)
        .map(|s| s.id)
}

/// Pointer input in screen coordinates, already reduced to what the canvas cares about
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up,
    Leave,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging(StateId),
}

impl DragSession {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragSession::Dragging(_))
    }

    pub fn dragged_state(&self) -> Option<StateId> {
        match *self {
            DragSession::Dragging(id) => Some(id),
            DragSession::Idle => None,
        }
    }

    /// Advance the session by one event, moving the dragged state as needed
    pub fn handle(
        &mut self,
        event: PointerEvent,
        diagram: &mut Diagram,
        transform: &CanvasTransform,
        radius: f32,
    ) {
        *self = match (*self, event) {
            (session, PointerEvent::Down(screen)) => {
                match hit_test(diagram, transform.to_canvas(screen), radius) {
                    Some(id) => {
                        log::debug!("drag start on state {}", id);
                        DragSession::Dragging(id)
                    }
                    None => session,
                }
            }
            (DragSession::Dragging(id), PointerEvent::Move(screen)) => {
                let p = transform.to_canvas(screen);
                if let Err(e) = diagram.update_state_position(id, p.x, p.y) {
                    log::debug!("drag move ignored: {}", e);
                }
                DragSession::Dragging(id)
            }
            (DragSession::Dragging(id), PointerEvent::Up | PointerEvent::Leave) => {
                log::debug!("drag end on state {}", id);
                DragSession::Idle
            }
            (DragSession::Idle, _) => DragSession::Idle,
        };
    }
}

/// Grid line offsets along one axis, covering `[start, end)` in screen space
pub fn grid_lines(start: f32, end: f32, origin: f32, spacing: f32) -> Vec<f32> {
    if spacing <= 0.0 || end <= start {
        return Vec::new();
    }
    let first = ((start - origin) / spacing).floor() * spacing + origin;
    let mut lines = Vec::new();
    let mut at = first;
    while at < end {
        if at >= start {
            lines.push(at);
        }
        at += spacing;
    }
    lines
}
