//! Statesketch GUI - FSM Diagram Editor
//! Drag states around the canvas and edit the machine from the control panel

use eframe::egui;

use statesketch::canvas::{self, CanvasStyle, CanvasTransform, DragSession, PointerEvent};
use statesketch::controls::{ControlPanel, Submission};
use statesketch::geometry::{self, TransitionShape};
use statesketch::graph::{Diagram, State};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_title("Statesketch - FSM Diagram Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "Statesketch",
        options,
        Box::new(|cc| Ok(Box::new(StatesketchApp::new(cc)))),
    )
}

struct StatesketchApp {
    /// The diagram being edited
    diagram: Diagram,
    /// Pending text of the four editing forms
    controls: ControlPanel,
    /// Pointer drag on the canvas
    drag: DragSession,
    style: CanvasStyle,
    /// Zoom level
    zoom: f32,
    /// Last rejected edit, shown under the forms
    status: Option<String>,
}

impl StatesketchApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            diagram: Diagram::seeded(),
            controls: ControlPanel::new(),
            drag: DragSession::Idle,
            style: CanvasStyle::default(),
            zoom: 1.0,
            status: None,
        }
    }

    fn record(&mut self, outcome: Submission) {
        match outcome {
            Submission::Applied => self.status = None,
            Submission::Failed(e) => self.status = Some(e.to_string()),
            Submission::Skipped => {}
        }
    }

    fn control_panel_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Control Panel");
        ui.add_space(8.0);

        ui.label("Add State");
        let entered = text_field(ui, &mut self.controls.add_state.name, "New state name");
        if ui.button("Add State").clicked() || entered {
            let outcome = self.controls.add_state.submit(&mut self.diagram);
            self.record(outcome);
        }
        ui.separator();

        ui.label("Add Transition");
        let from_entered = text_field(ui, &mut self.controls.add_transition.from, "From state");
        let to_entered = text_field(ui, &mut self.controls.add_transition.to, "To state");
        if ui.button("Add Transition").clicked() || from_entered || to_entered {
            let outcome = self.controls.add_transition.submit(&mut self.diagram);
            self.record(outcome);
        }
        ui.separator();

        ui.label("Remove State");
        let entered = text_field(ui, &mut self.controls.remove_state.name, "State to remove");
        if ui.button("Remove State").clicked() || entered {
            let outcome = self.controls.remove_state.submit(&mut self.diagram);
            self.record(outcome);
        }
        ui.separator();

        ui.label("Remove Transition");
        let entered = text_field(
            ui,
            &mut self.controls.remove_transition.pair,
            "Transition to remove (from-to)",
        );
        if ui.button("Remove Transition").clicked() || entered {
            let outcome = self.controls.remove_transition.submit(&mut self.diagram);
            self.record(outcome);
        }

        if let Some(status) = &self.status {
            ui.add_space(8.0);
            ui.colored_label(egui::Color32::from_rgb(230, 120, 120), status);
        }

        ui.separator();
        ui.collapsing("Diagram", |ui| {
            for state in self.diagram.states() {
                ui.label(format!(
                    "#{} {} ({:.0}, {:.0})",
                    state.id, state.name, state.x, state.y
                ));
            }
            ui.separator();
            for (from, to) in self.diagram.resolved_transitions() {
                ui.label(format!("{} -> {}", from.name, to.name));
            }
        });
    }

    fn canvas_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("➖").clicked() {
                self.zoom = canvas::clamp_zoom(self.zoom - 0.1);
            }
            ui.label(format!("{:.0}%", self.zoom * 100.0));
            if ui.button("➕").clicked() {
                self.zoom = canvas::clamp_zoom(self.zoom + 0.1);
            }
            ui.separator();
            ui.label(format!(
                "States: {} | Transitions: {}",
                self.diagram.state_count(),
                self.diagram.transition_count()
            ));
        });
        ui.separator();

        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;

        let scroll_delta = ui.input(|i| i.raw_scroll_delta);
        if response.hovered() && scroll_delta.y != 0.0 {
            self.zoom = canvas::clamp_zoom(self.zoom + scroll_delta.y * 0.001);
        }

        let transform = CanvasTransform::new(rect.min, self.zoom);
        for event in pointer_events(ui, rect) {
            self.drag
                .handle(event, &mut self.diagram, &transform, self.style.state_radius);
        }

        painter.rect_filled(rect, 0.0, self.style.background);
        draw_grid(&painter, rect, &transform, &self.style);

        // Transitions first so the state circles cover their endpoints
        for (from, to) in self.diagram.resolved_transitions() {
            let shape = geometry::transition_shape(from, to);
            draw_transition(&painter, &shape, to, &transform, &self.style);
        }
        let dragged = self.drag.dragged_state();
        for state in self.diagram.states() {
            draw_state(&painter, state, dragged == Some(state.id), &transform, &self.style);
        }
    }
}

impl eframe::App for StatesketchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            ui.heading("Finite-State Machine Diagram Editor");
        });

        egui::SidePanel::right("control_panel")
            .resizable(false)
            .min_width(240.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.control_panel_ui(ui);
                });
            });

        egui::TopBottomPanel::bottom("info_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Statesketch v0.1.0");
                ui.separator();
                ui.label("Drag states to move them | Scroll to zoom");
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas_ui(ui);
        });
    }
}

/// Single-line input; true when Enter was pressed in it
fn text_field(ui: &mut egui::Ui, value: &mut String, hint: &str) -> bool {
    let response = ui.add(egui::TextEdit::singleline(value).hint_text(hint));
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

/// Reduce this frame's raw pointer input to the events the drag session understands
fn pointer_events(ui: &egui::Ui, rect: egui::Rect) -> Vec<PointerEvent> {
    let (pressed, released, moved, press_origin, hover) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.is_moving(),
            i.pointer.press_origin(),
            i.pointer.hover_pos(),
        )
    });

    let inside = hover.filter(|p| rect.contains(*p));
    let mut events = Vec::new();

    if pressed {
        if let Some(origin) = press_origin.filter(|p| rect.contains(*p)) {
            events.push(PointerEvent::Down(origin));
        }
    }
    match inside {
        Some(pos) if moved => events.push(PointerEvent::Move(pos)),
        Some(_) => {}
        None => events.push(PointerEvent::Leave),
    }
    if released {
        events.push(PointerEvent::Up);
    }
    events
}

fn draw_grid(
    painter: &egui::Painter,
    rect: egui::Rect,
    transform: &CanvasTransform,
    style: &CanvasStyle,
) {
    let spacing = transform.scale(style.grid_size);
    let stroke = egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(100, 100, 100, 30));

    for x in canvas::grid_lines(rect.left(), rect.right(), transform.origin.x, spacing) {
        painter.line_segment(
            [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
            stroke,
        );
    }
    for y in canvas::grid_lines(rect.top(), rect.bottom(), transform.origin.y, spacing) {
        painter.line_segment(
            [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
            stroke,
        );
    }
}

/// Curve, arrowhead at the target's rim, and label
fn draw_transition(
    painter: &egui::Painter,
    shape: &TransitionShape,
    target: &State,
    transform: &CanvasTransform,
    style: &CanvasStyle,
) {
    let route: Vec<egui::Pos2> = shape
        .curve
        .flatten(style.curve_segments)
        .into_iter()
        .map(|p| transform.to_screen(p))
        .collect();
    let route = geometry::clip_to_circle(
        &route,
        transform.to_screen(target.pos()),
        transform.scale(style.state_radius),
    );

    let stroke = egui::Stroke::new(transform.scale(style.transition_width), style.transition_color);
    if let [.., prev, tip] = route.as_slice() {
        if let Some(head) = geometry::arrowhead(*tip, *prev, transform.scale(style.arrow_size)) {
            painter.add(egui::Shape::convex_polygon(
                head.to_vec(),
                style.transition_color,
                egui::Stroke::NONE,
            ));
        }
    }
    painter.add(egui::Shape::line(route, stroke));

    painter.text(
        transform.to_screen(shape.label_pos),
        egui::Align2::CENTER_CENTER,
        &shape.label,
        egui::FontId::proportional(transform.scale(style.label_font_size)),
        style.label_color,
    );
}

fn draw_state(
    painter: &egui::Painter,
    state: &State,
    is_dragged: bool,
    transform: &CanvasTransform,
    style: &CanvasStyle,
) {
    let center = transform.to_screen(state.pos());
    let (stroke_color, stroke_width) = if is_dragged {
        (style.dragged_stroke, 3.0)
    } else {
        (style.state_stroke, 1.5)
    };

    painter.circle(
        center,
        transform.scale(style.state_radius),
        style.state_fill,
        egui::Stroke::new(transform.scale(stroke_width), stroke_color),
    );
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        &state.name,
        egui::FontId::proportional(transform.scale(style.state_font_size)),
        egui::Color32::WHITE,
    );
}
