//! Transition Geometry
//! Pure functions turning two state positions into a drawable curve and label anchor

use std::f32::consts::{PI, TAU};

use egui::{Pos2, Vec2};

use crate::graph::State;


/// How far the control point sits off the segment, as a fraction of its length
pub const CURVATURE: f32 = 0.25;
/// Vertical shift applied to transition labels
pub const LABEL_OFFSET: f32 = 10.0;
pub const SELF_LOOP_RADIUS: f32 = 35.0;
pub const SELF_LOOP_START_ANGLE: f32 = -PI / 1.5;
/// Angular span walked back from the start angle to place the loop end point
pub const SELF_LOOP_SWEEP: f32 = 1.5 * PI;

/// Screen-independent description of a transition's path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionCurve {
    /// Single quadratic Bezier between two distinct states
    Quadratic { start: Pos2, control: Pos2, end: Pos2 },
    /// Circular arc leaving and re-entering the same state.
    ///
    /// Mirrors an SVG `A r r 0 1 1 end` command starting at `start`; the
    /// angles are measured from `start` (the state centre) and locate `end`.
    SelfLoop {
        start: Pos2,
        end: Pos2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
}

/// A transition ready for painting
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionShape {
    pub curve: TransitionCurve,
    pub label_pos: Pos2,
    pub label: String,
}

/// Build the curve and label for a transition. The branch depends only on id equality.
pub fn transition_shape(from: &State, to: &State) -> TransitionShape {
    if from.id == to.id {
        let curve = self_loop(from.pos());
        let label_pos = match curve.loop_center() {
            Some(center) => {
                let outward = (center - from.pos()).normalized();
                center + outward * SELF_LOOP_RADIUS - Vec2::Y * LABEL_OFFSET
            }
            None => from.pos(),
        };
        TransitionShape {
            curve,
            label_pos,
            label: to.name.clone(),
        }
    } else {
        let control = quadratic_control(from.pos(), to.pos());
        TransitionShape {
            curve: TransitionCurve::Quadratic {
                start: from.pos(),
                control,
                end: to.pos(),
            },
            label_pos: control + Vec2::Y * LABEL_OFFSET,
            label: format!("{} -> {}", from.name, to.name),
        }
    }
}

/// Midpoint pushed along `(-dy, dx)` by `CURVATURE * |to - from|`
pub fn quadratic_control(from: Pos2, to: Pos2) -> Pos2 {
    let d = to - from;
    let mid = from + d * 0.5;
    mid + Vec2::new(-d.y, d.x) * CURVATURE
}

pub fn self_loop(center: Pos2) -> TransitionCurve {
    let start_angle = SELF_LOOP_START_ANGLE;
    let end_angle = start_angle - SELF_LOOP_SWEEP;
    TransitionCurve::SelfLoop {
        start: center,
        end: center + Vec2::angled(end_angle) * SELF_LOOP_RADIUS,
        radius: SELF_LOOP_RADIUS,
        start_angle,
        end_angle,
    }
}

impl TransitionCurve {
    pub fn is_self_loop(&self) -> bool {
        matches!(self, TransitionCurve::SelfLoop { .. })
    }

    pub fn start(&self) -> Pos2 {
        match *self {
            TransitionCurve::Quadratic { start, .. } | TransitionCurve::SelfLoop { start, .. } => {
                start
            }
        }
    }

    pub fn end(&self) -> Pos2 {
        match *self {
            TransitionCurve::Quadratic { end, .. } | TransitionCurve::SelfLoop { end, .. } => end,
        }
    }

    /// Centre of the circle the self-loop arc lies on
    pub fn loop_center(&self) -> Option<Pos2> {
        match *self {
            TransitionCurve::SelfLoop { start, end, radius, .. } => {
                arc_center(start, end, radius, true, true).map(|arc| arc.center)
            }
            TransitionCurve::Quadratic { .. } => None,
        }
    }

    /// Approximate the curve with `segments + 1` points, start to end
    pub fn flatten(&self, segments: usize) -> Vec<Pos2> {
        let segments = segments.max(1);
        match *self {
            TransitionCurve::Quadratic { start, control, end } => (0..=segments)
                .map(|i| {
                    let t = i as f32 / segments as f32;
                    let u = 1.0 - t;
                    let p = start.to_vec2() * (u * u)
                        + control.to_vec2() * (2.0 * u * t)
                        + end.to_vec2() * (t * t);
                    p.to_pos2()
                })
                .collect(),
            TransitionCurve::SelfLoop { start, end, radius, .. } => {
                match arc_center(start, end, radius, true, true) {
                    Some(arc) => (0..=segments)
                        .map(|i| {
                            let theta = arc.start_theta + arc.sweep * (i as f32 / segments as f32);
                            arc.center + Vec2::angled(theta) * radius
                        })
                        .collect(),
                    None => vec![start, end],
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ArcParams {
    center: Pos2,
    start_theta: f32,
    sweep: f32,
}

/// SVG endpoint-to-centre conversion for a circular arc (no axis rotation)
fn arc_center(start: Pos2, end: Pos2, radius: f32, large_arc: bool, sweep: bool) -> Option<ArcParams> {
    if radius <= 0.0 || start == end {
        return None;
    }

    let half = (start - end) * 0.5;
    let chord_sq = half.length_sq();
    // Radii too small for the chord get scaled up, as SVG renderers do
    let radius = radius.max(chord_sq.sqrt());
    let radius_sq = radius * radius;

    let sign = if large_arc != sweep { 1.0 } else { -1.0 };
    let coef = sign * ((radius_sq - chord_sq).max(0.0) / chord_sq).sqrt();
    let center_prime = Vec2::new(coef * half.y, -coef * half.x);
    let center = center_prime + (start.to_vec2() + end.to_vec2()) * 0.5;

    let u = (half - center_prime) / radius;
    let v = (-half - center_prime) / radius;
    let start_theta = u.angle();
    let mut delta = v.angle() - u.angle();
    if sweep && delta < 0.0 {
        delta += TAU;
    } else if !sweep && delta > 0.0 {
        delta -= TAU;
    }

    Some(ArcParams {
        center: center.to_pos2(),
        start_theta,
        sweep: delta,
    })
}

/// Cut the tail of `points` where it first enters the circle around `center`.
///
/// Leaves the route untouched when it ends outside the circle or never leaves it.
pub fn clip_to_circle(points: &[Pos2], center: Pos2, radius: f32) -> Vec<Pos2> {
    let inside = |p: &Pos2| p.distance(center) < radius;
    let Some(last_outside) = points.iter().rposition(|p| !inside(p)) else {
        return points.to_vec();
    };
    if last_outside + 1 == points.len() {
        return points.to_vec();
    }

    let a = points[last_outside];
    let b = points[last_outside + 1];
    let d = b - a;
    let f = a - center;
    let qa = d.length_sq();
    let qb = 2.0 * f.dot(d);
    let qc = f.length_sq() - radius * radius;
    let disc = (qb * qb - 4.0 * qa * qc).max(0.0);
    let t = if qa > 0.0 {
        ((-qb - disc.sqrt()) / (2.0 * qa)).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut clipped = points[..=last_outside].to_vec();
    clipped.push(a + d * t);
    clipped
}

/// Triangle for an arrow pointing from `prev` to `tip`, or `None` if they coincide
pub fn arrowhead(tip: Pos2, prev: Pos2, size: f32) -> Option<[Pos2; 3]> {
    let along = tip - prev;
    if along.length() < f32::EPSILON {
        return None;
    }
    let dir = along.normalized();
    let perp = Vec2::new(-dir.y, dir.x);
    let spread = 0.35;
    Some([
        tip,
        tip - dir * size + perp * size * spread,
        tip - dir * size - perp * size * spread,
    ])
}
