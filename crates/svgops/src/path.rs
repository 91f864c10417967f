// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Path data interpretation.
//!
//! Segments produced by the tokenizer are resolved into absolute
//! coordinates and emitted as canvas primitives. Quadratic curves are
//! elevated to cubic ones and arcs are drawn as circular arcs in a local frame.

use svgops_types::{Error, PathParser, PathSegment};

use crate::arc::{self, ArcSegment};
use crate::canvas::Canvas;

#[derive(Clone, Copy, PartialEq, Debug)]
enum Control {
    None,
    Cubic(f64, f64),
    Quadratic(f64, f64),
}

/// Per-path drawing state.
#[derive(Clone, Copy, Debug)]
struct CursorState {
    current: (f64, f64),
    subpath_start: (f64, f64),
    // The last control point of the previous segment, used for smooth curves.
    control: Control,
}

impl CursorState {
    fn resolve(&self, abs: bool, x: f64, y: f64) -> (f64, f64) {
        if abs {
            (x, y)
        } else {
            (self.current.0 + x, self.current.1 + y)
        }
    }

    // Reflects the previous control point through the current point.
    fn reflect(&self, x: f64, y: f64) -> (f64, f64) {
        (2.0 * self.current.0 - x, 2.0 * self.current.1 - y)
    }
}

/// Draws path data onto the canvas.
///
/// Relative coordinates are resolved against the canvas current point,
/// or `(0, 0)` when there is none.
///
/// # Errors
///
/// Any tokenizer error aborts the drawing. Segments before the error
/// are already emitted.
pub fn draw_path(canvas: &mut dyn Canvas, data: &str) -> Result<(), Error> {
    let start = canvas.current_point().unwrap_or((0.0, 0.0));
    let mut state = CursorState {
        current: start,
        subpath_start: start,
        control: Control::None,
    };

    for segment in PathParser::from(data) {
        draw_segment(canvas, &mut state, segment?);
    }

    Ok(())
}

fn draw_segment(canvas: &mut dyn Canvas, state: &mut CursorState, segment: PathSegment) {
    let mut control = Control::None;

    match segment {
        PathSegment::MoveTo { abs, x, y } => {
            let (x, y) = state.resolve(abs, x, y);
            canvas.move_to(x, y);
            state.current = (x, y);
            state.subpath_start = (x, y);
        }
        PathSegment::LineTo { abs, x, y } => {
            let (x, y) = state.resolve(abs, x, y);
            canvas.line_to(x, y);
            state.current = (x, y);
        }
        PathSegment::HorizontalLineTo { abs, x } => {
            let x = if abs { x } else { state.current.0 + x };
            let y = state.current.1;
            canvas.line_to(x, y);
            state.current = (x, y);
        }
        PathSegment::VerticalLineTo { abs, y } => {
            let x = state.current.0;
            let y = if abs { y } else { state.current.1 + y };
            canvas.line_to(x, y);
            state.current = (x, y);
        }
        PathSegment::CurveTo { abs, x1, y1, x2, y2, x, y } => {
            let (x1, y1) = state.resolve(abs, x1, y1);
            let (x2, y2) = state.resolve(abs, x2, y2);
            let (x, y) = state.resolve(abs, x, y);
            canvas.curve_to(x1, y1, x2, y2, x, y);
            state.current = (x, y);
            control = Control::Cubic(x2, y2);
        }
        PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
            let (x1, y1) = match state.control {
                Control::Cubic(cx, cy) => state.reflect(cx, cy),
                _ => state.current,
            };
            let (x2, y2) = state.resolve(abs, x2, y2);
            let (x, y) = state.resolve(abs, x, y);
            canvas.curve_to(x1, y1, x2, y2, x, y);
            state.current = (x, y);
            control = Control::Cubic(x2, y2);
        }
        PathSegment::Quadratic { abs, x1, y1, x, y } => {
            let (x1, y1) = state.resolve(abs, x1, y1);
            let (x, y) = state.resolve(abs, x, y);
            quad_to(canvas, state.current, (x1, y1), (x, y));
            state.current = (x, y);
            control = Control::Quadratic(x1, y1);
        }
        PathSegment::SmoothQuadratic { abs, x, y } => {
            let (x1, y1) = match state.control {
                Control::Quadratic(cx, cy) => state.reflect(cx, cy),
                _ => state.current,
            };
            let (x, y) = state.resolve(abs, x, y);
            quad_to(canvas, state.current, (x1, y1), (x, y));
            state.current = (x, y);
            control = Control::Quadratic(x1, y1);
        }
        PathSegment::EllipticalArc {
            abs,
            rx,
            ry,
            x_axis_rotation,
            large_arc,
            sweep,
            x,
            y,
        } => {
            let end = state.resolve(abs, x, y);
            match arc::convert(state.current, rx, ry, x_axis_rotation, large_arc, sweep, end) {
                ArcSegment::Omitted => {}
                ArcSegment::Line(x, y) => canvas.line_to(x, y),
                ArcSegment::Arc(arc) => arc.draw(canvas),
            }
            state.current = end;
        }
        PathSegment::ClosePath { .. } => {
            canvas.close_path();
            state.current = state.subpath_start;
        }
    }

    state.control = control;
}

/// Elevates a quadratic curve to a cubic one.
fn quad_to(canvas: &mut dyn Canvas, p0: (f64, f64), p1: (f64, f64), p: (f64, f64)) {
    let (x1, y1) = quadratic_points(p0, p1);
    let (x2, y2) = quadratic_points(p, p1);
    canvas.curve_to(x1, y1, x2, y2, p.0, p.1);
}

#[inline]
fn quadratic_points(end: (f64, f64), control: (f64, f64)) -> (f64, f64) {
    (
        end.0 / 3.0 + control.0 * 2.0 / 3.0,
        end.1 / 3.0 + control.1 * 2.0 / 3.0,
    )
}
