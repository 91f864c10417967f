// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

use svgops_types::{Rgba, Transform};

use super::{Canvas, FillRule, FontFace, TextExtents};

/// A recorded drawing operation.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum Op {
    Save,
    Restore,
    Translate { tx: f64, ty: f64 },
    Scale { sx: f64, sy: f64 },
    Rotate { angle: f64 },
    Transform(Transform),
    SetMatrix(Transform),
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    CurveTo { x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64 },
    Arc { xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64 },
    ArcNegative { xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64 },
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    NewSubPath,
    ClosePath,
    SetFillRule(FillRule),
    SetLineWidth(f64),
    SetSource(Rgba),
    FillPreserve,
    Stroke,
    SelectFontFace(FontFace),
    SetFontSize(f64),
    ShowText(String),
    TextPath(String),
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Op::Save => write!(f, "save"),
            Op::Restore => write!(f, "restore"),
            Op::Translate { tx, ty } => write!(f, "translate {} {}", tx, ty),
            Op::Scale { sx, sy } => write!(f, "scale {} {}", sx, sy),
            Op::Rotate { angle } => write!(f, "rotate {}", angle),
            Op::Transform(ts) => write!(f, "transform {}", MatrixFmt(ts)),
            Op::SetMatrix(ts) => write!(f, "set_matrix {}", MatrixFmt(ts)),
            Op::MoveTo { x, y } => write!(f, "move_to {} {}", x, y),
            Op::LineTo { x, y } => write!(f, "line_to {} {}", x, y),
            Op::CurveTo { x1, y1, x2, y2, x, y } => {
                write!(f, "curve_to {} {} {} {} {} {}", x1, y1, x2, y2, x, y)
            }
            Op::Arc { xc, yc, radius, angle1, angle2 } => {
                write!(f, "arc {} {} {} {} {}", xc, yc, radius, angle1, angle2)
            }
            Op::ArcNegative { xc, yc, radius, angle1, angle2 } => {
                write!(f, "arc_negative {} {} {} {} {}", xc, yc, radius, angle1, angle2)
            }
            Op::Rectangle { x, y, width, height } => {
                write!(f, "rectangle {} {} {} {}", x, y, width, height)
            }
            Op::NewSubPath => write!(f, "new_sub_path"),
            Op::ClosePath => write!(f, "close_path"),
            Op::SetFillRule(FillRule::NonZero) => write!(f, "set_fill_rule nonzero"),
            Op::SetFillRule(FillRule::EvenOdd) => write!(f, "set_fill_rule evenodd"),
            Op::SetLineWidth(width) => write!(f, "set_line_width {}", width),
            Op::SetSource(c) => {
                write!(f, "set_source_rgba {} {} {} {}", c.red, c.green, c.blue, c.alpha)
            }
            Op::FillPreserve => write!(f, "fill_preserve"),
            Op::Stroke => write!(f, "stroke"),
            Op::SelectFontFace(face) => write!(
                f,
                "select_font_face {:?} {:?} {:?}",
                face.family, face.style, face.weight
            ),
            Op::SetFontSize(size) => write!(f, "set_font_size {}", size),
            Op::ShowText(text) => write!(f, "show_text {:?}", text),
            Op::TextPath(text) => write!(f, "text_path {:?}", text),
        }
    }
}

struct MatrixFmt<'a>(&'a Transform);

impl fmt::Display for MatrixFmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ts = self.0;
        write!(f, "{} {} {} {} {} {}", ts.a, ts.b, ts.c, ts.d, ts.e, ts.f)
    }
}

/// A canvas that records drawing operations instead of rendering them.
///
/// The current transform and the current point are tracked,
/// so `current_point()` behaves like on a real canvas.
///
/// Text metrics are synthetic: every character advances by half
/// of the font size and the ink box is as tall as the font size.
#[derive(Clone, Default, Debug)]
pub struct RecordingCanvas {
    ops: Vec<Op>,
    ts: Transform,
    stack: Vec<(Transform, f64)>,
    font_size: f64,
    // In device space.
    current_point: Option<(f64, f64)>,
    subpath_start: Option<(f64, f64)>,
}

impl RecordingCanvas {
    /// Creates an empty recording canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns recorded operations.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Returns recorded operations, consuming the canvas.
    pub fn into_ops(self) -> Vec<Op> {
        self.ops
    }

    /// Returns the current transform.
    pub fn current_transform(&self) -> Transform {
        self.ts
    }

    fn set_point(&mut self, x: f64, y: f64) {
        self.current_point = Some(self.ts.apply(x, y));
    }

    fn advance(&mut self, text: &str) {
        let extents = self.measure(text);
        if let Some((x, y)) = self.current_point() {
            self.set_point(x + extents.x_advance, y + extents.y_advance);
        }
    }

    fn measure(&self, text: &str) -> TextExtents {
        let width = text.chars().count() as f64 * self.font_size * 0.5;
        TextExtents {
            x_bearing: 0.0,
            y_bearing: -self.font_size,
            width,
            height: self.font_size,
            x_advance: width,
            y_advance: 0.0,
        }
    }

    fn arc_end(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        let (sin, cos) = angle1.sin_cos();
        let start = (xc + radius * cos, yc + radius * sin);
        if self.current_point.is_none() {
            self.subpath_start = Some(self.ts.apply(start.0, start.1));
        }

        let (sin, cos) = angle2.sin_cos();
        self.set_point(xc + radius * cos, yc + radius * sin);
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.stack.push((self.ts, self.font_size));
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some((ts, font_size)) => {
                self.ts = ts;
                self.font_size = font_size;
            }
            None => log::warn!("Unbalanced restore."),
        }

        self.ops.push(Op::Restore);
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.ts.append(&Transform::from_translate(tx, ty));
        self.ops.push(Op::Translate { tx, ty });
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.ts.append(&Transform::from_scale(sx, sy));
        self.ops.push(Op::Scale { sx, sy });
    }

    fn rotate(&mut self, angle: f64) {
        self.ts.append(&Transform::from_rotate(angle));
        self.ops.push(Op::Rotate { angle });
    }

    fn transform(&mut self, ts: Transform) {
        self.ts.append(&ts);
        self.ops.push(Op::Transform(ts));
    }

    fn set_matrix(&mut self, ts: Transform) {
        self.ts = ts;
        self.ops.push(Op::SetMatrix(ts));
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.set_point(x, y);
        self.subpath_start = self.current_point;
        self.ops.push(Op::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if self.current_point.is_none() {
            self.subpath_start = Some(self.ts.apply(x, y));
        }

        self.set_point(x, y);
        self.ops.push(Op::LineTo { x, y });
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        if self.current_point.is_none() {
            self.subpath_start = Some(self.ts.apply(x1, y1));
        }

        self.set_point(x, y);
        self.ops.push(Op::CurveTo { x1, y1, x2, y2, x, y });
    }

    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        self.arc_end(xc, yc, radius, angle1, angle2);
        self.ops.push(Op::Arc { xc, yc, radius, angle1, angle2 });
    }

    fn arc_negative(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        self.arc_end(xc, yc, radius, angle1, angle2);
        self.ops.push(Op::ArcNegative { xc, yc, radius, angle1, angle2 });
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.set_point(x, y);
        self.subpath_start = self.current_point;
        self.ops.push(Op::Rectangle { x, y, width, height });
    }

    fn new_sub_path(&mut self) {
        self.current_point = None;
        self.subpath_start = None;
        self.ops.push(Op::NewSubPath);
    }

    fn close_path(&mut self) {
        if self.current_point.is_some() {
            self.current_point = self.subpath_start;
        }

        self.ops.push(Op::ClosePath);
    }

    fn current_point(&self) -> Option<(f64, f64)> {
        let (x, y) = self.current_point?;
        let ts = self.ts.invert()?;
        Some(ts.apply(x, y))
    }

    fn set_fill_rule(&mut self, rule: FillRule) {
        self.ops.push(Op::SetFillRule(rule));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(Op::SetLineWidth(width));
    }

    fn set_source_rgba(&mut self, color: Rgba) {
        self.ops.push(Op::SetSource(color));
    }

    fn fill_preserve(&mut self) {
        self.ops.push(Op::FillPreserve);
    }

    fn stroke(&mut self) {
        self.current_point = None;
        self.subpath_start = None;
        self.ops.push(Op::Stroke);
    }

    fn select_font_face(&mut self, face: &FontFace) {
        self.ops.push(Op::SelectFontFace(face.clone()));
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
        self.ops.push(Op::SetFontSize(size));
    }

    fn text_extents(&mut self, text: &str) -> TextExtents {
        self.measure(text)
    }

    fn show_text(&mut self, text: &str) {
        self.advance(text);
        self.ops.push(Op::ShowText(text.to_string()));
    }

    fn text_path(&mut self, text: &str) {
        self.advance(text);
        self.ops.push(Op::TextPath(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_point_in_user_space() {
        let mut canvas = RecordingCanvas::new();
        canvas.move_to(10.0, 20.0);
        canvas.save();
        canvas.translate(5.0, 5.0);
        assert_eq!(canvas.current_point(), Some((5.0, 15.0)));
        canvas.restore();
        assert_eq!(canvas.current_point(), Some((10.0, 20.0)));
    }

    #[test]
    fn close_path_returns_to_start() {
        let mut canvas = RecordingCanvas::new();
        canvas.move_to(1.0, 2.0);
        canvas.line_to(10.0, 2.0);
        canvas.close_path();
        assert_eq!(canvas.current_point(), Some((1.0, 2.0)));
    }

    #[test]
    fn stroke_clears_the_path() {
        let mut canvas = RecordingCanvas::new();
        canvas.move_to(1.0, 2.0);
        canvas.fill_preserve();
        assert!(canvas.current_point().is_some());
        canvas.stroke();
        assert_eq!(canvas.current_point(), None);
    }

    #[test]
    fn arc_moves_the_current_point() {
        let mut canvas = RecordingCanvas::new();
        canvas.new_sub_path();
        canvas.arc(10.0, 10.0, 5.0, 0.0, std::f64::consts::PI);
        let (x, y) = canvas.current_point().unwrap();
        assert!((x - 5.0).abs() < 1e-9);
        assert!((y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn text_advances() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_font_size(10.0);
        let extents = canvas.text_extents("abcd");
        assert_eq!(extents.width, 20.0);
        assert_eq!(extents.height, 10.0);

        canvas.move_to(1.0, 1.0);
        canvas.show_text("abcd");
        assert_eq!(canvas.current_point(), Some((21.0, 1.0)));
    }

    #[test]
    fn font_size_is_restored() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_font_size(10.0);
        canvas.save();
        canvas.set_font_size(20.0);
        canvas.restore();
        assert_eq!(canvas.text_extents("a").width, 5.0);
    }

    #[test]
    fn display() {
        assert_eq!(Op::MoveTo { x: 1.0, y: 2.5 }.to_string(), "move_to 1 2.5");
        assert_eq!(Op::ShowText("a b".to_string()).to_string(), "show_text \"a b\"");
        assert_eq!(Op::SetFillRule(FillRule::EvenOdd).to_string(), "set_fill_rule evenodd");
    }
}
