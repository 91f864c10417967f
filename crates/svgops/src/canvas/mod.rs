// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The drawing interface the scene walker renders into.
//!
//! The interface follows a stateful 2D context model: a current transform
//! with a save/restore stack, a current path with a current point, a source
//! color, a fill rule, a line width and a selected font.

use svgops_types::{Rgba, Transform};

mod recorder;
mod skia;

pub use recorder::{Op, RecordingCanvas};
pub use skia::SkiaCanvas;

/// A fill rule.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

impl Default for FillRule {
    fn default() -> Self {
        FillRule::NonZero
    }
}

/// A font slant.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FontStyle {
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    /// Parses a `font-style` value. Unknown values fall back to `Normal`.
    pub fn from_str(text: &str) -> Self {
        match text.trim() {
            "italic" => FontStyle::Italic,
            "oblique" => FontStyle::Oblique,
            _ => FontStyle::Normal,
        }
    }
}

/// A font weight.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    /// Parses a `font-weight` value. Only `bold` is recognized.
    pub fn from_str(text: &str) -> Self {
        match text.trim() {
            "bold" => FontWeight::Bold,
            _ => FontWeight::Normal,
        }
    }
}

/// A font selection.
#[derive(Clone, PartialEq, Debug)]
pub struct FontFace {
    /// A font family name.
    pub family: String,
    /// A font slant.
    pub style: FontStyle,
    /// A font weight.
    pub weight: FontWeight,
}

/// Text measurement in user units.
///
/// `x_bearing` is the horizontal distance from the origin to the leftmost
/// ink and `y_bearing` is the vertical distance to the topmost ink,
/// which is usually negative.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct TextExtents {
    pub x_bearing: f64,
    pub y_bearing: f64,
    pub width: f64,
    pub height: f64,
    pub x_advance: f64,
    pub y_advance: f64,
}

/// A stateful 2D drawing context.
///
/// All coordinates are in user space, which is defined by the current transform.
/// Arc angles are in radians and are measured from the positive x axis
/// towards the positive y axis.
pub trait Canvas {
    /// Pushes the graphics state onto the stack.
    ///
    /// The state includes the transform, the source, the fill rule,
    /// the line width and the font. The current path is not a part of it.
    fn save(&mut self);

    /// Pops the graphics state from the stack.
    fn restore(&mut self);

    /// Appends a translation to the current transform.
    fn translate(&mut self, tx: f64, ty: f64);

    /// Appends a scale to the current transform.
    fn scale(&mut self, sx: f64, sy: f64);

    /// Appends a rotation in radians to the current transform.
    fn rotate(&mut self, angle: f64);

    /// Appends a transform to the current transform.
    fn transform(&mut self, ts: Transform);

    /// Replaces the current transform.
    fn set_matrix(&mut self, ts: Transform);

    /// Starts a new subpath.
    fn move_to(&mut self, x: f64, y: f64);

    /// Adds a line from the current point.
    fn line_to(&mut self, x: f64, y: f64);

    /// Adds a cubic Bézier curve from the current point.
    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64);

    /// Adds a circular arc in the positive angle direction.
    ///
    /// When there is a current point, a line to the arc start is added first.
    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64);

    /// Adds a circular arc in the negative angle direction.
    fn arc_negative(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64);

    /// Adds a closed rectangle subpath.
    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Clears the current point without starting a new subpath.
    fn new_sub_path(&mut self);

    /// Closes the current subpath.
    fn close_path(&mut self);

    /// Returns the current point in user space.
    fn current_point(&self) -> Option<(f64, f64)>;

    /// Sets the fill rule.
    fn set_fill_rule(&mut self, rule: FillRule);

    /// Sets the stroke width in user units.
    fn set_line_width(&mut self, width: f64);

    /// Sets a solid color source.
    fn set_source_rgba(&mut self, color: Rgba);

    /// Fills the current path and keeps it.
    fn fill_preserve(&mut self);

    /// Strokes the current path and clears it.
    fn stroke(&mut self);

    /// Selects a font.
    fn select_font_face(&mut self, face: &FontFace);

    /// Sets the font size in user units.
    fn set_font_size(&mut self, size: f64);

    /// Measures a text using the selected font.
    fn text_extents(&mut self, text: &str) -> TextExtents;

    /// Fills a text starting at the current point and advances the current point.
    fn show_text(&mut self, text: &str);

    /// Adds text outlines to the current path and advances the current point.
    fn text_path(&mut self, text: &str);
}
