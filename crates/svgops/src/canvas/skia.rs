// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::f64::consts::PI;

use svgops_types::{Rgba, Transform};

use super::{Canvas, FillRule, FontFace, FontStyle, FontWeight, TextExtents};

#[derive(Clone, Debug)]
struct State {
    ts: Transform,
    color: Rgba,
    fill_rule: FillRule,
    line_width: f64,
    font: FontFace,
    font_size: f64,
}

impl Default for State {
    fn default() -> Self {
        State {
            ts: Transform::default(),
            color: Rgba::black(),
            fill_rule: FillRule::NonZero,
            line_width: 2.0,
            font: FontFace {
                family: "Sans".to_string(),
                style: FontStyle::Normal,
                weight: FontWeight::Normal,
            },
            font_size: 10.0,
        }
    }
}

/// Glyph outlines of a text run, relative to the run origin.
struct TextRun {
    path: Option<tiny_skia::Path>,
    extents: TextExtents,
}

/// A canvas that rasterizes onto a `tiny-skia` pixmap.
///
/// The current path is accumulated in device space. Fills are done with
/// an identity transform. Strokes map the path back into user space,
/// so the line width is affected by the current transform.
pub struct SkiaCanvas<'a> {
    pixmap: tiny_skia::PixmapMut<'a>,
    #[cfg(feature = "text")]
    fontdb: Option<&'a fontdb::Database>,
    state: State,
    stack: Vec<State>,
    path: tiny_skia::PathBuilder,
    // In device space.
    current_point: Option<(f64, f64)>,
    subpath_start: Option<(f64, f64)>,
}

impl std::fmt::Debug for SkiaCanvas<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("SkiaCanvas")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("state", &self.state)
            .finish()
    }
}

impl<'a> SkiaCanvas<'a> {
    /// Creates a new canvas.
    ///
    /// Text is not rendered until a font database is set.
    pub fn new(pixmap: tiny_skia::PixmapMut<'a>) -> Self {
        SkiaCanvas {
            pixmap,
            #[cfg(feature = "text")]
            fontdb: None,
            state: State::default(),
            stack: Vec::new(),
            path: tiny_skia::PathBuilder::new(),
            current_point: None,
            subpath_start: None,
        }
    }

    /// Sets a font database used for text rendering.
    #[cfg(feature = "text")]
    pub fn with_fontdb(mut self, fontdb: &'a fontdb::Database) -> Self {
        self.fontdb = Some(fontdb);
        self
    }

    fn device_move_to(&mut self, x: f64, y: f64) {
        let (x, y) = self.state.ts.apply(x, y);
        self.path.move_to(x as f32, y as f32);
        self.current_point = Some((x, y));
        self.subpath_start = Some((x, y));
    }

    fn device_line_to(&mut self, x: f64, y: f64) {
        let (x, y) = self.state.ts.apply(x, y);
        self.path.line_to(x as f32, y as f32);
        self.current_point = Some((x, y));
    }

    fn add_arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, sweep_angle: f64) {
        let (sin, cos) = angle1.sin_cos();
        let (x, y) = (xc + radius * cos, yc + radius * sin);
        if self.current_point.is_some() {
            self.device_line_to(x, y);
        } else {
            self.device_move_to(x, y);
        }

        let arc = kurbo::Arc {
            center: kurbo::Point::new(xc, yc),
            radii: kurbo::Vec2::new(radius, radius),
            start_angle: angle1,
            sweep_angle,
            x_rotation: 0.0,
        };

        let ts = self.state.ts;
        let path = &mut self.path;
        let mut last = None;
        arc.to_cubic_beziers(0.01, |p1, p2, p| {
            let (x1, y1) = ts.apply(p1.x, p1.y);
            let (x2, y2) = ts.apply(p2.x, p2.y);
            let (x, y) = ts.apply(p.x, p.y);
            path.cubic_to(x1 as f32, y1 as f32, x2 as f32, y2 as f32, x as f32, y as f32);
            last = Some((x, y));
        });

        if last.is_some() {
            self.current_point = last;
        }
    }

    fn paint(&self) -> Option<tiny_skia::Paint<'static>> {
        let c = self.state.color;
        if c.is_transparent() {
            return None;
        }

        let color = tiny_skia::Color::from_rgba(
            c.red.clamp(0.0, 1.0) as f32,
            c.green.clamp(0.0, 1.0) as f32,
            c.blue.clamp(0.0, 1.0) as f32,
            c.alpha.clamp(0.0, 1.0) as f32,
        )?;

        let mut paint = tiny_skia::Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        Some(paint)
    }

    fn text_origin(&self) -> (f64, f64) {
        self.current_point().unwrap_or((0.0, 0.0))
    }

    #[cfg(feature = "text")]
    fn layout_text(&self, text: &str) -> Option<TextRun> {
        let fontdb = match self.fontdb {
            Some(fontdb) => fontdb,
            None => {
                log::warn!("No font database was set. Text is skipped.");
                return None;
            }
        };

        let font = &self.state.font;
        let mut families: Vec<fontdb::Family> = font
            .family
            .split(',')
            .map(|name| name.trim().trim_matches(|c| c == '\'' || c == '"'))
            .filter(|name| !name.is_empty())
            .map(|name| match name {
                "serif" => fontdb::Family::Serif,
                "sans-serif" => fontdb::Family::SansSerif,
                "cursive" => fontdb::Family::Cursive,
                "fantasy" => fontdb::Family::Fantasy,
                "monospace" => fontdb::Family::Monospace,
                _ => fontdb::Family::Name(name),
            })
            .collect();

        // Use the default font as fallback.
        families.push(fontdb::Family::SansSerif);

        let query = fontdb::Query {
            families: &families,
            weight: match font.weight {
                FontWeight::Normal => fontdb::Weight::NORMAL,
                FontWeight::Bold => fontdb::Weight::BOLD,
            },
            stretch: fontdb::Stretch::Normal,
            style: match font.style {
                FontStyle::Normal => fontdb::Style::Normal,
                FontStyle::Italic => fontdb::Style::Italic,
                FontStyle::Oblique => fontdb::Style::Oblique,
            },
        };

        let id = match fontdb.query(&query) {
            Some(id) => id,
            None => {
                log::warn!("No match for '{}' font-family.", font.family);
                return None;
            }
        };

        let font_size = self.state.font_size;
        fontdb
            .with_face_data(id, |data, face_index| shape_text(data, face_index, text, font_size))
            .flatten()
    }

    #[cfg(not(feature = "text"))]
    fn layout_text(&self, _: &str) -> Option<TextRun> {
        log::warn!("Text rendering is disabled. Text is skipped.");
        None
    }
}

#[cfg(feature = "text")]
fn shape_text(data: &[u8], face_index: u32, text: &str, font_size: f64) -> Option<TextRun> {
    use rustybuzz::ttf_parser::GlyphId;

    let face = rustybuzz::Face::from_slice(data, face_index)?;
    let scale = font_size / face.units_per_em() as f64;

    let mut buffer = rustybuzz::UnicodeBuffer::new();
    buffer.push_str(text);
    let output = rustybuzz::shape(&face, &[], buffer);

    let mut builder = GlyphBuilder {
        builder: tiny_skia::PathBuilder::new(),
        ts: Transform::default(),
    };

    let mut x = 0.0;
    let mut bbox: Option<(f64, f64, f64, f64)> = None;
    for (pos, info) in output.glyph_positions().iter().zip(output.glyph_infos()) {
        let gx = x + pos.x_offset as f64 * scale;
        let gy = -(pos.y_offset as f64) * scale;

        // Font units have the y axis pointing up.
        builder.ts = Transform::new(scale, 0.0, 0.0, -scale, gx, gy);
        let glyph_id = GlyphId(info.glyph_id as u16);
        if let Some(rect) = face.outline_glyph(glyph_id, &mut builder) {
            let (x0, y0) = builder.ts.apply(rect.x_min as f64, rect.y_max as f64);
            let (x1, y1) = builder.ts.apply(rect.x_max as f64, rect.y_min as f64);
            bbox = Some(match bbox {
                Some((bx0, by0, bx1, by1)) => (bx0.min(x0), by0.min(y0), bx1.max(x1), by1.max(y1)),
                None => (x0, y0, x1, y1),
            });
        }

        x += pos.x_advance as f64 * scale;
    }

    let (x0, y0, x1, y1) = bbox.unwrap_or_default();
    Some(TextRun {
        path: builder.builder.finish(),
        extents: TextExtents {
            x_bearing: x0,
            y_bearing: y0,
            width: x1 - x0,
            height: y1 - y0,
            x_advance: x,
            y_advance: 0.0,
        },
    })
}

#[cfg(feature = "text")]
struct GlyphBuilder {
    builder: tiny_skia::PathBuilder,
    ts: Transform,
}

#[cfg(feature = "text")]
impl GlyphBuilder {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        let (x, y) = self.ts.apply(x as f64, y as f64);
        (x as f32, y as f32)
    }
}

#[cfg(feature = "text")]
impl rustybuzz::ttf_parser::OutlineBuilder for GlyphBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

fn to_skia_transform(ts: &Transform) -> tiny_skia::Transform {
    tiny_skia::Transform::from_row(
        ts.a as f32,
        ts.b as f32,
        ts.c as f32,
        ts.d as f32,
        ts.e as f32,
        ts.f as f32,
    )
}

fn to_skia_fill_rule(rule: FillRule) -> tiny_skia::FillRule {
    match rule {
        FillRule::NonZero => tiny_skia::FillRule::Winding,
        FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
    }
}

impl Canvas for SkiaCanvas<'_> {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => log::warn!("Unbalanced restore."),
        }
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.state.ts.append(&Transform::from_translate(tx, ty));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.ts.append(&Transform::from_scale(sx, sy));
    }

    fn rotate(&mut self, angle: f64) {
        self.state.ts.append(&Transform::from_rotate(angle));
    }

    fn transform(&mut self, ts: Transform) {
        self.state.ts.append(&ts);
    }

    fn set_matrix(&mut self, ts: Transform) {
        self.state.ts = ts;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.device_move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if self.current_point.is_none() {
            self.device_move_to(x, y);
        } else {
            self.device_line_to(x, y);
        }
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        if self.current_point.is_none() {
            self.device_move_to(x1, y1);
        }

        let ts = self.state.ts;
        let (x1, y1) = ts.apply(x1, y1);
        let (x2, y2) = ts.apply(x2, y2);
        let (x, y) = ts.apply(x, y);
        self.path.cubic_to(x1 as f32, y1 as f32, x2 as f32, y2 as f32, x as f32, y as f32);
        self.current_point = Some((x, y));
    }

    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        let mut angle2 = angle2;
        while angle2 < angle1 {
            angle2 += 2.0 * PI;
        }

        self.add_arc(xc, yc, radius, angle1, angle2 - angle1);
    }

    fn arc_negative(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        let mut angle2 = angle2;
        while angle2 > angle1 {
            angle2 -= 2.0 * PI;
        }

        self.add_arc(xc, yc, radius, angle1, angle2 - angle1);
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.device_move_to(x, y);
        self.device_line_to(x + width, y);
        self.device_line_to(x + width, y + height);
        self.device_line_to(x, y + height);
        self.close_path();
    }

    fn new_sub_path(&mut self) {
        self.current_point = None;
        self.subpath_start = None;
    }

    fn close_path(&mut self) {
        if self.current_point.is_some() {
            self.path.close();
            self.current_point = self.subpath_start;
        }
    }

    fn current_point(&self) -> Option<(f64, f64)> {
        let (x, y) = self.current_point?;
        let ts = self.state.ts.invert()?;
        Some(ts.apply(x, y))
    }

    fn set_fill_rule(&mut self, rule: FillRule) {
        self.state.fill_rule = rule;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_source_rgba(&mut self, color: Rgba) {
        self.state.color = color;
    }

    fn fill_preserve(&mut self) {
        let paint = match self.paint() {
            Some(paint) => paint,
            None => return,
        };

        if let Some(path) = self.path.clone().finish() {
            self.pixmap.fill_path(
                &path,
                &paint,
                to_skia_fill_rule(self.state.fill_rule),
                tiny_skia::Transform::identity(),
                None,
            );
        }
    }

    fn stroke(&mut self) {
        let path = std::mem::replace(&mut self.path, tiny_skia::PathBuilder::new()).finish();
        self.current_point = None;
        self.subpath_start = None;

        // A zero width stroke is not a hairline.
        if !(self.state.line_width > 0.0) {
            return;
        }

        let paint = match self.paint() {
            Some(paint) => paint,
            None => return,
        };

        let ts = self.state.ts;
        let user_path = path
            .zip(ts.invert())
            .and_then(|(path, inv_ts)| path.transform(to_skia_transform(&inv_ts)));

        if let Some(path) = user_path {
            let stroke = tiny_skia::Stroke {
                width: self.state.line_width as f32,
                ..tiny_skia::Stroke::default()
            };

            self.pixmap
                .stroke_path(&path, &paint, &stroke, to_skia_transform(&ts), None);
        }
    }

    fn select_font_face(&mut self, face: &FontFace) {
        self.state.font = face.clone();
    }

    fn set_font_size(&mut self, size: f64) {
        self.state.font_size = size;
    }

    fn text_extents(&mut self, text: &str) -> TextExtents {
        self.layout_text(text)
            .map(|run| run.extents)
            .unwrap_or_default()
    }

    fn show_text(&mut self, text: &str) {
        let run = match self.layout_text(text) {
            Some(run) => run,
            None => return,
        };

        let (x, y) = self.text_origin();
        let mut ts = self.state.ts;
        ts.append(&Transform::from_translate(x, y));

        if let (Some(path), Some(paint)) = (run.path.as_ref(), self.paint()) {
            self.pixmap.fill_path(
                path,
                &paint,
                tiny_skia::FillRule::Winding,
                to_skia_transform(&ts),
                None,
            );
        }

        let (x, y) = self.state.ts.apply(x + run.extents.x_advance, y + run.extents.y_advance);
        self.current_point = Some((x, y));
    }

    fn text_path(&mut self, text: &str) {
        let run = match self.layout_text(text) {
            Some(run) => run,
            None => return,
        };

        let (x, y) = self.text_origin();
        let mut ts = self.state.ts;
        ts.append(&Transform::from_translate(x, y));

        if let Some(path) = run.path.and_then(|path| path.transform(to_skia_transform(&ts))) {
            self.path.push_path(&path);
        }

        let (x, y) = self.state.ts.apply(x + run.extents.x_advance, y + run.extents.y_advance);
        self.current_point = Some((x, y));
    }
}
