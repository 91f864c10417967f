// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::f64::consts::PI;

use svgops_tree::{AttributeId as AId, Document, ElementId as EId, Node};
use svgops_types::{Number, PointsParser, Rgba, Transform, TransformListParser, TransformListToken};

use crate::canvas::{Canvas, FillRule, FontFace, FontStyle, FontWeight};
use crate::href::{self, Href};
use crate::{path, viewport, Error, Options};

/// How a traversal frame treats the graphics state it saves.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Frame {
    /// The outermost frame of a document or of a referenced subtree.
    ///
    /// Its state is never restored. For a referenced subtree,
    /// the referencing element restores it instead.
    Root,
    /// A regular frame that restores its state on exit.
    Nested,
}

/// Paint properties that element handlers are allowed to override.
///
/// The document itself is never modified.
#[derive(Clone, Copy, Debug)]
struct ResolvedStyle<'a> {
    fill: Option<&'a str>,
    stroke_width: Option<&'a str>,
}

impl<'a> ResolvedStyle<'a> {
    fn new(node: Node<'a>) -> Self {
        // An empty value is the same as a missing one.
        let mut stroke_width = node
            .attribute(AId::StrokeWidth)
            .filter(|v| !v.trim().is_empty());
        if stroke_width.is_none() && is_shape(node) {
            stroke_width = Some("1");
        }

        ResolvedStyle {
            fill: node.attribute(AId::Fill),
            stroke_width,
        }
    }
}

fn is_shape(node: Node) -> bool {
    matches!(
        node.tag_name(),
        Some(EId::Circle)
            | Some(EId::Line)
            | Some(EId::Path)
            | Some(EId::Polygon)
            | Some(EId::Polyline)
            | Some(EId::Rect)
    )
}

pub(crate) struct Walker<'o, 'c> {
    opt: &'o Options,
    canvas: &'c mut dyn Canvas,
    // The text cursor, shared by sibling text runs.
    cursor: (f64, f64),
    depth: u32,
}

impl<'o, 'c> Walker<'o, 'c> {
    pub fn new(opt: &'o Options, canvas: &'c mut dyn Canvas) -> Self {
        Walker {
            opt,
            canvas,
            cursor: (0.0, 0.0),
            depth: 0,
        }
    }

    /// Draws an element and its descendants.
    pub fn draw(&mut self, node: Node, frame: Frame) -> Result<(), Error> {
        if node.tag_name() == Some(EId::Defs) {
            return Ok(());
        }

        if self.depth >= self.opt.max_depth {
            return Err(Error::NestingLimitReached);
        }

        self.depth += 1;
        let result = self.draw_node(node, frame);
        self.depth -= 1;
        result
    }

    fn draw_node(&mut self, node: Node, frame: Frame) -> Result<(), Error> {
        log::trace!("Drawing '{}'.", node.tag_name_str());

        self.canvas.save();

        let x = parse_size(node, AId::X)?;
        let y = parse_size(node, AId::Y)?;
        self.canvas.move_to(x, y);

        if let Some(value) = node.attribute(AId::Transform) {
            self.apply_transform(node, value)?;
        }

        let mut style = ResolvedStyle::new(node);
        if let Some(eid) = node.tag_name() {
            self.draw_element(eid, node, frame, &mut style)?;
        }

        self.paint(node, &style)?;

        for child in node.children() {
            if child.is_element() {
                self.draw(child, Frame::Nested)?;
            }
        }

        if frame == Frame::Nested {
            self.canvas.restore();
        }

        Ok(())
    }

    fn draw_element<'a>(
        &mut self,
        eid: EId,
        node: Node<'a>,
        frame: Frame,
        style: &mut ResolvedStyle<'a>,
    ) -> Result<(), Error> {
        match eid {
            EId::Circle => self.draw_circle(node),
            EId::Ellipse => self.draw_ellipse(node),
            EId::Line => self.draw_line(node),
            EId::Path => self.draw_path(node),
            EId::Polygon => self.draw_polyline(node, true),
            EId::Polyline => self.draw_polyline(node, false),
            EId::Rect => self.draw_rect(node),
            EId::Svg => self.draw_svg(node, frame),
            EId::Text => {
                let x = parse_size(node, AId::X)?;
                let y = parse_size(node, AId::Y)?;
                self.draw_text(node, x, y, style)
            }
            EId::Tspan => self.draw_tspan(node, style),
            EId::Tref | EId::Use => self.draw_use(node),
            EId::Defs | EId::G => Ok(()),
        }
    }

    fn apply_transform(&mut self, node: Node, value: &str) -> Result<(), Error> {
        for token in TransformListParser::from(value) {
            let token = token.map_err(|e| Error::attribute(node.tag_name_str(), AId::Transform, value, e))?;
            match token {
                TransformListToken::Matrix { a, b, c, d, e, f } => {
                    self.canvas.set_matrix(Transform::new(a, b, c, d, e, f));
                }
                TransformListToken::Translate { tx, ty } => self.canvas.translate(tx, ty),
                TransformListToken::Scale { sx, sy } => self.canvas.scale(sx, sy),
                TransformListToken::Rotate { angle } => self.canvas.rotate(angle.to_radians()),
                TransformListToken::Unknown { name } => {
                    log::warn!(
                        "Unsupported transform function '{}' on the '{}' element. Skipped.",
                        name,
                        node.tag_name_str()
                    );
                }
            }
        }

        Ok(())
    }

    fn paint(&mut self, node: Node, style: &ResolvedStyle) -> Result<(), Error> {
        let opacity = parse_number(node, AId::Opacity, 1.0)?;
        let stroke_opacity = opacity * parse_number(node, AId::StrokeOpacity, 1.0)?;
        let fill_opacity = opacity * parse_number(node, AId::FillOpacity, 1.0)?;

        let fill_rule = match node.attribute(AId::FillRule).map(str::trim) {
            Some("evenodd") => FillRule::EvenOdd,
            _ => FillRule::NonZero,
        };
        self.canvas.set_fill_rule(fill_rule);

        let fill = parse_color(node, AId::Fill, style.fill, fill_opacity)?;
        self.canvas.set_source_rgba(fill);
        self.canvas.fill_preserve();

        let line_width = match style.stroke_width {
            Some(value) => svgops_types::size(value)
                .map_err(|e| Error::attribute(node.tag_name_str(), AId::StrokeWidth, value, e))?,
            None => 0.0,
        };
        self.canvas.set_line_width(line_width);

        let stroke = parse_color(node, AId::Stroke, node.attribute(AId::Stroke), stroke_opacity)?;
        self.canvas.set_source_rgba(stroke);
        self.canvas.stroke();

        Ok(())
    }

    fn draw_circle(&mut self, node: Node) -> Result<(), Error> {
        let r = parse_size(node, AId::R)?;
        if !(r > 0.0) {
            log::warn!("Circle has an invalid 'r' value. Skipped.");
            return Ok(());
        }

        let x = parse_size(node, AId::X)? + parse_size(node, AId::Cx)?;
        let y = parse_size(node, AId::Y)? + parse_size(node, AId::Cy)?;

        self.canvas.new_sub_path();
        self.canvas.arc(x, y, r, 0.0, 2.0 * PI);
        Ok(())
    }

    fn draw_ellipse(&mut self, node: Node) -> Result<(), Error> {
        let rx = parse_size(node, AId::Rx)?;
        let ry = parse_size(node, AId::Ry)?;
        if !(rx > 0.0 && ry > 0.0) {
            log::warn!("Ellipse has an invalid 'rx' or 'ry' value. Skipped.");
            return Ok(());
        }

        let x = parse_size(node, AId::X)? + parse_size(node, AId::Cx)?;
        let y = parse_size(node, AId::Y)? + parse_size(node, AId::Cy)?;
        let ratio = ry / rx;

        self.canvas.new_sub_path();
        self.canvas.save();
        self.canvas.scale(1.0, ratio);
        self.canvas.arc(x, y / ratio, rx, 0.0, 2.0 * PI);
        self.canvas.restore();
        Ok(())
    }

    fn draw_line(&mut self, node: Node) -> Result<(), Error> {
        let x1 = parse_size(node, AId::X1)?;
        let y1 = parse_size(node, AId::Y1)?;
        let x2 = parse_size(node, AId::X2)?;
        let y2 = parse_size(node, AId::Y2)?;

        self.canvas.move_to(x1, y1);
        self.canvas.line_to(x2, y2);
        Ok(())
    }

    fn draw_path(&mut self, node: Node) -> Result<(), Error> {
        let data = node.attribute(AId::D).unwrap_or("");
        path::draw_path(&mut *self.canvas, data)
            .map_err(|e| Error::attribute(node.tag_name_str(), AId::D, data, e))
    }

    fn draw_polyline(&mut self, node: Node, close: bool) -> Result<(), Error> {
        let value = node.attribute(AId::Points).unwrap_or("");

        let mut is_first = true;
        for pair in PointsParser::from(value) {
            let (x, y) = pair.map_err(|e| Error::attribute(node.tag_name_str(), AId::Points, value, e))?;
            if is_first {
                self.canvas.move_to(x, y);
                is_first = false;
            } else {
                self.canvas.line_to(x, y);
            }
        }

        if close && !is_first {
            self.canvas.close_path();
        }

        Ok(())
    }

    fn draw_rect(&mut self, node: Node) -> Result<(), Error> {
        let x = parse_size(node, AId::X)?;
        let y = parse_size(node, AId::Y)?;
        let width = parse_size(node, AId::Width)?;
        let height = parse_size(node, AId::Height)?;

        self.canvas.rectangle(x, y, width, height);
        Ok(())
    }

    // A root `svg` is already fitted by the caller.
    fn draw_svg(&mut self, node: Node, frame: Frame) -> Result<(), Error> {
        if frame == Frame::Root {
            return Ok(());
        }

        let x = parse_size(node, AId::X)?;
        let y = parse_size(node, AId::Y)?;
        self.canvas.translate(x, y);

        let (width, height, view_box) = viewport::node_format(node)?;
        if let Some(ts) = viewport::fit_view_box(width, height, view_box) {
            self.canvas.transform(ts);
        }

        Ok(())
    }

    fn draw_text<'a>(
        &mut self,
        node: Node<'a>,
        x: f64,
        y: f64,
        style: &mut ResolvedStyle<'a>,
    ) -> Result<(), Error> {
        let fill = match style.fill {
            Some(fill) => fill,
            None => node.attribute(AId::Color).unwrap_or("#000000"),
        };

        let text = node.text().trim();
        let opt = self.opt;

        let font_size_value = node
            .attribute(AId::FontSize)
            .unwrap_or(opt.font_size.as_str());
        let font_size = svgops_types::size(font_size_value)
            .map_err(|e| Error::attribute(node.tag_name_str(), AId::FontSize, font_size_value, e))?;

        let face = FontFace {
            family: node
                .attribute(AId::FontFamily)
                .unwrap_or(opt.font_family.as_str())
                .to_string(),
            style: FontStyle::from_str(node.attribute(AId::FontStyle).unwrap_or("")),
            weight: FontWeight::from_str(node.attribute(AId::FontWeight).unwrap_or("")),
        };

        self.canvas.select_font_face(&face);
        self.canvas.set_font_size(font_size);
        let extents = self.canvas.text_extents(text);

        let mut x = x;
        match node.attribute(AId::TextAnchor).map(str::trim) {
            Some("middle") => x -= extents.width / 2.0 + extents.x_bearing,
            Some("end") => x -= extents.width + extents.x_bearing,
            _ => {}
        }

        let opacity = parse_number(node, AId::Opacity, 1.0)?;
        let color = parse_color(node, AId::Fill, Some(fill), opacity)?;

        self.canvas.move_to(x, y);
        self.canvas.set_source_rgba(color);
        self.canvas.show_text(text);
        self.canvas.move_to(x, y);
        self.canvas.text_path(text);

        // The outlines are already filled.
        style.fill = Some("#00000000");

        self.cursor = self.canvas.current_point().unwrap_or((x, y));
        Ok(())
    }

    fn draw_tspan<'a>(&mut self, node: Node<'a>, style: &mut ResolvedStyle<'a>) -> Result<(), Error> {
        let (mut x, mut y) = self.cursor;
        if node.has_attribute(AId::X) {
            x = parse_size(node, AId::X)?;
        }

        if node.has_attribute(AId::Y) {
            y = parse_size(node, AId::Y)?;
        }

        x += parse_size(node, AId::Dx)?;
        y += parse_size(node, AId::Dy)?;

        self.draw_text(node, x, y, style)
    }

    fn draw_use(&mut self, node: Node) -> Result<(), Error> {
        let href = node.attribute(AId::Href).unwrap_or("");
        if href.trim().is_empty() {
            log::warn!("The '{}' element has no 'href'. Skipped.", node.tag_name_str());
            return Ok(());
        }

        let external: Document;
        let target = match href::resolve(href, self.opt)? {
            Href::Local(id) => match node.document().element_by_id(id) {
                Some(target) => target,
                None => {
                    log::warn!("'{}' cannot be resolved. Skipped.", href);
                    return Ok(());
                }
            },
            Href::External { document, id } => {
                external = document;
                match id {
                    Some(id) => external
                        .element_by_id(&id)
                        .ok_or_else(|| Error::HrefResolvingFailed(href.to_string()))?,
                    None => external.root_element(),
                }
            }
        };

        if target.tag_name() == Some(EId::Defs) {
            return Ok(());
        }

        let x = parse_size(node, AId::X)?;
        let y = parse_size(node, AId::Y)?;

        self.canvas.save();
        self.canvas.translate(x, y);

        let (width, height, view_box) = use_format(node, target)?;
        if let Some(ts) = viewport::fit_view_box(width, height, view_box) {
            self.canvas.transform(ts);
        }

        self.draw(target, Frame::Root)?;

        // The target is drawn as a root frame, so its state is still on the stack.
        self.canvas.restore();
        self.canvas.restore();
        Ok(())
    }
}

/// Returns the size of a referenced element.
///
/// The referencing element's width and height take precedence.
fn use_format(node: Node, target: Node) -> Result<(f64, f64, Option<svgops_types::ViewBox>), Error> {
    let (mut width, mut height, view_box) = viewport::node_format(target)?;

    let use_width = parse_size(node, AId::Width)?;
    if use_width > 0.0 {
        width = use_width;
    }

    let use_height = parse_size(node, AId::Height)?;
    if use_height > 0.0 {
        height = use_height;
    }

    Ok((width, height, view_box))
}

/// Parses a size attribute into points. A missing attribute is zero.
pub(crate) fn parse_size(node: Node, aid: AId) -> Result<f64, Error> {
    let value = node.attribute(aid).unwrap_or("");
    svgops_types::size(value).map_err(|e| Error::attribute(node.tag_name_str(), aid, value, e))
}

fn parse_number(node: Node, aid: AId, default: f64) -> Result<f64, Error> {
    match node.attribute(aid) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<Number>()
            .map(|n| n.0)
            .map_err(|e| Error::attribute(node.tag_name_str(), aid, value, e)),
        _ => Ok(default),
    }
}

// A missing color is transparent.
fn parse_color(node: Node, aid: AId, value: Option<&str>, opacity: f64) -> Result<Rgba, Error> {
    let value = value.unwrap_or("");
    svgops_types::color(value, opacity).map_err(|e| Error::attribute(node.tag_name_str(), aid, value, e))
}
