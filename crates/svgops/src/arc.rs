// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Elliptical arc conversion from the endpoint to the center parameterization.
//!
//! The ellipse is reduced to a circle by canceling its rotation and scaling
//! the y axis by `rx / ry`. The circular arc is then drawn in a local frame:
//! `translate(start) rotate(rotation) scale(1, ry / rx)`.

use float_cmp::ApproxEqUlps;

use crate::canvas::Canvas;

/// An arc in the center parameterization.
///
/// All values except `start` and `rotation` are in the local frame.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CenterArc {
    /// The arc start point, which is the local frame origin.
    pub start: (f64, f64),
    /// The ellipse rotation in radians.
    pub rotation: f64,
    /// `ry / rx`, applied along the local y axis.
    pub radii_ratio: f64,
    /// The circle center.
    pub center: (f64, f64),
    /// The circle radius, which is `rx` after correction.
    pub radius: f64,
    /// The start angle in radians.
    pub angle1: f64,
    /// The end angle in radians.
    pub angle2: f64,
    /// Draw in the positive angle direction.
    pub sweep: bool,
}

/// The result of an arc conversion.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ArcSegment {
    /// The start and end points are the same, so nothing is drawn.
    Omitted,
    /// One of the radii is zero, so the arc is a straight line to the end point.
    Line(f64, f64),
    /// A regular arc.
    Arc(CenterArc),
}

/// Converts an SVG arc into the center parameterization.
///
/// `start` and `end` are absolute. `rotation` is in degrees.
/// Negative radii are treated as positive ones.
pub fn convert(
    start: (f64, f64),
    rx: f64,
    ry: f64,
    rotation: f64,
    large_arc: bool,
    sweep: bool,
    end: (f64, f64),
) -> ArcSegment {
    let (x1, y1) = start;
    let (x2, y2) = end;

    if x1.approx_eq_ulps(&x2, 4) && y1.approx_eq_ulps(&y2, 4) {
        return ArcSegment::Omitted;
    }

    let rx = rx.abs();
    let ry = ry.abs();
    if rx == 0.0 || ry == 0.0 {
        return ArcSegment::Line(x2, y2);
    }

    let rotation = rotation.to_radians();
    let radii_ratio = ry / rx;

    // Cancel the ellipse rotation and reduce it to a circle.
    let (xe, ye) = rotate(x2 - x1, y2 - y1, -rotation);
    let ye = ye / radii_ratio;

    // Put the end point onto the x axis.
    let angle = ye.atan2(xe);
    let xe = xe.hypot(ye);

    // Enlarge the radius when it's too small to reach the end point.
    let radius = rx.max(xe / 2.0);

    // One of two possible centers.
    let xc = xe / 2.0;
    let mut yc = (radius * radius - xc * xc).max(0.0).sqrt();
    if large_arc == sweep {
        yc = -yc;
    }

    // Put the end point and the center back.
    let (xe, ye) = rotate(xe, 0.0, angle);
    let (xc, yc) = rotate(xc, yc, angle);

    let angle1 = (0.0 - yc).atan2(0.0 - xc);
    let angle2 = (ye - yc).atan2(xe - xc);

    ArcSegment::Arc(CenterArc {
        start,
        rotation,
        radii_ratio,
        center: (xc, yc),
        radius,
        angle1,
        angle2,
        sweep,
    })
}

impl CenterArc {
    /// Returns an absolute point on the arc's ellipse at the specified angle.
    pub fn point_at(&self, angle: f64) -> (f64, f64) {
        let (sin, cos) = angle.sin_cos();
        let x = self.center.0 + self.radius * cos;
        let y = (self.center.1 + self.radius * sin) * self.radii_ratio;
        let (x, y) = rotate(x, y, self.rotation);
        (x + self.start.0, y + self.start.1)
    }

    /// Draws the arc as a circular arc inside a local frame.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.save();
        canvas.translate(self.start.0, self.start.1);
        canvas.rotate(self.rotation);
        canvas.scale(1.0, self.radii_ratio);

        let (xc, yc) = self.center;
        if self.sweep {
            canvas.arc(xc, yc, self.radius, self.angle1, self.angle2);
        } else {
            canvas.arc_negative(xc, yc, self.radius, self.angle1, self.angle2);
        }

        canvas.restore();
    }
}

/// Rotates a point around the origin.
#[inline]
fn rotate(x: f64, y: f64, angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (x * cos - y * sin, y * cos + x * sin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(
        start: (f64, f64),
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        end: (f64, f64),
    ) -> CenterArc {
        match convert(start, rx, ry, rotation, large_arc, sweep, end) {
            ArcSegment::Arc(arc) => arc,
            other => panic!("unexpected {:?}", other),
        }
    }

    fn assert_point(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-6 && (actual.1 - expected.1).abs() < 1e-6,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn round_trip() {
        let radii = [(1.0, 1.0), (5.0, 2.0), (2.0, 7.5), (30.0, 30.0), (0.5, 0.25)];
        let rotations = [0.0, 30.0, -45.0, 90.0, 170.0];
        let ends = [(10.0, 0.0), (3.0, 4.0), (-7.0, 2.0), (0.0, -9.0), (0.1, 0.1)];

        for &(rx, ry) in &radii {
            for &rotation in &rotations {
                for &end in &ends {
                    for &large_arc in &[false, true] {
                        for &sweep in &[false, true] {
                            let start = (2.0, -3.0);
                            let end = (start.0 + end.0, start.1 + end.1);
                            let a = arc(start, rx, ry, rotation, large_arc, sweep, end);
                            assert_point(a.point_at(a.angle1), start);
                            assert_point(a.point_at(a.angle2), end);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn radius_correction() {
        let a = arc((0.0, 0.0), 1.0, 1.0, 0.0, false, true, (10.0, 0.0));
        assert_eq!(a.radius, 5.0);
        assert_eq!(a.center, (5.0, 0.0));
    }

    #[test]
    fn radius_is_not_reduced() {
        let a = arc((0.0, 0.0), 8.0, 8.0, 0.0, false, true, (10.0, 0.0));
        assert_eq!(a.radius, 8.0);
    }

    #[test]
    fn half_circle() {
        let a = arc((0.0, 0.0), 1.0, 1.0, 0.0, false, true, (2.0, 0.0));
        assert_point(a.center, (1.0, 0.0));
        assert_eq!(a.angle1, std::f64::consts::PI);
        assert_eq!(a.angle2, 0.0);
        assert!(a.sweep);
    }

    #[test]
    fn center_side() {
        // A small clockwise arc has its center below the chord.
        let a = arc((0.0, 0.0), 2.0, 2.0, 0.0, false, true, (2.0, 0.0));
        assert!(a.center.1 > 0.0);

        // Flipping either flag moves the center to the other side.
        let a = arc((0.0, 0.0), 2.0, 2.0, 0.0, true, true, (2.0, 0.0));
        assert!(a.center.1 < 0.0);
        let a = arc((0.0, 0.0), 2.0, 2.0, 0.0, false, false, (2.0, 0.0));
        assert!(a.center.1 < 0.0);
        let a = arc((0.0, 0.0), 2.0, 2.0, 0.0, true, false, (2.0, 0.0));
        assert!(a.center.1 > 0.0);
    }

    #[test]
    fn negative_radii() {
        let a = arc((0.0, 0.0), -3.0, -3.0, 0.0, false, true, (2.0, 0.0));
        assert_eq!(a.radius, 3.0);
        assert_eq!(a.radii_ratio, 1.0);
    }

    #[test]
    fn zero_radius() {
        assert_eq!(
            convert((0.0, 0.0), 0.0, 5.0, 0.0, false, true, (10.0, 5.0)),
            ArcSegment::Line(10.0, 5.0)
        );
        assert_eq!(
            convert((0.0, 0.0), 5.0, 0.0, 0.0, false, true, (10.0, 5.0)),
            ArcSegment::Line(10.0, 5.0)
        );
    }

    #[test]
    fn same_points() {
        assert_eq!(
            convert((3.0, 4.0), 5.0, 5.0, 0.0, true, true, (3.0, 4.0)),
            ArcSegment::Omitted
        );
    }
}
