use std::f64;

use crate::{Error, Stream};

/// An affine transform.
///
/// Maps a point `(x, y)` into `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    /// Constructs a new transform.
    #[inline]
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Transform { a, b, c, d, e, f }
    }

    /// Constructs a new translate transform.
    #[inline]
    pub fn from_translate(tx: f64, ty: f64) -> Self {
        Transform::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Constructs a new scale transform.
    #[inline]
    pub fn from_scale(sx: f64, sy: f64) -> Self {
        Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Constructs a new rotate transform. The angle is in radians.
    #[inline]
    pub fn from_rotate(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Transform::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Applies `other` before the current transform.
    ///
    /// This is how a drawing context composes a local transform into its
    /// current transformation matrix.
    #[inline]
    pub fn append(&mut self, other: &Transform) {
        *self = multiply(self, other);
    }

    /// Returns a transformed point.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let new_x = self.a * x + self.c * y + self.e;
        let new_y = self.b * x + self.d * y + self.f;
        (new_x, new_y)
    }

    /// Returns an inverted transform.
    ///
    /// Returns `None` when the transform is not invertible.
    pub fn invert(&self) -> Option<Transform> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < f64::EPSILON || !det.is_finite() {
            return None;
        }

        let inv_det = 1.0 / det;
        Some(Transform::new(
            self.d * inv_det,
            -self.b * inv_det,
            -self.c * inv_det,
            self.a * inv_det,
            (self.c * self.f - self.d * self.e) * inv_det,
            (self.b * self.e - self.a * self.f) * inv_det,
        ))
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Transform {
        Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}

/// Transform list token.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum TransformListToken<'a> {
    /// Replaces the current transform.
    Matrix {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
    },
    Translate {
        tx: f64,
        ty: f64,
    },
    Scale {
        sx: f64,
        sy: f64,
    },
    /// The angle is in degrees.
    Rotate {
        angle: f64,
    },
    /// A well-formed function that has no meaning for us, like `skewX`.
    Unknown {
        name: &'a str,
    },
}

/// A pull-based transform list parser.
///
/// Recognizes `matrix`, `translate`, `scale` and `rotate`.
/// Other functions are returned as `TransformListToken::Unknown`
/// with their operands skipped.
///
/// # Errors
///
/// - Most of the `Error` types can occur.
///
/// # Notes
///
/// - A single operand of `translate` and `scale` is used for both axes.
/// - `rotate(<angle> <cx> <cy>)` is split into three tokens:
///   `translate(<cx> <cy>) rotate(<angle>) translate(-<cx> -<cy>)`.
///
/// # Examples
///
/// ```
/// use svgops_types::{TransformListParser, TransformListToken};
///
/// let mut p = TransformListParser::from("scale(2) translate(10, -20)");
/// assert_eq!(p.next().unwrap().unwrap(), TransformListToken::Scale { sx: 2.0, sy: 2.0 } );
/// assert_eq!(p.next().unwrap().unwrap(), TransformListToken::Translate { tx: 10.0, ty: -20.0 } );
/// assert_eq!(p.next().is_none(), true);
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TransformListParser<'a> {
    stream: Stream<'a>,
    rotate_ts: Option<(f64, f64)>,
    last_angle: Option<f64>,
}

impl<'a> From<&'a str> for TransformListParser<'a> {
    fn from(text: &'a str) -> Self {
        TransformListParser {
            stream: Stream::from(text),
            rotate_ts: None,
            last_angle: None,
        }
    }
}

impl<'a> Iterator for TransformListParser<'a> {
    type Item = Result<TransformListToken<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(a) = self.last_angle {
            self.last_angle = None;
            return Some(Ok(TransformListToken::Rotate { angle: a }));
        }

        if let Some((x, y)) = self.rotate_ts {
            self.rotate_ts = None;
            return Some(Ok(TransformListToken::Translate { tx: -x, ty: -y }));
        }

        self.stream.skip_spaces();

        if self.stream.at_end() {
            // empty attribute is still a valid value
            return None;
        }

        let res = self.parse_next();
        if res.is_err() {
            self.stream.jump_to_end();
        }

        Some(res)
    }
}

impl<'a> TransformListParser<'a> {
    fn parse_next(&mut self) -> Result<TransformListToken<'a>, Error> {
        let s = &mut self.stream;

        let start = s.pos();
        let name = s.consume_ascii_ident();
        if name.is_empty() {
            return Err(Error::UnexpectedData(s.calc_char_pos_at(start)));
        }

        s.skip_spaces();
        s.consume_byte(b'(')?;

        let (ops, count) = parse_operands(s)?;

        let t = match name {
            "matrix" => {
                check_count("matrix", count, &[6])?;
                TransformListToken::Matrix {
                    a: ops[0],
                    b: ops[1],
                    c: ops[2],
                    d: ops[3],
                    e: ops[4],
                    f: ops[5],
                }
            }
            "translate" => {
                check_count("translate", count, &[1, 2])?;
                let ty = if count == 1 { ops[0] } else { ops[1] };
                TransformListToken::Translate { tx: ops[0], ty }
            }
            "scale" => {
                check_count("scale", count, &[1, 2])?;
                let sy = if count == 1 { ops[0] } else { ops[1] };
                TransformListToken::Scale { sx: ops[0], sy }
            }
            "rotate" => {
                check_count("rotate", count, &[1, 3])?;
                if count == 3 {
                    let (cx, cy) = (ops[1], ops[2]);
                    self.rotate_ts = Some((cx, cy));
                    self.last_angle = Some(ops[0]);

                    TransformListToken::Translate { tx: cx, ty: cy }
                } else {
                    TransformListToken::Rotate { angle: ops[0] }
                }
            }
            _ => TransformListToken::Unknown { name },
        };

        let s = &mut self.stream;
        s.consume_byte(b')')?;
        s.skip_spaces();

        if s.is_curr_byte_eq(b',') {
            s.advance(1);
        }

        Ok(t)
    }
}

/// Parses operands up to the closing paren, which is left in the stream.
///
/// Operands can have units. Only the first six of them are stored,
/// but all of them are counted.
fn parse_operands(s: &mut Stream) -> Result<([f64; 6], usize), Error> {
    let mut ops = [0.0; 6];
    let mut count = 0;
    loop {
        s.skip_spaces();
        if s.is_curr_byte_eq(b')') {
            break;
        }

        let n = s.parse_list_size()?.to_points()?;
        if let Some(op) = ops.get_mut(count) {
            *op = n;
        }

        count += 1;
    }

    Ok((ops, count))
}

fn check_count(name: &'static str, count: usize, allowed: &[usize]) -> Result<(), Error> {
    if allowed.contains(&count) {
        Ok(())
    } else {
        Err(Error::InvalidOperandCount { name, count })
    }
}

impl std::str::FromStr for Transform {
    type Err = Error;

    /// Resolves a whole transform list into a single matrix.
    ///
    /// `matrix` replaces everything composed before it.
    fn from_str(text: &str) -> Result<Self, Error> {
        let tokens = TransformListParser::from(text);
        let mut ts = Transform::default();

        for token in tokens {
            match token? {
                TransformListToken::Matrix { a, b, c, d, e, f } => {
                    ts = Transform::new(a, b, c, d, e, f);
                }
                TransformListToken::Translate { tx, ty } => {
                    ts.append(&Transform::from_translate(tx, ty));
                }
                TransformListToken::Scale { sx, sy } => {
                    ts.append(&Transform::from_scale(sx, sy));
                }
                TransformListToken::Rotate { angle } => {
                    ts.append(&Transform::from_rotate(angle.to_radians()));
                }
                TransformListToken::Unknown { .. } => {}
            }
        }

        Ok(ts)
    }
}

#[inline(never)]
fn multiply(ts1: &Transform, ts2: &Transform) -> Transform {
    Transform {
        a: ts1.a * ts2.a + ts1.c * ts2.b,
        b: ts1.b * ts2.a + ts1.d * ts2.b,
        c: ts1.a * ts2.c + ts1.c * ts2.d,
        d: ts1.b * ts2.c + ts1.d * ts2.d,
        e: ts1.a * ts2.e + ts1.c * ts2.f + ts1.e,
        f: ts1.b * ts2.e + ts1.d * ts2.f + ts1.f,
    }
}
