use std::str::FromStr;

use crate::{Error, Stream};

/// Amount of internal units in one inch.
///
/// All sizes are resolved into document points.
pub const DPI: f64 = 72.0;

/// List of all size units.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum Unit {
    None,
    Mm,
    Cm,
    In,
    Pt,
    Pc,
    Px,
    Em,
    Ex,
    Percent,
}

/// Unit suffixes in lookup order.
static UNITS: &[(&str, Unit)] = &[
    ("mm", Unit::Mm),
    ("cm", Unit::Cm),
    ("in", Unit::In),
    ("pt", Unit::Pt),
    ("pc", Unit::Pc),
    ("px", Unit::Px),
    ("em", Unit::Em),
    ("ex", Unit::Ex),
    ("%", Unit::Percent),
];

impl Unit {
    /// Returns the unit suffix.
    pub fn name(&self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::In => "in",
            Unit::Pt => "pt",
            Unit::Pc => "pc",
            Unit::Px => "px",
            Unit::Em => "em",
            Unit::Ex => "ex",
            Unit::Percent => "%",
        }
    }

    /// Returns a multiplier that converts a number in this unit into points.
    ///
    /// Returns `None` for font and viewport relative units.
    pub fn coefficient(&self) -> Option<f64> {
        match self {
            Unit::None | Unit::Px => Some(1.0),
            Unit::Mm => Some(DPI / 25.4),
            Unit::Cm => Some(DPI / 2.54),
            Unit::In => Some(DPI),
            Unit::Pt => Some(DPI / 72.0),
            Unit::Pc => Some(DPI / 6.0),
            Unit::Em | Unit::Ex | Unit::Percent => None,
        }
    }
}

/// A number with an optional unit suffix.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Size {
    pub number: f64,
    pub unit: Unit,
}

impl Size {
    /// Constructs a new size.
    #[inline]
    pub fn new(number: f64, unit: Unit) -> Self {
        Size { number, unit }
    }

    /// Converts the size into points.
    ///
    /// # Errors
    ///
    /// - `UnsupportedUnit` for `em`, `ex` and `%`.
    pub fn to_points(&self) -> Result<f64, Error> {
        match self.unit.coefficient() {
            Some(k) => Ok(self.number * k),
            None => Err(Error::UnsupportedUnit(self.unit.name().to_string())),
        }
    }
}

impl Default for Size {
    #[inline]
    fn default() -> Self {
        Size::new(0.0, Unit::None)
    }
}

impl FromStr for Size {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Error> {
        let mut s = Stream::from(text);
        let size = s.parse_size()?;

        s.skip_spaces();
        if !s.at_end() {
            return Err(Error::UnexpectedData(s.calc_char_pos()));
        }

        Ok(size)
    }
}

impl<'a> Stream<'a> {
    /// Parses a number followed by an optional unit suffix.
    ///
    /// Spaces are allowed between the number and the suffix.
    pub fn parse_size(&mut self) -> Result<Size, Error> {
        self.skip_spaces();

        let n = self.parse_number()?;
        self.skip_spaces();

        for (name, unit) in UNITS {
            if self.starts_with(name.as_bytes()) {
                self.advance(name.len());
                return Ok(Size::new(n, *unit));
            }
        }

        Ok(Size::new(n, Unit::None))
    }

    /// Parses a size from a list of sizes.
    pub fn parse_list_size(&mut self) -> Result<Size, Error> {
        if self.at_end() {
            return Err(Error::UnexpectedEndOfStream);
        }

        let l = self.parse_size()?;
        self.skip_spaces();
        self.parse_list_separator();
        Ok(l)
    }
}

/// Resolves a size string into points.
///
/// An empty string resolves to zero.
///
/// # Examples
///
/// ```
/// assert_eq!(svgops_types::size("1in").unwrap(), 72.0);
/// assert_eq!(svgops_types::size("").unwrap(), 0.0);
/// ```
pub fn size(text: &str) -> Result<f64, Error> {
    if text.trim().is_empty() {
        return Ok(0.0);
    }

    Size::from_str(text)?.to_points()
}
