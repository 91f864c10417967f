use crate::{Error, Stream};

/// A pull-based coordinate pairs parser.
///
/// Use it for the `points` attribute of the `polygon` and `polyline` elements.
/// Numbers can have units and can be separated by spaces, commas
/// or just by a sign, so `10-20` is two numbers.
///
/// # Errors
///
/// - Stops on a first invalid number.
/// - A trailing unpaired coordinate is `UnexpectedEndOfStream`.
///
/// # Examples
///
/// ```
/// use svgops_types::PointsParser;
///
/// let mut p = PointsParser::from("10 20 30 40");
/// assert_eq!(p.next(), Some(Ok((10.0, 20.0))));
/// assert_eq!(p.next(), Some(Ok((30.0, 40.0))));
/// assert_eq!(p.next(), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PointsParser<'a>(Stream<'a>);

impl<'a> From<&'a str> for PointsParser<'a> {
    #[inline]
    fn from(v: &'a str) -> Self {
        PointsParser(Stream::from(v))
    }
}

impl<'a> Iterator for PointsParser<'a> {
    type Item = Result<(f64, f64), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.skip_spaces();
        if self.0.at_end() {
            return None;
        }

        let res = self.parse_pair();
        if res.is_err() {
            self.0.jump_to_end();
        }

        Some(res)
    }
}

impl<'a> PointsParser<'a> {
    fn parse_pair(&mut self) -> Result<(f64, f64), Error> {
        let x = self.0.parse_list_size()?.to_points()?;
        self.0.skip_spaces();
        let y = self.0.parse_list_size()?.to_points()?;
        Ok((x, y))
    }
}
