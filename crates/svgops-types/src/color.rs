use crate::{colors, ByteExt, Error, Stream};

/// A color with floating point channels in a 0..=1 range.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Rgba {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Rgba {
    /// Constructs a new `Rgba` from channel values.
    #[inline]
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Rgba {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Constructs a new `Rgba` from 8-bit RGB values and an alpha.
    #[inline]
    pub fn from_rgb8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Rgba::new(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
            alpha,
        )
    }

    /// Constructs a fully transparent black.
    #[inline]
    pub fn transparent() -> Self {
        Rgba::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Constructs an opaque black.
    #[inline]
    pub fn black() -> Self {
        Rgba::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Checks that the color has a zero alpha.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Resolves a color string into `Rgba`.
///
/// `opacity` is multiplied into the resulting alpha.
///
/// Supported forms are `none`, named colors (case-insensitive), `#rgb`, `#rgba`,
/// `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
///
/// # Notes
///
/// - Channels of `rgb()` and `rgba()` are expected to be already in a 0..=1 range
///   and are not normalized.
/// - An empty string is the same as `none`.
///
/// # Examples
///
/// ```
/// use svgops_types::{color, Rgba};
///
/// assert_eq!(color("#fff", 1.0).unwrap(), Rgba::new(1.0, 1.0, 1.0, 1.0));
/// assert_eq!(color("none", 1.0).unwrap(), Rgba::transparent());
/// ```
pub fn color(text: &str, opacity: f64) -> Result<Rgba, Error> {
    let text = text.trim();
    if text.is_empty() || text == "none" {
        return Ok(Rgba::transparent());
    }

    let text = text.to_ascii_lowercase();
    let mut s = Stream::from(text.as_str());

    let color = if s.starts_with(b"rgba") {
        s.advance(4);
        let [r, g, b, a] = parse_channels::<4>(&mut s)?;
        Rgba::new(r, g, b, a * opacity)
    } else if s.starts_with(b"rgb") {
        s.advance(3);
        let [r, g, b] = parse_channels::<3>(&mut s)?;
        Rgba::new(r, g, b, opacity)
    } else if let Some((r, g, b)) = colors::from_str(&text) {
        s.jump_to_end();
        Rgba::from_rgb8(r, g, b, opacity)
    } else if s.curr_byte()? == b'#' {
        s.advance(1);
        let digits = s.consume_bytes(|_, c| c.is_hex_digit()).as_bytes();
        if !s.at_end() {
            return Err(Error::UnexpectedData(s.calc_char_pos()));
        }

        parse_hex(digits, opacity)?
    } else {
        return Err(Error::InvalidValue);
    };

    s.skip_spaces();
    if !s.at_end() {
        return Err(Error::UnexpectedData(s.calc_char_pos()));
    }

    Ok(color)
}

fn parse_channels<const N: usize>(s: &mut Stream) -> Result<[f64; N], Error> {
    s.skip_spaces();
    s.consume_byte(b'(')?;

    let mut channels = [0.0; N];
    for channel in channels.iter_mut() {
        *channel = s.parse_list_number()?;
    }

    s.skip_spaces();
    s.consume_byte(b')')?;
    Ok(channels)
}

fn parse_hex(digits: &[u8], opacity: f64) -> Result<Rgba, Error> {
    // Short forms are expanded by doubling each digit.
    let expanded: Vec<u8> = match digits.len() {
        3 | 4 => digits.iter().flat_map(|c| [*c, *c]).collect(),
        6 | 8 => digits.to_vec(),
        n => return Err(Error::InvalidHexLength(n)),
    };

    let mut alpha = opacity;
    if expanded.len() == 8 {
        alpha *= hex_pair(expanded[6], expanded[7]) as f64 / 255.0;
    }

    Ok(Rgba::from_rgb8(
        hex_pair(expanded[0], expanded[1]),
        hex_pair(expanded[2], expanded[3]),
        hex_pair(expanded[4], expanded[5]),
        alpha,
    ))
}

#[inline]
fn from_hex(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

#[inline]
fn hex_pair(c1: u8, c2: u8) -> u8 {
    let h1 = from_hex(c1);
    let h2 = from_hex(c2);
    (h1 << 4) | h2
}
