/// List of all errors.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// An input data ended earlier than expected.
    ///
    /// Should only appear on invalid input data.
    UnexpectedEndOfStream,

    /// An input text contains unknown data.
    UnexpectedData(usize),

    /// A provided string doesn't have a valid data.
    ///
    /// For example, if we try to parse a color form `zzz`
    /// string - we will get this error.
    InvalidValue,

    /// An invalid/unexpected character.
    ///
    /// The first byte is an actual one, others - expected.
    ///
    /// We are using a single value to reduce the struct size.
    InvalidChar(Vec<u8>, usize),

    /// An invalid number.
    InvalidNumber(usize),

    /// A hex color has a digits count other than 3, 4, 6 or 8.
    InvalidHexLength(usize),

    /// A transform function received a wrong number of operands.
    InvalidOperandCount {
        /// Function name.
        name: &'static str,
        /// Amount of parsed operands.
        count: usize,
    },

    /// A size uses a unit that cannot be resolved without a layout context.
    ///
    /// `em`, `ex` and `%`.
    UnsupportedUnit(String),

    /// A path data contains an unknown command letter.
    UnsupportedCommand(char, usize),
}

impl Error {
    /// Checks that the error is caused by an intentionally unsupported feature
    /// and not by a malformed input.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedUnit(_) | Error::UnsupportedCommand(..)
        )
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::UnexpectedEndOfStream => {
                write!(f, "unexpected end of stream")
            }
            Error::UnexpectedData(pos) => {
                write!(f, "unexpected data at position {}", pos)
            }
            Error::InvalidValue => {
                write!(f, "invalid value")
            }
            Error::InvalidChar(ref chars, pos) => {
                // Vec<u8> -> Vec<String>
                let list: Vec<String> = chars
                    .iter()
                    .skip(1)
                    .map(|c| (*c as char).to_string())
                    .collect();

                write!(
                    f,
                    "expected '{}' not '{}' at position {}",
                    list.join("', '"),
                    chars[0] as char,
                    pos
                )
            }
            Error::InvalidNumber(pos) => {
                write!(f, "invalid number at position {}", pos)
            }
            Error::InvalidHexLength(len) => {
                write!(f, "a hex color cannot have {} digits", len)
            }
            Error::InvalidOperandCount { name, count } => {
                write!(f, "'{}' cannot have {} operands", name, count)
            }
            Error::UnsupportedUnit(ref unit) => {
                write!(f, "'{}' units are not supported", unit)
            }
            Error::UnsupportedCommand(c, pos) => {
                write!(f, "unsupported path command '{}' at position {}", c, pos)
            }
        }
    }
}

impl std::error::Error for Error {}
