// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgops_tree::AttributeId;
use svgops_types::ViewBoxError;

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// An attribute has a malformed value.
    InvalidAttribute {
        /// Element's tag name.
        element: String,
        /// The malformed attribute.
        attribute: AttributeId,
        /// The raw attribute value.
        value: String,
        /// The parser error.
        cause: svgops_types::Error,
    },

    /// An attribute uses a feature that is not supported.
    ///
    /// Like an unknown path command or a relative unit like `em`.
    Unsupported {
        /// Element's tag name.
        element: String,
        /// The unsupported attribute.
        attribute: AttributeId,
        /// The raw attribute value.
        value: String,
        /// The parser error.
        cause: svgops_types::Error,
    },

    /// A `viewBox` attribute is malformed or has a zero size.
    InvalidViewBox {
        /// Element's tag name.
        element: String,
        /// The raw attribute value.
        value: String,
        /// The parser error.
        cause: ViewBoxError,
    },

    /// Failed to parse an SVG document.
    InvalidDocument(svgops_tree::Error),

    /// An external `href` cannot be resolved.
    HrefResolvingFailed(String),

    /// The maximum traversal depth has been reached.
    ///
    /// Usually caused by a `use` element referencing its own ancestor.
    NestingLimitReached,

    /// SVG doesn't have a valid size.
    ///
    /// Occurs when the rendered image would be empty.
    InvalidSize,

    /// Only UTF-8 content are supported.
    NotAnUtf8Str,

    /// Compressed SVG must use the GZip algorithm.
    MalformedGZip,

    /// Failed to read a referenced file.
    Io(std::io::Error),
}

impl Error {
    /// Creates an attribute error, classified by its cause.
    pub(crate) fn attribute(
        element: &str,
        attribute: AttributeId,
        value: &str,
        cause: svgops_types::Error,
    ) -> Self {
        let element = element.to_string();
        let value = value.to_string();
        if cause.is_unsupported() {
            Error::Unsupported {
                element,
                attribute,
                value,
                cause,
            }
        } else {
            Error::InvalidAttribute {
                element,
                attribute,
                value,
                cause,
            }
        }
    }
}

impl From<svgops_tree::Error> for Error {
    fn from(e: svgops_tree::Error) -> Self {
        Error::InvalidDocument(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::InvalidAttribute {
                ref element,
                attribute,
                ref value,
                ref cause,
            } => {
                write!(
                    f,
                    "invalid '{}' value '{}' on the '{}' element: {}",
                    attribute, value, element, cause
                )
            }
            Error::Unsupported {
                ref element,
                attribute,
                ref value,
                ref cause,
            } => {
                write!(
                    f,
                    "unsupported '{}' value '{}' on the '{}' element: {}",
                    attribute, value, element, cause
                )
            }
            Error::InvalidViewBox {
                ref element,
                ref value,
                ref cause,
            } => {
                write!(
                    f,
                    "invalid viewBox '{}' on the '{}' element: {}",
                    value, element, cause
                )
            }
            Error::InvalidDocument(ref e) => {
                write!(f, "SVG data parsing failed cause {}", e)
            }
            Error::HrefResolvingFailed(ref href) => {
                write!(f, "failed to resolve '{}'", href)
            }
            Error::NestingLimitReached => {
                write!(f, "the maximum nesting depth has been reached")
            }
            Error::InvalidSize => {
                write!(f, "SVG has an invalid size")
            }
            Error::NotAnUtf8Str => {
                write!(f, "provided data has not an UTF-8 encoding")
            }
            Error::MalformedGZip => {
                write!(f, "provided data has a malformed GZip content")
            }
            Error::Io(ref e) => {
                write!(f, "failed to read a referenced file cause {}", e)
            }
        }
    }
}

impl std::error::Error for Error {}
