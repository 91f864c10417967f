/*!
*svgops-types* is a collection of parsers for the SVG value types
needed to turn a document into drawing operations.

## Supported types

- numbers and sizes with `mm`, `cm`, `in`, `pt`, `pc` and `px` units
- colors: named, `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()` and `none`
- lists of coordinate pairs
- transform lists: `matrix`, `translate`, `scale` and `rotate`
- path data
- `viewBox`

## Features

- Complete support of paths, so data like `M10-20A5.5.3-4 110-.1` will be parsed correctly.
- Implicit path commands will be automatically converted into explicit one.
- Sizes are resolved into points, at 72 points per inch.

## Limitations

- `em`, `ex` and `%` sizes are reported as unsupported, since they require a layout context.
- Transform functions other than `matrix`, `translate`, `scale` and `rotate` are skipped.
- All keywords must be lowercase, except color names.

## Safety

- The library should not panic. Any panic considered as a critical bug and should be reported.
- The library forbids unsafe code.
*/

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![deny(missing_copy_implementations)]

mod color;
mod colors;
mod error;
mod path;
mod points;
mod size;
mod stream;
mod transform;
mod viewbox;

use crate::stream::ByteExt;

pub use crate::color::*;
pub use crate::error::*;
pub use crate::path::*;
pub use crate::points::*;
pub use crate::size::*;
pub use crate::stream::{Number, Stream};
pub use crate::transform::*;
pub use crate::viewbox::*;
