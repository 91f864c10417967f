// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgops` walks an SVG document and turns it into a sequence of 2D drawing
operations on a [`Canvas`].

Two canvases are provided: [`RecordingCanvas`], which records operations,
and [`SkiaCanvas`], which rasterizes them with `tiny-skia`.

```
use svgops::{Op, RecordingCanvas};

let doc = svgops::load_document(b"<svg xmlns='http://www.w3.org/2000/svg'>\
                                  <path d='M0,0 L10,10 Z'/></svg>").unwrap();
let mut canvas = RecordingCanvas::new();
svgops::render(&doc, &svgops::Options::default(), &mut canvas).unwrap();
assert!(canvas.ops().contains(&Op::LineTo { x: 10.0, y: 10.0 }));
```
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::should_implement_trait)]

pub use svgops_tree;
pub use svgops_types;
pub use tiny_skia;

mod arc;
mod canvas;
mod error;
mod href;
mod options;
mod path;
mod viewport;
mod walker;

pub use arc::{convert as convert_arc, ArcSegment, CenterArc};
pub use canvas::{
    Canvas, FillRule, FontFace, FontStyle, FontWeight, Op, RecordingCanvas, SkiaCanvas,
    TextExtents,
};
pub use error::Error;
pub use options::Options;
pub use path::draw_path;
pub use svgops_tree::Document;
pub use viewport::{fit_view_box, node_format};

use walker::{Frame, Walker};

/// Draws a document onto the canvas.
///
/// The root element's `viewBox` is fitted into its width and height first.
///
/// The root frame's graphics state is left on the canvas stack,
/// so several documents can be drawn in sequence.
///
/// # Errors
///
/// Any malformed or unsupported attribute value aborts the drawing.
/// Operations emitted before the error stay on the canvas.
pub fn render(doc: &Document, opt: &Options, canvas: &mut dyn Canvas) -> Result<(), Error> {
    let root = doc.root_element();

    let (width, height, view_box) = node_format(root)?;
    if let Some(ts) = fit_view_box(width, height, view_box) {
        canvas.transform(ts);
    }

    Walker::new(opt, canvas).draw(root, Frame::Root)
}

/// Parses a document from an SVG data.
///
/// Can contain an SVG string or a gzip compressed data.
pub fn load_document(data: &[u8]) -> Result<Document, Error> {
    if data.starts_with(&[0x1f, 0x8b]) {
        let data = decompress_svgz(data)?;
        let text = std::str::from_utf8(&data).map_err(|_| Error::NotAnUtf8Str)?;
        Ok(Document::parse_str(text)?)
    } else {
        let text = std::str::from_utf8(data).map_err(|_| Error::NotAnUtf8Str)?;
        Ok(Document::parse_str(text)?)
    }
}

/// Decompresses an SVGZ file.
pub fn decompress_svgz(data: &[u8]) -> Result<Vec<u8>, Error> {
    use std::io::Read;

    let mut decoder = flate2::read::GzDecoder::new(data);
    let mut decoded = Vec::with_capacity(data.len() * 2);
    decoder
        .read_to_end(&mut decoded)
        .map_err(|_| Error::MalformedGZip)?;
    Ok(decoded)
}

/// Returns the document size in user units.
///
/// Falls back to `Options::default_size` when the root element
/// has neither a size nor a `viewBox`.
pub fn image_size(doc: &Document, opt: &Options) -> Result<(f64, f64), Error> {
    let (width, height, _) = node_format(doc.root_element())?;
    if width > 0.0 && height > 0.0 {
        Ok((width, height))
    } else {
        Ok(opt.default_size)
    }
}

/// Renders a document onto a new pixmap.
///
/// The pixmap size is the document size multiplied by `zoom`.
pub fn render_to_pixmap(
    doc: &Document,
    opt: &Options,
    zoom: f64,
    #[cfg(feature = "text")] fontdb: &fontdb::Database,
) -> Result<tiny_skia::Pixmap, Error> {
    let (width, height) = image_size(doc, opt)?;
    let width = (width * zoom).ceil();
    let height = (height * zoom).ceil();
    if !(width >= 1.0 && height >= 1.0 && width <= u32::MAX as f64 && height <= u32::MAX as f64) {
        return Err(Error::InvalidSize);
    }

    let mut pixmap =
        tiny_skia::Pixmap::new(width as u32, height as u32).ok_or(Error::InvalidSize)?;

    {
        let canvas = SkiaCanvas::new(pixmap.as_mut());
        #[cfg(feature = "text")]
        let canvas = canvas.with_fontdb(fontdb);
        let mut canvas = canvas;
        canvas.scale(zoom, zoom);
        render(doc, opt, &mut canvas)?;
    }

    Ok(pixmap)
}
