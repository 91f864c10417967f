use once_cell::sync::Lazy;
use svgops::{Op, Options, RecordingCanvas};

mod href;
mod raster;
mod walker;

static EMPTY_FONTDB: Lazy<fontdb::Database> = Lazy::new(fontdb::Database::new);

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Wraps elements into a root `svg` element.
pub fn svg(attrs: &str, content: &str) -> String {
    format!("<svg xmlns='{}' {}>{}</svg>", SVG_NS, attrs, content)
}

pub fn try_ops_with(text: &str, opt: &Options) -> Result<Vec<Op>, svgops::Error> {
    let doc = svgops::load_document(text.as_bytes())?;
    let mut canvas = RecordingCanvas::new();
    svgops::render(&doc, opt, &mut canvas)?;
    Ok(canvas.into_ops())
}

pub fn try_ops(text: &str) -> Result<Vec<Op>, svgops::Error> {
    try_ops_with(text, &Options::default())
}

pub fn ops(text: &str) -> Vec<Op> {
    try_ops(text).unwrap()
}

/// Returns operations of the first child of the root element.
///
/// The root frame is never restored, so everything after its own
/// paint operations belongs to children.
pub fn child_ops(content: &str) -> Vec<Op> {
    let ops = ops(&svg("", content));
    // Save, MoveTo and six paint operations.
    ops[8..].to_vec()
}

pub fn render(text: &str, zoom: f64) -> tiny_skia::Pixmap {
    let doc = svgops::load_document(text.as_bytes()).unwrap();
    svgops::render_to_pixmap(&doc, &Options::default(), zoom, &EMPTY_FONTDB).unwrap()
}

pub fn pixel(pixmap: &tiny_skia::Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
    let c = pixmap.pixel(x, y).unwrap();
    (c.red(), c.green(), c.blue(), c.alpha())
}
