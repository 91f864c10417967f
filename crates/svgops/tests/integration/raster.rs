use std::io::Write;

use svgops::Options;

use crate::{pixel, render, svg, EMPTY_FONTDB};

const RED: (u8, u8, u8, u8) = (255, 0, 0, 255);
const NONE: (u8, u8, u8, u8) = (0, 0, 0, 0);

#[test]
fn fill_rect() {
    let pixmap = render(
        &svg("width='100' height='100'", "<rect x='10' y='10' width='30' height='30' fill='red'/>"),
        1.0,
    );
    assert_eq!(pixel(&pixmap, 20, 20), RED);
    assert_eq!(pixel(&pixmap, 5, 5), NONE);
    assert_eq!(pixel(&pixmap, 50, 50), NONE);
}

#[test]
fn default_size() {
    let pixmap = render(&svg("", ""), 1.0);
    assert_eq!((pixmap.width(), pixmap.height()), (100, 100));
}

#[test]
fn size_from_view_box() {
    let pixmap = render(&svg("viewBox='0 0 30 20'", ""), 1.0);
    assert_eq!((pixmap.width(), pixmap.height()), (30, 20));
}

#[test]
fn zoom() {
    let pixmap = render(
        &svg("width='20' height='20'", "<rect width='10' height='10' fill='red'/>"),
        2.0,
    );
    assert_eq!((pixmap.width(), pixmap.height()), (40, 40));
    assert_eq!(pixel(&pixmap, 15, 15), RED);
    assert_eq!(pixel(&pixmap, 25, 25), NONE);
}

#[test]
fn view_box_scaling() {
    let pixmap = render(
        &svg("width='100' height='100' viewBox='0 0 10 10'", "<rect width='5' height='5' fill='red'/>"),
        1.0,
    );
    assert_eq!(pixel(&pixmap, 25, 25), RED);
    assert_eq!(pixel(&pixmap, 75, 75), NONE);
}

#[test]
fn transform() {
    let pixmap = render(
        &svg("width='100' height='100'", "<rect width='10' height='10' fill='red' transform='translate(50)'/>"),
        1.0,
    );
    assert_eq!(pixel(&pixmap, 55, 55), RED);
    assert_eq!(pixel(&pixmap, 5, 5), NONE);
}

#[test]
fn stroke() {
    let pixmap = render(
        &svg("width='100' height='100'", "<line x1='0' y1='50' x2='100' y2='50' stroke='red' stroke-width='10'/>"),
        1.0,
    );
    assert_eq!(pixel(&pixmap, 50, 50), RED);
    assert_eq!(pixel(&pixmap, 50, 40), NONE);
}

#[test]
fn fill_rule() {
    let data = "M0,0 H100 V100 H0 Z M25,25 H75 V75 H25 Z";

    let pixmap = render(
        &svg("width='100' height='100'", &format!("<path d='{}' fill='red' fill-rule='evenodd'/>", data)),
        1.0,
    );
    assert_eq!(pixel(&pixmap, 10, 10), RED);
    assert_eq!(pixel(&pixmap, 50, 50), NONE);

    let pixmap = render(
        &svg("width='100' height='100'", &format!("<path d='{}' fill='red'/>", data)),
        1.0,
    );
    assert_eq!(pixel(&pixmap, 50, 50), RED);
}

#[test]
fn arc() {
    let pixmap = render(
        &svg("width='100' height='100'", "<path d='M10,50 A40,40 0 0 1 90,50 Z' fill='red'/>"),
        1.0,
    );
    assert_eq!(pixel(&pixmap, 50, 20), RED);
    assert_eq!(pixel(&pixmap, 50, 80), NONE);
}

#[test]
fn circle() {
    let pixmap = render(
        &svg("width='100' height='100'", "<circle cx='50' cy='50' r='20' fill='red'/>"),
        1.0,
    );
    assert_eq!(pixel(&pixmap, 50, 50), RED);
    assert_eq!(pixel(&pixmap, 50, 35), RED);
    assert_eq!(pixel(&pixmap, 25, 25), NONE);
}

#[test]
fn fill_opacity() {
    let pixmap = render(
        &svg("width='10' height='10'", "<rect width='10' height='10' fill='red' fill-opacity='0.5'/>"),
        1.0,
    );
    let (r, g, b, a) = pixel(&pixmap, 5, 5);
    assert!((126..=129).contains(&a));
    assert_eq!((r, g, b), (a, 0, 0));
}

#[test]
fn text_without_fonts() {
    // Fonts are missing, so the text is skipped.
    let pixmap = render(
        &svg("width='10' height='10'", "<text y='8' fill='red'>text</text>"),
        1.0,
    );
    assert_eq!(pixel(&pixmap, 5, 5), NONE);
}

#[test]
fn svgz() {
    let text = svg("width='10' height='10'", "<rect width='10' height='10' fill='red'/>");

    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    let data = encoder.finish().unwrap();

    let doc = svgops::load_document(&data).unwrap();
    let pixmap = svgops::render_to_pixmap(&doc, &Options::default(), 1.0, &EMPTY_FONTDB).unwrap();
    assert_eq!(pixel(&pixmap, 5, 5), RED);
}

#[test]
fn malformed_svgz() {
    let data = [0x1f, 0x8b, 0x00, 0x01];
    assert!(matches!(svgops::load_document(&data), Err(svgops::Error::MalformedGZip)));
}

#[test]
fn not_utf8() {
    let data = [b'<', 0xff, 0xfe];
    assert!(matches!(svgops::load_document(&data), Err(svgops::Error::NotAnUtf8Str)));
}
