use std::path::PathBuf;

use svgops::svgops_types::{Rgba, Transform};
use svgops::{Error, Op, Options};

use crate::{child_ops, svg, try_ops_with, SVG_NS};

fn resources_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("svgops-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn options(dir: PathBuf) -> Options {
    Options {
        resources_dir: Some(dir),
        ..Options::default()
    }
}

#[test]
fn external_element() {
    let dir = resources_dir("element");
    std::fs::write(
        dir.join("shape.svg"),
        format!("<svg xmlns='{}'><rect id='r' width='10' height='10' fill='red'/></svg>", SVG_NS),
    )
    .unwrap();

    let ops = try_ops_with(&svg("", "<use href='shape.svg#r'/>"), &options(dir)).unwrap();
    assert!(ops.contains(&Op::Rectangle { x: 0.0, y: 0.0, width: 10.0, height: 10.0 }));
    assert!(ops.contains(&Op::SetSource(Rgba::new(1.0, 0.0, 0.0, 1.0))));
}

#[test]
fn external_document() {
    let dir = resources_dir("document");
    std::fs::write(
        dir.join("shape.svg"),
        format!("<svg xmlns='{}' viewBox='0 0 10 10'><circle r='5'/></svg>", SVG_NS),
    )
    .unwrap();

    let ops = try_ops_with(
        &svg("", "<use href='shape.svg' width='20' height='20'/>"),
        &options(dir),
    )
    .unwrap();
    assert!(ops.iter().any(|op| matches!(op, Op::Arc { radius, .. } if *radius == 5.0)));
    assert!(ops.contains(&Op::Transform(Transform::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0))));
}

#[test]
fn external_element_not_found() {
    let dir = resources_dir("missing-id");
    std::fs::write(dir.join("shape.svg"), format!("<svg xmlns='{}'/>", SVG_NS)).unwrap();

    let result = try_ops_with(&svg("", "<use href='shape.svg#r'/>"), &options(dir));
    assert!(matches!(result, Err(Error::HrefResolvingFailed(_))));
}

#[test]
fn missing_file() {
    let dir = resources_dir("missing-file");
    let result = try_ops_with(&svg("", "<use href='missing.svg'/>"), &options(dir));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn data_url() {
    // <svg xmlns='http://www.w3.org/2000/svg'><circle id='c' r='3'/><rect/></svg>
    let url = "data:image/svg+xml,%3Csvg%20xmlns%3D%22http%3A%2F%2Fwww.w3.org%2F2000%2Fsvg%22%3E\
               %3Ccircle%20id%3D%22c%22%20r%3D%223%22%2F%3E%3Crect%2F%3E%3C%2Fsvg%3E#c";

    let ops = child_ops(&format!("<use href='{}'/>", url));
    assert!(ops.iter().any(|op| matches!(op, Op::Arc { radius, .. } if *radius == 3.0)));
    assert!(!ops.iter().any(|op| matches!(op, Op::Rectangle { .. })));
}

#[test]
fn empty_href() {
    let ops = child_ops("<use href=''/><use/>");
    assert!(!ops.iter().any(|op| matches!(op, Op::Translate { .. })));
}
