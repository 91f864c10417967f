use std::f64::consts::PI;

use svgops::svgops_tree::AttributeId;
use svgops::svgops_types::{Rgba, Transform};
use svgops::{Error, FillRule, FontFace, FontStyle, FontWeight, Op, Options};

use crate::{child_ops, ops, svg, try_ops, try_ops_with};

fn paint(fill: Rgba, line_width: f64, stroke: Rgba) -> Vec<Op> {
    vec![
        Op::SetFillRule(FillRule::NonZero),
        Op::SetSource(fill),
        Op::FillPreserve,
        Op::SetLineWidth(line_width),
        Op::SetSource(stroke),
        Op::Stroke,
    ]
}

fn frame(start: Vec<Op>, shape: Vec<Op>, paint: Vec<Op>) -> Vec<Op> {
    let mut ops = vec![Op::Save];
    ops.extend(start);
    ops.extend(shape);
    ops.extend(paint);
    ops.push(Op::Restore);
    ops
}

fn red() -> Rgba {
    Rgba::new(1.0, 0.0, 0.0, 1.0)
}

#[test]
fn root_frame() {
    let mut expected = vec![Op::Save, Op::MoveTo { x: 0.0, y: 0.0 }];
    expected.extend(paint(Rgba::transparent(), 0.0, Rgba::transparent()));
    assert_eq!(ops(&svg("width='100' height='100'", "")), expected);
}

#[test]
fn rect() {
    assert_eq!(
        child_ops("<rect x='10' y='20' width='30' height='40' fill='red'/>"),
        frame(
            vec![Op::MoveTo { x: 10.0, y: 20.0 }],
            vec![Op::Rectangle { x: 10.0, y: 20.0, width: 30.0, height: 40.0 }],
            paint(red(), 1.0, Rgba::transparent()),
        )
    );
}

#[test]
fn circle() {
    assert_eq!(
        child_ops("<circle cx='5' cy='6' r='4' stroke='red' stroke-width='2'/>"),
        frame(
            vec![Op::MoveTo { x: 0.0, y: 0.0 }],
            vec![
                Op::NewSubPath,
                Op::Arc { xc: 5.0, yc: 6.0, radius: 4.0, angle1: 0.0, angle2: 2.0 * PI },
            ],
            paint(Rgba::transparent(), 2.0, red()),
        )
    );
}

#[test]
fn circle_without_radius() {
    assert_eq!(
        child_ops("<circle cx='5' cy='6'/>"),
        frame(
            vec![Op::MoveTo { x: 0.0, y: 0.0 }],
            vec![],
            paint(Rgba::transparent(), 1.0, Rgba::transparent()),
        )
    );
}

#[test]
fn ellipse() {
    assert_eq!(
        child_ops("<ellipse cx='10' cy='20' rx='5' ry='10'/>"),
        frame(
            vec![Op::MoveTo { x: 0.0, y: 0.0 }],
            vec![
                Op::NewSubPath,
                Op::Save,
                Op::Scale { sx: 1.0, sy: 2.0 },
                Op::Arc { xc: 10.0, yc: 10.0, radius: 5.0, angle1: 0.0, angle2: 2.0 * PI },
                Op::Restore,
            ],
            // An ellipse has no default stroke width.
            paint(Rgba::transparent(), 0.0, Rgba::transparent()),
        )
    );
}

#[test]
fn line() {
    assert_eq!(
        child_ops("<line x1='1' y1='2' x2='3' y2='4'/>"),
        frame(
            vec![Op::MoveTo { x: 0.0, y: 0.0 }],
            vec![Op::MoveTo { x: 1.0, y: 2.0 }, Op::LineTo { x: 3.0, y: 4.0 }],
            paint(Rgba::transparent(), 1.0, Rgba::transparent()),
        )
    );
}

#[test]
fn polyline_and_polygon() {
    let shape = vec![
        Op::MoveTo { x: 0.0, y: 0.0 },
        Op::LineTo { x: 10.0, y: 0.0 },
        Op::LineTo { x: 10.0, y: 10.0 },
    ];

    assert_eq!(
        child_ops("<polyline points='0,0 10,0 10,10'/>"),
        frame(
            vec![Op::MoveTo { x: 0.0, y: 0.0 }],
            shape.clone(),
            paint(Rgba::transparent(), 1.0, Rgba::transparent()),
        )
    );

    let mut closed = shape;
    closed.push(Op::ClosePath);
    assert_eq!(
        child_ops("<polygon points='0,0 10,0 10,10'/>"),
        frame(
            vec![Op::MoveTo { x: 0.0, y: 0.0 }],
            closed,
            paint(Rgba::transparent(), 1.0, Rgba::transparent()),
        )
    );
}

#[test]
fn empty_stroke_width() {
    let ops = child_ops("<rect width='5' height='5' stroke-width=''/>");
    assert_eq!(ops[6], Op::SetLineWidth(1.0));

    let ops = child_ops("<g stroke-width=' '/>");
    assert_eq!(ops[5], Op::SetLineWidth(0.0));
}

#[test]
fn points_with_units() {
    let ops = child_ops("<polyline points='0,0 1in,1in'/>");
    assert_eq!(
        ops[2..4],
        [Op::MoveTo { x: 0.0, y: 0.0 }, Op::LineTo { x: 72.0, y: 72.0 }][..]
    );
}

#[test]
fn transform_with_units() {
    let ops = child_ops("<g transform='translate(1in)'/>");
    assert_eq!(ops[2], Op::Translate { tx: 72.0, ty: 72.0 });
}

#[test]
fn path() {
    assert_eq!(
        child_ops("<path d='M0,0 L10,10 Z' fill='red' fill-rule='evenodd'/>"),
        vec![
            Op::Save,
            Op::MoveTo { x: 0.0, y: 0.0 },
            Op::MoveTo { x: 0.0, y: 0.0 },
            Op::LineTo { x: 10.0, y: 10.0 },
            Op::ClosePath,
            Op::SetFillRule(FillRule::EvenOdd),
            Op::SetSource(red()),
            Op::FillPreserve,
            Op::SetLineWidth(1.0),
            Op::SetSource(Rgba::transparent()),
            Op::Stroke,
            Op::Restore,
        ]
    );
}

#[test]
fn path_relative_to_position() {
    let ops = child_ops("<path x='100' y='50' d='l10,10'/>");
    assert_eq!(ops[1], Op::MoveTo { x: 100.0, y: 50.0 });
    assert_eq!(ops[2], Op::LineTo { x: 110.0, y: 60.0 });
}

#[test]
fn units() {
    let ops = child_ops("<rect x='1in' y='72pt' width='1pc' height='2.54cm'/>");
    match ops[2] {
        Op::Rectangle { x, y, width, height } => {
            assert_eq!(x, 72.0);
            assert_eq!(y, 72.0);
            assert!((width - 12.0).abs() < 1e-9);
            assert!((height - 72.0).abs() < 1e-9);
        }
        ref op => panic!("unexpected {:?}", op),
    }
}

#[test]
fn opacity() {
    let ops = child_ops(
        "<rect fill='#fff' fill-opacity='0.5' stroke='#000' stroke-opacity='0.4' opacity='0.5'/>",
    );
    assert_eq!(
        ops[3..9],
        paint(Rgba::new(1.0, 1.0, 1.0, 0.25), 1.0, Rgba::new(0.0, 0.0, 0.0, 0.2))[..]
    );
}

#[test]
fn style_attribute() {
    let ops = child_ops("<rect fill='blue' style='fill:red; stroke-width:3'/>");
    assert_eq!(ops[4], Op::SetSource(red()));
    assert_eq!(ops[6], Op::SetLineWidth(3.0));
}

#[test]
fn transform_list() {
    let ops = child_ops("<g transform='translate(10) scale(2, 3) rotate(90)'/>");
    assert_eq!(
        ops[1..5],
        [
            Op::MoveTo { x: 0.0, y: 0.0 },
            Op::Translate { tx: 10.0, ty: 10.0 },
            Op::Scale { sx: 2.0, sy: 3.0 },
            Op::Rotate { angle: 90f64.to_radians() },
        ][..]
    );
}

#[test]
fn matrix_replaces_transform() {
    let ops = child_ops("<g transform='translate(5) matrix(1 0 0 1 7 8)'/>");
    assert_eq!(ops[2], Op::Translate { tx: 5.0, ty: 5.0 });
    assert_eq!(ops[3], Op::SetMatrix(Transform::new(1.0, 0.0, 0.0, 1.0, 7.0, 8.0)));
}

#[test]
fn unknown_transform_is_skipped() {
    let ops = child_ops("<g transform='skewX(30) translate(1 2)'/>");
    assert_eq!(ops[2], Op::Translate { tx: 1.0, ty: 2.0 });
}

#[test]
fn root_view_box() {
    let ops = ops(&svg("width='100' height='100' viewBox='0 0 200 100'", ""));
    assert_eq!(ops[0], Op::Transform(Transform::new(0.5, 0.0, 0.0, 0.5, 0.0, 25.0)));
    assert_eq!(ops[1], Op::Save);
}

#[test]
fn nested_svg() {
    let ops = child_ops("<svg x='10' y='10' width='50' height='50' viewBox='0 0 10 10'/>");
    assert_eq!(
        ops[2..4],
        [
            Op::Translate { tx: 10.0, ty: 10.0 },
            Op::Transform(Transform::new(5.0, 0.0, 0.0, 5.0, 0.0, 0.0)),
        ][..]
    );
    assert_eq!(ops.last(), Some(&Op::Restore));
}

#[test]
fn defs_are_skipped() {
    let ops = child_ops("<defs><rect width='10' height='10'/></defs>");
    assert!(ops.is_empty());
}

#[test]
fn unknown_elements_are_traversed() {
    let ops = child_ops("<unknown><rect width='10' height='10'/></unknown>");
    assert!(ops.contains(&Op::Rectangle { x: 0.0, y: 0.0, width: 10.0, height: 10.0 }));
}

#[test]
fn only_root_is_not_restored() {
    let ops = ops(&svg(
        "",
        "<g><rect width='1' height='1'/><g><circle r='1'/></g></g><path d='M0 0'/>",
    ));
    let saves = ops.iter().filter(|op| **op == Op::Save).count();
    let restores = ops.iter().filter(|op| **op == Op::Restore).count();
    assert_eq!(saves, restores + 1);
}

#[test]
fn text() {
    let face = FontFace {
        family: "Sans".to_string(),
        style: FontStyle::Normal,
        weight: FontWeight::Normal,
    };

    assert_eq!(
        child_ops("<text x='10' y='20' font-size='10' text-anchor='middle'> abcd </text>"),
        frame(
            vec![Op::MoveTo { x: 10.0, y: 20.0 }],
            vec![
                Op::SelectFontFace(face),
                Op::SetFontSize(10.0),
                Op::MoveTo { x: 0.0, y: 20.0 },
                Op::SetSource(Rgba::black()),
                Op::ShowText("abcd".to_string()),
                Op::MoveTo { x: 0.0, y: 20.0 },
                Op::TextPath("abcd".to_string()),
            ],
            paint(Rgba::transparent(), 0.0, Rgba::transparent()),
        )
    );
}

#[test]
fn text_font() {
    let ops = child_ops(
        "<text font-family='Noto Serif' font-style='italic' font-weight='bold' \
         fill='red' opacity='0.5' text-anchor='end' x='100' font-size='4'>ab</text>",
    );
    assert_eq!(
        ops[2],
        Op::SelectFontFace(FontFace {
            family: "Noto Serif".to_string(),
            style: FontStyle::Italic,
            weight: FontWeight::Bold,
        })
    );
    assert_eq!(ops[4], Op::MoveTo { x: 96.0, y: 0.0 });
    assert_eq!(ops[5], Op::SetSource(Rgba::new(1.0, 0.0, 0.0, 0.5)));
}

#[test]
fn text_color_fallback() {
    let ops = child_ops("<text color='red'>a</text>");
    assert_eq!(ops[5], Op::SetSource(red()));
}

#[test]
fn tspan_continues_at_cursor() {
    let ops = child_ops("<text x='10' y='20' font-size='10'>ab<tspan dx='5'>cd</tspan></text>");
    let tspan = &ops[ops.iter().position(|op| *op == Op::ShowText("ab".to_string())).unwrap()..];

    // The text is 10 units wide, so the cursor is at 20.
    assert!(tspan.contains(&Op::MoveTo { x: 25.0, y: 20.0 }));
    // The default font size.
    assert!(tspan.contains(&Op::SetFontSize(12.0)));
    assert!(tspan.contains(&Op::ShowText("cd".to_string())));
}

#[test]
fn tspan_position() {
    let ops = child_ops("<text x='10' y='20'>ab<tspan x='1' y='2' dy='3'>cd</tspan></text>");
    assert!(ops.contains(&Op::MoveTo { x: 1.0, y: 5.0 }));
}

#[test]
fn use_element() {
    let ops = child_ops(
        "<defs><rect id='r' width='10' height='10' fill='red'/></defs>\
         <use href='#r' x='5' y='6'/>",
    );

    let mut expected = vec![
        Op::Save,
        Op::MoveTo { x: 5.0, y: 6.0 },
        Op::Save,
        Op::Translate { tx: 5.0, ty: 6.0 },
        Op::Save,
        Op::MoveTo { x: 0.0, y: 0.0 },
        Op::Rectangle { x: 0.0, y: 0.0, width: 10.0, height: 10.0 },
    ];
    expected.extend(paint(red(), 1.0, Rgba::transparent()));
    expected.extend(vec![Op::Restore, Op::Restore]);
    expected.extend(paint(Rgba::transparent(), 0.0, Rgba::transparent()));
    expected.push(Op::Restore);

    assert_eq!(ops, expected);
}

#[test]
fn use_xlink_href() {
    let ops = ops(
        "<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>\
         <circle id='c' r='2'/><use xlink:href='#c'/></svg>",
    );
    let arcs = ops.iter().filter(|op| matches!(op, Op::Arc { .. })).count();
    assert_eq!(arcs, 2);
}

#[test]
fn use_missing_target() {
    let ops = child_ops("<use href='#missing'/>");
    assert_eq!(
        ops,
        frame(
            vec![Op::MoveTo { x: 0.0, y: 0.0 }],
            vec![],
            paint(Rgba::transparent(), 0.0, Rgba::transparent()),
        )
    );
}

#[test]
fn use_svg_target_is_fitted() {
    let ops = child_ops(
        "<defs><svg id='s' viewBox='0 0 10 10'><rect width='10' height='10'/></svg></defs>\
         <use href='#s' width='20' height='20'/>",
    );
    assert_eq!(ops[3], Op::Translate { tx: 0.0, ty: 0.0 });
    assert_eq!(ops[4], Op::Transform(Transform::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0)));
    // The target is a root frame, so it has no translation of its own.
    assert_eq!(ops[5], Op::Save);
    assert_eq!(ops[6], Op::MoveTo { x: 0.0, y: 0.0 });
    assert_eq!(ops[7], Op::SetFillRule(FillRule::NonZero));
}

#[test]
fn recursive_use() {
    let text = svg("", "<g id='g'><use href='#g'/></g>");
    assert!(matches!(try_ops(&text), Err(Error::NestingLimitReached)));
}

#[test]
fn depth_limit() {
    let opt = Options {
        max_depth: 3,
        ..Options::default()
    };

    let text = svg("", "<g><g><rect/></g></g>");
    assert!(matches!(try_ops_with(&text, &opt), Err(Error::NestingLimitReached)));

    let text = svg("", "<g><rect/></g>");
    assert!(try_ops_with(&text, &opt).is_ok());
}

#[test]
fn unsupported_path_command() {
    let text = svg("", "<path d='M0,0 L10,10 X'/>");
    match try_ops(&text) {
        Err(Error::Unsupported { element, attribute, value, .. }) => {
            assert_eq!(element, "path");
            assert_eq!(attribute, AttributeId::D);
            assert_eq!(value, "M0,0 L10,10 X");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn unsupported_unit() {
    let text = svg("", "<rect width='5em'/>");
    assert!(matches!(
        try_ops(&text),
        Err(Error::Unsupported { attribute: AttributeId::Width, .. })
    ));
}

#[test]
fn invalid_color() {
    let text = svg("", "<rect fill='#12'/>");
    let err = try_ops(&text).unwrap_err();
    assert!(matches!(err, Error::InvalidAttribute { attribute: AttributeId::Fill, .. }));
    assert!(err.to_string().starts_with("invalid 'fill' value '#12' on the 'rect' element"));
}

#[test]
fn invalid_transform() {
    let text = svg("", "<g transform='matrix(1 2 3)'/>");
    assert!(matches!(
        try_ops(&text),
        Err(Error::InvalidAttribute { attribute: AttributeId::Transform, .. })
    ));
}

#[test]
fn invalid_number() {
    let text = svg("", "<rect opacity='half'/>");
    assert!(matches!(
        try_ops(&text),
        Err(Error::InvalidAttribute { attribute: AttributeId::Opacity, .. })
    ));
}

#[test]
fn rotate_around_point() {
    let ops = child_ops("<g transform='rotate(90 5 7)'/>");
    assert_eq!(
        ops[2..5],
        [
            Op::Translate { tx: 5.0, ty: 7.0 },
            Op::Rotate { angle: 90f64.to_radians() },
            Op::Translate { tx: -5.0, ty: -7.0 },
        ][..]
    );
}
