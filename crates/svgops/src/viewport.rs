// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use float_cmp::ApproxEqUlps;
use svgops_tree::{AttributeId, Node};
use svgops_types::{Transform, ViewBox};

use crate::Error;

/// Returns a transform that fits a `viewBox` into a viewport.
///
/// The `viewBox` is scaled uniformly and centered along the axis
/// with the remaining space. When both ratios are equal,
/// each axis is scaled by its own ratio.
///
/// Returns `None` when there is no `viewBox` or when the viewport is empty.
pub fn fit_view_box(width: f64, height: f64, view_box: Option<ViewBox>) -> Option<Transform> {
    let vb = view_box?;
    if !(width > 0.0 && height > 0.0) {
        return None;
    }

    let x_ratio = width / vb.w;
    let y_ratio = height / vb.h;

    let mut ts = if x_ratio.approx_eq_ulps(&y_ratio, 4) {
        Transform::from_scale(x_ratio, y_ratio)
    } else if x_ratio > y_ratio {
        let mut ts = Transform::from_translate((width - vb.w * y_ratio) / 2.0, 0.0);
        ts.append(&Transform::from_scale(y_ratio, y_ratio));
        ts
    } else {
        let mut ts = Transform::from_translate(0.0, (height - vb.h * x_ratio) / 2.0);
        ts.append(&Transform::from_scale(x_ratio, x_ratio));
        ts
    };

    ts.append(&Transform::from_translate(-vb.x, -vb.y));
    Some(ts)
}

/// Returns the width, the height and the `viewBox` of an element.
///
/// A missing width or height falls back to the `viewBox` size.
pub fn node_format(node: Node) -> Result<(f64, f64, Option<ViewBox>), Error> {
    let mut width = crate::walker::parse_size(node, AttributeId::Width)?;
    let mut height = crate::walker::parse_size(node, AttributeId::Height)?;
    let view_box = parse_view_box(node)?;

    if let Some(vb) = view_box {
        if width == 0.0 {
            width = vb.w;
        }

        if height == 0.0 {
            height = vb.h;
        }
    }

    Ok((width, height, view_box))
}

fn parse_view_box(node: Node) -> Result<Option<ViewBox>, Error> {
    let value = match node.attribute(AttributeId::ViewBox) {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Ok(None),
    };

    match value.parse::<ViewBox>() {
        Ok(vb) => Ok(Some(vb)),
        Err(cause) => Err(Error::InvalidViewBox {
            element: node.tag_name_str().to_string(),
            value: value.to_string(),
            cause,
        }),
    }
}
