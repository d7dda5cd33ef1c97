use std::fmt::Write as _;

use crate::shape::{Geometry, Shape, ShapeKind};
use crate::style::format_color;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn write_geometry(out: &mut String, kind: &ShapeKind) {
    let _ = match kind {
        ShapeKind::Line(line) => write!(
            out,
            r#" x1="{}" y1="{}" x2="{}" y2="{}""#,
            line.p1.x, line.p1.y, line.p2.x, line.p2.y
        ),
        ShapeKind::Rect(rect) => write!(
            out,
            r#" x="{}" y="{}" width="{}" height="{}""#,
            rect.origin.x, rect.origin.y, rect.width, rect.height
        ),
        ShapeKind::Ellipse(ellipse) => write!(
            out,
            r#" cx="{}" cy="{}" rx="{}" ry="{}""#,
            ellipse.center.x, ellipse.center.y, ellipse.rx, ellipse.ry
        ),
        ShapeKind::Path(path) => write!(out, r#" d="{}""#, escape(&path.description())),
    };
}

fn write_shape(out: &mut String, shape: &Shape) {
    let _ = write!(out, "  <{}", shape.kind.element_type());
    write_geometry(out, &shape.kind);
    let _ = write!(
        out,
        r#" stroke="{}" stroke-width="{}""#,
        format_color(shape.style.stroke_color),
        shape.style.stroke_width
    );
    if !matches!(shape.kind, ShapeKind::Line(_)) {
        let _ = write!(out, r#" fill="{}""#, escape(&shape.style.fill.to_svg()));
    }
    out.push_str("/>\n");
}

/// Serializes `shapes` in order as a standalone SVG document of the given
/// pixel size.
pub fn write_document<'a>(shapes: impl IntoIterator<Item = &'a Shape>, width: f64, height: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="{SVG_NAMESPACE}" version="1.1" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    for shape in shapes {
        write_shape(&mut out, shape);
    }
    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::shape::ShapeTag;
    use crate::style::{Paint, ShapeStyle};

    #[test]
    fn writes_namespace_and_shapes_in_order() {
        let rect = Shape::new(
            ShapeKind::from_drag(ShapeTag::Rect, Point::new(10.0, 10.0), Point::new(50.0, 40.0)),
            ShapeStyle::default(),
        );
        let line = Shape::new(
            ShapeKind::from_drag(ShapeTag::Line, Point::ZERO, Point::new(1.5, 2.0)),
            ShapeStyle::default(),
        );
        let svg = write_document([&rect, &line], 800.0, 600.0);
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg""#));
        let rect_at = svg.find("<rect").unwrap();
        let line_at = svg.find("<line").unwrap();
        assert!(rect_at < line_at);
        assert!(svg.contains(r#"x="10" y="10" width="40" height="30""#));
        assert!(!svg[line_at..].lines().next().unwrap().contains("fill="));
    }

    #[test]
    fn escapes_unrecognized_fill() {
        let style = ShapeStyle {
            fill: Paint::Unrecognized("url(\"#a\")".to_owned()),
            ..ShapeStyle::default()
        };
        let rect = Shape::new(ShapeKind::from_drag(ShapeTag::Rect, Point::ZERO, Point::ZERO), style);
        let svg = write_document([&rect], 10.0, 10.0);
        assert!(svg.contains(r#"fill="url(&quot;#a&quot;)""#));
    }
}
