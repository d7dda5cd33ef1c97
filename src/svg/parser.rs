use egui::Color32;
use thiserror::Error;

use crate::geometry::{Point, parse_description};
use crate::shape::{Ellipse, Line, Path, Rect, Shape, ShapeKind};
use crate::style::{Paint, ShapeStyle, parse_color};

#[derive(Debug, Error, PartialEq)]
pub enum SvgParseError {
    #[error("document has no <svg> root element")]
    MissingRoot,

    #[error("unterminated markup starting at byte {0}")]
    Unterminated(usize),
}

/// Shapes recovered from a document, plus the root's declared size when
/// present.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub shapes: Vec<Shape>,
    /// Shape-like elements that were dropped, e.g. paths with curves.
    pub skipped: usize,
}

/// One start (or self-closing) tag.
struct Tag<'a> {
    name: &'a str,
    attributes: Vec<(&'a str, String)>,
}

impl Tag<'_> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    fn number(&self, name: &str) -> f64 {
        self.attr(name).and_then(parse_length).unwrap_or(0.0)
    }

    /// Presentation attribute, overridden by the same property in `style`.
    fn property(&self, name: &str) -> Option<String> {
        let from_style = self.attr("style").and_then(|style| {
            style.split(';').find_map(|declaration| {
                let (key, value) = declaration.split_once(':')?;
                (key.trim() == name).then(|| value.trim().to_owned())
            })
        });
        from_style.or_else(|| self.attr(name).map(str::to_owned))
    }
}

fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let value = value.strip_suffix("px").unwrap_or(value);
    value.trim().parse::<f64>().ok().filter(|number| number.is_finite())
}

fn unescape(value: &str) -> String {
    if !value.contains('&') {
        return value.to_owned();
    }
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn parse_attributes(mut rest: &str) -> Vec<(&str, String)> {
    let mut attributes = Vec::new();
    loop {
        rest = rest.trim_start();
        let Some(eq) = rest.find('=') else {
            break;
        };
        let name = rest[..eq].trim();
        let after = rest[eq + 1..].trim_start();
        let Some(quote) = after.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            break;
        };
        let Some(end) = after[1..].find(quote) else {
            break;
        };
        attributes.push((name, unescape(&after[1..1 + end])));
        rest = &after[end + 2..];
    }
    attributes
}

/// Start tags in document order. Comments, processing instructions,
/// declarations and closing tags are stepped over.
fn scan_tags(document: &str) -> Result<Vec<Tag<'_>>, SvgParseError> {
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(offset) = document[pos..].find('<') {
        let start = pos + offset;
        let rest = &document[start..];
        let (terminator, skip) = if rest.starts_with("<!--") {
            ("-->", true)
        } else if rest.starts_with("<?") {
            ("?>", true)
        } else if rest.starts_with("<!") || rest.starts_with("</") {
            (">", true)
        } else {
            (">", false)
        };
        let end = rest
            .find(terminator)
            .ok_or(SvgParseError::Unterminated(start))?;
        pos = start + end + terminator.len();
        if skip {
            continue;
        }

        let inner = rest[1..end].trim_end_matches('/').trim();
        let name_end = inner.find(char::is_whitespace).unwrap_or(inner.len());
        tags.push(Tag {
            name: &inner[..name_end],
            attributes: parse_attributes(&inner[name_end..]),
        });
    }

    Ok(tags)
}

fn parse_style(tag: &Tag<'_>, has_fill: bool) -> ShapeStyle {
    let stroke_color = match tag.property("stroke") {
        None => Color32::TRANSPARENT,
        Some(value) if value.eq_ignore_ascii_case("none") => Color32::TRANSPARENT,
        Some(value) => parse_color(&value).unwrap_or_else(|| {
            log::warn!("Unrecognized stroke '{}', using black", value);
            Color32::BLACK
        }),
    };
    let stroke_width = tag
        .property("stroke-width")
        .and_then(|value| parse_length(&value))
        .filter(|width| *width >= 0.0)
        .unwrap_or(1.0);
    let fill = match tag.property("fill") {
        _ if !has_fill => Paint::None,
        Some(value) => Paint::parse(&value),
        // Absent fill paints black by SVG rules.
        None => Paint::Color(Color32::BLACK),
    };
    ShapeStyle {
        stroke_color,
        stroke_width,
        fill,
    }
}

fn parse_shape(tag: &Tag<'_>) -> Option<Result<Shape, String>> {
    let kind = match tag.name {
        "line" => ShapeKind::Line(Line {
            p1: Point::new(tag.number("x1"), tag.number("y1")),
            p2: Point::new(tag.number("x2"), tag.number("y2")),
        }),
        "rect" => ShapeKind::Rect(Rect {
            origin: Point::new(tag.number("x"), tag.number("y")),
            width: tag.number("width").abs(),
            height: tag.number("height").abs(),
        }),
        "ellipse" => ShapeKind::Ellipse(Ellipse {
            center: Point::new(tag.number("cx"), tag.number("cy")),
            rx: tag.number("rx").abs(),
            ry: tag.number("ry").abs(),
        }),
        "path" => {
            let data = tag.attr("d").unwrap_or_default();
            match parse_description(data) {
                Ok(points) if points.len() >= 2 => ShapeKind::Path(Path::new(points)),
                Ok(points) => return Some(Err(format!("path with {} points", points.len()))),
                Err(err) => return Some(Err(err.to_string())),
            }
        }
        _ => return None,
    };
    let style = parse_style(tag, tag.name != "line");
    Some(Ok(Shape::new(kind, style)))
}

/// Parses a document written by [`super::write_document`] or a reasonably
/// plain foreign SVG. Unknown elements are ignored; shapes that cannot be
/// represented are skipped and counted.
pub fn parse_document(document: &str) -> Result<ParsedDocument, SvgParseError> {
    let tags = scan_tags(document)?;
    let mut tags = tags.iter();
    let root = tags.find(|tag| tag.name == "svg").ok_or(SvgParseError::MissingRoot)?;

    let mut parsed = ParsedDocument {
        width: root.attr("width").and_then(parse_length),
        height: root.attr("height").and_then(parse_length),
        ..ParsedDocument::default()
    };

    for tag in tags {
        match parse_shape(tag) {
            Some(Ok(shape)) => parsed.shapes.push(shape),
            Some(Err(reason)) => {
                log::warn!("Skipping <{}> element: {}", tag.name, reason);
                parsed.skipped += 1;
            }
            None => {}
        }
    }

    Ok(parsed)
}
