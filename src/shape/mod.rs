use crate::geometry::{Bounds, Offset, Point, ellipse_from_drag, line_from_drag, rect_from_drag};
use crate::id_generator::{ShapeId, generate_id};
use crate::style::{Paint, ShapeStyle};

mod ellipse;
mod line;
mod path;
mod rect;

pub use ellipse::Ellipse;
pub use line::Line;
pub use path::Path;
pub use rect::Rect;

/// Geometry shared by every shape variant.
pub trait Geometry {
    /// Name of the exchange-format element this geometry is written as.
    fn element_type(&self) -> &'static str;

    fn bounds(&self) -> Bounds;

    /// True when `pos` lies within `band` of the outline, or anywhere inside
    /// it when `filled`.
    fn hit_test(&self, pos: Point, band: f64, filled: bool) -> bool;

    /// Moves the position attributes by `delta` without touching extents.
    fn translate(&mut self, delta: Offset);
}

/// Variant tag without the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeTag {
    Line,
    Rect,
    Ellipse,
    Path,
}

impl ShapeTag {
    pub fn name(self) -> &'static str {
        match self {
            ShapeTag::Line => "line",
            ShapeTag::Rect => "rect",
            ShapeTag::Ellipse => "ellipse",
            ShapeTag::Path => "path",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Line(Line),
    Rect(Rect),
    Ellipse(Ellipse),
    Path(Path),
}

impl ShapeKind {
    pub fn tag(&self) -> ShapeTag {
        match self {
            ShapeKind::Line(_) => ShapeTag::Line,
            ShapeKind::Rect(_) => ShapeTag::Rect,
            ShapeKind::Ellipse(_) => ShapeTag::Ellipse,
            ShapeKind::Path(_) => ShapeTag::Path,
        }
    }

    /// Geometry spanned by a drag from `start` to `current`. A path only
    /// takes the starting point; later points arrive by clicks.
    pub fn from_drag(tag: ShapeTag, start: Point, current: Point) -> ShapeKind {
        match tag {
            ShapeTag::Line => ShapeKind::Line(line_from_drag(start, current)),
            ShapeTag::Rect => ShapeKind::Rect(rect_from_drag(start, current)),
            ShapeTag::Ellipse => ShapeKind::Ellipse(ellipse_from_drag(start, current)),
            ShapeTag::Path => ShapeKind::Path(Path::new(vec![start])),
        }
    }

    fn as_geometry(&self) -> &dyn Geometry {
        match self {
            ShapeKind::Line(line) => line,
            ShapeKind::Rect(rect) => rect,
            ShapeKind::Ellipse(ellipse) => ellipse,
            ShapeKind::Path(path) => path,
        }
    }

    fn as_geometry_mut(&mut self) -> &mut dyn Geometry {
        match self {
            ShapeKind::Line(line) => line,
            ShapeKind::Rect(rect) => rect,
            ShapeKind::Ellipse(ellipse) => ellipse,
            ShapeKind::Path(path) => path,
        }
    }
}

impl Geometry for ShapeKind {
    fn element_type(&self) -> &'static str {
        self.as_geometry().element_type()
    }

    fn bounds(&self) -> Bounds {
        self.as_geometry().bounds()
    }

    fn hit_test(&self, pos: Point, band: f64, filled: bool) -> bool {
        self.as_geometry().hit_test(pos, band, filled)
    }

    fn translate(&mut self, delta: Offset) {
        self.as_geometry_mut().translate(delta)
    }
}

/// A drawn primitive with its style and identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub style: ShapeStyle,
}

impl Shape {
    /// Creates a shape with a fresh identity. A line never keeps a fill.
    pub fn new(kind: ShapeKind, mut style: ShapeStyle) -> Self {
        if kind.tag() == ShapeTag::Line {
            style.fill = Paint::None;
        }
        Self {
            id: generate_id(),
            kind,
            style,
        }
    }

    /// Non-interactive stand-in of `size` centered at `center`, shown while
    /// hovering with a drawing tool. Paths have none.
    pub fn preview(tag: ShapeTag, center: Point, size: f64, style: ShapeStyle) -> Option<Self> {
        let half = Offset::new(size / 2.0, size / 2.0);
        let start = Point::new(center.x - half.dx, center.y - half.dy);
        let end = center + half;
        match tag {
            ShapeTag::Path => None,
            _ => Some(Shape::new(ShapeKind::from_drag(tag, start, end), style)),
        }
    }

    pub fn tag(&self) -> ShapeTag {
        self.kind.tag()
    }

    /// Hit test with a stroke band of half the stroke width, but never
    /// narrower than `tolerance`.
    pub fn hit_test(&self, pos: Point, tolerance: f64) -> bool {
        let band = (self.style.stroke_width / 2.0).max(tolerance);
        self.kind.hit_test(pos, band, !self.style.fill.is_none())
    }

    pub fn translate(&mut self, delta: Offset) {
        self.kind.translate(delta);
    }

    /// Sets the fill, refusing lines. Returns whether the fill was applied.
    pub fn set_fill(&mut self, fill: Paint) -> bool {
        if self.tag() == ShapeTag::Line {
            return false;
        }
        self.style.fill = fill;
        true
    }

    pub fn as_path(&self) -> Option<&Path> {
        match &self.kind {
            ShapeKind::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_path_mut(&mut self) -> Option<&mut Path> {
        match &mut self.kind {
            ShapeKind::Path(path) => Some(path),
            _ => None,
        }
    }

    /// Edit handle positions: one per path point, none for other shapes.
    pub fn handles(&self) -> Vec<Point> {
        self.as_path().map(|path| path.points.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    fn filled_style() -> ShapeStyle {
        ShapeStyle {
            fill: Paint::Color(Color32::RED),
            ..ShapeStyle::default()
        }
    }

    #[test]
    fn line_never_keeps_fill() {
        let mut line = Shape::new(
            ShapeKind::from_drag(ShapeTag::Line, Point::ZERO, Point::new(5.0, 5.0)),
            filled_style(),
        );
        assert!(line.style.fill.is_none());
        assert!(!line.set_fill(Paint::Color(Color32::BLUE)));
        assert!(line.style.fill.is_none());
    }

    #[test]
    fn unfilled_rect_is_hit_only_near_outline() {
        let rect = Shape::new(
            ShapeKind::from_drag(ShapeTag::Rect, Point::ZERO, Point::new(100.0, 100.0)),
            ShapeStyle::default(),
        );
        assert!(rect.hit_test(Point::new(0.0, 50.0), 4.0));
        assert!(!rect.hit_test(Point::new(50.0, 50.0), 4.0));

        let filled = Shape::new(rect.kind.clone(), filled_style());
        assert!(filled.hit_test(Point::new(50.0, 50.0), 4.0));
    }

    #[test]
    fn translate_keeps_extents() {
        let mut ellipse = Shape::new(
            ShapeKind::from_drag(ShapeTag::Ellipse, Point::ZERO, Point::new(20.0, 10.0)),
            ShapeStyle::default(),
        );
        ellipse.translate(Offset::new(5.0, -5.0));
        let ShapeKind::Ellipse(e) = ellipse.kind else {
            panic!("expected ellipse");
        };
        assert_eq!(e.center, Point::new(15.0, 0.0));
        assert_eq!((e.rx, e.ry), (10.0, 5.0));
    }

    #[test]
    fn preview_is_centered() {
        let preview = Shape::preview(ShapeTag::Rect, Point::new(50.0, 50.0), 20.0, ShapeStyle::default())
            .unwrap();
        let bounds = preview.kind.bounds();
        assert_eq!(bounds.min, Point::new(40.0, 40.0));
        assert_eq!(bounds.max, Point::new(60.0, 60.0));
        assert!(Shape::preview(ShapeTag::Path, Point::ZERO, 20.0, ShapeStyle::default()).is_none());
    }
}
