use super::Point;
use crate::shape::{Ellipse, Line, Rect};

/// Rectangle spanned by a drag, normalized so extents are never negative
/// whichever direction the pointer travels.
pub fn rect_from_drag(start: Point, current: Point) -> Rect {
    Rect {
        origin: Point::new(start.x.min(current.x), start.y.min(current.y)),
        width: (current.x - start.x).abs(),
        height: (current.y - start.y).abs(),
    }
}

/// Ellipse inscribed in the drag box.
pub fn ellipse_from_drag(start: Point, current: Point) -> Ellipse {
    Ellipse {
        center: start.midpoint(current),
        rx: (current.x - start.x).abs() / 2.0,
        ry: (current.y - start.y).abs() / 2.0,
    }
}

pub fn line_from_drag(start: Point, current: Point) -> Line {
    Line { p1: start, p2: current }
}
