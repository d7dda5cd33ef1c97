use crate::geometry::hit_testing::distance_to_polyline;
use crate::geometry::{Bounds, Offset, Point};

use super::Geometry;

/// Axis-aligned rectangle. `width` and `height` are never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Corners clockwise from the origin, closed back onto the origin.
    pub fn outline(&self) -> [Point; 5] {
        let Point { x, y } = self.origin;
        [
            Point::new(x, y),
            Point::new(x + self.width, y),
            Point::new(x + self.width, y + self.height),
            Point::new(x, y + self.height),
            Point::new(x, y),
        ]
    }
}

impl Geometry for Rect {
    fn element_type(&self) -> &'static str {
        "rect"
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.outline()[..4])
    }

    fn hit_test(&self, pos: Point, band: f64, filled: bool) -> bool {
        if filled && self.bounds().contains(pos) {
            return true;
        }
        distance_to_polyline(pos, &self.outline()) <= band
    }

    fn translate(&mut self, delta: Offset) {
        self.origin = self.origin + delta;
    }
}
