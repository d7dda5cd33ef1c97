use crate::geometry::hit_testing::distance_to_segment;
use crate::geometry::{Bounds, Offset, Point};

use super::Geometry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
}

impl Geometry for Line {
    fn element_type(&self) -> &'static str {
        "line"
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_points(&[self.p1, self.p2])
    }

    // Lines have no interior, so `filled` is ignored.
    fn hit_test(&self, pos: Point, band: f64, _filled: bool) -> bool {
        distance_to_segment(pos, self.p1, self.p2) <= band
    }

    fn translate(&mut self, delta: Offset) {
        self.p1 = self.p1 + delta;
        self.p2 = self.p2 + delta;
    }
}
