use crate::geometry::hit_testing::{distance_to_ellipse_outline, ellipse_contains};
use crate::geometry::{Bounds, Offset, Point};

use super::Geometry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
}

impl Ellipse {
    /// Points along the outline, used wherever the ellipse is drawn as a polygon.
    pub fn outline(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(8);
        (0..segments)
            .map(|i| {
                let angle = i as f64 / segments as f64 * std::f64::consts::TAU;
                Point::new(
                    self.center.x + self.rx * angle.cos(),
                    self.center.y + self.ry * angle.sin(),
                )
            })
            .collect()
    }
}

impl Geometry for Ellipse {
    fn element_type(&self) -> &'static str {
        "ellipse"
    }

    fn bounds(&self) -> Bounds {
        Bounds {
            min: Point::new(self.center.x - self.rx, self.center.y - self.ry),
            max: Point::new(self.center.x + self.rx, self.center.y + self.ry),
        }
    }

    fn hit_test(&self, pos: Point, band: f64, filled: bool) -> bool {
        if filled && ellipse_contains(pos, self.center, self.rx, self.ry) {
            return true;
        }
        distance_to_ellipse_outline(pos, self.center, self.rx, self.ry) <= band
    }

    fn translate(&mut self, delta: Offset) {
        self.center = self.center + delta;
    }
}
