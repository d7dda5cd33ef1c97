use crate::error::EditorError;
use crate::geometry::hit_testing::{distance_to_polyline, polygon_contains};
use crate::geometry::{Bounds, Offset, Point, path_to_description};

use super::Geometry;

/// Open polyline built point by point. A finalized path has at least two
/// points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub points: Vec<Point>,
}

impl Path {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// The serialized `d` attribute for the current points.
    pub fn description(&self) -> String {
        path_to_description(&self.points)
    }

    /// Copy of this path with `point` appended, for previewing the next
    /// segment under the pointer.
    pub fn with_trailing(&self, point: Point) -> Path {
        let mut points = self.points.clone();
        points.push(point);
        Path { points }
    }

    /// Collapses runs of identical consecutive points into one.
    pub fn dedupe_consecutive(&mut self) {
        self.points.dedup();
    }

    pub fn move_point(&mut self, index: usize, to: Point) -> Result<(), EditorError> {
        let len = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or(EditorError::HandleIndexOutOfRange { index, len })?;
        *point = to;
        Ok(())
    }
}

impl Geometry for Path {
    fn element_type(&self) -> &'static str {
        "path"
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.points)
    }

    fn hit_test(&self, pos: Point, band: f64, filled: bool) -> bool {
        if filled && polygon_contains(pos, &self.points) {
            return true;
        }
        distance_to_polyline(pos, &self.points) <= band
    }

    fn translate(&mut self, delta: Offset) {
        for point in &mut self.points {
            *point = *point + delta;
        }
    }
}
