//! Plain 2D value types in drawing-surface coordinates plus the pure shape math
//! used by the tools.

pub mod drag;
pub mod hit_testing;
pub mod path_data;

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

pub use drag::{ellipse_from_drag, line_from_drag, rect_from_drag};
pub use path_data::{PathDataError, parse_description, path_to_description};

/// A position relative to the drawing surface's local origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance(self, other: Point) -> f64 {
        (other - self).length()
    }

    /// Maps a surface-local point into screen space for an egui painter.
    pub fn to_screen(self, origin: egui::Pos2) -> egui::Pos2 {
        egui::pos2(origin.x + self.x as f32, origin.y + self.y as f32)
    }

    /// Pointer-client coordinates minus the surface's bounding-box offset.
    pub fn from_screen(pos: egui::Pos2, origin: egui::Pos2) -> Point {
        Point::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64)
    }
}

/// A translation between two points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn length(self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, rhs: Point) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Offset> for Point {
    type Output = Point;

    fn add(self, rhs: Offset) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub const NOTHING: Self = Self {
        min: Point::new(f64::INFINITY, f64::INFINITY),
        max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
    };

    pub fn from_points(points: &[Point]) -> Self {
        points.iter().fold(Self::NOTHING, |mut bounds, point| {
            bounds.min.x = bounds.min.x.min(point.x);
            bounds.min.y = bounds.min.y.min(point.y);
            bounds.max.x = bounds.max.x.max(point.x);
            bounds.max.y = bounds.max.y.max(point.y);
            bounds
        })
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn expand(self, amount: f64) -> Self {
        if self.is_empty() {
            return self;
        }
        Self {
            min: Point::new(self.min.x - amount, self.min.y - amount),
            max: Point::new(self.max.x + amount, self.max.y + amount),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub fn to_screen(self, origin: egui::Pos2) -> egui::Rect {
        egui::Rect::from_min_max(self.min.to_screen(origin), self.max.to_screen(origin))
    }
}
