// src/renderer.rs
use egui::{Color32, Painter, Pos2, Stroke};

use crate::geometry::Point;
use crate::geometry::hit_testing::handle_at;
use crate::id_generator::ShapeId;
use crate::shape::{Geometry, Shape, ShapeKind};
use crate::svg::write_document;

const ELLIPSE_SEGMENTS: usize = 64;
const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(30, 144, 255);

/// What the editor needs from the thing that displays the drawing.
///
/// The surface holds every displayed shape, which during a draw gesture
/// includes the shape being drawn before it is committed to the scene. Edit
/// handles and the hover preview are overlays: they are never hit by
/// [`RenderSurface::hit_test`] and never serialized.
pub trait RenderSurface {
    fn add(&mut self, shape: &Shape);

    /// Replaces the attributes of the displayed shape with the same id.
    /// Returns false if that shape is not displayed.
    fn update(&mut self, shape: &Shape) -> bool;

    fn remove(&mut self, id: ShapeId) -> bool;

    fn clear(&mut self);

    /// The displayed shapes as an exchange-format document.
    fn serialize(&self) -> String;

    /// Topmost displayed shape under `pos`.
    fn hit_test(&self, pos: Point, tolerance: f64) -> Option<ShapeId>;

    fn contains(&self, id: ShapeId) -> bool;

    fn set_handles(&mut self, handles: Vec<Point>);

    fn handles(&self) -> &[Point];

    fn clear_handles(&mut self) {
        self.set_handles(Vec::new());
    }

    /// Index of the handle under `pos`, if any.
    fn handle_at(&self, pos: Point, radius: f64) -> Option<usize> {
        handle_at(pos, self.handles(), radius)
    }

    fn set_preview(&mut self, preview: Option<Shape>);

    fn set_highlight(&mut self, id: Option<ShapeId>);

    /// Pixel size of the drawing area.
    fn size(&self) -> (f64, f64);

    fn set_size(&mut self, width: f64, height: f64);
}

/// Retained list of shapes to paint, in paint order.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    shapes: Vec<Shape>,
    handles: Vec<Point>,
    preview: Option<Shape>,
    highlight: Option<ShapeId>,
    width: f64,
    height: f64,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn preview(&self) -> Option<&Shape> {
        self.preview.as_ref()
    }

    pub fn highlight(&self) -> Option<ShapeId> {
        self.highlight
    }

    /// Paints the display list with the surface origin at `origin`.
    ///
    /// Args:
    ///     painter: painter clipped to the canvas rect
    ///     origin: screen position of the surface's local (0, 0)
    ///     handle_radius: radius of path edit handles
    pub fn paint(&self, painter: &Painter, origin: Pos2, handle_radius: f64) {
        for shape in &self.shapes {
            paint_shape(painter, origin, shape, 1.0);
        }

        if let Some(preview) = &self.preview {
            paint_shape(painter, origin, preview, 0.4);
        }

        if let Some(selected) = self.highlight.and_then(|id| self.shapes.iter().find(|s| s.id == id)) {
            let margin = (selected.style.stroke_width / 2.0 + 3.0).max(3.0);
            let rect = selected.kind.bounds().expand(margin).to_screen(origin);
            painter.rect_stroke(rect, 0.0, Stroke::new(1.0, HIGHLIGHT_COLOR));
        }

        for handle in &self.handles {
            let center = handle.to_screen(origin);
            painter.circle(center, handle_radius as f32, Color32::WHITE, Stroke::new(1.5, HIGHLIGHT_COLOR));
        }
    }
}

fn paint_shape(painter: &Painter, origin: Pos2, shape: &Shape, opacity: f32) {
    let stroke = Stroke::new(
        shape.style.stroke_width as f32,
        shape.style.stroke_color.gamma_multiply(opacity),
    );
    let fill = shape
        .style
        .fill
        .display_color()
        .map(|color| color.gamma_multiply(opacity));
    let to_screen = |points: &[Point]| -> Vec<Pos2> { points.iter().map(|p| p.to_screen(origin)).collect() };

    match &shape.kind {
        ShapeKind::Line(line) => {
            painter.line_segment([line.p1.to_screen(origin), line.p2.to_screen(origin)], stroke);
        }
        ShapeKind::Rect(_) => {
            let screen_rect = shape.kind.bounds().to_screen(origin);
            painter.rect(screen_rect, 0.0, fill.unwrap_or(Color32::TRANSPARENT), stroke);
        }
        ShapeKind::Ellipse(ellipse) => {
            let points = to_screen(&ellipse.outline(ELLIPSE_SEGMENTS));
            painter.add(egui::Shape::convex_polygon(
                points,
                fill.unwrap_or(Color32::TRANSPARENT),
                stroke,
            ));
        }
        ShapeKind::Path(path) => {
            let points = to_screen(&path.points);
            if let Some(fill) = fill.filter(|_| points.len() >= 3) {
                painter.add(egui::Shape::convex_polygon(points.clone(), fill, Stroke::NONE));
            }
            if points.len() >= 2 {
                painter.add(egui::Shape::line(points, stroke));
            } else if let Some(point) = points.first() {
                painter.circle_filled(*point, stroke.width.max(1.0) / 2.0, stroke.color);
            }
        }
    }
}

impl RenderSurface for DisplayList {
    fn add(&mut self, shape: &Shape) {
        self.shapes.push(shape.clone());
    }

    fn update(&mut self, shape: &Shape) -> bool {
        match self.shapes.iter_mut().find(|displayed| displayed.id == shape.id) {
            Some(displayed) => {
                *displayed = shape.clone();
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: ShapeId) -> bool {
        let before = self.shapes.len();
        self.shapes.retain(|shape| shape.id != id);
        if self.highlight == Some(id) {
            self.highlight = None;
        }
        self.shapes.len() != before
    }

    fn clear(&mut self) {
        self.shapes.clear();
        self.handles.clear();
        self.preview = None;
        self.highlight = None;
    }

    fn serialize(&self) -> String {
        write_document(&self.shapes, self.width, self.height)
    }

    fn hit_test(&self, pos: Point, tolerance: f64) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|shape| shape.hit_test(pos, tolerance))
            .map(|shape| shape.id)
    }

    fn contains(&self, id: ShapeId) -> bool {
        self.shapes.iter().any(|shape| shape.id == id)
    }

    fn set_handles(&mut self, handles: Vec<Point>) {
        self.handles = handles;
    }

    fn handles(&self) -> &[Point] {
        &self.handles
    }

    fn set_preview(&mut self, preview: Option<Shape>) {
        self.preview = preview;
    }

    fn set_highlight(&mut self, id: Option<ShapeId>) {
        self.highlight = id;
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}
