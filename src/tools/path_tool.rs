//! Path tool: each click adds a vertex; Enter or a double-click finishes the
//! path and Escape throws it away.

use crate::error::EditorError;
use crate::geometry::Point;
use crate::renderer::RenderSurface;
use crate::shape::{Path, Shape, ShapeKind, ShapeTag};
use crate::state::{EditorContext, Gesture};

impl<S: RenderSurface> EditorContext<S> {
    /// Starts a new path at `pos`, or extends the one being drawn.
    pub(crate) fn add_path_point(&mut self, pos: Point) -> Result<(), EditorError> {
        if let Gesture::DrawingPath { path } = &mut self.state.gesture {
            if let Some(points) = path.as_path_mut() {
                points.points.push(pos);
            }
            self.surface.update(path);
            return Ok(());
        }

        let style = self.state.style.style_for(ShapeTag::Path);
        let path = Shape::new(ShapeKind::Path(Path::new(vec![pos])), style);
        self.surface.add(&path);
        log::debug!("Started path {}", path.id);
        self.state.gesture = Gesture::DrawingPath { path };
        Ok(())
    }

    /// Displays the path being drawn, with `trailing` as a provisional next
    /// point when given.
    pub(crate) fn preview_path_segment(&mut self, trailing: Option<Point>) {
        let Gesture::DrawingPath { path } = &self.state.gesture else {
            return;
        };
        match (trailing, path.as_path()) {
            (Some(point), Some(points)) => {
                let mut shown = path.clone();
                shown.kind = ShapeKind::Path(points.with_trailing(point));
                self.surface.update(&shown);
            }
            _ => {
                self.surface.update(path);
            }
        }
    }

    /// Freezes the path being drawn, fills it if fill is enabled and commits
    /// it. Paths left with fewer than two distinct points are discarded.
    pub fn finalize_path(&mut self) -> Result<(), EditorError> {
        if !matches!(self.state.gesture, Gesture::DrawingPath { .. }) {
            return Ok(());
        }
        let Gesture::DrawingPath { mut path } = std::mem::take(&mut self.state.gesture) else {
            return Ok(());
        };

        let point_count = match path.as_path_mut() {
            Some(points) => {
                points.dedupe_consecutive();
                points.points.len()
            }
            None => 0,
        };
        if point_count < 2 {
            self.surface.remove(path.id);
            return Err(EditorError::invalid_gesture(
                "A path needs at least two distinct points",
            ));
        }

        path.set_fill(self.state.style.current_fill());
        self.commit_shape(path);
        Ok(())
    }

    /// Drops the path being drawn without committing it.
    pub fn cancel_path(&mut self) {
        if !matches!(self.state.gesture, Gesture::DrawingPath { .. }) {
            return;
        }
        let Gesture::DrawingPath { path } = std::mem::take(&mut self.state.gesture) else {
            return;
        };
        self.surface.remove(path.id);
        log::debug!("Cancelled path {}", path.id);
    }
}
