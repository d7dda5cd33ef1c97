//! Line, rect and ellipse tools: press to anchor, drag to size, release to
//! commit.

use crate::error::EditorError;
use crate::geometry::Point;
use crate::renderer::RenderSurface;
use crate::shape::{Shape, ShapeKind};
use crate::state::{EditorContext, Gesture};

impl<S: RenderSurface> EditorContext<S> {
    /// Starts a zero-sized shape at `pos` with the current style.
    pub(crate) fn begin_shape(&mut self, pos: Point) -> Result<(), EditorError> {
        let tag = self
            .state
            .tool
            .shape_tag()
            .ok_or_else(|| EditorError::invalid_gesture("The current tool does not draw shapes"))?;

        // A release that never reached us leaves the old shape drawn; keep it.
        if let Gesture::DrawingShape { shape, .. } = std::mem::take(&mut self.state.gesture) {
            self.commit_shape(shape);
        }

        self.surface.set_preview(None);
        let shape = Shape::new(ShapeKind::from_drag(tag, pos, pos), self.state.style.style_for(tag));
        self.surface.add(&shape);
        self.state.gesture = Gesture::DrawingShape { anchor: pos, shape };
        Ok(())
    }

    /// Recomputes the shape being drawn from its anchor and `pos`.
    pub(crate) fn resize_shape(&mut self, pos: Point) {
        let Gesture::DrawingShape { anchor, shape } = &mut self.state.gesture else {
            return;
        };
        shape.kind = ShapeKind::from_drag(shape.tag(), *anchor, pos);
        self.surface.update(shape);
    }

    /// Shows the hover preview under the pointer for single-drag tools.
    pub(crate) fn update_preview(&mut self, pos: Point) {
        let preview = self
            .state
            .tool
            .shape_tag()
            .filter(|_| self.state.tool.is_shape_tool())
            .and_then(|tag| {
                Shape::preview(tag, pos, self.config.preview_size, self.state.style.style_for(tag))
            });
        self.surface.set_preview(preview);
    }
}
