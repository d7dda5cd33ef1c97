//! Select tool: click picks the topmost shape (or a vertex handle of the
//! selected path) and dragging moves it.

use log::debug;

use crate::error::EditorError;
use crate::geometry::Point;
use crate::id_generator::ShapeId;
use crate::renderer::RenderSurface;
use crate::selection::DragOrigin;
use crate::state::{EditorContext, Gesture};

impl<S: RenderSurface> EditorContext<S> {
    fn selected_path_id(&self) -> Option<ShapeId> {
        self.selection().filter(|shape| shape.as_path().is_some()).map(|shape| shape.id)
    }

    /// Handles a press under the select tool.
    pub(crate) fn select_at(&mut self, pos: Point) -> Result<(), EditorError> {
        // Handles of the selected path are tested before any shape.
        if let Some(path_id) = self.selected_path_id() {
            if let Some(index) = self.surface.handle_at(pos, self.config.handle_radius) {
                let len = self
                    .scene
                    .get(path_id)
                    .and_then(|shape| shape.as_path())
                    .map_or(0, |path| path.points.len());
                if index >= len {
                    return Err(EditorError::HandleIndexOutOfRange { index, len });
                }
                debug!("Grabbed handle {} of path {}", index, path_id);
                self.state.gesture = Gesture::DraggingPathHandle { index, path_id };
                return Ok(());
            }
        }

        let target = self
            .surface
            .hit_test(pos, self.config.hit_tolerance)
            .filter(|id| self.scene.contains(*id));
        let Some(id) = target else {
            self.clear_selection();
            return Ok(());
        };

        self.select(id);
        if let Some(shape) = self.scene.get(id) {
            self.state.gesture = Gesture::DraggingSelection {
                anchor: pos,
                origin: DragOrigin::capture(shape),
            };
        }
        Ok(())
    }

    /// Moves the dragged shape by the pointer's offset from the anchor.
    pub(crate) fn drag_selection(&mut self, pos: Point) {
        let Gesture::DraggingSelection { anchor, origin } = &self.state.gesture else {
            return;
        };
        let delta = pos - *anchor;
        let Some(shape) = self.scene.get_mut(origin.id) else {
            self.state.gesture = Gesture::Idle;
            return;
        };
        origin.apply(shape, delta);
        self.surface.update(shape);
        if shape.as_path().is_some() {
            self.surface.set_handles(shape.handles());
        }
        self.schedule_save();
    }

    /// Moves the grabbed vertex of the selected path to `pos`.
    pub(crate) fn drag_handle(&mut self, pos: Point) -> Result<(), EditorError> {
        let Gesture::DraggingPathHandle { index, path_id } = self.state.gesture else {
            return Ok(());
        };
        let Some(shape) = self.scene.get_mut(path_id) else {
            self.state.gesture = Gesture::Idle;
            return Ok(());
        };
        let moved = match shape.as_path_mut() {
            Some(path) => path.move_point(index, pos),
            None => Err(EditorError::HandleIndexOutOfRange { index, len: 0 }),
        };
        if let Err(err) = moved {
            self.state.gesture = Gesture::Idle;
            return Err(err);
        }
        self.surface.update(shape);
        self.surface.set_handles(shape.handles());
        self.schedule_save();
        Ok(())
    }
}
