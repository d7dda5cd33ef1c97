//! The selected shape and the edits applied to it.

use egui::Color32;

use crate::error::EditorError;
use crate::geometry::Offset;
use crate::id_generator::ShapeId;
use crate::notification::NoticeLevel;
use crate::renderer::RenderSurface;
use crate::shape::{Shape, ShapeKind};
use crate::state::{EditorContext, Gesture};
use crate::style::{FillReflection, Paint};

/// Position attributes of a shape at the moment a drag started. Each move
/// re-applies the whole pointer delta to these.
#[derive(Debug, Clone, PartialEq)]
pub struct DragOrigin {
    pub id: ShapeId,
    pub kind: ShapeKind,
}

impl DragOrigin {
    pub fn capture(shape: &Shape) -> Self {
        Self {
            id: shape.id,
            kind: shape.kind.clone(),
        }
    }

    /// Moves `shape` to the captured position translated by `delta`.
    pub fn apply(&self, shape: &mut Shape, delta: Offset) {
        shape.kind = self.kind.clone();
        shape.translate(delta);
    }
}

impl<S: RenderSurface> EditorContext<S> {
    /// Selects `id` and mirrors its attributes into the style inputs. Paths
    /// also get one edit handle per point.
    pub fn select(&mut self, id: ShapeId) {
        let Some(shape) = self.scene.get(id) else {
            log::warn!("Cannot select {}: not in the scene", id);
            return;
        };
        let tag = shape.tag();
        let handles = shape.handles();
        let reflection = self.state.style.reflect(tag, &shape.style);

        self.state.selection = Some(id);
        self.surface.set_highlight(Some(id));
        self.surface.set_handles(handles);
        log::debug!("Selected {} {}", tag.name(), id);

        if let FillReflection::NotEditable(raw) = reflection {
            self.notify(
                NoticeLevel::Info,
                format!("Fill \"{raw}\" cannot be edited with the color picker"),
            );
        }
    }

    /// Drops the selection along with its handles and any drag in progress.
    pub fn clear_selection(&mut self) {
        if self.state.gesture.is_dragging() {
            self.state.gesture = Gesture::Idle;
        }
        if self.state.selection.take().is_some() {
            log::debug!("Selection cleared");
        }
        self.state.style.fill_editable = true;
        self.surface.set_highlight(None);
        self.surface.clear_handles();
    }

    /// Applies `edit` to the selected shape, if any, and redisplays it.
    fn edit_selected(&mut self, edit: impl FnOnce(&mut Shape)) -> bool {
        let Some(shape) = self.state.selection.and_then(|id| self.scene.get_mut(id)) else {
            return false;
        };
        edit(shape);
        self.surface.update(shape);
        true
    }

    pub fn set_stroke_color(&mut self, color: Color32) {
        self.state.style.stroke_color = color;
        self.edit_selected(|shape| shape.style.stroke_color = color);
        self.schedule_save();
    }

    /// Rejects widths that are not a positive finite number.
    pub fn set_stroke_width(&mut self, width: f64) -> Result<(), EditorError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(EditorError::invalid_gesture(format!(
                "Stroke width must be a positive number, got {width}"
            )));
        }
        self.state.style.stroke_width = width;
        self.edit_selected(|shape| shape.style.stroke_width = width);
        self.schedule_save();
        Ok(())
    }

    /// Stores the fill color. The selected shape only picks it up while fill
    /// is enabled, and lines never do.
    pub fn set_fill_color(&mut self, color: Color32) {
        let style = &mut self.state.style;
        style.fill_color = color;
        style.fill_editable = true;
        let fill = style.current_fill();
        let enabled = style.fill_enabled;
        if enabled {
            self.apply_fill(fill);
        }
        self.schedule_save();
    }

    /// Toggling off unfills the selected shape but keeps the stored color, so
    /// toggling on again restores it.
    pub fn set_fill_enabled(&mut self, enabled: bool) {
        self.state.style.fill_enabled = enabled;
        self.state.style.fill_editable = true;
        let fill = self.state.style.current_fill();
        self.apply_fill(fill);
        self.schedule_save();
    }

    fn apply_fill(&mut self, fill: Paint) {
        let mut refused = false;
        self.edit_selected(|shape| refused = !shape.set_fill(fill));
        if refused {
            log::debug!("Lines carry no fill; ignoring fill change");
        }
    }

    /// Removes the selected shape from the scene and the display. Deleted
    /// shapes are gone for good: undo does not bring them back.
    pub fn delete_selected(&mut self) {
        let Some(id) = self.state.selection else {
            return;
        };
        self.surface.remove(id);
        let removed = self.scene.remove(id);
        self.clear_selection();
        if removed {
            log::info!("Deleted shape {}", id);
            self.schedule_save();
        }
    }
}
