//! The interactive state of the editor: which tool is active, which gesture is
//! in flight, what is selected and the current style inputs.
//!
//! The gesture is orthogonal to the tool but never independent of it: it is
//! only ever entered from a pointer sequence under a matching tool, and every
//! tool change resets it to `Idle`.
//!
//! # Gesture Transitions
//!
//! ```text
//!                      pointer-down (Line/Rect/Ellipse)
//!            ┌──────────────────────────────────────────► DrawingShape
//!            │         pointer-up: commit / leave: abort ◄──────┘
//!            │
//!            │         pointer-down (Path)                ┌─ pointer-down: add point
//!            ├──────────────────────────────────────────► DrawingPath ◄┘
//! ┌──────┐   │         Enter / double-click: finalize   ◄───────┤
//! │ Idle │───┤         Escape: cancel                   ◄───────┘
//! └──────┘   │
//!            │         pointer-down on a shape (Select)
//!            ├──────────────────────────────────────────► DraggingSelection
//!            │         pointer-up / leave               ◄───────┘
//!            │
//!            │         pointer-down on a handle (Select, path selected)
//!            └──────────────────────────────────────────► DraggingPathHandle
//!                      pointer-up / leave               ◄───────┘
//! ```

use crate::geometry::Point;
use crate::id_generator::ShapeId;
use crate::selection::DragOrigin;
use crate::shape::Shape;
use crate::style::StyleInputs;
use crate::tools::ToolMode;

/// The pointer interaction currently in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// A line, rect or ellipse being dragged out. The shape is displayed but
    /// not yet in the scene.
    DrawingShape { anchor: Point, shape: Shape },
    /// A path being built click by click. Not yet in the scene.
    DrawingPath { path: Shape },
    /// The selected shape follows the pointer.
    DraggingSelection { anchor: Point, origin: DragOrigin },
    /// One vertex of the selected path follows the pointer.
    DraggingPathHandle { index: usize, path_id: ShapeId },
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "Idle",
            Gesture::DrawingShape { .. } => "DrawingShape",
            Gesture::DrawingPath { .. } => "DrawingPath",
            Gesture::DraggingSelection { .. } => "DraggingSelection",
            Gesture::DraggingPathHandle { .. } => "DraggingPathHandle",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            Gesture::DraggingSelection { .. } | Gesture::DraggingPathHandle { .. }
        )
    }

    /// The not-yet-committed shape, if a draw is in progress.
    pub fn in_progress_shape(&self) -> Option<&Shape> {
        match self {
            Gesture::DrawingShape { shape, .. } => Some(shape),
            Gesture::DrawingPath { path } => Some(path),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub tool: ToolMode,
    pub gesture: Gesture,
    /// Always refers to a shape in the scene.
    pub selection: Option<ShapeId>,
    pub style: StyleInputs,
}

impl EditorState {
    pub fn new(style: StyleInputs) -> Self {
        Self {
            tool: ToolMode::None,
            gesture: Gesture::Idle,
            selection: None,
            style,
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(StyleInputs::default())
    }
}
