//! Tool modes and the per-tool gesture handlers.
//!
//! Each handler file extends [`EditorContext`](crate::state::EditorContext)
//! with the pointer behavior of one tool; the dispatcher in
//! `state::context` picks the handler from the tool mode (pointer-down) or
//! from the gesture in flight (everything after).

mod draw_shape_tool;
mod path_tool;
mod selection_tool;

use crate::shape::ShapeTag;

/// The active tool. `None` is the initial mode, in which drawing attempts
/// only produce a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ToolMode {
    #[default]
    None,
    Line,
    Rect,
    Ellipse,
    Path,
    Select,
}

impl ToolMode {
    /// Tools offered in the toolbar, in order.
    pub const ALL: [ToolMode; 5] = [
        ToolMode::Line,
        ToolMode::Rect,
        ToolMode::Ellipse,
        ToolMode::Path,
        ToolMode::Select,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolMode::None => "none",
            ToolMode::Line => "line",
            ToolMode::Rect => "rect",
            ToolMode::Ellipse => "ellipse",
            ToolMode::Path => "path",
            ToolMode::Select => "select",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolMode::None => "None",
            ToolMode::Line => "Line",
            ToolMode::Rect => "Rectangle",
            ToolMode::Ellipse => "Ellipse",
            ToolMode::Path => "Path",
            ToolMode::Select => "Select",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToolMode::None => "·",
            ToolMode::Line => "╱",
            ToolMode::Rect => "⬜",
            ToolMode::Ellipse => "⭕",
            ToolMode::Path => "✏",
            ToolMode::Select => "↖",
        }
    }

    /// Tools drawn with a single press-drag-release.
    pub fn is_shape_tool(self) -> bool {
        matches!(self, ToolMode::Line | ToolMode::Rect | ToolMode::Ellipse)
    }

    /// The shape variant this tool creates.
    pub fn shape_tag(self) -> Option<ShapeTag> {
        match self {
            ToolMode::Line => Some(ShapeTag::Line),
            ToolMode::Rect => Some(ShapeTag::Rect),
            ToolMode::Ellipse => Some(ShapeTag::Ellipse),
            ToolMode::Path => Some(ShapeTag::Path),
            ToolMode::None | ToolMode::Select => None,
        }
    }
}
