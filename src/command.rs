use egui::Color32;

use crate::export::ExportFormat;
use crate::tools::ToolMode;

/// User-facing commands, independent of which widget issued them.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SelectTool(ToolMode),
    SetStrokeColor(Color32),
    SetFillColor(Color32),
    SetFillEnabled(bool),
    SetStrokeWidth(f64),
    DeleteSelected,
    Undo,
    Export(ExportFormat),
}
