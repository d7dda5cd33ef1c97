use eframe::egui;

use crate::tools::ToolMode;

const BUTTON_SIZE: f32 = 36.0;
const ACTIVE_FILL: egui::Color32 = egui::Color32::from_rgb(100, 181, 246);
const ACTIVE_BORDER: egui::Color32 = egui::Color32::from_rgb(33, 150, 243);

/// Square toolbar button with a tool's icon; the label shows on hover.
pub struct ToolButton {
    tool: ToolMode,
    active: bool,
}

impl ToolButton {
    pub fn new(tool: ToolMode, active: bool) -> Self {
        Self { tool, active }
    }
}

impl egui::Widget for ToolButton {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(egui::Vec2::splat(BUTTON_SIZE), egui::Sense::click());
        let response = response.on_hover_text(self.tool.label());

        if ui.is_rect_visible(rect) {
            let visuals = ui.style().interact_selectable(&response, self.active);
            let (fill, border, icon_color) = if self.active {
                (ACTIVE_FILL, egui::Stroke::new(2.0, ACTIVE_BORDER), egui::Color32::BLACK)
            } else {
                (visuals.weak_bg_fill, visuals.bg_stroke, visuals.text_color())
            };

            let painter = ui.painter();
            painter.rect(rect, visuals.rounding, fill, border);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.tool.icon(),
                egui::FontId::proportional(BUTTON_SIZE * 0.6),
                icon_color,
            );
        }

        response
    }
}
