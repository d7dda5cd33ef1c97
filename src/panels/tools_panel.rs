use crate::SketchApp;
use crate::command::Command;
use crate::components::ToolButton;
use crate::export::ExportFormat;
use crate::tools::ToolMode;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.editor().tool();
            ui.horizontal_wrapped(|ui| {
                for tool in ToolMode::ALL {
                    if ui.add(ToolButton::new(tool, active == tool)).clicked() {
                        log::info!("Tool selected from UI: {}", tool.name());
                        app.run(ctx, Command::SelectTool(tool));
                    }
                }
            });
            ui.label(format!("Active: {}", active.label()));
            ui.separator();

            ui.heading("Style");
            let style = app.editor().style().clone();

            ui.horizontal(|ui| {
                let mut stroke = style.stroke_color;
                ui.label("Stroke");
                if ui.color_edit_button_srgba(&mut stroke).changed() {
                    app.run(ctx, Command::SetStrokeColor(stroke));
                }
            });

            ui.horizontal(|ui| {
                let mut fill_enabled = style.fill_enabled;
                if ui.checkbox(&mut fill_enabled, "Fill").changed() {
                    app.run(ctx, Command::SetFillEnabled(fill_enabled));
                }
                let mut fill = style.fill_color;
                if ui
                    .add_enabled_ui(style.fill_enabled, |ui| ui.color_edit_button_srgba(&mut fill))
                    .inner
                    .changed()
                {
                    app.run(ctx, Command::SetFillColor(fill));
                }
            });
            if !style.fill_editable {
                ui.small("Selected fill uses a format the picker cannot show");
            }

            let mut width = style.stroke_width;
            if ui
                .add(egui::Slider::new(&mut width, 1.0..=50.0).text("Width"))
                .changed()
            {
                app.run(ctx, Command::SetStrokeWidth(width));
            }
            ui.separator();

            ui.horizontal(|ui| {
                let has_selection = app.editor().selection().is_some();
                if ui.add_enabled(has_selection, egui::Button::new("Delete")).clicked() {
                    app.run(ctx, Command::DeleteSelected);
                }
                let can_undo = !app.editor().scene().is_empty();
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.run(ctx, Command::Undo);
                }
            });
            ui.separator();

            ui.heading("Export");
            ui.horizontal(|ui| {
                for format in ExportFormat::ALL {
                    if ui.button(format.label()).clicked() {
                        app.run(ctx, Command::Export(format));
                    }
                }
            });
            let in_flight = app.exports_in_flight();
            if in_flight > 0 {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!("Exporting ({in_flight})"));
                });
            }
            ui.separator();

            let editor = app.editor();
            ui.label(format!("Shapes: {}", editor.scene().len()));
            ui.label(format!("Gesture: {}", editor.gesture().name()));
            if editor.save_pending() {
                ui.weak("Unsaved changes");
            }
        });
}
