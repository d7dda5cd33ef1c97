use crate::SketchApp;
use crate::notification::NoticeLevel;
use crate::renderer::RenderSurface;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (width, height) = app.editor().surface().size();
        let (response, painter) = ui.allocate_painter(
            egui::vec2(width as f32, height as f32),
            egui::Sense::click_and_drag(),
        );
        let canvas_rect = response.rect;

        // Handle input
        let events = app.input_mut().process_input(ctx, &response);
        for event in events {
            app.editor_mut().handle_event(event);
        }

        // Render the canvas
        painter.rect_filled(canvas_rect, 0.0, egui::Color32::WHITE);
        let editor = app.editor();
        editor
            .surface()
            .paint(&painter, canvas_rect.min, editor.config().handle_radius);
        painter.rect_stroke(canvas_rect, 0.0, egui::Stroke::new(1.0, egui::Color32::from_gray(120)));

        show_notices(app, ctx, canvas_rect);
    });
}

fn show_notices(app: &SketchApp, ctx: &egui::Context, canvas_rect: egui::Rect) {
    let editor = app.editor();
    let mut notices = editor.notices().visible(editor.now()).peekable();
    if notices.peek().is_none() {
        return;
    }

    egui::Area::new(egui::Id::new("notices"))
        .fixed_pos(canvas_rect.left_top() + egui::vec2(12.0, 12.0))
        .interactable(false)
        .show(ctx, |ui| {
            for notice in notices {
                let fill = match notice.level {
                    NoticeLevel::Info => egui::Color32::from_rgb(33, 150, 243),
                    NoticeLevel::Warning => egui::Color32::from_rgb(245, 166, 35),
                    NoticeLevel::Alert => egui::Color32::from_rgb(211, 47, 47),
                };
                egui::Frame::none()
                    .fill(fill)
                    .rounding(4.0)
                    .inner_margin(egui::Margin::symmetric(10.0, 6.0))
                    .show(ui, |ui| {
                        ui.colored_label(egui::Color32::WHITE, &notice.message);
                    });
                ui.add_space(4.0);
            }
        });
}
