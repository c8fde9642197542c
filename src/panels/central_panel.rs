use crate::SketchApp;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let canvas_rect = ui.available_rect_before_wrap();
            let response = ui.allocate_rect(canvas_rect, egui::Sense::click_and_drag());

            app.fit_canvas(canvas_rect, ctx.pixels_per_point());
            app.handle_input(ctx);

            if response.hovered() {
                ctx.set_cursor_icon(app.session().cursor().cursor_icon());
            }

            // Render the canvas
            if let Some(texture) = app.canvas_texture(ctx) {
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                ui.painter()
                    .image(texture.id(), canvas_rect, uv, egui::Color32::WHITE);
            }
        });
}
