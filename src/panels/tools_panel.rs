use egui::color_picker::{color_edit_button_srgba, Alpha};

use crate::tools::ToolMode;
use crate::SketchApp;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(140.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.session().mode();
            let picker_available = app.session().picker_available();

            for mode in ToolMode::ALL {
                // the picker control is only offered when an eyedropper exists
                let enabled = mode != ToolMode::Picker || picker_available;
                let label = egui::SelectableLabel::new(
                    active == mode,
                    format!("{} {}", mode.icon(), mode.name()),
                );
                if ui.add_enabled(enabled, label).clicked() {
                    app.select_mode(mode);
                }
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = app.session().color();
                if color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                    app.session_mut().set_color(color);
                }
            });
            ui.horizontal(|ui| {
                ui.label("Hex:");
                let field = egui::TextEdit::singleline(app.hex_input_mut())
                    .font(egui::TextStyle::Monospace)
                    .desired_width(80.0);
                let response = ui.add(field);
                if response.lost_focus() {
                    app.apply_hex_input();
                } else if !response.has_focus() {
                    app.sync_hex_input();
                }
            });
            ui.separator();

            if ui.button("🗑 Clear").clicked() {
                app.session_mut().clear();
            }
            if ui.button("💾 Save").clicked() {
                app.export_drawing();
            }
        });
}
