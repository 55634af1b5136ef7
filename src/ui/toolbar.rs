use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icon;

use crate::app::GanttApp;
use crate::ui::theme;

/// Render the top toolbar: title, zoom, add task, export.
pub fn show_toolbar(app: &mut GanttApp, ui: &mut Ui) {
    ui.horizontal_centered(|ui| {
        ui.label(RichText::new("Gantt Timeline").strong().size(18.0));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let export_btn = egui::Button::new(
                RichText::new(format!("{}  Export JSON", icon::DOWNLOAD_SIMPLE)).color(Color32::WHITE),
            )
            .fill(theme::EXPORT);
            if ui.add(export_btn).clicked() {
                app.export_json();
            }

            let add_btn = egui::Button::new(
                RichText::new(format!("{}  Add Task", icon::PLUS)).color(Color32::WHITE),
            )
            .fill(theme::ACCENT);
            if ui.add(add_btn).clicked() {
                app.open_add_task();
            }

            if ui
                .button(icon::MAGNIFYING_GLASS_PLUS)
                .on_hover_text("Zoom In")
                .clicked()
            {
                app.viewport.zoom_in();
            }
            if ui
                .button(icon::MAGNIFYING_GLASS_MINUS)
                .on_hover_text("Zoom Out")
                .clicked()
            {
                app.viewport.zoom_out();
            }
            ui.label(
                RichText::new(format!("{:.0} px/day", app.viewport.pixels_per_day))
                    .size(10.5)
                    .color(theme::TEXT_DIM),
            );
        });
    });
}
