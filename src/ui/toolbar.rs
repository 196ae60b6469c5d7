use egui::{RichText, Ui};

use crate::app::PlannerApp;
use crate::ui::theme;

/// Render the top toolbar: file operations, CSV exchange, search.
pub fn show_toolbar(app: &mut PlannerApp, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.add_space(2.0);
        ui.label(
            RichText::new(&app.plan.name)
                .strong()
                .size(13.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(8.0);
        ui.separator();

        if ui.button("New").clicked() {
            app.new_plan();
        }
        if ui.button("Open…").clicked() {
            app.open_plan();
        }
        if ui.button("Save").clicked() {
            app.save_plan();
        }

        ui.separator();

        if ui.button("Import CSV…").clicked() {
            app.import_csv();
        }
        if ui.button("Export CSV…").clicked() {
            app.export_csv();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
            }
            ui.add_space(6.0);
            ui.add_sized(
                [160.0, 22.0],
                egui::TextEdit::singleline(&mut app.search_query)
                    .hint_text("Search tasks…")
                    .font(egui::FontId::proportional(11.5)),
            );
            ui.label(RichText::new("Filter").size(10.0).color(theme::TEXT_DIM));
        });
    });
}
