use egui::{RichText, Ui};

use crate::model::task::{MaintenanceTask, TaskPriority, TaskStatus};
use crate::model::Resource;
use crate::ui::theme;

/// Render an inline editor for the selected task. Returns whether anything
/// was modified so the owner can mark the plan dirty.
pub fn show_task_editor(
    task: &mut MaintenanceTask,
    resources: &[Resource],
    ui: &mut Ui,
) -> bool {
    let mut changed = false;

    ui.add_space(6.0);
    ui.label(
        RichText::new("Edit Task")
            .strong()
            .size(13.0)
            .color(theme::TEXT_PRIMARY),
    );
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(5.0),
        inner_margin: egui::Margin::same(8.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;

        field_label(ui, "Title");
        let title_edit = ui.add_sized(
            [ui.available_width(), 24.0],
            egui::TextEdit::singleline(&mut task.title)
                .font(egui::FontId::proportional(12.0))
                .text_color(theme::TEXT_PRIMARY),
        );
        changed |= title_edit.changed();

        field_label(ui, "Description");
        let desc_edit = ui.add_sized(
            [ui.available_width(), 40.0],
            egui::TextEdit::multiline(&mut task.description)
                .font(egui::FontId::proportional(11.0))
                .text_color(theme::TEXT_SECONDARY),
        );
        changed |= desc_edit.changed();

        field_label(ui, "Assignee");
        let current = resources
            .iter()
            .find(|r| Some(r.id) == task.assignee)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| "Unassigned".to_string());
        egui::ComboBox::from_id_salt("assignee_combo")
            .selected_text(RichText::new(current).size(11.0))
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                if ui.selectable_label(task.assignee.is_none(), "Unassigned").clicked() {
                    task.assignee = None;
                    changed = true;
                }
                for resource in resources {
                    let is_current = task.assignee == Some(resource.id);
                    if ui.selectable_label(is_current, &resource.name).clicked() {
                        task.assignee = Some(resource.id);
                        changed = true;
                    }
                }
            });

        // Dates: pickers when the stored strings parse, raw text edits when
        // they do not so malformed data can be repaired in place.
        match (task.start(), task.end()) {
            (Some(mut start), Some(mut end)) => {
                ui.horizontal(|ui| {
                    field_label(ui, "Start");
                    let start_resp = ui.add(
                        egui_extras::DatePickerButton::new(&mut start).id_salt("editor_dp_start"),
                    );
                    field_label(ui, "End");
                    let end_resp = ui.add(
                        egui_extras::DatePickerButton::new(&mut end).id_salt("editor_dp_end"),
                    );
                    if start_resp.changed() || end_resp.changed() {
                        task.set_dates(start, end);
                        changed = true;
                    }
                });
            }
            _ => {
                field_label(ui, "Dates (YYYY-MM-DD)");
                let start_edit = ui.add_sized(
                    [ui.available_width(), 22.0],
                    egui::TextEdit::singleline(&mut task.start_date),
                );
                let end_edit = ui.add_sized(
                    [ui.available_width(), 22.0],
                    egui::TextEdit::singleline(&mut task.end_date),
                );
                if start_edit.changed() || end_edit.changed() {
                    if let (Some(s), Some(e)) = (task.start(), task.end()) {
                        task.set_dates(s, e);
                    }
                    changed = true;
                }
            }
        }

        ui.horizontal(|ui| {
            field_label(ui, "Status");
            egui::ComboBox::from_id_salt("status_combo")
                .selected_text(RichText::new(task.status.label()).size(11.0))
                .show_ui(ui, |ui| {
                    for status in TaskStatus::ALL {
                        if ui
                            .selectable_label(task.status == status, status.label())
                            .clicked()
                        {
                            task.status = status;
                            changed = true;
                        }
                    }
                });

            field_label(ui, "Priority");
            egui::ComboBox::from_id_salt("priority_combo")
                .selected_text(
                    RichText::new(task.priority.label())
                        .size(11.0)
                        .color(theme::priority_color(task.priority)),
                )
                .show_ui(ui, |ui| {
                    for priority in TaskPriority::ALL {
                        if ui
                            .selectable_label(task.priority == priority, priority.label())
                            .clicked()
                        {
                            task.priority = priority;
                            changed = true;
                        }
                    }
                });
        });
    });

    changed
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(
        RichText::new(text)
            .size(10.0)
            .color(theme::TEXT_DIM)
            .strong(),
    );
}
