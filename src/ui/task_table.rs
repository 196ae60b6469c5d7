use egui::{Color32, RichText, Ui};
use uuid::Uuid;

use crate::model::{MaintenanceTask, Resource};
use crate::ui::theme;

/// Actions that the task list pane can request.
pub enum TaskTableAction {
    None,
    Select(Uuid),
    Delete(Uuid),
    Add,
}

/// Render the left-side task list pane.
///
/// Rows use exactly the chart's row pitch and the scroll content starts with
/// a header band of the chart's header height, so the shared vertical offset
/// lines every row up with its bar. Returns the observed scroll offset for
/// the synchronizer.
pub fn show_task_table(
    tasks: &[MaintenanceTask],
    resources: &[Resource],
    visible: &[Uuid],
    selected: Option<Uuid>,
    scroll_target: Option<f32>,
    ui: &mut Ui,
) -> (TaskTableAction, f32) {
    let mut action = TaskTableAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Tasks")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", visible.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    let btn = egui::Button::new(
        RichText::new("＋  Add Task").color(Color32::WHITE).size(12.0),
    )
    .fill(theme::ACCENT)
    .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
        action = TaskTableAction::Add;
    }

    ui.add_space(6.0);
    ui.separator();

    let mut scroll_area = egui::ScrollArea::vertical()
        .id_salt("task-table")
        .auto_shrink([false, false])
        .scroll_bar_visibility(egui::scroll_area::ScrollBarVisibility::AlwaysHidden);
    if let Some(offset) = scroll_target {
        scroll_area = scroll_area.vertical_scroll_offset(offset);
    }

    let scroll_output = scroll_area.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 0.0;

        // Column captions, same height as the chart header band.
        ui.allocate_ui(egui::vec2(ui.available_width(), theme::HEADER_HEIGHT), |ui| {
            ui.horizontal_centered(|ui| {
                ui.add_space(14.0);
                ui.label(RichText::new("TASK").size(9.0).color(theme::TEXT_DIM).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new("DATES").size(9.0).color(theme::TEXT_DIM).strong());
                });
            });
        });

        let row_pitch = theme::ROW_HEIGHT + theme::ROW_GAP;
        let mut row = 0usize;
        for task in tasks {
            if !visible.contains(&task.id) {
                continue;
            }
            let is_selected = selected == Some(task.id);
            let row_bg = if is_selected {
                theme::BG_SELECTED
            } else if row % 2 == 0 {
                theme::BG_PANEL
            } else {
                theme::BG_DARK
            };
            row += 1;

            let (row_rect, row_click) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), row_pitch),
                egui::Sense::click(),
            );
            ui.painter().rect_filled(row_rect, egui::Rounding::same(4.0), row_bg);

            let mut row_ui = ui.new_child(
                egui::UiBuilder::new()
                    .max_rect(row_rect.shrink2(egui::vec2(6.0, 2.0)))
                    .layout(egui::Layout::left_to_right(egui::Align::Center)),
            );
            row_ui.spacing_mut().item_spacing.x = 6.0;

            // Color dot
            let (dot_rect, _) = row_ui
                .allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
            row_ui.painter().circle_filled(dot_rect.center(), 3.0, task.color);

            // Title and assignee
            let title_color = if is_selected {
                Color32::WHITE
            } else {
                theme::TEXT_PRIMARY
            };
            row_ui.add(
                egui::Label::new(RichText::new(&task.title).size(12.0).color(title_color))
                    .truncate(),
            );
            let assignee = resources
                .iter()
                .find(|r| Some(r.id) == task.assignee)
                .map(|r| r.name.as_str())
                .unwrap_or("");
            if !assignee.is_empty() {
                row_ui.label(RichText::new(assignee).size(10.0).color(theme::TEXT_DIM));
            }

            row_ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                let del_btn = ui.add(
                    egui::Button::new(RichText::new("✕").size(10.0).color(theme::TEXT_DIM))
                        .frame(false),
                );
                if del_btn.on_hover_text("Delete task").clicked() {
                    action = TaskTableAction::Delete(task.id);
                }

                // Status chip
                ui.label(
                    RichText::new(task.status.label())
                        .size(9.5)
                        .color(theme::status_color(task.status)),
                );

                // Effective dates so a live drag is mirrored in the list.
                let dates = match (task.effective_start(), task.effective_end()) {
                    (Some(s), Some(e)) => {
                        format!("{} → {}", s.format("%m/%d"), e.format("%m/%d"))
                    }
                    _ => "—".to_string(),
                };
                ui.label(RichText::new(dates).size(10.0).color(theme::TEXT_SECONDARY));
            });

            if row_click.clicked() {
                action = TaskTableAction::Select(task.id);
            }
        }
    });

    (action, scroll_output.state.offset.y)
}
