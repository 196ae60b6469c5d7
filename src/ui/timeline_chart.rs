use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::model::task::MaintenanceTask;
use crate::model::timeline::{bar_geometry, TimeRange};
use crate::model::{DragEdge, Interaction, Resource};
use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_PADDING: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

/// Result details from interactions on the timeline surface.
#[derive(Debug, Clone, Default)]
pub struct ChartOutput {
    /// A live pending update happened this frame (non-final).
    pub changed: bool,
    /// A drag finished and this task's dates were committed (final).
    pub committed: Option<Uuid>,
    /// Observed vertical scroll offset, fed to the scroll synchronizer.
    pub scroll_offset: f32,
}

/// Pointer events gathered during the draw pass and applied to the state
/// machine afterwards, so bar hit-testing never aliases the task slice.
enum PointerEvent {
    BeginMove(Uuid, f32),
    BeginResize(Uuid, DragEdge, f32),
    Moved(f32),
    Released,
}

/// Render the timeline surface (right pane): month header, day grid, today
/// marker and one draggable bar per visible task.
pub fn show_timeline(
    tasks: &mut Vec<MaintenanceTask>,
    resources: &[Resource],
    visible: &[Uuid],
    interaction: &mut Interaction,
    selected: &mut Option<Uuid>,
    scroll_target: Option<f32>,
    ui: &mut Ui,
) -> ChartOutput {
    let mut output = ChartOutput::default();

    // The window tracks every task, pending overrides included, so a bar
    // dragged toward an edge stretches the window live.
    let range = TimeRange::from_tasks(tasks);
    let total_days = range.total_days();

    let chart_width = ui.available_width();
    let chart_height =
        HEADER_HEIGHT + (visible.len() as f32 * (ROW_HEIGHT + ROW_PADDING)) + 40.0;
    let day_width = chart_width / total_days as f32;

    let mut scroll_area = egui::ScrollArea::vertical()
        .id_salt("timeline-chart")
        .auto_shrink([false, false]);
    if let Some(offset) = scroll_target {
        scroll_area = scroll_area.vertical_scroll_offset(offset);
    }

    let scroll_output = scroll_area.show(ui, |ui| {
        let (response, painter) = ui.allocate_painter(
            Vec2::new(chart_width, chart_height.max(ui.available_height())),
            Sense::click(),
        );
        let origin = response.rect.min;
        let mut consumed_click = false;
        let mut events: Vec<PointerEvent> = Vec::new();

        painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

        draw_header_and_grid(&painter, origin, &range, chart_width, chart_height);
        draw_today_line(&painter, origin, &range, day_width, chart_height);

        // Alternating row backgrounds under the bars.
        for row in 0..visible.len() {
            let y = origin.y + HEADER_HEIGHT + row as f32 * (ROW_HEIGHT + ROW_PADDING);
            if row % 2 == 0 {
                painter.rect_filled(
                    Rect::from_min_size(
                        Pos2::new(origin.x, y),
                        Vec2::new(chart_width, ROW_HEIGHT + ROW_PADDING),
                    ),
                    0.0,
                    theme::BG_PANEL,
                );
            }
            painter.line_segment(
                [
                    Pos2::new(origin.x, y + ROW_HEIGHT + ROW_PADDING),
                    Pos2::new(origin.x + chart_width, y + ROW_HEIGHT + ROW_PADDING),
                ],
                Stroke::new(0.5, theme::BORDER_SUBTLE),
            );
        }

        let mut row = 0usize;
        for task in tasks.iter() {
            if !visible.contains(&task.id) {
                continue;
            }
            let y = origin.y
                + HEADER_HEIGHT
                + row as f32 * (ROW_HEIGHT + ROW_PADDING)
                + ROW_PADDING;
            row += 1;

            let Some(geo) = bar_geometry(&range, task) else {
                continue;
            };
            let is_selected = *selected == Some(task.id);
            let bar_rect = draw_task_bar(
                &painter,
                origin,
                chart_width,
                geo.offset_percent,
                geo.width_percent,
                task,
                y,
                is_selected,
            );

            let bar_response = ui.interact(
                bar_rect,
                ui.make_persistent_id(("task-bar", task.id)),
                Sense::click_and_drag(),
            );
            let left_handle_rect = Rect::from_min_max(
                Pos2::new(bar_rect.left() - HANDLE_WIDTH * 0.5, bar_rect.top()),
                Pos2::new(bar_rect.left() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
            );
            let right_handle_rect = Rect::from_min_max(
                Pos2::new(bar_rect.right() - HANDLE_WIDTH * 0.5, bar_rect.top()),
                Pos2::new(bar_rect.right() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
            );
            let left_response = ui.interact(
                left_handle_rect.expand(4.0),
                ui.make_persistent_id(("task-resize-left", task.id)),
                Sense::drag(),
            );
            let right_response = ui.interact(
                right_handle_rect.expand(4.0),
                ui.make_persistent_id(("task-resize-right", task.id)),
                Sense::drag(),
            );

            if bar_response.clicked() {
                *selected = Some(task.id);
                consumed_click = true;
            }

            let pointer_x = |r: &egui::Response| r.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);

            if left_response.drag_started() {
                events.push(PointerEvent::BeginResize(
                    task.id,
                    DragEdge::Start,
                    pointer_x(&left_response),
                ));
            }
            if right_response.drag_started() {
                events.push(PointerEvent::BeginResize(
                    task.id,
                    DragEdge::End,
                    pointer_x(&right_response),
                ));
            }
            if bar_response.drag_started() {
                events.push(PointerEvent::BeginMove(task.id, pointer_x(&bar_response)));
            }
            if bar_response.drag_started()
                || left_response.drag_started()
                || right_response.drag_started()
            {
                *selected = Some(task.id);
                consumed_click = true;
            }

            if left_response.dragged() || right_response.dragged() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                let r = if left_response.dragged() {
                    &left_response
                } else {
                    &right_response
                };
                events.push(PointerEvent::Moved(pointer_x(r)));
            } else if bar_response.dragged() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
                events.push(PointerEvent::Moved(pointer_x(&bar_response)));
            }

            if left_response.drag_stopped()
                || right_response.drag_stopped()
                || bar_response.drag_stopped()
            {
                events.push(PointerEvent::Released);
            }

            // Handle affordances
            if is_selected || left_response.hovered() || right_response.hovered() {
                if left_response.hovered() || right_response.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                } else if bar_response.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                let handle_h = bar_rect.height() * 0.55;
                let handle_y = bar_rect.center().y - handle_h / 2.0;
                let lh = Rect::from_min_size(
                    Pos2::new(bar_rect.left() - 1.5, handle_y),
                    Vec2::new(4.0, handle_h),
                );
                let rh = Rect::from_min_size(
                    Pos2::new(bar_rect.right() - 2.5, handle_y),
                    Vec2::new(4.0, handle_h),
                );
                painter.rect_filled(lh, Rounding::same(2.0), theme::HANDLE_COLOR);
                painter.rect_filled(rh, Rounding::same(2.0), theme::HANDLE_COLOR);
            }

            // Tooltip on hover
            if bar_response.hovered() || left_response.hovered() || right_response.hovered() {
                let assignee = resources
                    .iter()
                    .find(|r| Some(r.id) == task.assignee)
                    .map(|r| r.name.as_str())
                    .unwrap_or("Unassigned");
                egui::show_tooltip_at_pointer(
                    ui.ctx(),
                    ui.layer_id(),
                    egui::Id::new(("task-tip", task.id)),
                    |ui| {
                        ui.strong(&task.title);
                        ui.label(format!("{} → {}", task.start_date, task.end_date));
                        ui.label(assignee.to_string());
                        ui.label(task.status.label());
                    },
                );
            }
        }

        // Empty click on background clears selection
        if response.clicked() && !consumed_click {
            *selected = None;
        }

        // Apply gathered pointer events to the state machine.
        for event in events {
            match event {
                PointerEvent::BeginMove(id, x) => interaction.begin_move(id, x),
                PointerEvent::BeginResize(id, edge, x) => interaction.begin_resize(id, edge, x),
                PointerEvent::Moved(x) => {
                    output.changed |= interaction.pointer_moved(tasks, x, chart_width, total_days);
                }
                PointerEvent::Released => {
                    output.committed = interaction.release(tasks);
                }
            }
        }

        // Escape aborts an in-flight drag, restoring committed dates.
        if !interaction.is_idle() && ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            interaction.cancel(tasks);
            output.changed = true;
        }
    });

    output.scroll_offset = scroll_output.state.offset.y;
    output
}

fn draw_header_and_grid(
    painter: &egui::Painter,
    origin: Pos2,
    range: &TimeRange,
    width: f32,
    height: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let total_days = range.total_days();
    let day_width = width / total_days as f32;

    // Month bands, proportional to their visible slice.
    let mut x = origin.x;
    for segment in range.month_segments() {
        let seg_width = segment.width_percent / 100.0 * width;

        painter.line_segment(
            [
                Pos2::new(x, origin.y),
                Pos2::new(x, origin.y + height),
            ],
            Stroke::new(1.0, theme::GRID_LINE),
        );
        // Label only when the band can fit it.
        if seg_width > 40.0 {
            painter.text(
                Pos2::new(x + 5.0, origin.y + 12.0),
                egui::Align2::LEFT_CENTER,
                segment.label,
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }
        x += seg_width;
    }

    // Day separators, skipped when the grid gets too dense to read.
    if day_width >= 4.0 {
        for day in 0..total_days {
            let x = origin.x + day as f32 * day_width;
            painter.line_segment(
                [
                    Pos2::new(x, origin.y + HEADER_HEIGHT),
                    Pos2::new(x, origin.y + height),
                ],
                Stroke::new(0.5, theme::GRID_LINE),
            );
            if day_width >= 20.0 {
                let date = range.start + chrono::Duration::days(day);
                painter.text(
                    Pos2::new(x + 3.0, origin.y + 28.0),
                    egui::Align2::LEFT_CENTER,
                    date.format("%d").to_string(),
                    theme::font_sub(),
                    theme::TEXT_SECONDARY,
                );
            }
        }
    }
}

fn draw_today_line(
    painter: &egui::Painter,
    origin: Pos2,
    range: &TimeRange,
    day_width: f32,
    height: f32,
) {
    let Some(offset) = range.today_offset() else {
        return;
    };
    let x = origin.x + offset as f32 * day_width;

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

#[allow(clippy::too_many_arguments)]
fn draw_task_bar(
    painter: &egui::Painter,
    origin: Pos2,
    chart_width: f32,
    offset_percent: f32,
    width_percent: f32,
    task: &MaintenanceTask,
    y: f32,
    is_selected: bool,
) -> Rect {
    let x_start = origin.x + offset_percent / 100.0 * chart_width;
    let bar_width = (width_percent / 100.0 * chart_width).max(6.0);
    let inset = theme::BAR_INSET;

    let bar_rect = Rect::from_min_size(
        Pos2::new(x_start, y + inset),
        Vec2::new(bar_width, ROW_HEIGHT - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    // Soft shadow
    let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));

    painter.rect_filled(bar_rect, rounding, task.color);
    // Lighter top highlight
    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_width, (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    // Status tick at the left edge.
    let status_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(3.0, bar_rect.height()),
    );
    painter.rect_filled(
        status_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: 0.0,
            sw: theme::BAR_ROUNDING,
            se: 0.0,
        },
        theme::status_color(task.status),
    );

    // A mid-drag bar glows so the live feedback is unmistakable.
    if task.pending.is_some() {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::ACCENT),
        );
    } else if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Task title on bar (single line, clipped to bar bounds)
    if bar_width > 30.0 {
        let galley = painter.layout_no_wrap(
            task.title.clone(),
            theme::font_bar(),
            theme::TEXT_ON_BAR,
        );
        let clipped = painter.with_clip_rect(bar_rect);
        let text_y = y + inset + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }

    bar_rect
}
