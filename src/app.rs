use chrono::{Duration, NaiveDate};
use std::path::PathBuf;
use uuid::Uuid;

use crate::io::config::AppConfig;
use crate::model::task::TaskPriority;
use crate::model::{Interaction, MaintenancePlan, MaintenanceTask, Resource, TimeRange};
use crate::ui;
use crate::ui::scroll_sync::{Pane, ScrollSync};

/// Main application state. Owns the task list the timeline engine reads and
/// proposes updates to.
pub struct PlannerApp {
    pub plan: MaintenancePlan,
    pub interaction: Interaction,
    pub scroll_sync: ScrollSync,
    pub file_path: Option<PathBuf>,
    pub selected_task: Option<Uuid>,

    // Dialog state
    pub show_add_task: bool,
    pub show_about: bool,
    pub new_task_title: String,
    pub new_task_start: NaiveDate,
    pub new_task_end: NaiveDate,
    pub new_task_assignee: Option<Uuid>,
    pub new_task_priority: TaskPriority,

    // Filter / search
    pub search_query: String,

    // Status message
    pub status_message: String,

    config: AppConfig,
}

impl PlannerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load();

        let (plan, file_path) = match &config.last_plan {
            Some(path) => match crate::io::load_plan(path) {
                Ok(plan) => (plan, Some(path.clone())),
                Err(e) => {
                    log::warn!("could not reopen {}: {}", path.display(), e);
                    (Self::sample_plan(), None)
                }
            },
            None => (Self::sample_plan(), None),
        };

        let today = crate::model::timeline::today();
        Self {
            plan,
            interaction: Interaction::Idle,
            scroll_sync: ScrollSync::default(),
            file_path,
            selected_task: None,
            show_add_task: false,
            show_about: false,
            new_task_title: String::new(),
            new_task_start: today,
            new_task_end: today + Duration::days(7),
            new_task_assignee: None,
            new_task_priority: TaskPriority::Medium,
            search_query: String::new(),
            status_message: "Ready".to_string(),
            config,
        }
    }

    /// Generate a sample plan for demonstration.
    fn sample_plan() -> MaintenancePlan {
        use crate::model::task::TaskStatus;

        let today = crate::model::timeline::today();
        let mut plan = MaintenancePlan::new("Plant Maintenance");

        let hansen = Resource::new("M. Hansen");
        let crew = Resource::new("Facilities Crew");
        let hvac = Resource::new("HVAC Contractor");

        let mut add = |title: &str,
                       start_off: i64,
                       end_off: i64,
                       assignee: &Resource,
                       status: TaskStatus,
                       priority: TaskPriority| {
            let mut t = MaintenanceTask::new(
                title,
                today + Duration::days(start_off),
                today + Duration::days(end_off),
            );
            t.assignee = Some(assignee.id);
            t.status = status;
            t.priority = priority;
            t.color = ui::theme::task_color(plan.tasks.len());
            plan.tasks.push(t);
        };

        add("Chiller inspection", -6, -3, &hvac, TaskStatus::Completed, TaskPriority::High);
        add("Pump seal replacement", -4, 1, &hansen, TaskStatus::InProgress, TaskPriority::Critical);
        add("Roof drain cleaning", -2, -1, &crew, TaskStatus::Overdue, TaskPriority::Medium);
        add("Fire damper test", 1, 3, &crew, TaskStatus::Scheduled, TaskPriority::High);
        add("Boiler descaling", 4, 9, &hvac, TaskStatus::Scheduled, TaskPriority::Medium);
        add("Elevator load test", 8, 8, &hansen, TaskStatus::Scheduled, TaskPriority::Low);
        add("Air filter rotation", 12, 16, &crew, TaskStatus::Scheduled, TaskPriority::Low);

        plan.resources = vec![hansen, crew, hvac];
        plan
    }

    // --- File operations ---

    pub fn new_plan(&mut self) {
        self.plan = MaintenancePlan::default();
        self.file_path = None;
        self.selected_task = None;
        self.interaction = Interaction::Idle;
        self.status_message = "New plan created".to_string();
    }

    pub fn open_plan(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Maintenance Plan", &["plan.json", "json"])
            .pick_file()
        {
            match crate::io::load_plan(&path) {
                Ok(plan) => {
                    self.plan = plan;
                    self.selected_task = None;
                    self.interaction = Interaction::Idle;
                    self.remember_path(path);
                    self.status_message = "Plan loaded".to_string();
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_plan(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.plan.touch();
            match crate::io::save_plan(&self.plan, &path) {
                Ok(()) => self.status_message = "Plan saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        } else {
            self.save_plan_as();
        }
    }

    pub fn save_plan_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Maintenance Plan", &["plan.json", "json"])
            .set_file_name(format!("{}.plan.json", self.plan.name))
            .save_file()
        {
            self.plan.touch();
            match crate::io::save_plan(&self.plan, &path) {
                Ok(()) => {
                    self.remember_path(path);
                    self.status_message = "Plan saved".to_string();
                }
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    pub fn import_csv(&mut self) {
        if !self.plan.tasks.is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("Import CSV")
                .set_description("This will replace the current plan. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match crate::io::csv_import::import_csv(&path) {
                Ok((tasks, resources, skipped)) => {
                    let plan_name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("Imported Plan")
                        .to_string();

                    let count = tasks.len();
                    self.plan = MaintenancePlan::new(plan_name);
                    self.plan.tasks = tasks;
                    self.plan.resources = resources;
                    self.file_path = None;
                    self.selected_task = None;
                    self.interaction = Interaction::Idle;

                    self.status_message = if skipped > 0 {
                        format!("Imported {} tasks ({} rows skipped)", count, skipped)
                    } else {
                        format!("Imported {} tasks", count)
                    };
                }
                Err(e) => {
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.plan.tasks.is_empty() {
            self.status_message = "Nothing to export — plan has no tasks".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.plan.name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match crate::io::csv_export::export_csv(&self.plan.tasks, &self.plan.resources, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} tasks to CSV", count);
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    fn remember_path(&mut self, path: PathBuf) {
        self.file_path = Some(path.clone());
        self.config.last_plan = Some(path);
        self.config.save();
    }

    // --- Task operations ---

    pub fn create_task_from_dialog(&mut self) {
        let title = if self.new_task_title.is_empty() {
            "New Task".to_string()
        } else {
            self.new_task_title.clone()
        };

        let start = self.new_task_start;
        let end = self.new_task_end.max(start);

        let mut task = MaintenanceTask::new(title, start, end);
        task.assignee = self.new_task_assignee;
        task.priority = self.new_task_priority;
        task.color = ui::theme::task_color(self.plan.tasks.len());

        self.selected_task = Some(task.id);
        self.plan.tasks.push(task);
        self.plan.touch();
        self.reset_dialog_fields();
        self.status_message = "Task added".to_string();
    }

    pub fn delete_task(&mut self, id: Uuid) {
        self.plan.tasks.retain(|t| t.id != id);
        self.plan.touch();
        if self.selected_task == Some(id) {
            self.selected_task = None;
        }
        self.status_message = "Task deleted".to_string();
    }

    fn reset_dialog_fields(&mut self) {
        let today = crate::model::timeline::today();
        self.new_task_title = String::new();
        self.new_task_start = today;
        self.new_task_end = today + Duration::days(7);
        self.new_task_assignee = None;
        self.new_task_priority = TaskPriority::Medium;
    }

    /// Ids of tasks matching the search query, in list order. Both panes
    /// render exactly this set so their rows stay aligned.
    fn visible_tasks(&self) -> Vec<Uuid> {
        let query = self.search_query.trim().to_lowercase();
        self.plan
            .tasks
            .iter()
            .filter(|t| {
                if query.is_empty() {
                    return true;
                }
                t.title.to_lowercase().contains(&query)
                    || self
                        .plan
                        .resource_name(t.assignee)
                        .to_lowercase()
                        .contains(&query)
            })
            .map(|t| t.id)
            .collect()
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S)) {
            self.save_plan();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let range = TimeRange::from_tasks(&self.plan.tasks);
                        ui.label(
                            egui::RichText::new(format!(
                                "{} – {} ({} days)",
                                range.start.format("%b %d"),
                                range.end.format("%b %d"),
                                range.total_days()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(format!("Tasks: {}", self.plan.tasks.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        let visible = self.visible_tasks();
        let list_target = self.scroll_sync.target_for(Pane::TaskList);
        let chart_target = self.scroll_sync.target_for(Pane::Chart);

        // Left panel: editor + task list
        let mut table_action = ui::task_table::TaskTableAction::None;
        let mut editor_changed = false;
        let mut list_offset = self.scroll_sync.offset();
        egui::SidePanel::left("task_panel")
            .default_width(340.0)
            .min_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                if let Some(sel_id) = self.selected_task {
                    let resources = self.plan.resources.clone();
                    if let Some(task) = self.plan.tasks.iter_mut().find(|t| t.id == sel_id) {
                        editor_changed = ui::task_editor::show_task_editor(task, &resources, ui);
                    }
                    ui.add_space(4.0);
                    ui.separator();
                    ui.add_space(2.0);
                }

                let (action, offset) = ui::task_table::show_task_table(
                    &self.plan.tasks,
                    &self.plan.resources,
                    &visible,
                    self.selected_task,
                    list_target,
                    ui,
                );
                table_action = action;
                list_offset = offset;
            });

        match table_action {
            ui::task_table::TaskTableAction::Select(id) => {
                self.selected_task = Some(id);
            }
            ui::task_table::TaskTableAction::Delete(id) => {
                self.delete_task(id);
            }
            ui::task_table::TaskTableAction::Add => {
                self.show_add_task = true;
            }
            ui::task_table::TaskTableAction::None => {}
        }

        if editor_changed {
            self.plan.touch();
            self.status_message = "Task updated".to_string();
        }

        // Central panel: timeline
        let mut chart_offset = self.scroll_sync.offset();
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let output = ui::timeline_chart::show_timeline(
                &mut self.plan.tasks,
                &self.plan.resources,
                &visible,
                &mut self.interaction,
                &mut self.selected_task,
                chart_target,
                ui,
            );
            chart_offset = output.scroll_offset;

            if let Some(id) = output.committed {
                self.plan.touch();
                if let Some(task) = self.plan.tasks.iter().find(|t| t.id == id) {
                    self.status_message = format!(
                        "Rescheduled '{}' ({} → {})",
                        task.title, task.start_date, task.end_date
                    );
                }
            }
        });

        self.scroll_sync.end_frame(list_offset, chart_offset);

        // Dialogs
        if self.show_add_task {
            ui::dialogs::show_add_task_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
