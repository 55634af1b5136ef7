use gantt_timeline::io;
use gantt_timeline::model::{DragState, PointerEvent, Project, SubtaskId, TaskId, TimelineViewport};
use gantt_timeline::{ScheduleError, TimelineConfig};

use crate::ui;
use crate::ui::dialogs::{DialogKind, ItemDialog};
use crate::ui::task_list::TaskListAction;

/// Main application state.
pub struct GanttApp {
    pub project: Project,
    pub config: TimelineConfig,
    pub viewport: TimelineViewport,
    /// Held by the event loop and advanced on every pointer event.
    pub drag: DragState,
    pub dialog: Option<ItemDialog>,
    pub status_message: String,
    /// Chart scroll from the last frame, applied to the name list.
    pub scroll_y: f32,
}

impl GanttApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let config = TimelineConfig::load();
        let project = Project::sample();
        let viewport = TimelineViewport::fit(&project.tasks, &config);

        Self {
            project,
            config,
            viewport,
            drag: DragState::Idle,
            dialog: None,
            status_message: "Ready".to_string(),
            scroll_y: 0.0,
        }
    }

    // --- Pointer input ---

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let was_dragging = self.drag.is_dragging();
        self.drag = self.drag.update(event, &mut self.project, &self.viewport);

        if was_dragging && !self.drag.is_dragging() {
            self.status_message = "Timeline updated".to_string();
        }
    }

    // --- Task operations ---

    pub fn open_add_task(&mut self) {
        self.dialog = Some(ItemDialog::new(DialogKind::Task, today()));
    }

    pub fn open_add_subtask(&mut self, task_id: TaskId) {
        self.dialog = Some(ItemDialog::new(DialogKind::Subtask(task_id), today()));
    }

    /// Validate the open dialog and create the item; keeps the dialog open
    /// with an error message on rejection.
    pub fn submit_dialog(&mut self) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        let result = match dialog.kind {
            DialogKind::Task => self
                .project
                .add_task(&dialog.name, dialog.start, dialog.end)
                .map(|_| "Task added"),
            DialogKind::Subtask(task_id) => self
                .project
                .add_subtask(task_id, &dialog.name, dialog.start, dialog.end)
                .map(|_| "Subtask added"),
        };

        match result {
            Ok(message) => {
                self.dialog = None;
                self.status_message = message.to_string();
            }
            Err(e) => dialog.error = Some(dialog_message(&e)),
        }
    }

    pub fn delete_task(&mut self, id: TaskId) {
        let result = self.project.delete_task(id).map(|_| "Task deleted");
        self.report(result);
    }

    pub fn delete_subtask(&mut self, task_id: TaskId, sub_id: SubtaskId) {
        let result = self.project.delete_subtask(task_id, sub_id).map(|_| "Subtask deleted");
        self.report(result);
    }

    pub fn toggle_collapse(&mut self, id: TaskId) {
        if let Err(e) = self.project.toggle_collapse(id) {
            self.status_message = e.to_string();
        }
    }

    pub fn export_json(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(io::DEFAULT_EXPORT_NAME)
            .save_file()
        {
            match io::write_json(&self.project, &path) {
                Ok(()) => {
                    self.status_message = format!("Exported {} tasks", self.project.tasks.len())
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Export failed");
                    self.status_message = format!("Export failed: {}", e);
                }
            }
        }
    }

    fn report(&mut self, result: Result<&str, ScheduleError>) {
        self.status_message = match result {
            Ok(message) => message.to_string(),
            Err(e) => e.to_string(),
        };
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

fn dialog_message(error: &ScheduleError) -> String {
    match error {
        ScheduleError::EmptyName => "Please fill in all fields".to_string(),
        ScheduleError::InvalidRange { .. } => "End date cannot be before start date".to_string(),
        other => other.to_string(),
    }
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar")
            .exact_height(52.0)
            .show(ctx, |ui| {
                ui::toolbar::show_toolbar(self, ui);
            });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let subtasks: usize = self.project.tasks.iter().map(|t| t.subtasks.len()).sum();
                        ui.label(
                            egui::RichText::new(format!(
                                "Tasks: {} · Subtasks: {}",
                                self.project.tasks.len(),
                                subtasks
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: task names
        let mut list_action = TaskListAction::None;
        egui::SidePanel::left("task_panel")
            .exact_width(ui::theme::SIDE_PANEL_WIDTH)
            .resizable(false)
            .frame(egui::Frame::default().fill(ui::theme::BG_PANEL))
            .show(ctx, |ui| {
                list_action = ui::task_list::show_task_list(&self.project.tasks, self.scroll_y, ui);
            });

        match list_action {
            TaskListAction::AddSubtask(id) => self.open_add_subtask(id),
            TaskListAction::DeleteTask(id) => self.delete_task(id),
            TaskListAction::DeleteSubtask(task_id, sub_id) => self.delete_subtask(task_id, sub_id),
            TaskListAction::ToggleCollapse(id) => self.toggle_collapse(id),
            TaskListAction::None => {}
        }

        // Central panel: timeline
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let interaction =
                ui::gantt_chart::show_gantt_chart(&self.project.tasks, &self.viewport, &self.drag, ui);
            for event in interaction.events {
                self.handle_pointer(event);
            }
            if interaction.scroll_y != self.scroll_y {
                // The list was drawn with the old offset.
                self.scroll_y = interaction.scroll_y;
                ui.ctx().request_repaint();
            }
        });

        // The visible window follows the data, as zoom follows the toolbar.
        self.viewport.refit(&self.project.tasks, &self.config);

        if self.dialog.is_some() {
            ui::dialogs::show_item_dialog(self, ctx);
        }
    }
}
