use egui::{RichText, Ui};
use egui_phosphor::regular as icon;
use gantt_timeline::model::{SubtaskId, Task, TaskId};

use crate::ui::theme;

/// Actions that the task list can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskListAction {
    None,
    AddSubtask(TaskId),
    DeleteTask(TaskId),
    DeleteSubtask(TaskId, SubtaskId),
    ToggleCollapse(TaskId),
}

/// Render the left-side list of task names, one row per timeline row.
///
/// The list has no scrolling of its own; it is held at the chart's vertical
/// offset `scroll_y` so names stay level with their bars.
pub fn show_task_list(tasks: &[Task], scroll_y: f32, ui: &mut Ui) -> TaskListAction {
    let mut action = TaskListAction::None;

    ui.spacing_mut().item_spacing.y = 0.0;
    row(ui, theme::HEADER_HEIGHT, |ui| {
        ui.add_space(8.0);
        ui.label(RichText::new("Task Name").strong().size(13.0));
    });

    egui::ScrollArea::vertical()
        .id_salt("task_list_scroll")
        .auto_shrink([false, false])
        .enable_scrolling(false)
        .scroll_bar_visibility(egui::scroll_area::ScrollBarVisibility::AlwaysHidden)
        .vertical_scroll_offset(scroll_y)
        .show(ui, |ui| {
            for task in tasks {
                row(ui, theme::ROW_HEIGHT, |ui| {
                    if task.subtasks.is_empty() {
                        ui.add_space(26.0);
                    } else {
                        let chevron = if task.collapsed { icon::CARET_RIGHT } else { icon::CARET_DOWN };
                        if ui
                            .small_button(chevron)
                            .on_hover_text("Toggle subtasks")
                            .clicked()
                        {
                            action = TaskListAction::ToggleCollapse(task.id);
                        }
                    }
                    ui.add(egui::Label::new(RichText::new(&task.name).strong()).truncate());

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .small_button(RichText::new(icon::TRASH).color(theme::DANGER))
                            .on_hover_text("Delete Task")
                            .clicked()
                        {
                            action = TaskListAction::DeleteTask(task.id);
                        }
                        if ui.small_button(icon::PLUS).on_hover_text("Add Subtask").clicked() {
                            action = TaskListAction::AddSubtask(task.id);
                        }
                    });
                });

                if task.collapsed {
                    continue;
                }
                for sub in &task.subtasks {
                    row(ui, theme::ROW_HEIGHT, |ui| {
                        ui.add_space(34.0);
                        ui.add(
                            egui::Label::new(RichText::new(&sub.name).color(theme::TEXT_SECONDARY))
                                .truncate(),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui
                                .small_button(RichText::new(icon::TRASH).color(theme::DANGER))
                                .on_hover_text("Delete Subtask")
                                .clicked()
                            {
                                action = TaskListAction::DeleteSubtask(task.id, sub.id);
                            }
                        });
                    });
                }
            }
        });

    action
}

/// Fixed-height row so names line up with the timeline bars.
fn row(ui: &mut Ui, height: f32, add_contents: impl FnOnce(&mut Ui)) {
    ui.allocate_ui_with_layout(
        egui::vec2(ui.available_width(), height),
        egui::Layout::left_to_right(egui::Align::Center),
        |ui| {
            ui.set_min_height(height);
            add_contents(ui);
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tasks(count: usize) -> Vec<Task> {
        let start = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 12, 5).unwrap();
        (0..count).map(|i| Task::new(format!("Task {i}"), start, end)).collect()
    }

    #[test]
    fn list_follows_chart_scroll_offset() {
        let ctx = egui::Context::default();
        let tasks = tasks(40);
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(400.0, 600.0),
            )),
            ..Default::default()
        };

        let mut offset = None;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let action = show_task_list(&tasks, 120.0, ui);
                assert_eq!(action, TaskListAction::None);
                let id = ui.make_persistent_id("task_list_scroll");
                offset = egui::scroll_area::State::load(ui.ctx(), id).map(|s| s.offset.y);
            });
        });

        assert_eq!(offset, Some(120.0));
    }
}
