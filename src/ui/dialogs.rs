use chrono::NaiveDate;
use egui::{Color32, Context, RichText, Window};
use gantt_timeline::model::TaskId;

use crate::app::GanttApp;
use crate::ui::theme;

/// What the open dialog creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Task,
    Subtask(TaskId),
}

/// Form state for the "Add New Task" / "Add New Subtask" modal.
#[derive(Debug, Clone)]
pub struct ItemDialog {
    pub kind: DialogKind,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Validation message from the last submit attempt.
    pub error: Option<String>,
}

impl ItemDialog {
    pub fn new(kind: DialogKind, today: NaiveDate) -> Self {
        Self {
            kind,
            name: String::new(),
            start: today,
            end: today,
            error: None,
        }
    }

    fn noun(&self) -> &'static str {
        match self.kind {
            DialogKind::Task => "Task",
            DialogKind::Subtask(_) => "Subtask",
        }
    }
}

/// Render the create dialog, if one is open.
pub fn show_item_dialog(app: &mut GanttApp, ctx: &Context) {
    let Some(dialog) = app.dialog.as_mut() else {
        return;
    };
    let noun = dialog.noun();
    let mut submit = false;
    let mut cancel = false;

    Window::new(RichText::new(format!("Add New {noun}")).strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);

            egui::Grid::new("item_dialog_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new(format!("{noun} Name")).color(theme::TEXT_SECONDARY));
                    let name_edit = ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut dialog.name)
                            .hint_text(format!("Enter {} name", noun.to_lowercase())),
                    );
                    if name_edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = true;
                    }
                    ui.end_row();

                    ui.label(RichText::new("Start Date").color(theme::TEXT_SECONDARY));
                    ui.add(egui_extras::DatePickerButton::new(&mut dialog.start).id_salt("dlg_dp_start"));
                    ui.end_row();

                    ui.label(RichText::new("End Date").color(theme::TEXT_SECONDARY));
                    ui.add(egui_extras::DatePickerButton::new(&mut dialog.end).id_salt("dlg_dp_end"));
                    ui.end_row();
                });

            if let Some(error) = &dialog.error {
                ui.add_space(4.0);
                ui.label(RichText::new(error).color(theme::TEXT_ERROR));
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let create_btn = egui::Button::new(
                    RichText::new(format!("Create {noun}")).color(Color32::WHITE),
                )
                .fill(theme::ACCENT)
                .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([120.0, 28.0], create_btn).clicked() {
                    submit = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    cancel = true;
                }
            });
            ui.add_space(2.0);
        });

    if cancel || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.dialog = None;
    } else if submit {
        app.submit_dialog();
    }
}
