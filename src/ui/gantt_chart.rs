use chrono::Datelike;
use egui::{Color32, Pos2, Rect, Response, Rounding, Sense, Stroke, Ui, Vec2};
use gantt_timeline::model::{
    BarLayout, BarRegion, DragState, PointerEvent, RangeTarget, Task, TimelineViewport,
};

use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

/// Pointer events collected while drawing the chart, in dispatch order.
#[derive(Debug, Default)]
pub struct ChartInteraction {
    pub events: Vec<PointerEvent>,
    /// Vertical scroll of the chart body; the name list follows it.
    pub scroll_y: f32,
}

/// Render the timeline (right panel) and translate pointer input into
/// drag events. The caller feeds `events` through the drag state machine.
pub fn show_gantt_chart(
    tasks: &[Task],
    viewport: &TimelineViewport,
    drag: &DragState,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let rows = viewport.layout_rows(tasks);
    let available = ui.available_size();
    let chart_width = viewport.total_width().max(available.x);
    let chart_height = HEADER_HEIGHT + rows.len() as f32 * ROW_HEIGHT;

    let output = egui::ScrollArea::both()
        .id_salt("timeline_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::hover(),
            );
            let origin = response.rect.min;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            for layout in &rows {
                let y = origin.y + HEADER_HEIGHT + layout.row as f32 * ROW_HEIGHT;
                let row_bg = match layout.target {
                    RangeTarget::Task(_) => theme::BG_DARK,
                    RangeTarget::Subtask(..) => theme::BG_SUBTASK_ROW,
                };
                painter.rect_filled(
                    Rect::from_min_size(Pos2::new(origin.x, y), Vec2::new(chart_width, ROW_HEIGHT)),
                    0.0,
                    row_bg,
                );
                painter.line_segment(
                    [
                        Pos2::new(origin.x, y + ROW_HEIGHT),
                        Pos2::new(origin.x + chart_width, y + ROW_HEIGHT),
                    ],
                    Stroke::new(0.5, theme::BORDER_SUBTLE),
                );
            }

            draw_timeline_header(&painter, origin, viewport, chart_height.max(available.y));

            for layout in &rows {
                let Some((name, days)) = item_info(tasks, layout.target) else {
                    continue;
                };
                if let Some(event) = bar_interaction(ui, &painter, origin, layout, name, days, drag) {
                    interaction.events.push(event);
                }
            }
        });
    interaction.scroll_y = output.state.offset.y;

    // The drag continues even when the pointer leaves the bar or the panel.
    if drag.is_dragging() {
        let (pos, released) = ui.input(|i| (i.pointer.latest_pos(), i.pointer.any_released()));
        if let Some(pos) = pos {
            interaction.events.push(PointerEvent::Move { x: pos.x });
        }
        if released {
            interaction.events.push(PointerEvent::Up);
        }
        let cursor = match drag.session().map(|s| s.action) {
            Some(gantt_timeline::model::DragAction::Move) => egui::CursorIcon::Grabbing,
            _ => egui::CursorIcon::ResizeHorizontal,
        };
        ui.ctx().set_cursor_icon(cursor);
    }

    interaction
}

/// Name and length in days of the item behind a bar.
fn item_info(tasks: &[Task], target: RangeTarget) -> Option<(&str, i64)> {
    match target {
        RangeTarget::Task(id) => tasks
            .iter()
            .find(|t| t.id == id)
            .map(|t| (t.name.as_str(), t.duration_days())),
        RangeTarget::Subtask(task_id, sub_id) => tasks
            .iter()
            .find(|t| t.id == task_id)
            .and_then(|t| t.subtask(sub_id))
            .map(|s| (s.name.as_str(), s.duration_days())),
    }
}

/// Draw one bar with its two edge handles; returns a pointer-down event when
/// a drag starts on it.
fn bar_interaction(
    ui: &mut Ui,
    painter: &egui::Painter,
    origin: Pos2,
    layout: &BarLayout,
    name: &str,
    days: i64,
    drag: &DragState,
) -> Option<PointerEvent> {
    let row_top = origin.y + HEADER_HEIGHT + layout.row as f32 * ROW_HEIGHT;
    let bar_rect = Rect::from_min_size(
        Pos2::new(origin.x + layout.x, row_top + (ROW_HEIGHT - theme::BAR_HEIGHT) / 2.0),
        Vec2::new(layout.width.max(theme::MIN_BAR_WIDTH), theme::BAR_HEIGHT),
    );
    let left_rect = Rect::from_min_size(bar_rect.min, Vec2::new(HANDLE_WIDTH, bar_rect.height()));
    let right_rect = Rect::from_min_size(
        Pos2::new(bar_rect.right() - HANDLE_WIDTH, bar_rect.top()),
        Vec2::new(HANDLE_WIDTH, bar_rect.height()),
    );

    // Handles are registered after the body so they win the hit test.
    let body = ui.interact(bar_rect, ui.make_persistent_id(("bar", layout.target)), Sense::drag());
    let left = ui.interact(left_rect, ui.make_persistent_id(("bar-left", layout.target)), Sense::drag());
    let right = ui.interact(right_rect, ui.make_persistent_id(("bar-right", layout.target)), Sense::drag());

    let hovered = body.hovered() || left.hovered() || right.hovered();
    let active = drag.session().is_some_and(|s| s.target == layout.target);
    let fill = match (layout.target, hovered || active) {
        (RangeTarget::Task(_), false) => theme::TASK_BAR,
        (RangeTarget::Task(_), true) => theme::TASK_BAR_HOVER,
        (RangeTarget::Subtask(..), false) => theme::SUBTASK_BAR,
        (RangeTarget::Subtask(..), true) => theme::SUBTASK_BAR_HOVER,
    };
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    painter.rect_filled(bar_rect.translate(Vec2::new(1.0, 2.0)), rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar_rect, rounding, fill);

    if left.hovered() || right.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
        let handle = if left.hovered() { left_rect } else { right_rect };
        painter.rect_filled(handle, rounding, theme::HANDLE_COLOR);
    } else if body.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Move);
    }

    // Label, clipped to the bar
    let galley = painter.layout_no_wrap(name.to_string(), theme::font_bar(), theme::TEXT_ON_BAR);
    let text_y = bar_rect.center().y - galley.size().y / 2.0;
    painter.with_clip_rect(bar_rect.shrink2(Vec2::new(HANDLE_WIDTH, 0.0))).galley(
        Pos2::new(bar_rect.left() + HANDLE_WIDTH + 4.0, text_y),
        galley,
        Color32::TRANSPARENT,
    );

    if hovered && !active {
        let unit = if days == 1 { "day" } else { "days" };
        body.clone().on_hover_text(format!("{name} · {days} {unit}"));
    }

    if drag.is_dragging() {
        return None;
    }
    let (response, region) = if left.drag_started() {
        (&left, BarRegion::LeftEdge)
    } else if right.drag_started() {
        (&right, BarRegion::RightEdge)
    } else if body.drag_started() {
        (&body, BarRegion::Body)
    } else {
        return None;
    };
    press_x(ui, response).map(|x| PointerEvent::Down {
        x,
        target: layout.target,
        region,
    })
}

/// Where the button went down, so the first move is measured from the press
/// rather than from the point where the drag threshold was crossed.
fn press_x(ui: &Ui, response: &Response) -> Option<f32> {
    ui.input(|i| i.pointer.press_origin())
        .or_else(|| response.interact_pointer_pos())
        .map(|p| p.x)
}

fn draw_timeline_header(
    painter: &egui::Painter,
    origin: Pos2,
    viewport: &TimelineViewport,
    height: f32,
) {
    let width = viewport.total_width();
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width.max(painter.clip_rect().width()), HEADER_HEIGHT)),
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

    let day_width = viewport.pixels_per_day;
    for date in viewport.days() {
        let x = origin.x + viewport.date_to_x(date);

        painter.line_segment(
            [Pos2::new(x, origin.y), Pos2::new(x, origin.y + height)],
            Stroke::new(0.5, theme::GRID_LINE),
        );

        let is_weekend = date.weekday().num_days_from_monday() >= 5;
        let day_color = if is_weekend {
            theme::TEXT_DIM
        } else {
            theme::TEXT_PRIMARY
        };
        painter.text(
            Pos2::new(x + day_width / 2.0, origin.y + 16.0),
            egui::Align2::CENTER_CENTER,
            date.day().to_string(),
            theme::font_header(),
            day_color,
        );
        painter.text(
            Pos2::new(x + day_width / 2.0, origin.y + 32.0),
            egui::Align2::CENTER_CENTER,
            date.format("%b").to_string(),
            theme::font_sub(),
            theme::TEXT_SECONDARY,
        );
    }
}
