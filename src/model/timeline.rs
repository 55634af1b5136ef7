use chrono::NaiveDate;

use super::calendar::{day_delta, max_date, min_date, shift_days};
use super::task::{RangeTarget, Task};
use crate::config::{TimelineConfig, ZoomConfig};

/// Visible date window derived from the item collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    /// Date drawn at x = 0.
    pub origin: NaiveDate,
    /// Number of day columns in the window.
    pub total_days: i64,
}

/// Compute the padded window covering every task and subtask date.
pub fn compute_visible_range(tasks: &[Task], config: &TimelineConfig) -> VisibleRange {
    let dates = || {
        tasks.iter().flat_map(|t| {
            [t.start, t.end]
                .into_iter()
                .chain(t.subtasks.iter().flat_map(|s| [s.start, s.end]))
        })
    };

    let (start, end) = match (min_date(dates()), max_date(dates())) {
        (Ok(min), Ok(max)) => (
            shift_days(min, -config.lead_in_days),
            shift_days(max, config.trailing_days),
        ),
        _ => (config.fallback_start, config.fallback_end),
    };

    VisibleRange {
        origin: start,
        total_days: day_delta(start, end),
    }
}

/// Position of one bar handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    pub target: RangeTarget,
    pub row: usize,
    pub x: f32,
    pub width: f32,
}

/// Maps dates to horizontal pixel offsets and back.
#[derive(Debug, Clone)]
pub struct TimelineViewport {
    /// The leftmost visible date.
    pub origin: NaiveDate,
    /// Day columns in the visible window.
    pub total_days: i64,
    /// Pixels per day (controls zoom level).
    pub pixels_per_day: f32,
    zoom: ZoomConfig,
}

impl TimelineViewport {
    pub fn new(range: VisibleRange, zoom: ZoomConfig) -> Self {
        Self {
            origin: range.origin,
            total_days: range.total_days,
            pixels_per_day: zoom.clamp(zoom.default_pixels_per_day),
            zoom,
        }
    }

    /// Viewport fitted to `tasks` at the configured default zoom.
    pub fn fit(tasks: &[Task], config: &TimelineConfig) -> Self {
        Self::new(compute_visible_range(tasks, config), config.zoom.clone())
    }

    /// Re-derive the window after the collection changed; zoom is kept.
    pub fn refit(&mut self, tasks: &[Task], config: &TimelineConfig) {
        let range = compute_visible_range(tasks, config);
        self.origin = range.origin;
        self.total_days = range.total_days;
    }

    /// Convert a date to an x-pixel offset from the viewport origin.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        day_delta(self.origin, date) as f32 * self.pixels_per_day
    }

    /// Convert an x-pixel offset back to the nearest whole date.
    pub fn x_to_date(&self, x: f32) -> NaiveDate {
        shift_days(self.origin, self.px_to_days(x))
    }

    /// Whole days covered by a pixel distance, rounded to nearest.
    pub fn px_to_days(&self, dx: f32) -> i64 {
        (dx / self.pixels_per_day).round() as i64
    }

    /// Total width in pixels for the visible range.
    pub fn total_width(&self) -> f32 {
        self.total_days as f32 * self.pixels_per_day
    }

    /// Iterate the dates of every day column.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.total_days).map(move |i| shift_days(self.origin, i))
    }

    pub fn zoom_in(&mut self) {
        self.set_pixels_per_day(self.pixels_per_day + self.zoom.step);
    }

    pub fn zoom_out(&mut self) {
        self.set_pixels_per_day(self.pixels_per_day - self.zoom.step);
    }

    pub fn set_pixels_per_day(&mut self, pixels_per_day: f32) {
        self.pixels_per_day = self.zoom.clamp(pixels_per_day);
    }

    /// Row-by-row bar geometry; collapsed tasks hide their subtask rows.
    pub fn layout_rows(&self, tasks: &[Task]) -> Vec<BarLayout> {
        let mut rows = Vec::new();
        for task in tasks {
            let x = self.date_to_x(task.start);
            rows.push(BarLayout {
                target: RangeTarget::Task(task.id),
                row: rows.len(),
                x,
                width: self.date_to_x(task.end) - x,
            });
            if task.collapsed {
                continue;
            }
            for sub in &task.subtasks {
                let x = self.date_to_x(sub.start);
                rows.push(BarLayout {
                    target: RangeTarget::Subtask(task.id, sub.id),
                    row: rows.len(),
                    x,
                    width: self.date_to_x(sub.end) - x,
                });
            }
        }
        rows
    }
}
