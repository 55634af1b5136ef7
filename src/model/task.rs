use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calendar::{day_delta, max_date, min_date, shift_days};
use crate::error::ScheduleError;

/// Stable identifier of a top-level task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a subtask, unique across the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubtaskId(Uuid);

impl SubtaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SubtaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubtaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which item a range edit or drag applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeTarget {
    Task(TaskId),
    Subtask(TaskId, SubtaskId),
}

impl RangeTarget {
    /// The task that owns (or is) the target.
    pub fn task_id(&self) -> TaskId {
        match *self {
            RangeTarget::Task(id) | RangeTarget::Subtask(id, _) => id,
        }
    }
}

/// A child bar belonging to exactly one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: SubtaskId,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Subtask {
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: SubtaskId::new(),
            name: name.into(),
            start,
            end,
        }
    }

    /// Length of the bar in whole days.
    pub fn duration_days(&self) -> i64 {
        day_delta(self.start, self.end)
    }

    fn translate(&mut self, offset: i64) {
        self.start = shift_days(self.start, offset);
        self.end = shift_days(self.end, offset);
    }
}

/// A top-level row in the timeline.
///
/// While `subtasks` is non-empty, `start`/`end` are the tight bounding range of
/// the subtasks. A task without subtasks keeps whatever range it was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// View-only flag: hides subtask rows in the timeline.
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: TaskId::new(),
            name: name.into(),
            start,
            end,
            collapsed: false,
            subtasks: Vec::new(),
        }
    }

    pub fn duration_days(&self) -> i64 {
        day_delta(self.start, self.end)
    }

    pub fn subtask(&self, id: SubtaskId) -> Option<&Subtask> {
        self.subtasks.iter().find(|s| s.id == id)
    }

    pub fn subtask_mut(&mut self, id: SubtaskId) -> Option<&mut Subtask> {
        self.subtasks.iter_mut().find(|s| s.id == id)
    }

    /// Snap the task range to the bounding range of its subtasks.
    ///
    /// Idempotent. Leaves the range untouched when there are no subtasks.
    pub fn rebound(&mut self) -> Result<(), ScheduleError> {
        if self.subtasks.is_empty() {
            return Ok(());
        }
        self.start = min_date(self.subtasks.iter().map(|s| s.start))?;
        self.end = max_date(self.subtasks.iter().map(|s| s.end))?;
        Ok(())
    }

    /// Set the task's own range, translating every subtask by the start delta.
    ///
    /// Subtasks are moved, never stretched: a one-sided resize of the parent
    /// shifts children by the start offset only.
    pub(crate) fn reschedule(&mut self, start: NaiveDate, end: NaiveDate) {
        let offset = day_delta(self.start, start);
        if offset != 0 {
            for sub in &mut self.subtasks {
                sub.translate(offset);
            }
        }
        self.start = start;
        self.end = end;
    }

    /// True when the stored range equals the bounding range of the subtasks.
    pub fn is_bounded(&self) -> bool {
        match (
            min_date(self.subtasks.iter().map(|s| s.start)),
            max_date(self.subtasks.iter().map(|s| s.end)),
        ) {
            (Ok(min), Ok(max)) => self.start == min && self.end == max,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn task_a() -> Task {
        let mut task = Task::new("Task A", d(12, 1), d(12, 10));
        task.subtasks.push(Subtask::new("A1", d(12, 1), d(12, 5)));
        task.subtasks.push(Subtask::new("A2", d(12, 4), d(12, 8)));
        task
    }

    #[test]
    fn rebound_tightens_to_children() {
        let mut task = task_a();
        task.rebound().unwrap();
        assert_eq!((task.start, task.end), (d(12, 1), d(12, 8)));
        assert!(task.is_bounded());

        // Idempotent
        task.rebound().unwrap();
        assert_eq!((task.start, task.end), (d(12, 1), d(12, 8)));
    }

    #[test]
    fn task_duration_follows_rebound() {
        let mut task = task_a();
        assert_eq!(task.duration_days(), 9);
        task.rebound().unwrap();
        assert_eq!(task.duration_days(), 7);
    }

    #[test]
    fn rebound_without_children_keeps_range() {
        let mut task = Task::new("Solo", d(3, 1), d(3, 9));
        task.rebound().unwrap();
        assert_eq!((task.start, task.end), (d(3, 1), d(3, 9)));
        assert!(task.is_bounded());
    }

    #[test]
    fn reschedule_translates_children() {
        let mut task = task_a();
        task.rebound().unwrap();
        task.reschedule(d(12, 6), d(12, 13));

        assert_eq!((task.subtasks[0].start, task.subtasks[0].end), (d(12, 6), d(12, 10)));
        assert_eq!((task.subtasks[1].start, task.subtasks[1].end), (d(12, 9), d(12, 13)));
        assert_eq!(task.subtasks[0].duration_days(), 4);
        assert_eq!(task.subtasks[1].duration_days(), 4);
    }

    #[test]
    fn reschedule_end_only_leaves_children() {
        let mut task = task_a();
        task.rebound().unwrap();
        task.reschedule(d(12, 1), d(12, 20));

        assert_eq!(task.end, d(12, 20));
        assert_eq!(task.subtasks[1].end, d(12, 8));
    }

    #[test]
    fn range_target_task_id() {
        let task = TaskId::new();
        let sub = SubtaskId::new();
        assert_eq!(RangeTarget::Task(task).task_id(), task);
        assert_eq!(RangeTarget::Subtask(task, sub).task_id(), task);
    }
}
