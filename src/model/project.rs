use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::task::{RangeTarget, Subtask, SubtaskId, Task, TaskId};
use crate::error::ScheduleError;

/// The task collection edited by the timeline.
///
/// Every mutation leaves each task with subtasks bounded by them; the only
/// exception is a direct one-sided resize of a parent, which translates its
/// children by the start offset and keeps the requested range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub tasks: Vec<Task>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// Two tasks with subtasks, matching the seed data of the timeline.
    pub fn sample() -> Self {
        let d = |m: u32, day: u32| NaiveDate::from_ymd_opt(2025, m, day).unwrap_or_default();
        let mut project = Project::new("Sample Project");

        let mut task_a = Task::new("Task A", d(12, 1), d(12, 10));
        task_a.subtasks.push(Subtask::new("Subtask A1", d(12, 1), d(12, 5)));
        task_a.subtasks.push(Subtask::new("Subtask A2", d(12, 4), d(12, 8)));

        let mut task_b = Task::new("Task B", d(12, 6), d(12, 15));
        task_b.subtasks.push(Subtask::new("Subtask B1", d(12, 7), d(12, 10)));

        project.tasks = vec![task_a, task_b];
        project.rebound_all();
        project
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn task_mut(&mut self, id: TaskId) -> Result<&mut Task, ScheduleError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ScheduleError::UnknownTask(id))
    }

    /// Live `(start, end)` of a task or subtask.
    pub fn range_of(&self, target: RangeTarget) -> Option<(NaiveDate, NaiveDate)> {
        match target {
            RangeTarget::Task(id) => self.task(id).map(|t| (t.start, t.end)),
            RangeTarget::Subtask(task_id, sub_id) => self
                .task(task_id)
                .and_then(|t| t.subtask(sub_id))
                .map(|s| (s.start, s.end)),
        }
    }

    /// Re-derive every parent range. Used after bulk loads.
    pub fn rebound_all(&mut self) {
        for task in &mut self.tasks {
            // Only fails on an empty reduction, which rebound skips.
            let _ = task.rebound();
        }
    }

    // --- Range edits ---

    /// Apply a direct range edit and propagate it through the hierarchy.
    ///
    /// Editing a subtask re-bounds its parent. Editing a task translates all of
    /// its subtasks by the start offset, then stores the requested range.
    pub fn set_range(
        &mut self,
        target: RangeTarget,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(), ScheduleError> {
        if start > end {
            tracing::warn!(item = ?target, %start, %end, "Rejected range edit");
            return Err(ScheduleError::InvalidRange { start, end });
        }

        match target {
            RangeTarget::Task(task_id) => {
                let task = self.task_mut(task_id)?;
                task.reschedule(start, end);
            }
            RangeTarget::Subtask(task_id, sub_id) => {
                let task = self.task_mut(task_id)?;
                let sub = task.subtask_mut(sub_id).ok_or(ScheduleError::UnknownSubtask {
                    task: task_id,
                    subtask: sub_id,
                })?;
                sub.start = start;
                sub.end = end;
                task.rebound()?;
            }
        }

        tracing::debug!(item = ?target, %start, %end, "Range updated");
        Ok(())
    }

    // --- Tasks ---

    /// Append a new task with no subtasks.
    pub fn add_task(
        &mut self,
        name: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TaskId, ScheduleError> {
        let name = validate(name, start, end)?;
        let task = Task::new(name, start, end);
        let id = task.id;
        self.tasks.push(task);
        tracing::debug!(task = %id, "Task added");
        Ok(id)
    }

    /// Remove a task together with all of its subtasks.
    pub fn delete_task(&mut self, id: TaskId) -> Result<Task, ScheduleError> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(ScheduleError::UnknownTask(id))?;
        let removed = self.tasks.remove(pos);
        tracing::debug!(task = %id, subtasks = removed.subtasks.len(), "Task deleted");
        Ok(removed)
    }

    /// Flip the collapsed flag. Dates are not touched.
    pub fn toggle_collapse(&mut self, id: TaskId) -> Result<bool, ScheduleError> {
        let task = self.task_mut(id)?;
        task.collapsed = !task.collapsed;
        Ok(task.collapsed)
    }

    // --- Subtasks ---

    /// Create a subtask under `task_id` and re-bound the parent.
    pub fn add_subtask(
        &mut self,
        task_id: TaskId,
        name: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SubtaskId, ScheduleError> {
        let name = validate(name, start, end)?;
        let subtask = Subtask::new(name, start, end);
        let id = subtask.id;
        self.insert_subtask(task_id, subtask)?;
        Ok(id)
    }

    /// Attach a caller-built subtask. Its id must not be in use anywhere.
    pub fn insert_subtask(&mut self, task_id: TaskId, subtask: Subtask) -> Result<(), ScheduleError> {
        if subtask.start > subtask.end {
            return Err(ScheduleError::InvalidRange {
                start: subtask.start,
                end: subtask.end,
            });
        }
        if self.id_in_use(subtask.id.as_uuid()) {
            return Err(ScheduleError::DuplicateId(subtask.id.as_uuid()));
        }

        let task = self.task_mut(task_id)?;
        let sub_id = subtask.id;
        task.subtasks.push(subtask);
        task.rebound()?;
        tracing::debug!(task = %task_id, subtask = %sub_id, "Subtask added");
        Ok(())
    }

    /// Remove a subtask. The parent is re-bounded while children remain;
    /// removing the last child keeps the parent range as it was.
    pub fn delete_subtask(
        &mut self,
        task_id: TaskId,
        sub_id: SubtaskId,
    ) -> Result<Subtask, ScheduleError> {
        let task = self.task_mut(task_id)?;
        let pos = task
            .subtasks
            .iter()
            .position(|s| s.id == sub_id)
            .ok_or(ScheduleError::UnknownSubtask {
                task: task_id,
                subtask: sub_id,
            })?;
        let removed = task.subtasks.remove(pos);
        task.rebound()?;
        tracing::debug!(task = %task_id, subtask = %sub_id, "Subtask deleted");
        Ok(removed)
    }

    fn id_in_use(&self, id: uuid::Uuid) -> bool {
        self.tasks.iter().any(|t| {
            t.id.as_uuid() == id || t.subtasks.iter().any(|s| s.id.as_uuid() == id)
        })
    }
}

/// Trimmed name plus a `start <= end` check, shared by the create paths.
fn validate(name: &str, start: NaiveDate, end: NaiveDate) -> Result<String, ScheduleError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ScheduleError::EmptyName);
    }
    if start > end {
        return Err(ScheduleError::InvalidRange { start, end });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    /// Task A from the sample, before the stale 12-10 end is tightened.
    fn project_with_task_a() -> (Project, TaskId, SubtaskId, SubtaskId) {
        let mut project = Project::new("Test");
        let task_id = project.add_task("Task A", d(12, 1), d(12, 10)).unwrap();
        let a1 = project.add_subtask(task_id, "A1", d(12, 1), d(12, 5)).unwrap();
        let a2 = project.add_subtask(task_id, "A2", d(12, 4), d(12, 8)).unwrap();
        (project, task_id, a1, a2)
    }

    #[test]
    fn sample_is_bounded() {
        let project = Project::sample();
        assert_eq!(project.tasks.len(), 2);
        assert!(project.tasks.iter().all(Task::is_bounded));
        assert_eq!(project.tasks[0].end, d(12, 8));
        assert_eq!((project.tasks[1].start, project.tasks[1].end), (d(12, 7), d(12, 10)));
    }

    #[test]
    fn add_task_validates_input() {
        let mut project = Project::new("Test");
        assert_eq!(project.add_task("  ", d(1, 1), d(1, 2)), Err(ScheduleError::EmptyName));
        assert_eq!(
            project.add_task("Bad", d(1, 3), d(1, 2)),
            Err(ScheduleError::InvalidRange { start: d(1, 3), end: d(1, 2) })
        );
        let id = project.add_task(" Good ", d(1, 2), d(1, 2)).unwrap();
        let task = project.task(id).unwrap();
        assert_eq!(task.name, "Good");
        assert!(task.subtasks.is_empty());
        assert!(!task.collapsed);
    }

    #[test]
    fn first_subtask_sets_parent_range() {
        let mut project = Project::new("Test");
        let id = project.add_task("Parent", d(1, 1), d(1, 31)).unwrap();
        project.add_subtask(id, "Child", d(1, 10), d(1, 12)).unwrap();
        assert_eq!(project.range_of(RangeTarget::Task(id)), Some((d(1, 10), d(1, 12))));
    }

    #[test]
    fn subtask_edit_widens_parent() {
        let (mut project, task_id, _, a2) = project_with_task_a();
        project
            .set_range(RangeTarget::Subtask(task_id, a2), d(12, 4), d(12, 12))
            .unwrap();
        assert_eq!(project.range_of(RangeTarget::Task(task_id)), Some((d(12, 1), d(12, 12))));
    }

    #[test]
    fn subtask_edit_narrows_parent() {
        let (mut project, task_id, a1, _) = project_with_task_a();
        project
            .set_range(RangeTarget::Subtask(task_id, a1), d(12, 6), d(12, 7))
            .unwrap();
        assert_eq!(project.range_of(RangeTarget::Task(task_id)), Some((d(12, 4), d(12, 8))));
    }

    #[test]
    fn task_move_translates_subtasks() {
        let (mut project, task_id, a1, a2) = project_with_task_a();
        project
            .set_range(RangeTarget::Task(task_id), d(12, 6), d(12, 13))
            .unwrap();
        assert_eq!(project.range_of(RangeTarget::Subtask(task_id, a1)), Some((d(12, 6), d(12, 10))));
        assert_eq!(project.range_of(RangeTarget::Subtask(task_id, a2)), Some((d(12, 9), d(12, 13))));
        assert!(project.task(task_id).unwrap().is_bounded());
    }

    #[test]
    fn task_resize_start_translates_without_stretching() {
        let (mut project, task_id, a1, a2) = project_with_task_a();
        project
            .set_range(RangeTarget::Task(task_id), d(11, 29), d(12, 8))
            .unwrap();
        assert_eq!(project.range_of(RangeTarget::Task(task_id)), Some((d(11, 29), d(12, 8))));
        assert_eq!(project.range_of(RangeTarget::Subtask(task_id, a1)), Some((d(11, 29), d(12, 3))));
        assert_eq!(project.range_of(RangeTarget::Subtask(task_id, a2)), Some((d(12, 2), d(12, 6))));
    }

    #[test]
    fn inverted_edit_is_rejected_untouched() {
        let (mut project, task_id, a1, _) = project_with_task_a();
        let before = project.clone();
        assert!(matches!(
            project.set_range(RangeTarget::Subtask(task_id, a1), d(12, 9), d(12, 2)),
            Err(ScheduleError::InvalidRange { .. })
        ));
        assert!(matches!(
            project.set_range(RangeTarget::Task(task_id), d(12, 9), d(12, 2)),
            Err(ScheduleError::InvalidRange { .. })
        ));
        assert_eq!(project, before);
    }

    #[test]
    fn unknown_targets_are_reported() {
        let (mut project, task_id, _, _) = project_with_task_a();
        let ghost_task = TaskId::new();
        let ghost_sub = SubtaskId::new();
        assert_eq!(
            project.set_range(RangeTarget::Task(ghost_task), d(1, 1), d(1, 2)),
            Err(ScheduleError::UnknownTask(ghost_task))
        );
        assert_eq!(
            project.delete_subtask(task_id, ghost_sub),
            Err(ScheduleError::UnknownSubtask { task: task_id, subtask: ghost_sub })
        );
    }

    #[test]
    fn deleting_subtask_rebounds_parent() {
        let (mut project, task_id, _, a2) = project_with_task_a();
        project.delete_subtask(task_id, a2).unwrap();
        assert_eq!(project.range_of(RangeTarget::Task(task_id)), Some((d(12, 1), d(12, 5))));
    }

    #[test]
    fn deleting_last_subtask_keeps_range() {
        let (mut project, task_id, a1, a2) = project_with_task_a();
        project.delete_subtask(task_id, a2).unwrap();
        project.delete_subtask(task_id, a1).unwrap();
        let task = project.task(task_id).unwrap();
        assert!(task.subtasks.is_empty());
        assert_eq!((task.start, task.end), (d(12, 1), d(12, 5)));

        // Independently editable from here on
        project
            .set_range(RangeTarget::Task(task_id), d(12, 2), d(12, 20))
            .unwrap();
        assert_eq!(project.range_of(RangeTarget::Task(task_id)), Some((d(12, 2), d(12, 20))));
    }

    #[test]
    fn insert_subtask_rejects_reused_id() {
        let (mut project, task_id, a1, _) = project_with_task_a();
        let other = project.add_task("Other", d(1, 1), d(1, 2)).unwrap();
        let clone = project.task(task_id).unwrap().subtask(a1).unwrap().clone();
        assert_eq!(
            project.insert_subtask(other, clone),
            Err(ScheduleError::DuplicateId(a1.as_uuid()))
        );
        assert!(project.task(other).unwrap().subtasks.is_empty());
    }

    #[test]
    fn delete_task_cascades() {
        let (mut project, task_id, _, _) = project_with_task_a();
        let removed = project.delete_task(task_id).unwrap();
        assert_eq!(removed.subtasks.len(), 2);
        assert!(project.tasks.is_empty());
        assert_eq!(project.delete_task(task_id), Err(ScheduleError::UnknownTask(task_id)));
    }

    #[test]
    fn toggle_collapse_leaves_dates() {
        let (mut project, task_id, _, _) = project_with_task_a();
        let before = project.range_of(RangeTarget::Task(task_id));
        assert_eq!(project.toggle_collapse(task_id), Ok(true));
        assert_eq!(project.toggle_collapse(task_id), Ok(false));
        assert_eq!(project.range_of(RangeTarget::Task(task_id)), before);
    }

    #[test]
    fn subtask_order_is_preserved_across_edits() {
        let (mut project, task_id, a1, a2) = project_with_task_a();
        project
            .set_range(RangeTarget::Subtask(task_id, a2), d(11, 20), d(11, 22))
            .unwrap();
        let ids: Vec<_> = project.task(task_id).unwrap().subtasks.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a1, a2]);
    }
}
