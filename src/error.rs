use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::task::{SubtaskId, TaskId};

/// Errors raised by calendar arithmetic and range edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// A min/max reduction was asked for over zero dates.
    #[error("no dates to reduce over")]
    EmptyInput,

    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("task {0} not found")]
    UnknownTask(TaskId),

    #[error("subtask {subtask} not found in task {task}")]
    UnknownSubtask { task: TaskId, subtask: SubtaskId },

    #[error("identifier {0} is already in use")]
    DuplicateId(Uuid),

    #[error("name cannot be empty")]
    EmptyName,
}
