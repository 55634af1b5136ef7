use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::ScheduleError;
use crate::model::{Project, Task};

/// File name offered by the export dialog.
pub const DEFAULT_EXPORT_NAME: &str = "gantt-tasks.json";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize tasks: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid task data: {0}")]
    Schedule(#[from] ScheduleError),
}

/// Serialize the task list as a pretty-printed JSON array.
///
/// Each task carries its own fields plus a `subtasks` array; dates are
/// `YYYY-MM-DD`.
pub fn to_json(project: &Project) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&project.tasks)?)
}

/// Parse an exported task array. Parent ranges are re-derived on load.
///
/// Inverted ranges and ids used more than once are rejected, the same way
/// direct edits reject them.
pub fn from_json(json: &str) -> Result<Vec<Task>, ExportError> {
    let mut tasks: Vec<Task> = serde_json::from_str(json)?;
    if let Err(e) = check_imported(&tasks) {
        tracing::warn!(error = %e, "Rejected task import");
        return Err(e.into());
    }
    for task in &mut tasks {
        // Empty subtask lists are skipped by rebound, so this cannot fail.
        let _ = task.rebound();
    }
    Ok(tasks)
}

fn check_imported(tasks: &[Task]) -> Result<(), ScheduleError> {
    let check_range = |start: NaiveDate, end: NaiveDate| {
        if start > end {
            Err(ScheduleError::InvalidRange { start, end })
        } else {
            Ok(())
        }
    };

    let mut seen = HashSet::new();
    for task in tasks {
        check_range(task.start, task.end)?;
        if !seen.insert(task.id.as_uuid()) {
            return Err(ScheduleError::DuplicateId(task.id.as_uuid()));
        }
        for sub in &task.subtasks {
            check_range(sub.start, sub.end)?;
            if !seen.insert(sub.id.as_uuid()) {
                return Err(ScheduleError::DuplicateId(sub.id.as_uuid()));
            }
        }
    }
    Ok(())
}

/// Write the export snapshot to `path`.
pub fn write_json(project: &Project, path: &Path) -> Result<(), ExportError> {
    let json = to_json(project)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), tasks = project.tasks.len(), "Exported tasks");
    Ok(())
}
