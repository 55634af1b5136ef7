pub mod calendar;
pub mod drag;
pub mod project;
pub mod task;
pub mod timeline;

pub use drag::{BarRegion, DragAction, DragState, PointerEvent};
pub use project::Project;
pub use task::{RangeTarget, Subtask, SubtaskId, Task, TaskId};
pub use timeline::{compute_visible_range, BarLayout, TimelineViewport, VisibleRange};
