//! Pointer-drag state machine for timeline bars.
//!
//! ```text
//! Idle --down(body)--> Dragging(Move)
//! Idle --down(left edge)--> Dragging(ResizeStart)
//! Idle --down(right edge)--> Dragging(ResizeEnd)
//! Dragging --move--> Dragging   (candidate range applied immediately)
//! Dragging --up--> Idle
//! ```
//!
//! The host event loop owns the [`DragState`] value and feeds every pointer
//! event through [`DragState::update`]. There is no commit on release and no
//! rollback: the last accepted candidate is already stored in the project.

use chrono::NaiveDate;

use super::calendar::shift_days;
use super::project::Project;
use super::task::RangeTarget;
use super::timeline::TimelineViewport;

/// What a drag does to the grabbed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragAction {
    Move,
    ResizeStart,
    ResizeEnd,
}

/// Part of a bar the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarRegion {
    Body,
    LeftEdge,
    RightEdge,
}

impl From<BarRegion> for DragAction {
    fn from(region: BarRegion) -> Self {
        match region {
            BarRegion::Body => DragAction::Move,
            BarRegion::LeftEdge => DragAction::ResizeStart,
            BarRegion::RightEdge => DragAction::ResizeEnd,
        }
    }
}

/// Raw pointer input, in the renderer's horizontal pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down {
        x: f32,
        target: RangeTarget,
        region: BarRegion,
    },
    Move {
        x: f32,
    },
    Up,
}

/// Snapshot taken on pointer-down; deltas are measured against it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub action: DragAction,
    pub target: RangeTarget,
    pub original_start: NaiveDate,
    pub original_end: NaiveDate,
    pub pointer_origin_x: f32,
}

impl DragSession {
    /// Candidate range for a cumulative `delta_days`, validated against the
    /// item's live range. `None` means the event is ignored.
    pub fn candidate(
        &self,
        delta_days: i64,
        current: (NaiveDate, NaiveDate),
    ) -> Option<(NaiveDate, NaiveDate)> {
        let (current_start, current_end) = current;
        match self.action {
            DragAction::Move => Some((
                shift_days(self.original_start, delta_days),
                shift_days(self.original_end, delta_days),
            )),
            DragAction::ResizeStart => {
                let start = shift_days(self.original_start, delta_days);
                (start < current_end).then_some((start, current_end))
            }
            DragAction::ResizeEnd => {
                let end = shift_days(self.original_end, delta_days);
                (end > current_start).then_some((current_start, end))
            }
        }
    }
}

/// Single-slot drag state held by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Advance the state machine by one pointer event.
    ///
    /// Accepted candidates are written through [`Project::set_range`] right
    /// away, so related ranges are already propagated when the next event
    /// reads them.
    pub fn update(
        self,
        event: PointerEvent,
        project: &mut Project,
        viewport: &TimelineViewport,
    ) -> DragState {
        match (self, event) {
            (DragState::Idle, PointerEvent::Down { x, target, region }) => {
                let Some((start, end)) = project.range_of(target) else {
                    tracing::debug!(item = ?target, "Pointer down on unknown item");
                    return DragState::Idle;
                };
                let session = DragSession {
                    action: region.into(),
                    target,
                    original_start: start,
                    original_end: end,
                    pointer_origin_x: x,
                };
                tracing::debug!(item = ?target, action = ?session.action, "Drag started");
                DragState::Dragging(session)
            }
            (DragState::Dragging(session), PointerEvent::Move { x }) => {
                apply_move(&session, x, project, viewport);
                self
            }
            (DragState::Dragging(session), PointerEvent::Up) => {
                tracing::debug!(item = ?session.target, "Drag finished");
                DragState::Idle
            }
            // A second pointer-down cannot start another drag, and moves or
            // releases without a drag are irrelevant.
            (state, _) => state,
        }
    }
}

fn apply_move(session: &DragSession, x: f32, project: &mut Project, viewport: &TimelineViewport) {
    let delta_days = viewport.px_to_days(x - session.pointer_origin_x);
    let Some(current) = project.range_of(session.target) else {
        return;
    };
    let Some((start, end)) = session.candidate(delta_days, current) else {
        tracing::trace!(item = ?session.target, delta_days, "Resize would cross, ignored");
        return;
    };
    if (start, end) == current {
        return;
    }
    if let Err(e) = project.set_range(session.target, start, end) {
        tracing::debug!(item = ?session.target, error = %e, "Drag candidate rejected");
    }
}
