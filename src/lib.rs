//! Timeline layout and drag engine for a two-level Gantt chart.
//!
//! Tasks own an ordered list of subtasks. Every edit keeps a parent's range
//! equal to the bounding range of its subtasks, and pointer drags are turned
//! into whole-day edits through [`model::drag`].

pub mod config;
pub mod error;
pub mod io;
pub mod model;

pub use config::TimelineConfig;
pub use error::ScheduleError;
