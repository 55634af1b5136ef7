pub mod dialogs;
pub mod gantt_chart;
pub mod task_list;
pub mod theme;
pub mod toolbar;
