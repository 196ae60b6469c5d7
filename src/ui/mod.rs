pub mod dialogs;
pub mod scroll_sync;
pub mod task_editor;
pub mod task_table;
pub mod theme;
pub mod timeline_chart;
pub mod toolbar;
