// src/ui/elements/editor/mod.rs
pub mod main_editor;
pub mod row_forms;
pub mod sheet_info;
pub mod state;
pub mod table_body;

pub use main_editor::sheet_editor_ui;
