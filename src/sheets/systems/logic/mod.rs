// src/sheets/systems/logic/mod.rs

pub mod add_row;
pub mod refresh;
pub mod update_cell;

// Re-export the handler functions for easier use in plugin.rs
pub use add_row::handle_add_row_request;
pub use refresh::{handle_initialize_header, reload_sheet_view};
pub use update_cell::handle_cell_update;
