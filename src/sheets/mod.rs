// src/sheets/mod.rs

// --- Core: usable without Bevy's scheduler (CLI, tests) ---
pub mod definitions;
pub mod error;
pub mod remote;
pub mod resolver;
pub mod sheet_table;
pub mod sync;

// --- Bevy integration ---
pub mod events;
pub mod plugin;
pub mod resources;

pub(crate) mod systems;

pub use definitions::{StoreHandle, StoreSelector};
pub use error::{SheetError, SheetResult};
pub use plugin::SheetsPlugin;
pub use resources::ActiveSheet;
pub use sheet_table::Table;
pub use sync::SheetSession;
