// src/sheets/events.rs
use bevy::prelude::Event;

/// Sent by the "Add Row" form. Values follow the sheet's column order.
#[derive(Event, Debug, Clone)]
pub struct AddSheetRowRequest {
    pub values: Vec<String>,
}

/// Sent by the "Update Cell" form.
#[derive(Event, Debug, Clone)]
pub struct UpdateCellEvent {
    pub row_index: usize,
    pub column: String,
    pub new_value: String,
}

/// Drop the cached table and read the sheet again.
#[derive(Event, Debug, Clone)]
pub struct RequestSheetRefresh;

/// Retry resolving the configured sheet after a failed startup.
#[derive(Event, Debug, Clone)]
pub struct RequestOpenSheet;

/// Write the default header into a sheet that has none.
#[derive(Event, Debug, Clone)]
pub struct RequestInitializeHeader;

/// A save went through; the view must be reloaded from the store.
#[derive(Event, Debug, Clone)]
pub struct SheetDataModifiedEvent;

#[derive(Event, Debug, Clone)]
pub struct SheetOperationFeedback {
    pub message: String,
    pub is_error: bool,
}

impl SheetOperationFeedback {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { message: message.into(), is_error: false }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), is_error: true }
    }
}
