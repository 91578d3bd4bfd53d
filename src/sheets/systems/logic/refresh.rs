// src/sheets/systems/logic/refresh.rs
use bevy::prelude::*;

use crate::sheets::{
    events::{
        RequestInitializeHeader, RequestSheetRefresh, SheetDataModifiedEvent,
        SheetOperationFeedback,
    },
    resources::ActiveSheet,
};

/// Rebuilds the rendered snapshot after a save or an explicit refresh.
/// Runs after every mutating system in the frame.
pub fn reload_sheet_view(
    mut refresh_events: EventReader<RequestSheetRefresh>,
    mut modified_events: EventReader<SheetDataModifiedEvent>,
    mut active: ResMut<ActiveSheet>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
) {
    let forced = !refresh_events.is_empty();
    let modified = !modified_events.is_empty();
    refresh_events.clear();
    modified_events.clear();
    if !forced && !modified {
        return;
    }
    if !active.is_open() {
        if forced {
            feedback_writer.write(SheetOperationFeedback::error("Cannot refresh: no sheet is open."));
        }
        return;
    }

    // A save already invalidated the cache, so a plain load re-reads the store.
    match active.reload_view(forced) {
        Ok(table) => {
            let rows = table.row_count();
            debug!("Sheet view reloaded: {} rows.", rows);
            if forced {
                feedback_writer.write(SheetOperationFeedback::ok(format!(
                    "Reloaded sheet: {} rows.",
                    rows
                )));
            }
        }
        Err(e) => {
            let msg = format!("Reloading sheet failed: {}", e);
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback::error(msg));
        }
    }
}

pub fn handle_initialize_header(
    mut events: EventReader<RequestInitializeHeader>,
    mut active: ResMut<ActiveSheet>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
    mut data_modified_writer: EventWriter<SheetDataModifiedEvent>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();

    let Some(session) = active.session_mut() else {
        feedback_writer.write(SheetOperationFeedback::error("Cannot write header: no sheet is open."));
        return;
    };
    match session.initialize_header() {
        Ok(()) => {
            let msg = format!("Wrote default header to '{}'.", session.handle().title);
            info!("{}", msg);
            feedback_writer.write(SheetOperationFeedback::ok(msg));
            data_modified_writer.write(SheetDataModifiedEvent);
        }
        Err(e) => {
            let msg = format!("Cannot write header: {}", e);
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback::error(msg));
        }
    }
}
