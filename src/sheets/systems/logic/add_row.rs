// src/sheets/systems/logic/add_row.rs
use bevy::prelude::*;

use crate::sheets::{
    events::{AddSheetRowRequest, SheetDataModifiedEvent, SheetOperationFeedback},
    resources::ActiveSheet,
};

pub fn handle_add_row_request(
    mut events: EventReader<AddSheetRowRequest>,
    mut active: ResMut<ActiveSheet>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
    mut data_modified_writer: EventWriter<SheetDataModifiedEvent>,
) {
    for event in events.read() {
        let Some(session) = active.session_mut() else {
            feedback_writer.write(SheetOperationFeedback::error("Cannot add row: no sheet is open."));
            continue;
        };

        match session.add_row(event.values.clone()) {
            Ok(()) => {
                let msg = format!("Row added to '{}'.", session.handle().title);
                info!("{}", msg);
                feedback_writer.write(SheetOperationFeedback::ok(msg));
                data_modified_writer.write(SheetDataModifiedEvent);
            }
            Err(e) => {
                let msg = format!("Cannot add row to '{}': {}", session.handle().title, e);
                warn!("{}", msg);
                feedback_writer.write(SheetOperationFeedback::error(msg));
            }
        }
    }
}
