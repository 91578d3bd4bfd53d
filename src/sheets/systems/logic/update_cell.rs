// src/sheets/systems/logic/update_cell.rs
use bevy::prelude::*;

use crate::sheets::{
    events::{SheetDataModifiedEvent, SheetOperationFeedback, UpdateCellEvent},
    resources::ActiveSheet,
};

pub fn handle_cell_update(
    mut events: EventReader<UpdateCellEvent>,
    mut active: ResMut<ActiveSheet>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
    mut data_modified_writer: EventWriter<SheetDataModifiedEvent>,
) {
    for event in events.read() {
        let Some(session) = active.session_mut() else {
            feedback_writer.write(SheetOperationFeedback::error("Cannot update cell: no sheet is open."));
            continue;
        };

        // Row index is checked against the table the session holds now, not
        // the one the form was rendered from.
        match session.update_cell(event.row_index, &event.column, event.new_value.clone()) {
            Ok(()) => {
                let msg = format!(
                    "Updated row {} column '{}' in '{}'.",
                    event.row_index,
                    event.column,
                    session.handle().title
                );
                info!("{}", msg);
                feedback_writer.write(SheetOperationFeedback::ok(msg));
                data_modified_writer.write(SheetDataModifiedEvent);
            }
            Err(e) => {
                let msg = format!(
                    "Cell update failed for row {} column '{}': {}",
                    event.row_index, event.column, e
                );
                warn!("{}", msg);
                feedback_writer.write(SheetOperationFeedback::error(msg));
            }
        }
    }
}
