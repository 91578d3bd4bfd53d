// src/sheets/systems/startup.rs
use bevy::prelude::*;

use crate::sheets::{
    events::{RequestOpenSheet, SheetOperationFeedback},
    resources::{ActiveSheet, SheetConfig, SheetStoreFactory},
    sync::SheetSession,
};

/// Resolves the configured sheet once at startup and loads its first view.
pub fn open_active_sheet(
    config: Res<SheetConfig>,
    factory: Res<SheetStoreFactory>,
    mut active: ResMut<ActiveSheet>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
) {
    open_into(&config, *factory, &mut active, &mut feedback_writer);
}

/// Retry button: only does anything while no session is open.
pub fn handle_open_request(
    mut events: EventReader<RequestOpenSheet>,
    config: Res<SheetConfig>,
    factory: Res<SheetStoreFactory>,
    mut active: ResMut<ActiveSheet>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();
    if active.is_open() {
        debug!("Open request ignored: a sheet is already open.");
        return;
    }
    open_into(&config, *factory, &mut active, &mut feedback_writer);
}

fn open_into(
    config: &SheetConfig,
    factory: SheetStoreFactory,
    active: &mut ActiveSheet,
    feedback_writer: &mut EventWriter<SheetOperationFeedback>,
) {
    let settings = &config.0;
    info!("Opening sheet by {} on {:?} backend.", settings.store, settings.backend);

    let opened = (factory.0)(settings).and_then(|store| SheetSession::open(store, &settings.store));
    let session = match opened {
        Ok(session) => session,
        Err(e) => {
            let msg = format!("Could not open sheet by {}: {}", settings.store, e);
            error!("{}", msg);
            active.set_open_error(&e);
            feedback_writer.write(SheetOperationFeedback::error(msg));
            return;
        }
    };

    let title = session.handle().title.clone();
    active.set_session(session);
    match active.reload_view(false) {
        Ok(table) => {
            let msg = format!("Opened '{}' ({} rows).", title, table.row_count());
            info!("{}", msg);
            feedback_writer.write(SheetOperationFeedback::ok(msg));
        }
        Err(e) => {
            let msg = format!("Opened '{}' but loading it failed: {}", title, e);
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback::error(msg));
        }
    }
}
