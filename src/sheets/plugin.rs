// src/sheets/plugin.rs
use bevy::prelude::*;

use super::events::{
    AddSheetRowRequest, RequestInitializeHeader, RequestOpenSheet, RequestSheetRefresh,
    SheetDataModifiedEvent, SheetOperationFeedback, UpdateCellEvent,
};
use super::resources::{ActiveSheet, SheetConfig, SheetStoreFactory};
use super::systems;
use crate::settings::AppSettings;

// Define system sets for ordering
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
enum SheetSystemSet {
    UserInput,    // Session-level requests (retry open)
    ApplyChanges, // Mutations that save to the store
    Reload,       // Rebuild the rendered snapshot
}

/// Owns the sheet session for the editor and wires UI events to it.
pub struct SheetsPlugin {
    settings: AppSettings,
}

impl SheetsPlugin {
    pub fn new(settings: AppSettings) -> Self {
        Self { settings }
    }
}

impl Plugin for SheetsPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                SheetSystemSet::UserInput,
                SheetSystemSet::ApplyChanges.after(SheetSystemSet::UserInput),
                SheetSystemSet::Reload.after(SheetSystemSet::ApplyChanges),
            ),
        );

        // --- Resource Initialization ---
        app.insert_resource(SheetConfig(self.settings.clone()))
            .init_resource::<SheetStoreFactory>()
            .init_resource::<ActiveSheet>();

        // --- Event Registration ---
        app.add_event::<AddSheetRowRequest>()
            .add_event::<UpdateCellEvent>()
            .add_event::<RequestSheetRefresh>()
            .add_event::<RequestOpenSheet>()
            .add_event::<RequestInitializeHeader>()
            .add_event::<SheetDataModifiedEvent>()
            .add_event::<SheetOperationFeedback>();

        app.add_systems(Startup, systems::startup::open_active_sheet);

        app.add_systems(
            Update,
            systems::startup::handle_open_request.in_set(SheetSystemSet::UserInput),
        );
        // One action at a time, in a fixed order, each saved before the next runs.
        app.add_systems(
            Update,
            (
                systems::logic::handle_add_row_request,
                systems::logic::handle_cell_update,
                systems::logic::handle_initialize_header,
            )
                .chain()
                .in_set(SheetSystemSet::ApplyChanges),
        );
        app.add_systems(
            Update,
            systems::logic::reload_sheet_view.in_set(SheetSystemSet::Reload),
        );

        info!("SheetsPlugin initialized for sheet by {}.", self.settings.store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::BackendKind;
    use crate::sheets::definitions::default_header_row;

    fn memory_app() -> App {
        let mut app = App::new();
        app.add_plugins(SheetsPlugin::new(AppSettings {
            backend: BackendKind::Memory,
            ..Default::default()
        }));
        app.update();
        app
    }

    fn last_feedback(app: &App) -> Option<SheetOperationFeedback> {
        app.world()
            .resource::<Events<SheetOperationFeedback>>()
            .iter_current_update_events()
            .last()
            .cloned()
    }

    #[test]
    fn test_startup_opens_and_loads() {
        let app = memory_app();
        let active = app.world().resource::<ActiveSheet>();
        assert!(active.is_open());
        let view = active.view().unwrap();
        assert_eq!(view.columns(), default_header_row().as_slice());
        assert!(view.is_empty());
    }

    #[test]
    fn test_add_row_event_reloads_view() {
        let mut app = memory_app();
        app.world_mut().send_event(AddSheetRowRequest {
            values: vec!["Carol".to_string(), "40".to_string(), "SF".to_string()],
        });
        app.update();

        let active = app.world().resource::<ActiveSheet>();
        let view = active.view().unwrap();
        assert_eq!(view.row_count(), 1);
        assert_eq!(view.cell(0, "City"), Some("SF"));
        assert!(!last_feedback(&app).unwrap().is_error);
    }

    #[test]
    fn test_bad_edit_reports_error_and_keeps_view() {
        let mut app = memory_app();
        app.world_mut().send_event(UpdateCellEvent {
            row_index: 3,
            column: "City".to_string(),
            new_value: "Boston".to_string(),
        });
        app.update();

        let feedback = last_feedback(&app).unwrap();
        assert!(feedback.is_error);
        assert!(feedback.message.contains("out of bounds"));
        let active = app.world().resource::<ActiveSheet>();
        assert!(active.view().unwrap().is_empty());
    }

    #[test]
    fn test_failed_open_keeps_app_usable() {
        fn denied(_: &AppSettings) -> crate::sheets::SheetResult<Box<dyn crate::sheets::remote::RemoteStore>> {
            Err(crate::sheets::SheetError::Access("token expired".to_string()))
        }

        let mut app = App::new();
        app.add_plugins(SheetsPlugin::new(AppSettings::default()));
        app.insert_resource(SheetStoreFactory(denied));
        app.update();

        let active = app.world().resource::<ActiveSheet>();
        assert!(!active.is_open());
        assert!(active.open_error().unwrap().contains("token expired"));

        app.world_mut().send_event(RequestSheetRefresh);
        app.update();
        assert!(last_feedback(&app).unwrap().is_error);
    }
}
