// src/ui/elements/editor/main_editor.rs
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::row_forms::{show_add_row_form, show_edit_cell_form};
use super::sheet_info::show_sheet_info;
use super::state::EditorWindowState;
use super::table_body::show_sheet_table;
use crate::sheets::{
    events::{
        AddSheetRowRequest, RequestInitializeHeader, RequestOpenSheet, RequestSheetRefresh,
        UpdateCellEvent,
    },
    resources::ActiveSheet,
};
use crate::ui::UiFeedbackState;

#[allow(clippy::too_many_arguments)]
pub fn sheet_editor_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<EditorWindowState>,
    active: Res<ActiveSheet>,
    ui_feedback: Res<UiFeedbackState>,
    mut add_row_writer: EventWriter<AddSheetRowRequest>,
    mut cell_update_writer: EventWriter<UpdateCellEvent>,
    mut refresh_writer: EventWriter<RequestSheetRefresh>,
    mut open_writer: EventWriter<RequestOpenSheet>,
    mut header_writer: EventWriter<RequestInitializeHeader>,
) {
    let ctx = contexts.ctx_mut();

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Sheet Editor");

        if !ui_feedback.last_message.is_empty() {
            let text_color = if ui_feedback.is_error {
                egui::Color32::RED
            } else {
                ui.style().visuals.text_color()
            };
            ui.colored_label(text_color, &ui_feedback.last_message);
        }
        ui.separator();

        if !active.is_open() {
            ui.label("No sheet is open.");
            if let Some(err) = active.open_error() {
                ui.colored_label(egui::Color32::RED, err);
            }
            if ui.button("Retry").clicked() {
                open_writer.write(RequestOpenSheet);
            }
            return;
        }

        show_sheet_info(ui, &active, &mut refresh_writer);
        ui.separator();

        let Some(table) = active.view() else {
            ui.label("The sheet could not be loaded. Refresh to try again.");
            if ui
                .button("Write default header")
                .on_hover_text("Only works on a sheet with no rows at all")
                .clicked()
            {
                header_writer.write(RequestInitializeHeader);
            }
            return;
        };

        state.sync_with_columns(table.columns());

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.heading("Current data");
                show_sheet_table(ui, table);
                ui.separator();
                show_add_row_form(ui, &mut state, table, &mut add_row_writer);
                ui.separator();
                show_edit_cell_form(ui, &mut state, table, &mut cell_update_writer);
            });
    });
}
