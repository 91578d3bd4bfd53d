// src/ui/elements/editor/row_forms.rs
use bevy::prelude::*;
use bevy_egui::egui;

use super::state::EditorWindowState;
use crate::sheets::{
    events::{AddSheetRowRequest, UpdateCellEvent},
    sheet_table::Table,
};

pub fn show_add_row_form(
    ui: &mut egui::Ui,
    state: &mut EditorWindowState,
    table: &Table,
    add_row_writer: &mut EventWriter<AddSheetRowRequest>,
) {
    ui.heading("Add new row");
    egui::Grid::new("add_row_grid")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            for (name, value) in table.columns().iter().zip(state.new_row_values.iter_mut()) {
                ui.label(name.as_str());
                ui.text_edit_singleline(value);
                ui.end_row();
            }
        });

    if ui.button("Add Row").clicked() {
        add_row_writer.write(AddSheetRowRequest {
            values: state.take_new_row(),
        });
    }
}

pub fn show_edit_cell_form(
    ui: &mut egui::Ui,
    state: &mut EditorWindowState,
    table: &Table,
    cell_update_writer: &mut EventWriter<UpdateCellEvent>,
) {
    ui.heading("Edit existing rows");
    let Some(last_row) = state.clamp_edit_row(table.row_count()) else {
        ui.weak("No rows to edit yet.");
        return;
    };

    ui.horizontal(|ui| {
        ui.label("Row index to edit");
        ui.add(egui::DragValue::new(&mut state.edit_row_index).range(0..=last_row));
    });

    egui::ComboBox::from_label("Column to edit")
        .selected_text(state.edit_column.as_deref().unwrap_or("-"))
        .show_ui(ui, |ui| {
            for name in table.columns() {
                ui.selectable_value(&mut state.edit_column, Some(name.clone()), name.as_str());
            }
        });

    if let Some(current) = state
        .edit_column
        .as_deref()
        .and_then(|column| table.cell(state.edit_row_index, column))
    {
        ui.weak(format!("Current value: {}", current));
    }

    ui.horizontal(|ui| {
        ui.label("New value");
        ui.text_edit_singleline(&mut state.edit_value);
    });

    let can_submit = state.edit_column.is_some();
    if ui.add_enabled(can_submit, egui::Button::new("Update Cell")).clicked() {
        if let Some(column) = state.edit_column.clone() {
            cell_update_writer.write(UpdateCellEvent {
                row_index: state.edit_row_index,
                column,
                new_value: std::mem::take(&mut state.edit_value),
            });
        }
    }
}
