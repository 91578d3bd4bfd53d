// src/ui/elements/editor/sheet_info.rs
use bevy::prelude::*;
use bevy_egui::egui;

use crate::sheets::{events::RequestSheetRefresh, resources::ActiveSheet};

pub fn show_sheet_info(
    ui: &mut egui::Ui,
    active: &ActiveSheet,
    refresh_writer: &mut EventWriter<RequestSheetRefresh>,
) {
    let Some(handle) = active.handle() else {
        return;
    };
    ui.heading("Sheet Information");
    egui::Grid::new("sheet_info_grid")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            ui.label("Sheet Name:");
            ui.strong(handle.title.as_str());
            ui.end_row();

            ui.label("Sheet URL:");
            ui.hyperlink_to(handle.url.as_str(), &handle.url);
            ui.end_row();

            ui.label("Worksheet:");
            ui.label(handle.worksheet.as_str());
            ui.end_row();

            ui.label("Backend:");
            ui.label(active.backend_name().unwrap_or("-"));
            ui.end_row();
        });

    if ui
        .button("⟳ Refresh")
        .on_hover_text("Discard the cached copy and read the sheet again")
        .clicked()
    {
        refresh_writer.write(RequestSheetRefresh);
    }
}
