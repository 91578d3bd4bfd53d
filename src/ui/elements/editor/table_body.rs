// src/ui/elements/editor/table_body.rs
use bevy_egui::egui;
use egui_extras::{Column, TableBody, TableBuilder};

use crate::sheets::sheet_table::Table;

const MAX_TABLE_HEIGHT: f32 = 320.0;

pub fn show_sheet_table(ui: &mut egui::Ui, table: &Table) {
    let text_style = egui::TextStyle::Body;
    let row_height = ui.text_style_height(&text_style) + ui.style().spacing.item_spacing.y;
    let num_cols = table.columns().len();

    ui.push_id("sheet_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .min_scrolled_height(0.0)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .column(Column::auto().at_least(32.0))
            .columns(Column::initial(120.0).at_least(40.0).resizable(true).clip(true), num_cols)
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for name in table.columns() {
                    header.col(|ui| {
                        ui.strong(name.as_str());
                    });
                }
            })
            .body(|body: TableBody| {
                body.rows(row_height, table.row_count(), |mut row| {
                    let row_index = row.index();
                    row.col(|ui| {
                        ui.weak(row_index.to_string());
                    });
                    if let Some(cells) = table.row(row_index) {
                        for cell in cells {
                            row.col(|ui| {
                                ui.label(cell.as_str());
                            });
                        }
                    }
                });
            });
    });

    if table.is_empty() {
        ui.weak("The sheet has no rows yet.");
    }
}
